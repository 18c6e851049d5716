use super::Harness;
use cad_tag_creator::{EntityKind, Point};

const PENTAGON: [(f64, f64); 5] = [
    (0.0, 0.0),
    (10.0, 0.0),
    (13.0, 8.0),
    (5.0, 14.0),
    (-3.0, 8.0),
];

fn closed_pentagon() -> Harness {
    let mut harness = Harness::new();
    harness.start("P", 1, true).expect("Start");
    harness.click_all(&PENTAGON);
    harness.click(0.0, 0.0).expect("Schließen");
    assert_eq!(harness.counts(), (5, 5, 1));
    harness
}

#[test]
fn test_undo_cascades_to_lines_and_area() {
    let mut harness = closed_pentagon();

    harness.undo().expect("Undo");

    assert_eq!(
        harness.node_labels(),
        ["P-P-0001", "P-P-0002", "P-P-0003", "P-P-0004"]
    );
    assert_eq!(harness.line_labels(), ["L-P-0001", "L-P-0002", "L-P-0003"]);
    assert!(harness.area_labels().is_empty());

    assert_eq!(harness.drawing.count_of(EntityKind::Node), 4);
    assert_eq!(harness.drawing.count_of(EntityKind::Line), 3);
    assert_eq!(harness.drawing.count_of(EntityKind::Area), 0);

    // Umlauf der entfernten Fläche wird zur Kette
    assert_eq!(
        harness.chain_labels(),
        ["P-P-0001", "P-P-0002", "P-P-0003", "P-P-0004"]
    );
    assert_eq!(
        harness.state.session.previous_point,
        Some(Point::new(5.0, 14.0))
    );
    assert_eq!(harness.state.session.next_node_seq, 5);
    assert_eq!(harness.state.session.next_line_seq, 4);
    assert_eq!(harness.last_message(), "Letzter Knoten rückgängig gemacht");

    // Zweites Undo entfernt den vierten Knoten samt seiner Linie
    harness.undo().expect("Zweites Undo");

    assert_eq!(harness.node_labels(), ["P-P-0001", "P-P-0002", "P-P-0003"]);
    assert_eq!(harness.line_labels(), ["L-P-0001", "L-P-0002"]);
    assert!(harness.area_labels().is_empty());
    assert_eq!(harness.chain_labels(), ["P-P-0001", "P-P-0002", "P-P-0003"]);
    assert_eq!(
        harness.state.session.previous_point,
        Some(Point::new(13.0, 8.0))
    );
    assert_eq!(harness.state.session.next_node_seq, 4);
    assert_eq!(harness.state.session.next_line_seq, 3);
    assert_eq!(harness.drawing.entities().len(), 5);
}

#[test]
fn test_contour_can_be_closed_again_after_undo() {
    let mut harness = closed_pentagon();
    harness.undo().expect("Undo");

    harness.click(0.0, 0.0).expect("Schließen");

    assert_eq!(harness.counts(), (4, 4, 1));
    assert_eq!(harness.area_labels(), ["A-P-0001"]);
    let closing = &harness.state.tag_map.lines()[3];
    assert_eq!(closing.label.to_string(), "L-P-0004");
    assert_eq!(closing.start, Point::new(5.0, 14.0));
    assert_eq!(closing.end, Point::new(0.0, 0.0));
}

#[test]
fn test_undo_until_empty() {
    let mut harness = Harness::new();
    harness.start("E", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0)]);

    harness.undo().expect("Undo");
    assert_eq!(harness.counts(), (1, 0, 0));
    assert_eq!(
        harness.state.session.previous_point,
        Some(Point::new(0.0, 0.0))
    );

    harness.undo().expect("Undo");
    assert_eq!(harness.counts(), (0, 0, 0));
    assert!(harness.state.session.previous_point.is_none());
    assert_eq!(harness.state.session.next_node_seq, 1);

    harness.undo().expect("Undo ohne Knoten ist kein Fehler");
    assert_eq!(harness.last_message(), "Nichts rückgängig zu machen");
    assert_eq!(harness.state.session.next_node_seq, 1);
    assert!(harness.drawing.entities().is_empty());
}

#[test]
fn test_undo_only_touches_active_prefix() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0)]);
    harness.end().expect("Ende");

    harness.start("B", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0)]);

    harness.undo().expect("Undo");

    assert_eq!(harness.node_labels(), ["P-A-0001", "P-A-0002", "P-B-0001"]);
    assert_eq!(harness.line_labels(), ["L-A-0001"]);
}

#[test]
fn test_undo_reaches_nodes_of_earlier_run() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
    harness.end().expect("Ende");
    harness.start("A", 4, true).expect("Fortsetzung");

    harness.undo().expect("Undo");

    assert_eq!(harness.node_labels(), ["P-A-0001", "P-A-0002"]);
    assert_eq!(harness.line_labels(), ["L-A-0001"]);
    assert_eq!(harness.state.session.next_node_seq, 3);
    assert_eq!(harness.state.session.next_line_seq, 2);
}

#[test]
fn test_undo_without_active_run_fails() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click(0.0, 0.0).expect("Klick");
    harness.end().expect("Ende");

    assert!(harness.undo().is_err());
    assert_eq!(harness.counts(), (1, 0, 0));
}
