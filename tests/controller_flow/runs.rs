use super::Harness;
use cad_tag_creator::{DrawingBackend, EntityKind, Point, SessionPhase};

#[test]
fn test_invalid_run_input_is_rejected() {
    let cases: [(&str, i64); 5] = [("", 1), ("   ", 1), ("A-B", 1), ("A B", 1), ("K1", 0)];

    for (prefix, start_seq) in cases {
        let mut harness = Harness::new();
        let result = harness.start(prefix, start_seq, true);

        assert!(result.is_err(), "Präfix '{prefix}', Start {start_seq}");
        assert_eq!(harness.state.session.phase, SessionPhase::Idle);
        assert!(harness.state.session.original_layer.is_none());
        assert!(harness.last_message().starts_with("Fehler:"));
    }
}

#[test]
fn test_invalid_scale_is_rejected() {
    let mut harness = Harness::new();
    let result = harness.send(cad_tag_creator::AppIntent::StartRunRequested {
        prefix: "K1".to_string(),
        start_seq: 1,
        create_lines: true,
        scale: 0.0,
    });

    assert!(result.is_err());
    assert_eq!(harness.state.session.phase, SessionPhase::Idle);
    assert_eq!(harness.drawing.current_layer(), "0");
}

#[test]
fn test_start_trims_prefix_and_activates_layer() {
    let mut harness = Harness::new();
    harness.start("  K1 ", 1, true).expect("Start");

    assert_eq!(harness.state.session.prefix(), "K1");
    assert_eq!(harness.state.session.layer, "BLOCK_K1");
    assert_eq!(harness.drawing.current_layer(), "BLOCK_K1");
    let layer = harness
        .drawing
        .layers()
        .get("BLOCK_K1")
        .expect("Layer sollte angelegt sein");
    assert!(!layer.plottable);
    assert_eq!(harness.state.session.original_layer.as_deref(), Some("0"));

    harness.click(1.0, 2.0).expect("Klick");
    assert_eq!(harness.node_labels(), ["P-K1-0001"]);
}

#[test]
fn test_end_run_pushes_next_start_number_and_keeps_entities() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);

    harness.end().expect("Ende");

    assert_eq!(harness.surface.start_numbers, vec![4]);
    assert_eq!(harness.state.session.phase, SessionPhase::Paused);
    assert!(harness.chain_labels().is_empty());
    assert_eq!(harness.counts(), (3, 2, 0));
    assert!(harness.click(30.0, 0.0).is_err());
    assert!(harness.end().is_err());
}

#[test]
fn test_resume_continues_line_numbers_of_same_prefix() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
    harness.end().expect("Ende");

    harness.start("A", 4, true).expect("Fortsetzung");
    assert_eq!(harness.state.session.next_line_seq, 3);
    assert_eq!(harness.state.session.next_node_seq, 4);
    assert_eq!(harness.state.session.original_layer.as_deref(), Some("0"));

    harness.click_all(&[(0.0, 50.0), (10.0, 50.0)]);
    assert_eq!(
        harness.node_labels(),
        ["P-A-0001", "P-A-0002", "P-A-0003", "P-A-0004", "P-A-0005"]
    );
    assert_eq!(harness.line_labels(), ["L-A-0001", "L-A-0002", "L-A-0003"]);
}

#[test]
fn test_resume_with_other_prefix_starts_lines_at_start_number() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
    harness.end().expect("Ende");

    harness.start("B", 7, true).expect("Fortsetzung");
    assert_eq!(harness.state.session.next_line_seq, 7);

    // Linien-Nummern folgen trotzdem dem Maximum des Präfixes
    harness.click_all(&[(0.0, 50.0), (10.0, 50.0)]);
    assert_eq!(harness.node_labels()[3..], ["P-B-0007", "P-B-0008"]);
    assert_eq!(harness.line_labels()[2..], ["L-B-0001"]);
}

#[test]
fn test_prefixes_are_isolated() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0)]);
    harness.end().expect("Ende");

    // Gleiche Position, anderes Präfix: neuer Knoten
    harness.start("B", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0)]);

    assert_eq!(
        harness.node_labels(),
        ["P-A-0001", "P-A-0002", "P-B-0001", "P-B-0002"]
    );
    assert_eq!(harness.line_labels(), ["L-A-0001", "L-B-0001"]);
    assert_eq!(harness.drawing.layers().len(), 3);

    let b_node = &harness.state.tag_map.nodes()[2];
    assert_eq!(b_node.layer, "BLOCK_B");
}

#[test]
fn test_reused_node_from_earlier_run_snaps_line_endpoint() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0)]);
    harness.end().expect("Ende");

    harness.start("A", 3, true).expect("Fortsetzung");
    harness.click_all(&[(10.3, 0.4), (10.0, 10.0)]);

    assert_eq!(harness.node_labels(), ["P-A-0001", "P-A-0002", "P-A-0003"]);
    let line = &harness.state.tag_map.lines()[1];
    assert_eq!(line.label.to_string(), "L-A-0002");
    assert_eq!(line.start, Point::new(10.0, 0.0));
}

#[test]
fn test_overlapping_start_number_reuses_label() {
    let mut harness = Harness::new();
    harness.start("A", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0)]);
    harness.end().expect("Ende");

    harness.start("A", 1, true).expect("Fortsetzung");
    harness.click(50.0, 50.0).expect("Klick");

    assert_eq!(
        harness.node_labels(),
        ["P-A-0001", "P-A-0002", "P-A-0001"]
    );
}

#[test]
fn test_labels_are_unique_with_fresh_start_numbers() {
    let mut harness = Harness::new();
    harness.start("U", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]);
    harness.click_all(&[(30.0, 0.0), (40.0, 0.0), (40.0, 10.0), (30.0, 0.0)]);
    harness.end().expect("Ende");
    let next = *harness.surface.start_numbers.last().expect("Startnummer");
    harness.start("U", i64::from(next), true).expect("Fortsetzung");
    harness.click_all(&[(60.0, 0.0), (70.0, 0.0)]);

    let mut labels = harness.node_labels();
    labels.extend(harness.line_labels());
    labels.extend(harness.area_labels());
    let total = labels.len();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), total);
    assert_eq!(harness.counts(), (8, 7, 2));
}

#[test]
fn test_finish_exports_resets_and_restores_layer() {
    let mut harness = Harness::new();
    harness.start("F", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]);

    harness.finish().expect("Abschluss");

    assert_eq!(harness.exporter.exports.len(), 1);
    let tables = &harness.exporter.exports[0];
    assert_eq!(tables.nodes.len(), 3);
    assert_eq!(tables.lines.len(), 3);
    assert_eq!(tables.areas.len(), 1);
    assert_eq!(tables.lines[2].start_node, "P-F-0003");
    assert_eq!(tables.lines[2].end_node, "P-F-0001");
    assert_eq!(
        tables.areas[0].node_labels,
        ["P-F-0001", "P-F-0002", "P-F-0003"]
    );

    assert_eq!(
        harness.last_message(),
        "Erstellung abgeschlossen: 3 Knoten, 3 Linien, 1 Flächen. Export: memory://export/1"
    );
    assert_eq!(harness.drawing.current_layer(), "0");
    assert_eq!(harness.counts(), (0, 0, 0));
    assert_eq!(harness.state.session.phase, SessionPhase::Idle);
    assert!(harness.state.session.original_layer.is_none());
    assert_eq!(
        harness.state.last_export.as_deref(),
        Some("memory://export/1")
    );
    // Marker bleiben in der Zeichnung
    assert_eq!(harness.drawing.count_of(EntityKind::Node), 3);

    // Neue Sitzung beginnt frisch
    harness.start("F", 1, true).expect("Neuer Start");
    harness.click(0.0, 0.0).expect("Klick");
    assert_eq!(harness.node_labels(), ["P-F-0001"]);
}

#[test]
fn test_finish_without_entities_skips_export() {
    let mut harness = Harness::new();

    harness.finish().expect("Abschluss ohne Daten");

    assert!(harness.exporter.exports.is_empty());
    assert_eq!(harness.last_message(), "Keine Daten zum Exportieren");
    assert!(harness.state.last_export.is_none());
}
