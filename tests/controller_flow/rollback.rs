use super::Harness;
use anyhow::{bail, Result};
use cad_tag_creator::core::LayerRef;
use cad_tag_creator::{DrawingBackend, EntityRef, MemoryDrawing, Point, TagLabel};

/// Zeichnung, die Linien- oder Flächen-Marker und Löschungen auf Wunsch verweigert
#[derive(Default)]
struct FailingDrawing {
    inner: MemoryDrawing,
    fail_lines: bool,
    fail_areas: bool,
    /// Anzahl Löschungen, die noch gelingen; danach schlägt jede fehl
    deletes_before_failure: Option<usize>,
}

impl DrawingBackend for FailingDrawing {
    fn current_layer(&self) -> String {
        self.inner.current_layer()
    }

    fn set_current_layer(&mut self, name: &str) -> Result<()> {
        self.inner.set_current_layer(name)
    }

    fn create_or_get_layer(&mut self, name: &str) -> Result<LayerRef> {
        self.inner.create_or_get_layer(name)
    }

    fn set_marker_scale(&mut self, scale: f64) {
        self.inner.set_marker_scale(scale);
    }

    fn render_node(
        &mut self,
        position: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        self.inner.render_node(position, layer, label)
    }

    fn render_line(
        &mut self,
        start: Point,
        end: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        if self.fail_lines {
            bail!("Linie {} abgelehnt", label);
        }
        self.inner.render_line(start, end, layer, label)
    }

    fn render_area(
        &mut self,
        boundary: &[Point],
        centroid: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        if self.fail_areas {
            bail!("Fläche {} abgelehnt", label);
        }
        self.inner.render_area(boundary, centroid, layer, label)
    }

    fn delete_entity(&mut self, entity: EntityRef) -> Result<()> {
        match self.deletes_before_failure {
            Some(0) => bail!("Löschen von {:?} abgelehnt", entity),
            Some(remaining) => self.deletes_before_failure = Some(remaining - 1),
            None => {}
        }
        self.inner.delete_entity(entity)
    }
}

#[test]
fn test_failed_line_rolls_back_node_of_same_click() {
    let mut harness = Harness::with_drawing(FailingDrawing::default());
    harness.start("R", 1, true).expect("Start");
    harness.click(0.0, 0.0).expect("Klick");

    harness.drawing.fail_lines = true;
    let result = harness.click(10.0, 0.0);

    assert!(result.is_err());
    assert_eq!(harness.counts(), (1, 0, 0));
    assert_eq!(harness.drawing.inner.entities().len(), 1);
    assert_eq!(harness.state.session.next_node_seq, 2);
    assert_eq!(harness.chain_labels(), ["P-R-0001"]);
    assert!(harness.last_message().starts_with("Fehler:"));

    harness.drawing.fail_lines = false;
    harness.click(10.0, 0.0).expect("Wiederholung sollte gelingen");
    assert_eq!(harness.node_labels(), ["P-R-0001", "P-R-0002"]);
    assert_eq!(harness.line_labels(), ["L-R-0001"]);
    assert_eq!(harness.drawing.inner.entities().len(), 3);
}

#[test]
fn test_failed_area_rolls_back_closing_line() {
    let mut harness = Harness::with_drawing(FailingDrawing::default());
    harness.start("R", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    harness.drawing.fail_areas = true;
    assert!(harness.click(0.0, 0.0).is_err());

    assert_eq!(harness.counts(), (3, 2, 0));
    assert_eq!(harness.drawing.inner.entities().len(), 5);
    assert_eq!(harness.chain_labels().len(), 3);

    harness.drawing.fail_areas = false;
    harness.click(0.0, 0.0).expect("Schließen sollte gelingen");
    assert_eq!(harness.counts(), (3, 3, 1));
    assert!(harness.chain_labels().is_empty());
}

/// Jede Entity der Sitzung muss in der Zeichnung existieren
fn assert_engine_matches_drawing(harness: &Harness<FailingDrawing>) {
    let map = &harness.state.tag_map;
    let refs: Vec<EntityRef> = map
        .nodes()
        .iter()
        .map(|n| n.entity)
        .chain(map.lines().iter().map(|l| l.entity))
        .chain(map.areas().iter().map(|a| a.entity))
        .collect();
    assert_eq!(refs.len(), harness.drawing.inner.entities().len());
    for entity in refs {
        assert!(
            harness.drawing.inner.entity(entity).is_some(),
            "Entity {entity:?} fehlt in der Zeichnung"
        );
    }
}

#[test]
fn test_failed_undo_redraws_already_deleted_markers() {
    let mut harness = Harness::with_drawing(FailingDrawing::default());
    harness.start("R", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    // Linie L-R-0002 wird gelöscht, der Knoten P-R-0003 nicht mehr
    harness.drawing.deletes_before_failure = Some(1);
    assert!(harness.undo().is_err());

    assert_eq!(harness.counts(), (3, 2, 0));
    assert_engine_matches_drawing(&harness);
    let line = &harness.state.tag_map.lines()[1];
    let drawn = harness
        .drawing
        .inner
        .entity(line.entity)
        .expect("Linie sollte neu gezeichnet sein");
    assert_eq!(drawn.label, "L-R-0002");
    assert_eq!(harness.chain_labels(), ["P-R-0001", "P-R-0002", "P-R-0003"]);

    harness.drawing.deletes_before_failure = None;
    harness.undo().expect("Wiederholtes Undo sollte gelingen");
    assert_eq!(harness.counts(), (2, 1, 0));
    assert_engine_matches_drawing(&harness);
}

#[test]
fn test_failed_undo_redraws_deleted_area() {
    let mut harness = Harness::with_drawing(FailingDrawing::default());
    harness.start("R", 1, true).expect("Start");
    harness.click_all(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]);

    // Beide Linien und die Fläche werden gelöscht, der Knoten nicht mehr
    harness.drawing.deletes_before_failure = Some(3);
    assert!(harness.undo().is_err());

    assert_eq!(harness.counts(), (3, 3, 1));
    assert_engine_matches_drawing(&harness);
    assert!(harness.chain_labels().is_empty());
}
