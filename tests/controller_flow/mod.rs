//! Gemeinsames Test-Gerüst für Controller-Abläufe gegen die In-Memory-Zeichnung.

mod rollback;
mod runs;
mod undo;

use cad_tag_creator::host_bridge::{MemoryExporter, RecordingSurface};
use cad_tag_creator::{
    AppController, AppIntent, AppState, DrawingBackend, HostBridge, MemoryDrawing, Point,
};

/// Controller, State und Host-Kollaborateure eines Testlaufs
pub struct Harness<D: DrawingBackend = MemoryDrawing> {
    pub state: AppState,
    pub controller: AppController,
    pub drawing: D,
    pub surface: RecordingSurface,
    pub exporter: MemoryExporter,
}

impl Harness<MemoryDrawing> {
    pub fn new() -> Self {
        Self::with_drawing(MemoryDrawing::default())
    }
}

impl<D: DrawingBackend> Harness<D> {
    pub fn with_drawing(drawing: D) -> Self {
        Self {
            state: AppState::new(),
            controller: AppController::new(),
            drawing,
            surface: RecordingSurface::new(),
            exporter: MemoryExporter::new(),
        }
    }

    /// Führt `f` mit einer HostBridge über die Kollaborateure aus
    pub fn with_host<R>(&mut self, f: impl FnOnce(&mut HostBridge<'_>) -> R) -> R {
        let mut host = HostBridge::new(&mut self.drawing, &mut self.surface, &mut self.exporter);
        f(&mut host)
    }

    pub fn send(&mut self, intent: AppIntent) -> anyhow::Result<()> {
        let mut host = HostBridge::new(&mut self.drawing, &mut self.surface, &mut self.exporter);
        self.controller.handle_intent(&mut self.state, &mut host, intent)
    }

    pub fn start(
        &mut self,
        prefix: &str,
        start_seq: i64,
        create_lines: bool,
    ) -> anyhow::Result<()> {
        self.send(AppIntent::StartRunRequested {
            prefix: prefix.to_string(),
            start_seq,
            create_lines,
            scale: 300.0,
        })
    }

    pub fn click(&mut self, x: f64, y: f64) -> anyhow::Result<()> {
        self.send(AppIntent::PointPicked {
            world_pos: Point::new(x, y),
        })
    }

    pub fn click_all(&mut self, points: &[(f64, f64)]) {
        for &(x, y) in points {
            self.click(x, y)
                .unwrap_or_else(|e| panic!("Klick auf ({x}, {y}) fehlgeschlagen: {e:#}"));
        }
    }

    pub fn undo(&mut self) -> anyhow::Result<()> {
        self.send(AppIntent::UndoRequested)
    }

    pub fn end(&mut self) -> anyhow::Result<()> {
        self.send(AppIntent::EndRunRequested)
    }

    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.send(AppIntent::FinishRequested)
    }

    pub fn node_labels(&self) -> Vec<String> {
        self.state
            .tag_map
            .nodes()
            .iter()
            .map(|n| n.label.to_string())
            .collect()
    }

    pub fn line_labels(&self) -> Vec<String> {
        self.state
            .tag_map
            .lines()
            .iter()
            .map(|l| l.label.to_string())
            .collect()
    }

    pub fn area_labels(&self) -> Vec<String> {
        self.state
            .tag_map
            .areas()
            .iter()
            .map(|a| a.label.to_string())
            .collect()
    }

    pub fn chain_labels(&self) -> Vec<String> {
        self.state
            .session
            .chain
            .iter()
            .map(|n| n.label.to_string())
            .collect()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.state.node_count(),
            self.state.line_count(),
            self.state.area_count(),
        )
    }

    pub fn last_message(&self) -> &str {
        self.surface.messages.last().map_or("", String::as_str)
    }
}
