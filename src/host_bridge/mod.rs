//! Schnittstelle zwischen Tagging-Engine und Host-Anwendung.
//!
//! Die Engine kennt weder CAD-API noch Tabellenkalkulation. Sie spricht nur mit
//! drei Kollaborateuren:
//! - `DrawingBackend`: Layer und Marker in der Zeichnung anlegen/löschen
//! - `InteractionSurface`: Rückmeldungen an die Eingabemaske
//! - `TabularExporter`: Zeilen-Tabellen beim Abschluss schreiben
//!
//! `HostBridge` bündelt die drei für die Dauer eines Events und führt ein
//! Journal der gerenderten und gelöschten Entities. Ein abgebrochenes Event
//! entfernt damit seine neuen Marker; gelöschte Marker meldet es zurück, damit
//! der Controller sie aus dem wiederhergestellten Zustand neu zeichnet.

pub mod memory;
pub mod script;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::{EntityRef, LayerRef, Point, TagLabel};
use crate::export::ExportTables;

pub use memory::{MemoryDrawing, MemoryExporter, PrefixSummary, RecordingSurface};
pub use script::{parse_script_line, ScriptEvent};

/// Zähler der Entities einer Sitzung
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Anzahl Knoten
    pub nodes: usize,
    /// Anzahl Linien
    pub lines: usize,
    /// Anzahl Flächen
    pub areas: usize,
}

/// Zeichnungs-Backend (CAD-Dokument oder In-Memory-Zeichnung)
pub trait DrawingBackend {
    /// Name des aktuell aktiven Layers
    fn current_layer(&self) -> String;

    /// Aktiviert einen vorhandenen Layer
    fn set_current_layer(&mut self, name: &str) -> Result<()>;

    /// Legt einen Layer an oder liefert den vorhandenen
    fn create_or_get_layer(&mut self, name: &str) -> Result<LayerRef>;

    /// Setzt den Maßstab für Kreisradius und Texthöhe folgender Marker
    fn set_marker_scale(&mut self, scale: f64);

    /// Zeichnet einen Knoten-Marker
    fn render_node(&mut self, position: Point, layer: &str, label: &TagLabel) -> Result<EntityRef>;

    /// Zeichnet einen Linien-Marker
    fn render_line(
        &mut self,
        start: Point,
        end: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef>;

    /// Zeichnet einen Flächen-Marker
    fn render_area(
        &mut self,
        boundary: &[Point],
        centroid: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef>;

    /// Löscht eine Entity. Bereits gelöschte Referenzen sind ein No-op.
    fn delete_entity(&mut self, entity: EntityRef) -> Result<()>;
}

/// Eingabemaske der Host-Anwendung (empfängt Rückmeldungen der Engine)
pub trait InteractionSurface {
    /// Neue Zählerstände nach einer Mutation
    fn on_statistics(&mut self, statistics: Statistics);

    /// Vorschlag für die Startnummer des nächsten Laufs
    fn on_next_start_number(&mut self, seq: u32);

    /// Meldung an den Bediener (Warnungen, Zusammenfassungen)
    fn on_message(&mut self, message: &str);
}

/// Schreibt die Export-Tabellen und liefert den Zielbezeichner (z.B. Dateipfad)
pub trait TabularExporter {
    /// Exportiert die Tabellen
    fn export(&mut self, tables: &ExportTables) -> Result<String>;
}

/// Bündelt die Kollaborateure für die Verarbeitung von Events.
pub struct HostBridge<'a> {
    drawing: &'a mut dyn DrawingBackend,
    surface: &'a mut dyn InteractionSurface,
    exporter: &'a mut dyn TabularExporter,
    rendered: Vec<EntityRef>,
    deleted: Vec<EntityRef>,
}

impl<'a> HostBridge<'a> {
    /// Erstellt eine neue Bridge
    pub fn new(
        drawing: &'a mut dyn DrawingBackend,
        surface: &'a mut dyn InteractionSurface,
        exporter: &'a mut dyn TabularExporter,
    ) -> Self {
        Self {
            drawing,
            surface,
            exporter,
            rendered: Vec::new(),
            deleted: Vec::new(),
        }
    }

    // ── Journal ─────────────────────────────────────────────────

    /// Startet ein neues Event (leert das Journal)
    pub fn begin_event(&mut self) {
        self.rendered.clear();
        self.deleted.clear();
    }

    /// Übernimmt alle im Event gerenderten und gelöschten Entities
    pub fn commit_event(&mut self) {
        self.rendered.clear();
        self.deleted.clear();
    }

    /// Löscht alle im abgebrochenen Event gerenderten Entities wieder und
    /// liefert die im Event bereits gelöschten Entities zum Neuzeichnen.
    ///
    /// Fehler beim Löschen werden nur geloggt; das Event ist bereits fehlgeschlagen.
    pub fn rollback_event(&mut self) -> Vec<EntityRef> {
        for entity in self.rendered.drain(..).rev() {
            if let Err(e) = self.drawing.delete_entity(entity) {
                log::warn!(
                    "Rollback: Entity {:?} konnte nicht gelöscht werden: {}",
                    entity,
                    e
                );
            }
        }
        std::mem::take(&mut self.deleted)
    }

    /// Anzahl der im laufenden Event gerenderten Entities
    pub fn rendered_in_event(&self) -> usize {
        self.rendered.len()
    }

    // ── Zeichnung ───────────────────────────────────────────────

    /// Name des aktuell aktiven Layers
    pub fn current_layer(&self) -> String {
        self.drawing.current_layer()
    }

    /// Legt den Layer an (falls nötig) und aktiviert ihn
    pub fn activate_layer(&mut self, name: &str) -> Result<LayerRef> {
        let layer = self.drawing.create_or_get_layer(name)?;
        self.drawing.set_current_layer(name)?;
        Ok(layer)
    }

    /// Aktiviert einen vorhandenen Layer
    pub fn set_current_layer(&mut self, name: &str) -> Result<()> {
        self.drawing.set_current_layer(name)
    }

    /// Setzt den Marker-Maßstab
    pub fn set_marker_scale(&mut self, scale: f64) {
        self.drawing.set_marker_scale(scale);
    }

    /// Zeichnet einen Knoten-Marker und merkt ihn im Journal
    pub fn render_node(
        &mut self,
        position: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        let entity = self.drawing.render_node(position, layer, label)?;
        self.rendered.push(entity);
        Ok(entity)
    }

    /// Zeichnet einen Linien-Marker und merkt ihn im Journal
    pub fn render_line(
        &mut self,
        start: Point,
        end: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        let entity = self.drawing.render_line(start, end, layer, label)?;
        self.rendered.push(entity);
        Ok(entity)
    }

    /// Zeichnet einen Flächen-Marker und merkt ihn im Journal
    pub fn render_area(
        &mut self,
        boundary: &[Point],
        centroid: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        let entity = self.drawing.render_area(boundary, centroid, layer, label)?;
        self.rendered.push(entity);
        Ok(entity)
    }

    /// Löscht eine Entity aus der Zeichnung und merkt sie im Journal
    pub fn delete_entity(&mut self, entity: EntityRef) -> Result<()> {
        self.drawing.delete_entity(entity)?;
        self.deleted.push(entity);
        Ok(())
    }

    // ── Eingabemaske ────────────────────────────────────────────

    /// Meldet neue Zählerstände
    pub fn publish_statistics(&mut self, statistics: Statistics) {
        self.surface.on_statistics(statistics);
    }

    /// Meldet die Startnummer für den nächsten Lauf
    pub fn publish_next_start_number(&mut self, seq: u32) {
        self.surface.on_next_start_number(seq);
    }

    /// Meldet eine Nachricht an den Bediener
    pub fn notify(&mut self, message: &str) {
        self.surface.on_message(message);
    }

    // ── Export ──────────────────────────────────────────────────

    /// Übergibt die Tabellen an den Exporter
    pub fn export(&mut self, tables: &ExportTables) -> Result<String> {
        self.exporter.export(tables)
    }
}
