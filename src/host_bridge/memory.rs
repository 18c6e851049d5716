//! In-Memory-Implementierungen der Host-Kollaborateure.
//!
//! `MemoryDrawing` bildet die Marker-Geometrie eines CAD-Dokuments nach
//! (Kreis, Fadenkreuz, Texte, Polylinien) und ist serialisierbar, damit der
//! Script-Treiber das Ergebnis als JSON ablegen kann.

use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::Serialize;

use super::{DrawingBackend, InteractionSurface, Statistics, TabularExporter};
use crate::core::{EntityKind, EntityRef, LayerRef, Point, TagLabel};
use crate::export::ExportTables;
use crate::shared::options::{CROSSHAIR_FACTOR, DEFAULT_SCALE};
use crate::shared::TagOptions;

/// Name des Layers, der in einer frischen Zeichnung aktiv ist
pub const DEFAULT_LAYER: &str = "0";

/// AutoCAD-Farbindex Rot
const COLOR_RED: u8 = 1;
/// AutoCAD-Farbindex Weiß
const COLOR_WHITE: u8 = 7;

/// Ein Layer der In-Memory-Zeichnung
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawingLayer {
    /// Handle
    pub id: LayerRef,
    /// Farbindex
    pub color: u8,
    /// Wird geplottet
    pub plottable: bool,
}

/// Ein geometrisches Grundelement eines Markers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Kreis
    Circle { center: Point, radius: f64 },
    /// Strecke
    Segment { start: Point, end: Point },
    /// Polylinie (optional geschlossen)
    Polyline { points: Vec<Point>, closed: bool },
    /// Einzeiliger Text, zentriert an `position`
    Text {
        position: Point,
        height: f64,
        content: String,
    },
}

/// Ein gezeichneter Marker (Gruppe von Grundelementen)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawingEntity {
    /// Entity-Art
    pub kind: EntityKind,
    /// Label-Text
    pub label: String,
    /// Layer
    pub layer: String,
    /// Grundelemente
    pub shapes: Vec<Shape>,
}

/// Marker-Bestand eines Präfixes, aus den Label-Texten der Zeichnung gelesen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrefixSummary {
    /// Anzahl Knoten-Marker
    pub nodes: usize,
    /// Anzahl Linien-Marker
    pub lines: usize,
    /// Anzahl Flächen-Marker
    pub areas: usize,
    /// Höchste Knotennummer
    pub max_node_seq: u32,
}

/// In-Memory-Zeichnung mit Layern und Markern
#[derive(Debug, Clone, Serialize)]
pub struct MemoryDrawing {
    layers: IndexMap<String, DrawingLayer>,
    entities: IndexMap<EntityRef, DrawingEntity>,
    current_layer: String,
    scale: f64,
    node_radius_factor: f64,
    text_height_factor: f64,
    next_id: u64,
}

impl Default for MemoryDrawing {
    fn default() -> Self {
        Self::new(&TagOptions::default())
    }
}

impl MemoryDrawing {
    /// Erstellt eine leere Zeichnung mit dem Standard-Layer `0`
    pub fn new(options: &TagOptions) -> Self {
        let mut layers = IndexMap::new();
        layers.insert(
            DEFAULT_LAYER.to_string(),
            DrawingLayer {
                id: LayerRef(0),
                color: COLOR_WHITE,
                plottable: true,
            },
        );
        Self {
            layers,
            entities: IndexMap::new(),
            current_layer: DEFAULT_LAYER.to_string(),
            scale: DEFAULT_SCALE,
            node_radius_factor: options.node_radius_factor,
            text_height_factor: options.text_height_factor,
            next_id: 1,
        }
    }

    /// Alle Layer in Anlege-Reihenfolge
    pub fn layers(&self) -> &IndexMap<String, DrawingLayer> {
        &self.layers
    }

    /// Alle lebenden Entities in Anlege-Reihenfolge
    pub fn entities(&self) -> &IndexMap<EntityRef, DrawingEntity> {
        &self.entities
    }

    /// Entity über ihr Handle
    pub fn entity(&self, entity: EntityRef) -> Option<&DrawingEntity> {
        self.entities.get(&entity)
    }

    /// Anzahl lebender Entities einer Art
    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind == kind).count()
    }

    /// Fasst die Marker je Präfix zusammen. Texte ohne gültiges Label werden übersprungen.
    pub fn prefix_summary(&self) -> IndexMap<String, PrefixSummary> {
        let mut summary: IndexMap<String, PrefixSummary> = IndexMap::new();
        for entity in self.entities.values() {
            let Some(label) = TagLabel::parse(&entity.label) else {
                log::debug!("Marker ohne gültiges Label: '{}'", entity.label);
                continue;
            };
            let entry = summary.entry(label.prefix).or_default();
            match label.kind {
                EntityKind::Node => {
                    entry.nodes += 1;
                    entry.max_node_seq = entry.max_node_seq.max(label.seq);
                }
                EntityKind::Line => entry.lines += 1,
                EntityKind::Area => entry.areas += 1,
            }
        }
        summary
    }

    /// Aktueller Marker-Maßstab
    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn ensure_layer(&self, layer: &str) -> Result<()> {
        if !self.layers.contains_key(layer) {
            bail!("Layer '{}' existiert nicht", layer);
        }
        Ok(())
    }

    fn insert(&mut self, entity: DrawingEntity) -> EntityRef {
        let id = EntityRef(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    fn radius(&self) -> f64 {
        self.node_radius_factor * self.scale
    }

    fn text_height(&self) -> f64 {
        self.text_height_factor * self.scale
    }
}

impl DrawingBackend for MemoryDrawing {
    fn current_layer(&self) -> String {
        self.current_layer.clone()
    }

    fn set_current_layer(&mut self, name: &str) -> Result<()> {
        self.ensure_layer(name)?;
        self.current_layer = name.to_string();
        Ok(())
    }

    fn create_or_get_layer(&mut self, name: &str) -> Result<LayerRef> {
        if name.is_empty() {
            bail!("Layer-Name darf nicht leer sein");
        }
        if let Some(layer) = self.layers.get(name) {
            return Ok(layer.id);
        }
        let id = LayerRef(self.layers.len() as u64);
        self.layers.insert(
            name.to_string(),
            DrawingLayer {
                id,
                color: COLOR_RED,
                plottable: false,
            },
        );
        log::debug!("Layer '{}' angelegt", name);
        Ok(id)
    }

    fn set_marker_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn render_node(&mut self, position: Point, layer: &str, label: &TagLabel) -> Result<EntityRef> {
        self.ensure_layer(layer)?;
        let radius = self.radius();
        let arm = radius * CROSSHAIR_FACTOR;
        let text_height = self.text_height();
        let shapes = vec![
            Shape::Circle {
                center: position,
                radius,
            },
            Shape::Segment {
                start: position - Point::new(arm, 0.0),
                end: position + Point::new(arm, 0.0),
            },
            Shape::Segment {
                start: position - Point::new(0.0, arm),
                end: position + Point::new(0.0, arm),
            },
            Shape::Text {
                position: position + Point::new(0.0, radius + text_height),
                height: text_height,
                content: label.to_string(),
            },
        ];
        Ok(self.insert(DrawingEntity {
            kind: EntityKind::Node,
            label: label.to_string(),
            layer: layer.to_string(),
            shapes,
        }))
    }

    fn render_line(
        &mut self,
        start: Point,
        end: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        self.ensure_layer(layer)?;
        let shapes = vec![
            Shape::Segment { start, end },
            Shape::Text {
                position: (start + end) * 0.5,
                height: self.text_height(),
                content: label.to_string(),
            },
        ];
        Ok(self.insert(DrawingEntity {
            kind: EntityKind::Line,
            label: label.to_string(),
            layer: layer.to_string(),
            shapes,
        }))
    }

    fn render_area(
        &mut self,
        boundary: &[Point],
        centroid: Point,
        layer: &str,
        label: &TagLabel,
    ) -> Result<EntityRef> {
        self.ensure_layer(layer)?;
        if boundary.len() < 3 {
            bail!(
                "Fläche {} benötigt mindestens 3 Eckpunkte, erhalten: {}",
                label,
                boundary.len()
            );
        }
        let shapes = vec![
            Shape::Polyline {
                points: boundary.to_vec(),
                closed: true,
            },
            Shape::Text {
                position: centroid,
                height: self.text_height(),
                content: label.to_string(),
            },
        ];
        Ok(self.insert(DrawingEntity {
            kind: EntityKind::Area,
            label: label.to_string(),
            layer: layer.to_string(),
            shapes,
        }))
    }

    fn delete_entity(&mut self, entity: EntityRef) -> Result<()> {
        // shift_remove erhält die Anlege-Reihenfolge der übrigen Entities
        self.entities.shift_remove(&entity);
        Ok(())
    }
}

/// Eingabemaske, die alle Rückmeldungen aufzeichnet
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// Gemeldete Zählerstände (chronologisch)
    pub statistics: Vec<Statistics>,
    /// Gemeldete Startnummern (chronologisch)
    pub start_numbers: Vec<u32>,
    /// Gemeldete Nachrichten (chronologisch)
    pub messages: Vec<String>,
}

impl RecordingSurface {
    /// Erstellt eine leere Aufzeichnung
    pub fn new() -> Self {
        Self::default()
    }

    /// Zuletzt gemeldete Zählerstände
    pub fn last_statistics(&self) -> Option<Statistics> {
        self.statistics.last().copied()
    }
}

impl InteractionSurface for RecordingSurface {
    fn on_statistics(&mut self, statistics: Statistics) {
        self.statistics.push(statistics);
    }

    fn on_next_start_number(&mut self, seq: u32) {
        self.start_numbers.push(seq);
    }

    fn on_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Exporter, der die Tabellen nur im Speicher ablegt
#[derive(Debug, Clone, Default)]
pub struct MemoryExporter {
    /// Alle exportierten Tabellen (chronologisch)
    pub exports: Vec<ExportTables>,
}

impl MemoryExporter {
    /// Erstellt einen leeren Exporter
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabularExporter for MemoryExporter {
    fn export(&mut self, tables: &ExportTables) -> Result<String> {
        self.exports.push(tables.clone());
        Ok(format!("memory://export/{}", self.exports.len()))
    }
}
