//! Export-Adapter: TagMap → Zeilen-Tabellen für Knoten, Linien und Flächen.
//!
//! Linien speichern nur Koordinaten. Ihre Endpunkte werden hier über die Knoten
//! des Linien-Präfixes auf Labels aufgelöst; ohne Treffer bleibt die Zelle leer.

use serde::{Deserialize, Serialize};

use crate::core::TagMap;

/// Zeile der Knoten-Tabelle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub layer: String,
}

/// Zeile der Linien-Tabelle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRow {
    pub label: String,
    /// Aufgelöstes Start-Knoten-Label (leer ohne Treffer)
    pub start_node: String,
    /// Aufgelöstes End-Knoten-Label (leer ohne Treffer)
    pub end_node: String,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub length: f64,
    /// Winkel in Grad, [0°, 360°)
    pub angle: f64,
    pub layer: String,
}

/// Zeile der Flächen-Tabelle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRow {
    pub label: String,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub vertex_count: usize,
    pub layer: String,
    pub area: f64,
    /// Eckknoten-Labels in Umlauf-Reihenfolge
    pub node_labels: Vec<String>,
}

/// Die drei Tabellen eines Exports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportTables {
    pub nodes: Vec<NodeRow>,
    pub lines: Vec<LineRow>,
    pub areas: Vec<AreaRow>,
}

impl ExportTables {
    /// `true`, wenn keine Tabelle Zeilen enthält
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.lines.is_empty() && self.areas.is_empty()
    }

    /// Höchste Eckenzahl aller Flächen (Anzahl der `Knoten N`-Spalten)
    pub fn max_vertex_count(&self) -> usize {
        self.areas
            .iter()
            .map(|row| row.node_labels.len())
            .max()
            .unwrap_or(0)
    }
}

/// Baut die Export-Tabellen aus allen Entities der Sitzung.
///
/// Koordinaten, Längen und Flächen werden auf 3, Winkel auf 2 Nachkommastellen
/// gerundet. `tolerance` ist die Toleranz der Endpunkt-Auflösung.
pub fn build_tables(map: &TagMap, tolerance: f64) -> ExportTables {
    let nodes = map
        .nodes()
        .iter()
        .map(|node| NodeRow {
            label: node.label.to_string(),
            x: round_to(node.position.x, 3),
            y: round_to(node.position.y, 3),
            layer: node.layer.clone(),
        })
        .collect();

    let lines = map
        .lines()
        .iter()
        .map(|line| {
            let prefix = line.label.prefix.as_str();
            let resolve = |point| {
                map.resolve_node_label(prefix, point, tolerance)
                    .map(|label| label.to_string())
                    .unwrap_or_default()
            };
            LineRow {
                label: line.label.to_string(),
                start_node: resolve(line.start),
                end_node: resolve(line.end),
                start_x: round_to(line.start.x, 3),
                start_y: round_to(line.start.y, 3),
                end_x: round_to(line.end.x, 3),
                end_y: round_to(line.end.y, 3),
                length: round_to(line.length(), 3),
                angle: round_to(line.angle_degrees(), 2),
                layer: line.layer.clone(),
            }
        })
        .collect();

    let areas = map
        .areas()
        .iter()
        .map(|area| AreaRow {
            label: area.label.to_string(),
            centroid_x: round_to(area.centroid.x, 3),
            centroid_y: round_to(area.centroid.y, 3),
            vertex_count: area.vertex_count(),
            layer: area.layer.clone(),
            area: round_to(area.area, 3),
            node_labels: area.node_labels.iter().map(|l| l.to_string()).collect(),
        })
        .collect();

    ExportTables {
        nodes,
        lines,
        areas,
    }
}

/// Rundet auf `decimals` Nachkommastellen (Halbwerte zur geraden Ziffer).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
