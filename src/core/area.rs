//! Repräsentiert eine geschlossene Fläche aus den Knoten einer Kette.
//! Die Knoten-Labels stehen in Einfüge-Reihenfolge (Umlauf beim Klicken),
//! nicht in geometrischer Sortierung.

use super::geometry::{self, Point};
use super::{EntityRef, TagLabel, TagNode};

/// Eine Fläche (`A-<Präfix>-<NNNN>`)
#[derive(Debug, Clone, PartialEq)]
pub struct TagArea {
    /// Eindeutiges Label
    pub label: TagLabel,
    /// Schwerpunkt der Eckpunkte
    pub centroid: Point,
    /// Labels der Eckknoten in Umlauf-Reihenfolge
    pub node_labels: Vec<TagLabel>,
    /// Layer, auf dem der Marker liegt
    pub layer: String,
    /// Polygonfläche (vorzeichenlos)
    pub area: f64,
    /// Gerendertes Objekt im Zeichnungs-Backend
    pub entity: EntityRef,
}

impl TagArea {
    /// Erstellt eine Fläche aus den Knoten der Kette; Schwerpunkt und Fläche werden berechnet.
    pub fn from_nodes(
        label: TagLabel,
        nodes: &[TagNode],
        layer: String,
        entity: EntityRef,
    ) -> Self {
        let boundary = boundary_of(nodes);
        Self {
            label,
            centroid: geometry::centroid(&boundary),
            node_labels: nodes.iter().map(|n| n.label.clone()).collect(),
            layer,
            area: geometry::polygon_area(&boundary),
            entity,
        }
    }

    /// Anzahl der Eckpunkte
    pub fn vertex_count(&self) -> usize {
        self.node_labels.len()
    }

    /// Prüft, ob ein Knoten-Label Teil des Umlaufs ist
    pub fn contains_node(&self, label: &TagLabel) -> bool {
        self.node_labels.contains(label)
    }
}

/// Positionen der Knoten als Polygon-Umlauf.
pub fn boundary_of(nodes: &[TagNode]) -> Vec<Point> {
    nodes.iter().map(|n| n.position).collect()
}
