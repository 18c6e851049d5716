//! Knoten-Datensatz.

use super::{EntityRef, Point, TagLabel};

/// Ein platzierter Knoten (`P-<Präfix>-<NNNN>`).
#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    /// Eindeutiges Label
    pub label: TagLabel,
    /// Position in Zeichnungseinheiten
    pub position: Point,
    /// Layer, auf dem der Marker liegt
    pub layer: String,
    /// Gerendertes Objekt im Zeichnungs-Backend
    pub entity: EntityRef,
}

impl TagNode {
    /// Erstellt einen neuen Knoten.
    pub fn new(label: TagLabel, position: Point, layer: String, entity: EntityRef) -> Self {
        Self {
            label,
            position,
            layer,
            entity,
        }
    }

    /// Präfix des Knotens.
    pub fn prefix(&self) -> &str {
        &self.label.prefix
    }
}
