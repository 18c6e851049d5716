//! Repräsentiert eine Linie zwischen zwei Knoten-Positionen.
//!
//! Linien speichern nur Koordinaten, keine Knoten-Referenzen. Die Zuordnung
//! zu Knoten-Labels erfolgt bei Bedarf über Toleranz-Abgleich.

use super::geometry::{self, Point};
use super::{EntityRef, TagLabel};

/// Eine Linie (`L-<Präfix>-<NNNN>`)
#[derive(Debug, Clone, PartialEq)]
pub struct TagLine {
    /// Eindeutiges Label
    pub label: TagLabel,
    /// Startpunkt
    pub start: Point,
    /// Endpunkt
    pub end: Point,
    /// Layer, auf dem der Marker liegt
    pub layer: String,
    /// Gerendertes Objekt im Zeichnungs-Backend
    pub entity: EntityRef,
}

impl TagLine {
    /// Erstellt eine neue Linie
    pub fn new(
        label: TagLabel,
        start: Point,
        end: Point,
        layer: String,
        entity: EntityRef,
    ) -> Self {
        Self {
            label,
            start,
            end,
            layer,
            entity,
        }
    }

    /// Länge der Linie
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    /// Winkel gegen die +X-Achse in Grad, [0°, 360°)
    pub fn angle_degrees(&self) -> f64 {
        geometry::angle_degrees(self.start, self.end)
    }

    /// Mittelpunkt der Linie (Position des Label-Texts)
    pub fn midpoint(&self) -> Point {
        geometry::midpoint(self.start, self.end)
    }

    /// Prüft, ob die Linie das ungeordnete Punktpaar innerhalb der Toleranz verbindet.
    pub fn connects(&self, a: Point, b: Point, tolerance: f64) -> bool {
        let same = geometry::points_coincide(a, self.start, tolerance)
            && geometry::points_coincide(b, self.end, tolerance);
        let swapped = geometry::points_coincide(a, self.end, tolerance)
            && geometry::points_coincide(b, self.start, tolerance);
        same || swapped
    }
}
