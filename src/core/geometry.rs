//! Geometrische Grundfunktionen in Zeichnungseinheiten.

use glam::DVec2;

/// Ein Punkt in Zeichnungseinheiten (x, y).
pub type Point = DVec2;

/// Toleranz für Knoten-Identität beim interaktiven Platzieren.
pub const NODE_MATCH_TOLERANCE: f64 = 1.0;
/// Toleranz für die Auflösung von Koordinaten auf Knoten-Labels (Export, Undo-Kaskade).
pub const LABEL_RESOLUTION_TOLERANCE: f64 = 0.001;

/// Euklidische Distanz zwischen zwei Punkten.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Mittelpunkt einer Strecke.
pub fn midpoint(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

/// Schwerpunkt (arithmetisches Mittel) der Punkte.
///
/// Leere Eingabe liefert den Ursprung.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let sum: Point = points.iter().copied().sum();
    sum / points.len() as f64
}

/// Polygonfläche nach der Gaußschen Trapezformel (Shoelace).
///
/// Unter 3 Punkten ist die Fläche 0. Das Ergebnis ist vorzeichenlos,
/// die Umlaufrichtung spielt keine Rolle.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        twice_area += current.x * next.y - next.x * current.y;
    }

    twice_area.abs() / 2.0
}

/// Winkel einer Strecke gegen die +X-Achse in Grad, Bereich [0°, 360°).
///
/// Quadrantenkorrektur über `atan` statt `atan2`: Δx < 0 → +180°,
/// Δx > 0 und Δy < 0 → +360°. Senkrechte Strecken liefern 90° bzw. 270°,
/// eine Strecke der Länge 0 liefert 0°.
pub fn angle_degrees(start: Point, end: Point) -> f64 {
    let delta = end - start;

    let degrees = if delta.x == 0.0 {
        if delta.y > 0.0 {
            90.0
        } else if delta.y < 0.0 {
            270.0
        } else {
            0.0
        }
    } else {
        let mut radians = (delta.y / delta.x).atan();
        if delta.x < 0.0 {
            radians += std::f64::consts::PI;
        } else if delta.y < 0.0 {
            radians += 2.0 * std::f64::consts::PI;
        }
        radians.to_degrees()
    };

    // Winziges negatives Δy kann nach der Umrechnung auf exakt 360° runden
    if degrees >= 360.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

/// Prüft, ob zwei Punkte innerhalb der Toleranz zusammenfallen (Distanz < Toleranz).
pub fn points_coincide(a: Point, b: Point, tolerance: f64) -> bool {
    distance(a, b) < tolerance
}

/// Prüft, ob beide Koordinaten endlich sind.
pub fn is_finite_point(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}
