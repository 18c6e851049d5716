//! Entity-Arten und Handles auf gerenderte Objekte im Zeichnungs-Backend.

use serde::{Deserialize, Serialize};

/// Art einer vom Tagging erzeugten Entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Knoten-Marker (`P-…`)
    Node,
    /// Linien-Marker zwischen zwei Knoten (`L-…`)
    Line,
    /// Flächen-Marker eines geschlossenen Polygons (`A-…`)
    Area,
}

impl EntityKind {
    /// Kürzel im Label-Format.
    pub fn code(self) -> &'static str {
        match self {
            EntityKind::Node => "P",
            EntityKind::Line => "L",
            EntityKind::Area => "A",
        }
    }

    /// Ermittelt die Art aus dem Label-Kürzel.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(EntityKind::Node),
            "L" => Some(EntityKind::Line),
            "A" => Some(EntityKind::Area),
            _ => None,
        }
    }
}

/// Handle auf ein vom Zeichnungs-Backend gerendertes Objekt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef(pub u64);

/// Handle auf einen Layer im Zeichnungs-Backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerRef(pub u64);
