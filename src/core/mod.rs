//! Core-Domänentypen: Labels, Knoten, Linien, Flächen und die TagMap.

pub mod area;
pub mod entity;
pub mod geometry;
pub mod label;
pub mod line;
/// Core-Datenmodelle einer Tagging-Sitzung
///
/// - TagMap: Container für alle Knoten, Linien und Flächen
/// - TagNode: Einzelner Knoten mit Position und Label
/// - TagLine / TagArea: aus Knoten abgeleitete Entities
pub mod node;
pub mod tag_map;

pub use area::TagArea;
pub use entity::{EntityKind, EntityRef, LayerRef};
pub use geometry::{Point, LABEL_RESOLUTION_TOLERANCE, NODE_MATCH_TOLERANCE};
pub use label::{format_label, is_valid_prefix, parse_prefix, parse_seq, TagLabel};
pub use line::TagLine;
pub use node::TagNode;
pub use tag_map::TagMap;
