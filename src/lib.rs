//! CAD Tag Creator Library.
//! Tagging-Engine für Knoten, Linien und Flächen, als Library exportiert für
//! Host-Anbindungen, Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod export;
pub mod host_bridge;
pub mod shared;

pub use app::{AppCommand, AppController, AppIntent, AppState, SessionPhase, TaggingSession};
pub use core::{EntityKind, EntityRef, Point, TagArea, TagLabel, TagLine, TagMap, TagNode};
pub use export::{build_tables, exporter_for, ExportTables};
pub use host_bridge::{
    DrawingBackend, HostBridge, InteractionSurface, MemoryDrawing, Statistics, TabularExporter,
};
pub use shared::{ExportFormat, TagOptions};
