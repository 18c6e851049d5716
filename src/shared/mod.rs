//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die von `app`, `host_bridge` und `export`
//! gemeinsam gelesen werden.

pub mod options;

pub use options::{ExportFormat, TagOptions};
