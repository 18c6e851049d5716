//! Export der Sitzung: Zeilen-Tabellen und Tabellen-Exporter.
//!
//! - `rows`: Adapter TagMap → Tabellen (inkl. Endpunkt-Auflösung)
//! - `spreadsheet`: SpreadsheetML-2003-Arbeitsmappe
//! - `json`: JSON-Dokument

pub mod json;
pub mod rows;
pub mod spreadsheet;

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::host_bridge::TabularExporter;
use crate::shared::{ExportFormat, TagOptions};

pub use json::JsonExporter;
pub use rows::{build_tables, AreaRow, ExportTables, LineRow, NodeRow};
pub use spreadsheet::SpreadsheetExporter;

/// Dateipfad `<dir>/<stem>_<yyyyMMdd_HHmmss>.<ext>`
pub fn timestamped_path<Tz>(
    directory: &Path,
    stem: &str,
    extension: &str,
    at: DateTime<Tz>,
) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    directory.join(format!(
        "{}_{}.{}",
        stem,
        at.format("%Y%m%d_%H%M%S"),
        extension
    ))
}

/// Erstellt den in den Optionen gewählten Datei-Exporter
pub fn exporter_for(options: &TagOptions) -> Box<dyn TabularExporter> {
    match options.export_format {
        ExportFormat::Spreadsheet => Box::new(SpreadsheetExporter::from_options(options)),
        ExportFormat::Json => Box::new(JsonExporter::from_options(options)),
    }
}
