//! JSON-Exporter für die Export-Tabellen.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use super::rows::ExportTables;
use super::timestamped_path;
use crate::host_bridge::TabularExporter;
use crate::shared::TagOptions;

/// JSON-Dokument eines Exports
#[derive(Serialize)]
struct JsonExport<'a> {
    /// Zeitpunkt des Exports (RFC 3339)
    exported_at: String,
    #[serde(flatten)]
    tables: &'a ExportTables,
}

/// Serialisiert die Tabellen als formatiertes JSON.
pub fn write_json(tables: &ExportTables, exported_at: &str) -> Result<String> {
    let document = JsonExport {
        exported_at: exported_at.to_string(),
        tables,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Exporter, der ein JSON-Dokument mit Zeitstempel im Zielverzeichnis ablegt
#[derive(Debug, Clone)]
pub struct JsonExporter {
    directory: PathBuf,
    file_stem: String,
}

impl JsonExporter {
    /// Erstellt einen Exporter für Verzeichnis und Dateinamen-Stamm
    pub fn new(directory: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_stem: file_stem.into(),
        }
    }

    /// Erstellt einen Exporter aus den Laufzeit-Optionen
    pub fn from_options(options: &TagOptions) -> Self {
        Self::new(options.export_directory(), options.export_file_stem.clone())
    }
}

impl TabularExporter for JsonExporter {
    fn export(&mut self, tables: &ExportTables) -> Result<String> {
        let now = chrono::Local::now();
        let content = write_json(tables, &now.to_rfc3339())?;
        std::fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Export-Verzeichnis {} nicht anlegbar",
                self.directory.display()
            )
        })?;
        let path = timestamped_path(&self.directory, &self.file_stem, "json", now);
        std::fs::write(&path, content)
            .with_context(|| format!("Export nach {} fehlgeschlagen", path.display()))?;
        log::info!("JSON-Export gespeichert nach: {}", path.display());
        Ok(path.display().to_string())
    }
}
