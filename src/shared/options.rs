//! Zentrale Konfiguration für den CAD Tag Creator.
//!
//! `TagOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::geometry::{LABEL_RESOLUTION_TOLERANCE, NODE_MATCH_TOLERANCE};

// ── Layer ───────────────────────────────────────────────────────────

/// Präfix der Ziel-Layer (`BLOCK_<Präfix>`).
pub const LAYER_PREFIX: &str = "BLOCK_";

// ── Lauf-Vorgaben ───────────────────────────────────────────────────

/// Standard-Startnummer eines Laufs.
pub const DEFAULT_START_SEQ: u32 = 1;
/// Standard-Maßstab der Marker.
pub const DEFAULT_SCALE: f64 = 300.0;

// ── Marker-Geometrie ────────────────────────────────────────────────

/// Kreisradius eines Knoten-Markers relativ zum Maßstab.
pub const NODE_RADIUS_FACTOR: f64 = 1.0;
/// Texthöhe der Labels relativ zum Maßstab.
pub const TEXT_HEIGHT_FACTOR: f64 = 2.0;
/// Länge der Fadenkreuz-Arme relativ zum Knotenradius.
pub const CROSSHAIR_FACTOR: f64 = 1.2;

// ── Export ──────────────────────────────────────────────────────────

/// Standard-Dateiname (ohne Zeitstempel und Endung) der Exportdatei.
pub const EXPORT_FILE_STEM: &str = "tag_export";
/// Name der Optionen-Datei neben der Binary.
pub const CONFIG_FILE_NAME: &str = "cad_tag_creator.toml";

/// Format der Exportdatei
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// SpreadsheetML-2003-Arbeitsmappe (`.xml`, öffnet in Excel/LibreOffice)
    #[default]
    Spreadsheet,
    /// JSON-Dokument (`.json`)
    Json,
}

impl ExportFormat {
    /// Dateiendung ohne Punkt
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "xml",
            ExportFormat::Json => "json",
        }
    }

    /// Parst den Formatnamen (`xml`/`spreadsheet` oder `json`)
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "xml" | "spreadsheet" => Some(ExportFormat::Spreadsheet),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `cad_tag_creator.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagOptions {
    // ── Toleranzen ──────────────────────────────────────────────
    /// Toleranz für Knoten-Identität beim Platzieren (Zeichnungseinheiten)
    pub node_match_tolerance: f64,
    /// Toleranz für die Auflösung von Koordinaten auf Knoten-Labels
    pub label_resolution_tolerance: f64,

    // ── Layer ───────────────────────────────────────────────────
    /// Präfix der Ziel-Layer
    pub layer_prefix: String,

    // ── Vorbelegung der Eingabemaske ────────────────────────────
    /// Vorbelegtes Präfix
    pub default_prefix: String,
    /// Vorbelegte Startnummer
    pub default_start_seq: u32,
    /// Linien standardmäßig erzeugen
    pub default_create_lines: bool,
    /// Vorbelegter Maßstab
    pub default_scale: f64,

    // ── Marker ──────────────────────────────────────────────────
    /// Knotenradius = Faktor × Maßstab
    pub node_radius_factor: f64,
    /// Texthöhe = Faktor × Maßstab
    pub text_height_factor: f64,

    // ── Export ──────────────────────────────────────────────────
    /// Zielverzeichnis (leer = aktuelles Verzeichnis)
    pub export_dir: Option<PathBuf>,
    /// Dateiformat
    pub export_format: ExportFormat,
    /// Dateiname ohne Zeitstempel und Endung
    pub export_file_stem: String,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            node_match_tolerance: NODE_MATCH_TOLERANCE,
            label_resolution_tolerance: LABEL_RESOLUTION_TOLERANCE,

            layer_prefix: LAYER_PREFIX.to_string(),

            default_prefix: String::new(),
            default_start_seq: DEFAULT_START_SEQ,
            default_create_lines: true,
            default_scale: DEFAULT_SCALE,

            node_radius_factor: NODE_RADIUS_FACTOR,
            text_height_factor: TEXT_HEIGHT_FACTOR,

            export_dir: None,
            export_format: ExportFormat::default(),
            export_file_stem: EXPORT_FILE_STEM.to_string(),
        }
    }
}

impl TagOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("cad-tag-creator"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Layer-Name für ein Präfix (`BLOCK_<Präfix>`)
    pub fn layer_name(&self, prefix: &str) -> String {
        format!("{}{}", self.layer_prefix, prefix)
    }

    /// Knotenradius für einen Maßstab
    pub fn node_radius(&self, scale: f64) -> f64 {
        self.node_radius_factor * scale
    }

    /// Texthöhe der Labels für einen Maßstab
    pub fn text_height(&self, scale: f64) -> f64 {
        self.text_height_factor * scale
    }

    /// Zielverzeichnis des Exports
    pub fn export_directory(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
