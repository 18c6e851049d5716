//! Zeilenbasiertes Event-Protokoll für den Kommandozeilen-Host.
//!
//! Jede Zeile ist ein JSON-Objekt mit dem Feld `event`, z.B.
//! `{"event":"start","prefix":"K1","start":1,"lines":true,"scale":300}` oder
//! `{"event":"point","x":10.0,"y":5.5}`. Leerzeilen und Zeilen mit `#` am
//! Anfang werden übersprungen.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::app::AppIntent;
use crate::core::Point;
use crate::shared::TagOptions;

/// Ein Event der Eingabemaske
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ScriptEvent {
    /// Lauf starten; fehlende Felder kommen aus den Optionen
    Start {
        #[serde(default)]
        prefix: Option<String>,
        #[serde(default)]
        start: Option<i64>,
        #[serde(default)]
        lines: Option<bool>,
        #[serde(default)]
        scale: Option<f64>,
    },
    /// Punkt in Zeichnungskoordinaten gewählt
    Point { x: f64, y: f64 },
    /// Letzten Knoten rückgängig machen
    Undo,
    /// Lauf beenden
    End,
    /// Sitzung abschließen und exportieren
    Finish,
}

impl ScriptEvent {
    /// Übersetzt das Event in einen `AppIntent`.
    pub fn into_intent(self, options: &TagOptions) -> AppIntent {
        match self {
            ScriptEvent::Start {
                prefix,
                start,
                lines,
                scale,
            } => AppIntent::StartRunRequested {
                prefix: prefix.unwrap_or_else(|| options.default_prefix.clone()),
                start_seq: start.unwrap_or(i64::from(options.default_start_seq)),
                create_lines: lines.unwrap_or(options.default_create_lines),
                scale: scale.unwrap_or(options.default_scale),
            },
            ScriptEvent::Point { x, y } => AppIntent::PointPicked {
                world_pos: Point::new(x, y),
            },
            ScriptEvent::Undo => AppIntent::UndoRequested,
            ScriptEvent::End => AppIntent::EndRunRequested,
            ScriptEvent::Finish => AppIntent::FinishRequested,
        }
    }
}

/// Parst eine Protokollzeile. `Ok(None)` für Leer- und Kommentarzeilen.
pub fn parse_script_line(line: &str, options: &TagOptions) -> Result<Option<AppIntent>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let event: ScriptEvent = serde_json::from_str(trimmed)
        .with_context(|| format!("Ungültiges Event: {}", trimmed))?;
    Ok(Some(event.into_intent(options)))
}
