use std::sync::Arc;

use super::TaggingSession;
use crate::app::CommandLog;
use crate::core::TagMap;
use crate::host_bridge::Statistics;
use crate::shared::TagOptions;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Alle Entities der Sitzung (Arc für O(1)-Snapshots)
    pub tag_map: Arc<TagMap>,
    /// Lauf- und Kettenzustand
    pub session: TaggingSession,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen (Toleranzen, Layer, Export)
    pub options: TagOptions,
    /// Zielbezeichner des letzten Exports
    pub last_export: Option<String>,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(TagOptions::default())
    }

    /// Erstellt einen leeren App-State mit gegebenen Optionen
    pub fn with_options(options: TagOptions) -> Self {
        Self {
            tag_map: Arc::new(TagMap::new()),
            session: TaggingSession::default(),
            command_log: CommandLog::new(),
            options,
            last_export: None,
        }
    }

    /// Gibt die Anzahl der Knoten zurück (für UI-Anzeige)
    pub fn node_count(&self) -> usize {
        self.tag_map.node_count()
    }

    /// Gibt die Anzahl der Linien zurück (für UI-Anzeige)
    pub fn line_count(&self) -> usize {
        self.tag_map.line_count()
    }

    /// Gibt die Anzahl der Flächen zurück (für UI-Anzeige)
    pub fn area_count(&self) -> usize {
        self.tag_map.area_count()
    }

    /// Aktuelle Zählerstände
    pub fn statistics(&self) -> Statistics {
        Statistics {
            nodes: self.node_count(),
            lines: self.line_count(),
            areas: self.area_count(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
