use crate::core::{Point, TagNode};

/// Phase der Tagging-Sitzung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Kein Lauf gestartet
    #[default]
    Idle,
    /// Lauf aktiv, Punkte werden angenommen
    Active,
    /// Lauf beendet, Daten bleiben bis zum Abschluss erhalten
    Paused,
}

/// Geprüfte Einstellungen des aktuellen Laufs
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Präfix (Nummernkreis)
    pub prefix: String,
    /// Startnummer für Knoten
    pub start_seq: u32,
    /// Verbindungslinien automatisch erzeugen
    pub create_lines: bool,
    /// Marker-Maßstab
    pub scale: f64,
}

/// Zustand der Tagging-Sitzung außerhalb der TagMap
#[derive(Debug, Clone, Default)]
pub struct TaggingSession {
    /// Aktuelle Phase
    pub phase: SessionPhase,
    /// Einstellungen des letzten gestarteten Laufs
    pub run: Option<RunSettings>,
    /// Knoten seit der letzten Flächen-Schließung (Kandidat für den nächsten Umlauf)
    pub chain: Vec<TagNode>,
    /// Zuletzt gesetzter Punkt (Startpunkt der nächsten Verbindungslinie)
    pub previous_point: Option<Point>,
    /// Nächste Knoten-Nummer
    pub next_node_seq: u32,
    /// Nächste Linien-Nummer (nur Anzeige; vergeben wird pro Präfix aus der TagMap)
    pub next_line_seq: u32,
    /// Layer, der vor dem ersten Lauf aktiv war
    pub original_layer: Option<String>,
    /// Ziel-Layer des aktuellen Laufs
    pub layer: String,
}

impl TaggingSession {
    /// Präfix des aktuellen Laufs (leer ohne Lauf)
    pub fn prefix(&self) -> &str {
        self.run.as_ref().map_or("", |run| run.prefix.as_str())
    }

    /// Ob Verbindungslinien erzeugt werden
    pub fn creates_lines(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.create_lines)
    }

    /// Ob bereits ein Lauf gestartet wurde (Fortsetzung statt Erststart)
    pub fn has_started(&self) -> bool {
        self.original_layer.is_some()
    }

    /// Setzt `previous_point` auf das letzte Kettenglied
    pub fn sync_previous_point(&mut self) {
        self.previous_point = self.chain.last().map(|node| node.position);
    }

    /// Leert Kette und vorherigen Punkt
    pub fn clear_chain(&mut self) {
        self.chain.clear();
        self.previous_point = None;
    }
}
