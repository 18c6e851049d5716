use crate::core::Point;

/// Mutierende Commands, die vom Controller zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Lauf mit Präfix, Startnummer, Linien-Option und Maßstab starten
    StartRun {
        prefix: String,
        start_seq: i64,
        create_lines: bool,
        scale: f64,
    },
    /// Punkt verarbeiten (Knoten/Linie/Fläche)
    PlacePoint { world_pos: Point },
    /// Letzten Knoten samt abhängiger Linien und Flächen entfernen
    UndoLastNode,
    /// Laufenden Lauf beenden
    EndRun,
    /// Sitzung exportieren und zurücksetzen
    FinishSession,
}

impl AppCommand {
    /// Ob nach erfolgreicher Ausführung die Zählerstände gemeldet werden
    pub fn publishes_statistics(&self) -> bool {
        !matches!(self, AppCommand::EndRun)
    }
}
