use crate::core::Point;

/// App-Intent Events.
/// Intents sind Eingaben aus der Eingabemaske ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Tagging-Lauf starten (oder nach "Lauf beenden" fortsetzen)
    StartRunRequested {
        prefix: String,
        /// Ungeprüfte Eingabe; muss > 0 sein
        start_seq: i64,
        create_lines: bool,
        scale: f64,
    },
    /// Punkt in der Zeichnung gewählt
    PointPicked { world_pos: Point },
    /// Letzten Knoten des aktiven Präfixes rückgängig machen
    UndoRequested,
    /// Punktwahl beenden (Lauf pausieren, Daten bleiben erhalten)
    EndRunRequested,
    /// Sitzung abschließen und exportieren
    FinishRequested,
}
