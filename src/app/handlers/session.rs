//! Handler für Lauf-Steuerung: Start, Ende und Abschluss der Sitzung.

use crate::app::use_cases;
use crate::app::AppState;
use crate::host_bridge::HostBridge;

/// Startet einen Lauf (oder setzt die Sitzung mit neuem Präfix fort).
pub fn start_run(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    prefix: &str,
    start_seq: i64,
    create_lines: bool,
    scale: f64,
) -> anyhow::Result<()> {
    let settings = use_cases::run::validate_run_input(prefix, start_seq, create_lines, scale)?;
    use_cases::run::start_run(state, host, settings)
}

/// Beendet die Punktwahl des laufenden Laufs.
pub fn end_run(state: &mut AppState, host: &mut HostBridge<'_>) -> anyhow::Result<()> {
    use_cases::run::end_run(state, host)
}

/// Exportiert alle Entities und setzt die Sitzung zurück.
pub fn finish(state: &mut AppState, host: &mut HostBridge<'_>) -> anyhow::Result<()> {
    use_cases::finish::finish_session(state, host)
}
