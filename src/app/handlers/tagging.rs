//! Handler für Punktwahl und Undo.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::Point;
use crate::host_bridge::HostBridge;

/// Verarbeitet einen gewählten Punkt.
pub fn place_point(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    world_pos: Point,
) -> anyhow::Result<()> {
    use_cases::tagging::place_point(state, host, world_pos)
}

/// Entfernt den letzten Knoten des aktiven Präfixes.
///
/// "Nichts rückgängig zu machen" ist kein Fehler und wird nur gemeldet.
pub fn undo_last_node(state: &mut AppState, host: &mut HostBridge<'_>) -> anyhow::Result<()> {
    if use_cases::tagging::undo_last_node(state, host)? {
        host.notify("Letzter Knoten rückgängig gemacht");
    } else {
        host.notify("Nichts rückgängig zu machen");
    }
    Ok(())
}
