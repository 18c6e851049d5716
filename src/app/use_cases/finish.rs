//! Use-Case: Sitzung abschließen, exportieren und zurücksetzen.

use std::sync::Arc;

use crate::app::state::TaggingSession;
use crate::app::AppState;
use crate::core::TagMap;
use crate::export;
use crate::host_bridge::HostBridge;

/// Schließt die Sitzung ab.
///
/// Der Exporter wird nur aufgerufen, wenn mindestens eine Entity existiert.
/// Anschließend wird der Layer vor dem ersten Lauf wiederhergestellt und die
/// Sitzung vollständig geleert.
pub fn finish_session(state: &mut AppState, host: &mut HostBridge<'_>) -> anyhow::Result<()> {
    let statistics = state.statistics();

    let destination = if state.tag_map.is_empty() {
        log::info!("Abschluss ohne Entities, kein Export");
        None
    } else {
        let tables = export::build_tables(&state.tag_map, state.options.label_resolution_tolerance);
        let destination = host.export(&tables)?;
        log::info!("Export geschrieben: {}", destination);
        Some(destination)
    };

    if let Some(layer) = state.session.original_layer.as_deref() {
        // Ein fehlender Ursprungs-Layer verhindert den Abschluss nicht
        if let Err(e) = host.set_current_layer(layer) {
            log::warn!("Ursprünglicher Layer '{}' nicht wiederhergestellt: {:#}", layer, e);
        }
    }

    match &destination {
        Some(destination) => host.notify(&format!(
            "Erstellung abgeschlossen: {} Knoten, {} Linien, {} Flächen. Export: {}",
            statistics.nodes, statistics.lines, statistics.areas, destination
        )),
        None => host.notify("Keine Daten zum Exportieren"),
    }

    state.tag_map = Arc::new(TagMap::new());
    state.session = TaggingSession::default();
    if destination.is_some() {
        state.last_export = destination;
    }

    Ok(())
}
