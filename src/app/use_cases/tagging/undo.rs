//! Use-Case: Letzten Knoten des aktiven Präfixes rückgängig machen.

use std::sync::Arc;

use anyhow::{ensure, Context, Result};

use crate::app::state::SessionPhase;
use crate::app::AppState;
use crate::host_bridge::HostBridge;

/// Entfernt den zuletzt angelegten Knoten des aktiven Präfixes.
///
/// Mit entfernt werden alle Linien des Präfixes, deren Endpunkte auf den Knoten
/// aufgelöst werden, und alle Flächen, deren Umlauf ihn enthält. Die Eckknoten
/// einer entfernten Fläche werden wieder als Kette übernommen, damit die Kontur
/// direkt neu geschlossen werden kann.
///
/// Gibt es keinen Knoten des Präfixes, wird nur das letzte Kettenglied verworfen
/// (z.B. ein aus einem früheren Lauf wiederverwendeter Knoten).
///
/// Rückgabe `false`: nichts rückgängig zu machen.
pub fn undo_last_node(state: &mut AppState, host: &mut HostBridge<'_>) -> Result<bool> {
    ensure!(
        state.session.phase == SessionPhase::Active,
        "Kein aktiver Lauf: Undo ist nur während eines Laufs möglich"
    );

    let prefix = state.session.prefix().to_string();
    let tolerance = state.options.label_resolution_tolerance;

    let Some(index) = state.tag_map.last_node_index_with_prefix(&prefix) else {
        if state.session.chain.pop().is_some() {
            state.session.sync_previous_point();
            log::info!("Letztes Kettenglied verworfen");
            return Ok(true);
        }
        log::debug!("Nichts rückgängig zu machen");
        return Ok(false);
    };

    let map = Arc::make_mut(&mut state.tag_map);
    let node_label = map.nodes()[index].label.clone();
    let removed_lines = map.remove_lines_touching(&prefix, &node_label, tolerance);
    let removed_areas = map.remove_areas_containing(&node_label);

    // Umlauf der (letzten) entfernten Fläche wird zur neuen Kette
    if let Some(area) = removed_areas.last() {
        state.session.chain = area
            .node_labels
            .iter()
            .filter_map(|label| map.node_by_label(label).cloned())
            .collect();
    }

    let node = map
        .remove_node_at(index)
        .with_context(|| format!("Knoten {} nicht mehr vorhanden", node_label))?;
    state.session.chain.retain(|n| n.label != node.label);

    for line in &removed_lines {
        host.delete_entity(line.entity)?;
    }
    for area in &removed_areas {
        host.delete_entity(area.entity)?;
    }
    host.delete_entity(node.entity)?;

    let session = &mut state.session;
    session.next_node_seq = session.next_node_seq.saturating_sub(1).max(1);
    session.sync_previous_point();
    session.next_line_seq = state.tag_map.next_line_seq(&prefix);

    log::info!(
        "Knoten {} rückgängig gemacht ({} Linien, {} Flächen entfernt)",
        node.label,
        removed_lines.len(),
        removed_areas.len()
    );

    Ok(true)
}
