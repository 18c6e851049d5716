//! Use-Case: Gewählten Punkt verarbeiten.

use anyhow::{ensure, Result};

use super::create::{
    connect_from_previous, connect_unless_present, create_area_from_chain, create_node,
};
use crate::app::state::SessionPhase;
use crate::app::AppState;
use crate::core::geometry::{self, Point};
use crate::host_bridge::HostBridge;

/// Verarbeitet einen gewählten Punkt während eines aktiven Laufs.
///
/// Reihenfolge der Prüfungen:
/// 1. Kette mit ≥3 Knoten und Treffer auf ein Kettenglied → Fläche schließen
/// 2. Treffer auf einen vorhandenen Knoten des Präfixes → Knoten wiederverwenden
/// 3. Sonst → neuen Knoten anlegen
///
/// In Fall 2 und 3 wird bei aktiven Linien der vorherige Punkt verbunden.
pub fn place_point(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    world_pos: Point,
) -> Result<()> {
    ensure!(
        state.session.phase == SessionPhase::Active,
        "Kein aktiver Lauf: Punkte werden nur nach dem Start angenommen"
    );
    ensure!(
        geometry::is_finite_point(world_pos),
        "Ungültige Koordinate ({}, {})",
        world_pos.x,
        world_pos.y
    );

    let tolerance = state.options.node_match_tolerance;

    if closes_chain(state, world_pos, tolerance) {
        return close_chain(state, host);
    }

    let existing = state
        .tag_map
        .find_node_at(state.session.prefix(), world_pos, tolerance)
        .cloned();

    match existing {
        Some(node) => {
            let chain = &state.session.chain;
            let closes_on_first = chain.len() >= 2 && chain[0].label == node.label;
            if !closes_on_first && chain.iter().any(|n| n.label == node.label) {
                log::warn!("Knoten {} ist bereits Teil der aktuellen Kette", node.label);
                host.notify(&format!("Knoten {} ist bereits Teil der Kette", node.label));
                return Ok(());
            }

            // Auf die gespeicherte Knotenposition einrasten
            let position = node.position;
            log::info!("Vorhandener Knoten {} wiederverwendet", node.label);
            state.session.chain.push(node);
            connect_from_previous(state, host, position)?;

            if first_equals_last(state) {
                state.session.chain.pop();
                if create_area_from_chain(state, host)? {
                    state.session.clear_chain();
                    return Ok(());
                }
            }
            state.session.previous_point = Some(position);
        }
        None => {
            create_node(state, host, world_pos)?;
            connect_from_previous(state, host, world_pos)?;
            state.session.previous_point = Some(world_pos);
        }
    }

    Ok(())
}

/// Kette hat ≥3 Knoten und `point` trifft eines ihrer Glieder.
fn closes_chain(state: &AppState, point: Point, tolerance: f64) -> bool {
    let chain = &state.session.chain;
    chain.len() >= 3
        && chain
            .iter()
            .any(|node| geometry::points_coincide(point, node.position, tolerance))
}

/// Erstes und letztes Kettenglied tragen dasselbe Label (Kette ≥3).
fn first_equals_last(state: &AppState) -> bool {
    let chain = &state.session.chain;
    chain.len() >= 3
        && chain
            .first()
            .zip(chain.last())
            .is_some_and(|(first, last)| first.label == last.label)
}

/// Schließt die Kette: Schlusslinie zum ersten Knoten, Fläche, Kette leeren.
fn close_chain(state: &mut AppState, host: &mut HostBridge<'_>) -> Result<()> {
    let first = state.session.chain.first().map(|node| node.position);
    if let (Some(previous), Some(first)) = (state.session.previous_point, first) {
        connect_unless_present(state, host, previous, first)?;
    }

    if create_area_from_chain(state, host)? {
        state.session.clear_chain();
    }

    Ok(())
}
