//! Anlegen von Knoten, Linien und Flächen.
//!
//! Der Marker wird immer zuerst gerendert; erst danach wird die Entity in die
//! TagMap übernommen. Ein fehlgeschlagenes Rendern hinterlässt so keinen
//! verwaisten Eintrag.

use std::sync::Arc;

use anyhow::Result;

use crate::app::AppState;
use crate::core::area::boundary_of;
use crate::core::geometry::{self, Point};
use crate::core::{EntityKind, TagArea, TagLabel, TagLine, TagNode};
use crate::host_bridge::HostBridge;

/// Legt einen neuen Knoten an und hängt ihn an die Kette.
pub(super) fn create_node(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    position: Point,
) -> Result<()> {
    let session = &state.session;
    let label = TagLabel::new(EntityKind::Node, session.prefix(), session.next_node_seq);
    if state.tag_map.contains_label(&label) {
        log::warn!(
            "Label {} ist bereits vergeben (überlappende Startnummer), wird erneut verwendet",
            label
        );
    }

    let layer = session.layer.clone();
    let entity = host.render_node(position, &layer, &label)?;
    let node = TagNode::new(label, position, layer, entity);

    log::info!(
        "Knoten {} an Position ({:.3}, {:.3}) erstellt",
        node.label,
        position.x,
        position.y
    );
    Arc::make_mut(&mut state.tag_map).add_node(node.clone());
    state.session.chain.push(node);
    state.session.next_node_seq = state.session.next_node_seq.saturating_add(1);

    Ok(())
}

/// Legt eine Linie mit der nächsten freien Nummer des Präfixes an.
pub(super) fn create_line(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    start: Point,
    end: Point,
) -> Result<()> {
    let prefix = state.session.prefix();
    let seq = state.tag_map.next_line_seq(prefix);
    let label = TagLabel::new(EntityKind::Line, prefix, seq);

    let layer = state.session.layer.clone();
    let entity = host.render_line(start, end, &layer, &label)?;
    let line = TagLine::new(label, start, end, layer, entity);

    log::info!(
        "Linie {} erstellt (Länge {:.3}, Winkel {:.2}°)",
        line.label,
        line.length(),
        line.angle_degrees()
    );
    Arc::make_mut(&mut state.tag_map).add_line(line);
    state.session.next_line_seq = seq.saturating_add(1);

    Ok(())
}

/// Verbindet den vorherigen Punkt mit `to`, falls Linien aktiv sind und
/// noch keine Linie des Präfixes dieses Punktpaar verbindet.
pub(super) fn connect_from_previous(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    to: Point,
) -> Result<()> {
    if !state.session.creates_lines() {
        return Ok(());
    }
    let Some(from) = state.session.previous_point else {
        return Ok(());
    };
    connect_unless_present(state, host, from, to)
}

/// Legt eine Linie `from`→`to` an, sofern das Punktpaar noch nicht verbunden ist.
pub(super) fn connect_unless_present(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    from: Point,
    to: Point,
) -> Result<()> {
    let tolerance = state.options.node_match_tolerance;
    if state.tag_map.has_line_between(state.session.prefix(), from, to, tolerance) {
        log::debug!(
            "Linie ({:.3}, {:.3}) → ({:.3}, {:.3}) existiert bereits",
            from.x,
            from.y,
            to.x,
            to.y
        );
        return Ok(());
    }
    create_line(state, host, from, to)
}

/// Erstellt eine Fläche aus der aktuellen Kette.
///
/// Unter 3 Knoten wird nur gewarnt; Rückgabe `false`, keine Mutation.
pub(super) fn create_area_from_chain(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
) -> Result<bool> {
    let chain = &state.session.chain;
    if chain.len() < 3 {
        log::warn!(
            "Fläche nicht erstellt: mindestens 3 Punkte nötig, Kette hat {}",
            chain.len()
        );
        host.notify("Mindestens 3 Punkte sind nötig, um eine Fläche zu erstellen");
        return Ok(false);
    }

    let prefix = state.session.prefix();
    let label = TagLabel::new(EntityKind::Area, prefix, state.tag_map.next_area_seq(prefix));
    let boundary = boundary_of(chain);
    let centroid = geometry::centroid(&boundary);

    let layer = state.session.layer.clone();
    let entity = host.render_area(&boundary, centroid, &layer, &label)?;
    let area = TagArea::from_nodes(label, chain, layer, entity);

    log::info!(
        "Geschlossene Kontur erkannt: Fläche {} mit {} Ecken (Fläche {:.3})",
        area.label,
        area.vertex_count(),
        area.area
    );
    host.notify(&format!("Geschlossene Kontur erkannt, Fläche {} erstellt", area.label));
    Arc::make_mut(&mut state.tag_map).add_area(area);

    Ok(true)
}
