//! Use-Case: Marker eines abgebrochenen Events neu zeichnen.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::app::AppState;
use crate::core::area::boundary_of;
use crate::core::{EntityRef, Point, TagMap, TagNode};
use crate::host_bridge::HostBridge;

/// Zeichnet die im abgebrochenen Event gelöschten Entities neu.
///
/// `state` ist bereits auf den Snapshot zurückgesetzt. Jede gelöschte Referenz,
/// die dort noch einer Entity gehört, wird aus deren gespeicherten Daten neu
/// gezeichnet und erhält das neue Handle. Referenzen ohne Eigentümer werden
/// übersprungen. Liefert die Anzahl neu gezeichneter Entities.
pub fn redraw_deleted(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    deleted: &[EntityRef],
) -> Result<usize> {
    let mut redrawn = 0;

    for &old in deleted {
        let Some(new) = redraw_one(&state.tag_map, host, old)? else {
            log::debug!("Entity {:?} gehört keiner Entity der Sitzung", old);
            continue;
        };
        Arc::make_mut(&mut state.tag_map).reassign_entity(old, new);
        redrawn += 1;
    }

    if redrawn > 0 {
        log::info!("{} gelöschte Marker neu gezeichnet", redrawn);
    }
    Ok(redrawn)
}

fn redraw_one(
    map: &TagMap,
    host: &mut HostBridge<'_>,
    entity: EntityRef,
) -> Result<Option<EntityRef>> {
    if let Some(node) = map.nodes().iter().find(|n| n.entity == entity) {
        return host
            .render_node(node.position, &node.layer, &node.label)
            .map(Some);
    }

    if let Some(line) = map.lines().iter().find(|l| l.entity == entity) {
        return host
            .render_line(line.start, line.end, &line.layer, &line.label)
            .map(Some);
    }

    if let Some(area) = map.areas().iter().find(|a| a.entity == entity) {
        let nodes = area
            .node_labels
            .iter()
            .map(|label| {
                map.node_by_label(label).cloned().with_context(|| {
                    format!("Eckknoten {} der Fläche {} fehlt", label, area.label)
                })
            })
            .collect::<Result<Vec<TagNode>>>()?;
        let boundary: Vec<Point> = boundary_of(&nodes);
        return host
            .render_area(&boundary, area.centroid, &area.layer, &area.label)
            .map(Some);
    }

    Ok(None)
}
