//! Use-Case: Tagging-Lauf starten und beenden.

use anyhow::{ensure, Context};

use crate::app::state::{RunSettings, SessionPhase};
use crate::app::AppState;
use crate::core::is_valid_prefix;
use crate::host_bridge::HostBridge;

/// Prüft die Eingaben der Eingabemaske und liefert die Lauf-Einstellungen.
///
/// Leerzeichen am Rand des Präfixes werden entfernt.
pub fn validate_run_input(
    prefix: &str,
    start_seq: i64,
    create_lines: bool,
    scale: f64,
) -> anyhow::Result<RunSettings> {
    let prefix = prefix.trim();
    ensure!(!prefix.is_empty(), "Bitte ein Präfix eingeben");
    ensure!(
        is_valid_prefix(prefix),
        "Präfix '{}' darf weder '-' noch Leerzeichen enthalten",
        prefix
    );
    ensure!(
        start_seq > 0,
        "Startnummer muss größer als 0 sein (erhalten: {})",
        start_seq
    );
    let start_seq = u32::try_from(start_seq)
        .with_context(|| format!("Startnummer {} ist zu groß", start_seq))?;
    ensure!(
        scale.is_finite() && scale > 0.0,
        "Maßstab muss eine Zahl größer als 0 sein, z.B. 300 (erhalten: {})",
        scale
    );

    Ok(RunSettings {
        prefix: prefix.to_string(),
        start_seq,
        create_lines,
        scale,
    })
}

/// Startet einen Lauf.
///
/// Beim ersten Lauf der Sitzung wird der aktive Layer für den Abschluss gemerkt.
/// Bei einer Fortsetzung setzt die Linien-Nummer an der zuletzt angelegten Linie
/// an, wenn diese dasselbe Präfix trägt, sonst an der Startnummer.
pub fn start_run(
    state: &mut AppState,
    host: &mut HostBridge<'_>,
    settings: RunSettings,
) -> anyhow::Result<()> {
    let layer = state.options.layer_name(&settings.prefix);
    let previous_layer = host.current_layer();

    host.activate_layer(&layer)
        .with_context(|| format!("Layer '{}' konnte nicht aktiviert werden", layer))?;
    host.set_marker_scale(settings.scale);

    let resuming = state.session.has_started();
    let next_line_seq = if resuming {
        match state.tag_map.last_line() {
            Some(line) if line.label.has_prefix(&settings.prefix) => {
                line.label.seq.saturating_add(1)
            }
            _ => settings.start_seq,
        }
    } else {
        settings.start_seq
    };

    let session = &mut state.session;
    if !resuming {
        session.original_layer = Some(previous_layer);
    }
    session.next_node_seq = settings.start_seq;
    session.next_line_seq = next_line_seq;
    session.clear_chain();
    session.layer = layer;
    session.phase = SessionPhase::Active;

    log::info!(
        "Lauf {}: Präfix '{}', Startnummer {}, Linien {}, Maßstab {}",
        if resuming { "fortgesetzt" } else { "gestartet" },
        settings.prefix,
        settings.start_seq,
        if settings.create_lines { "an" } else { "aus" },
        settings.scale
    );
    session.run = Some(settings);

    let message = format!(
        "Punkte in der Zeichnung wählen (Layer {}). \
         Undo entfernt den letzten Knoten, Ende beendet den Lauf.",
        session.layer
    );
    host.notify(&message);

    Ok(())
}

/// Beendet die Punktwahl: Kette verwerfen, Startnummer-Vorschlag melden.
///
/// Alle Entities bleiben erhalten; ein folgender Start ist eine Fortsetzung.
pub fn end_run(state: &mut AppState, host: &mut HostBridge<'_>) -> anyhow::Result<()> {
    ensure!(
        state.session.phase == SessionPhase::Active,
        "Kein aktiver Lauf zum Beenden"
    );

    let session = &mut state.session;
    session.clear_chain();
    session.phase = SessionPhase::Paused;

    log::info!("Lauf beendet, nächste Startnummer: {}", session.next_node_seq);
    host.publish_next_start_number(session.next_node_seq);

    Ok(())
}
