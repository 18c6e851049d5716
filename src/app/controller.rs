//! Application Controller für zentrale Event-Verarbeitung.

use super::history::Snapshot;
use super::{AppCommand, AppIntent, AppState};
use crate::host_bridge::HostBridge;

/// Orchestriert Eingaben der Eingabemaske und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        host: &mut HostBridge<'_>,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, host, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt einen mutierenden Command als Einheit aus.
    ///
    /// Schlägt der Command fehl, werden Engine-Zustand und die im Command
    /// gerenderten Marker zurückgerollt, bereits gelöschte Marker werden neu
    /// gezeichnet. Der Fehler wird dem Bediener gemeldet und an den Aufrufer
    /// weitergegeben.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        host: &mut HostBridge<'_>,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        let publishes_statistics = command.publishes_statistics();

        let snapshot = Snapshot::from_state(state);
        host.begin_event();

        match self.dispatch(state, host, command) {
            Ok(()) => {
                host.commit_event();
                if publishes_statistics {
                    host.publish_statistics(state.statistics());
                }
                Ok(())
            }
            Err(e) => {
                let rendered = host.rendered_in_event();
                snapshot.apply_to(state);
                let deleted = host.rollback_event();
                if !deleted.is_empty() {
                    if let Err(redraw_error) =
                        super::use_cases::redraw::redraw_deleted(state, host, &deleted)
                    {
                        log::warn!(
                            "Gelöschte Marker nicht vollständig neu gezeichnet: {:#}",
                            redraw_error
                        );
                    }
                    host.commit_event();
                }
                log::warn!(
                    "Command abgebrochen, Zustand zurückgesetzt ({} Marker entfernt): {:#}",
                    rendered,
                    e
                );
                host.notify(&format!("Fehler: {:#}", e));
                Err(e)
            }
        }
    }

    /// Dispatcht an Feature-Handler in `handlers/`.
    fn dispatch(
        &mut self,
        state: &mut AppState,
        host: &mut HostBridge<'_>,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        use super::handlers;

        match command {
            // === Lauf-Steuerung ===
            AppCommand::StartRun {
                prefix,
                start_seq,
                create_lines,
                scale,
            } => {
                handlers::session::start_run(state, host, &prefix, start_seq, create_lines, scale)?
            }
            AppCommand::EndRun => handlers::session::end_run(state, host)?,
            AppCommand::FinishSession => handlers::session::finish(state, host)?,

            // === Tagging ===
            AppCommand::PlacePoint { world_pos } => {
                handlers::tagging::place_point(state, host, world_pos)?
            }
            AppCommand::UndoLastNode => handlers::tagging::undo_last_node(state, host)?,
        }

        Ok(())
    }
}
