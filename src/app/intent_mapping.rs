//! Mapping von UI-Intents auf mutierende App-Commands.

use super::state::SessionPhase;
use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::StartRunRequested {
            prefix,
            start_seq,
            create_lines,
            scale,
        } => vec![AppCommand::StartRun {
            prefix,
            start_seq,
            create_lines,
            scale,
        }],
        AppIntent::PointPicked { world_pos } => vec![AppCommand::PlacePoint { world_pos }],
        AppIntent::UndoRequested => vec![AppCommand::UndoLastNode],
        AppIntent::EndRunRequested => vec![AppCommand::EndRun],
        AppIntent::FinishRequested => {
            // Ein aktiver Lauf wird vor dem Export regulär beendet
            if state.session.phase == SessionPhase::Active {
                vec![AppCommand::EndRun, AppCommand::FinishSession]
            } else {
                vec![AppCommand::FinishSession]
            }
        }
    }
}
