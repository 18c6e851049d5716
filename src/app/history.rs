//! Snapshot des Engine-Zustands für das Zurückrollen abgebrochener Commands.

use super::state::TaggingSession;
use super::AppState;
use crate::core::TagMap;
use std::sync::Arc;

/// Snapshot reduziert auf die von Commands mutierten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen ist O(1) für die TagMap,
/// der Klon findet erst beim nächsten `Arc::make_mut()` in einem Use-Case statt.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// TagMap (Arc-Klon)
    pub tag_map: Arc<TagMap>,
    /// Sitzungszustand inklusive Kette
    pub session: TaggingSession,
}

impl Snapshot {
    /// Erstellt einen Snapshot des aktuellen Zustands.
    pub fn from_state(state: &AppState) -> Self {
        Self {
            tag_map: Arc::clone(&state.tag_map),
            session: state.session.clone(),
        }
    }

    /// Stellt den Snapshot wieder her.
    pub fn apply_to(self, state: &mut AppState) {
        state.tag_map = self.tag_map;
        state.session = self.session;
    }
}
