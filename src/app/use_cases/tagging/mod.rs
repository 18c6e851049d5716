//! Use-Case-Funktionen für das Tagging während eines Laufs.
//!
//! Aufgeteilt nach Operation:
//! - `place_point`: Punkt verarbeiten (Schließen, Wiederverwenden, Neuanlage)
//! - `create`: Knoten, Linien und Flächen samt Marker anlegen
//! - `undo`: Letzten Knoten mit abhängigen Linien und Flächen entfernen

mod create;
mod place_point;
mod undo;

pub use place_point::place_point;
pub use undo::undo_last_node;
