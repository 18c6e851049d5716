//! Use-Cases der Application-Layer-Orchestrierung.

pub mod finish;
pub mod redraw;
pub mod run;
pub mod tagging;
