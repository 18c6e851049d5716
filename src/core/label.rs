//! Label-Codec für das Format `<Art>-<Präfix>-<NNNN>`.
//!
//! Die Sequenznummer wird auf mindestens 4 Stellen mit Nullen aufgefüllt,
//! größere Nummern werden ungekürzt ausgegeben.

use super::EntityKind;
use std::fmt;

/// Typisiertes Label einer Entity (z.B. `P-ABC-0001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagLabel {
    /// Entity-Art (bestimmt das Kürzel `P`/`L`/`A`)
    pub kind: EntityKind,
    /// Präfix (Nummernkreis)
    pub prefix: String,
    /// Laufende Nummer
    pub seq: u32,
}

impl TagLabel {
    /// Erstellt ein neues Label.
    pub fn new(kind: EntityKind, prefix: impl Into<String>, seq: u32) -> Self {
        Self {
            kind,
            prefix: prefix.into(),
            seq,
        }
    }

    /// Parst ein Label-String. Liefert `None`, wenn Art, Präfix oder Nummer fehlen.
    pub fn parse(label: &str) -> Option<Self> {
        let kind = parse_kind(label)?;
        let prefix = parse_prefix(label);
        // Nummer 0 wird nie vergeben und steht für ein fehlendes Feld
        let seq = parse_seq(label);
        (!prefix.is_empty() && seq > 0).then(|| Self::new(kind, prefix, seq))
    }

    /// Prüft, ob das Label zum Präfix gehört.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.prefix == prefix
    }
}

impl fmt::Display for TagLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_label(self.kind, &self.prefix, self.seq))
    }
}

/// Formatiert ein Label als `<Art>-<Präfix>-<NNNN>`.
pub fn format_label(kind: EntityKind, prefix: &str, seq: u32) -> String {
    format!("{}-{}-{:04}", kind.code(), prefix, seq)
}

/// Liefert das zweite Feld (Präfix) oder `""` bei weniger als 3 Feldern.
pub fn parse_prefix(label: &str) -> &str {
    let fields: Vec<&str> = label.split('-').collect();
    if fields.len() >= 3 {
        fields[1]
    } else {
        ""
    }
}

/// Liefert das dritte Feld als Zahl oder 0, wenn es fehlt oder nicht parsebar ist.
///
/// Eine echte Sequenz 0 ist davon nicht unterscheidbar.
pub fn parse_seq(label: &str) -> u32 {
    let fields: Vec<&str> = label.split('-').collect();
    if fields.len() >= 3 {
        fields[2].parse().unwrap_or(0)
    } else {
        0
    }
}

/// Liefert die Entity-Art aus dem ersten Feld.
pub fn parse_kind(label: &str) -> Option<EntityKind> {
    label.split('-').next().and_then(EntityKind::from_code)
}

/// Prüft ein Präfix auf Verwendbarkeit im Label-Format.
pub fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && !prefix.contains('-') && !prefix.chars().any(char::is_whitespace)
}
