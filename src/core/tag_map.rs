//! Die zentrale TagMap-Datenstruktur mit Knoten, Linien und Flächen einer Sitzung.

use super::geometry::{self, Point};
use super::{EntityRef, TagArea, TagLabel, TagLine, TagNode};

/// Container für alle Entities einer Tagging-Sitzung (über alle Präfixe und Läufe).
///
/// Die Sammlungen sind geordnet (Einfüge-Reihenfolge) und werden linear durchsucht;
/// für die Größenordnung einer Tagging-Sitzung (einige hundert Entities) reicht das.
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    nodes: Vec<TagNode>,
    lines: Vec<TagLine>,
    areas: Vec<TagArea>,
}

impl TagMap {
    /// Erstellt eine leere TagMap
    pub fn new() -> Self {
        Self::default()
    }

    /// Alle Knoten in Einfüge-Reihenfolge
    pub fn nodes(&self) -> &[TagNode] {
        &self.nodes
    }

    /// Alle Linien in Einfüge-Reihenfolge
    pub fn lines(&self) -> &[TagLine] {
        &self.lines
    }

    /// Alle Flächen in Einfüge-Reihenfolge
    pub fn areas(&self) -> &[TagArea] {
        &self.areas
    }

    /// Fügt einen Knoten hinzu
    pub fn add_node(&mut self, node: TagNode) {
        self.nodes.push(node);
    }

    /// Fügt eine Linie hinzu
    pub fn add_line(&mut self, line: TagLine) {
        self.lines.push(line);
    }

    /// Fügt eine Fläche hinzu
    pub fn add_area(&mut self, area: TagArea) {
        self.areas.push(area);
    }

    /// Gibt die Anzahl der Knoten zurück
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt die Anzahl der Linien zurück
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Gibt die Anzahl der Flächen zurück
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// `true`, wenn keine Entity existiert
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.lines.is_empty() && self.areas.is_empty()
    }

    /// Entfernt alle Entities
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lines.clear();
        self.areas.clear();
    }

    /// Prüft, ob ein Label bereits von irgendeiner Entity belegt ist
    pub fn contains_label(&self, label: &TagLabel) -> bool {
        self.nodes.iter().any(|n| &n.label == label)
            || self.lines.iter().any(|l| &l.label == label)
            || self.areas.iter().any(|a| &a.label == label)
    }

    /// Findet einen Knoten über sein Label
    pub fn node_by_label(&self, label: &TagLabel) -> Option<&TagNode> {
        self.nodes.iter().find(|n| &n.label == label)
    }

    /// Ersetzt das Backend-Handle einer Entity (nach erneutem Zeichnen).
    ///
    /// Rückgabe `false`, wenn keine Entity das alte Handle trägt.
    pub fn reassign_entity(&mut self, old: EntityRef, new: EntityRef) -> bool {
        let slot = self
            .nodes
            .iter_mut()
            .map(|n| &mut n.entity)
            .chain(self.lines.iter_mut().map(|l| &mut l.entity))
            .chain(self.areas.iter_mut().map(|a| &mut a.entity))
            .find(|entity| **entity == old);
        match slot {
            Some(entity) => {
                *entity = new;
                true
            }
            None => false,
        }
    }

    /// Findet den ersten Knoten des Präfixes innerhalb der Toleranz um `point`
    pub fn find_node_at(&self, prefix: &str, point: Point, tolerance: f64) -> Option<&TagNode> {
        self.nodes.iter().find(|n| {
            n.label.has_prefix(prefix) && geometry::points_coincide(point, n.position, tolerance)
        })
    }

    /// Löst eine Koordinate auf das Label eines Knotens desselben Präfixes auf.
    ///
    /// Kein Treffer innerhalb der Toleranz → `None`.
    pub fn resolve_node_label(
        &self,
        prefix: &str,
        point: Point,
        tolerance: f64,
    ) -> Option<&TagLabel> {
        self.find_node_at(prefix, point, tolerance).map(|n| &n.label)
    }

    /// Prüft ob eine Linie des Präfixes das ungeordnete Punktpaar verbindet
    pub fn has_line_between(&self, prefix: &str, a: Point, b: Point, tolerance: f64) -> bool {
        self.lines
            .iter()
            .any(|l| l.label.has_prefix(prefix) && l.connects(a, b, tolerance))
    }

    /// Nächste freie Linien-Nummer des Präfixes: höchste vorhandene + 1, sonst 1
    pub fn next_line_seq(&self, prefix: &str) -> u32 {
        next_seq(self.lines.iter().map(|l| &l.label), prefix)
    }

    /// Nächste freie Flächen-Nummer des Präfixes: höchste vorhandene + 1, sonst 1
    pub fn next_area_seq(&self, prefix: &str) -> u32 {
        next_seq(self.areas.iter().map(|a| &a.label), prefix)
    }

    /// Zuletzt angelegte Linie (über alle Präfixe)
    pub fn last_line(&self) -> Option<&TagLine> {
        self.lines.last()
    }

    /// Index des zuletzt angelegten Knotens mit dem Präfix
    pub fn last_node_index_with_prefix(&self, prefix: &str) -> Option<usize> {
        self.nodes.iter().rposition(|n| n.label.has_prefix(prefix))
    }

    /// Entfernt den Knoten am Index
    pub fn remove_node_at(&mut self, index: usize) -> Option<TagNode> {
        (index < self.nodes.len()).then(|| self.nodes.remove(index))
    }

    /// Entfernt alle Linien des Präfixes, deren Start- oder Endpunkt auf
    /// `node_label` aufgelöst wird.
    ///
    /// Die Auflösung nutzt die Knoten des Präfixes mit der Label-Toleranz.
    pub fn remove_lines_touching(
        &mut self,
        prefix: &str,
        node_label: &TagLabel,
        tolerance: f64,
    ) -> Vec<TagLine> {
        let touches: Vec<bool> = self
            .lines
            .iter()
            .map(|line| {
                line.label.has_prefix(prefix)
                    && [line.start, line.end].into_iter().any(|p| {
                        self.resolve_node_label(prefix, p, tolerance) == Some(node_label)
                    })
            })
            .collect();

        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.lines.len());
        for (line, touch) in std::mem::take(&mut self.lines).into_iter().zip(touches) {
            if touch {
                removed.push(line);
            } else {
                kept.push(line);
            }
        }
        self.lines = kept;
        removed
    }

    /// Entfernt alle Flächen, deren Umlauf `node_label` enthält
    pub fn remove_areas_containing(&mut self, node_label: &TagLabel) -> Vec<TagArea> {
        let (removed, kept): (Vec<TagArea>, Vec<TagArea>) = std::mem::take(&mut self.areas)
            .into_iter()
            .partition(|a| a.contains_node(node_label));
        self.areas = kept;
        removed
    }
}

fn next_seq<'a>(labels: impl Iterator<Item = &'a TagLabel>, prefix: &str) -> u32 {
    labels
        .filter(|label| label.has_prefix(prefix))
        .map(|label| label.seq)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
