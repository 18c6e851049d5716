//! Writer für SpreadsheetML-2003-Arbeitsmappen (Excel/LibreOffice).
//!
//! Pro Entity-Art ein Arbeitsblatt; Blätter ohne Zeilen entfallen.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::rows::ExportTables;
use super::timestamped_path;
use crate::host_bridge::TabularExporter;
use crate::shared::TagOptions;

const NODE_SHEET: &str = "Knoten";
const LINE_SHEET: &str = "Linien";
const AREA_SHEET: &str = "Flächen";

const NODE_HEADERS: [&str; 4] = ["Knoten-Label", "X", "Y", "Layer"];
const LINE_HEADERS: [&str; 10] = [
    "Linien-Label",
    "Start-Knoten",
    "End-Knoten",
    "Start X",
    "Start Y",
    "End X",
    "End Y",
    "Länge",
    "Winkel (°)",
    "Layer",
];
const AREA_HEADERS: [&str; 6] = [
    "Flächen-Label",
    "Schwerpunkt X",
    "Schwerpunkt Y",
    "Eckenzahl",
    "Layer",
    "Fläche",
];

/// Eine Tabellenzelle
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

/// Schreibt die Tabellen als SpreadsheetML-2003-Dokument.
///
/// Sind alle Tabellen leer, wird ein leeres Knoten-Blatt geschrieben, da eine
/// Arbeitsmappe mindestens ein Blatt braucht.
pub fn write_workbook(tables: &ExportTables) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str("<?mso-application progid=\"Excel.Sheet\"?>\n");
    output.push_str("<Workbook xmlns=\"urn:schemas-microsoft-com:office:spreadsheet\"\n");
    output.push_str(" xmlns:o=\"urn:schemas-microsoft-com:office:office\"\n");
    output.push_str(" xmlns:x=\"urn:schemas-microsoft-com:office:excel\"\n");
    output.push_str(" xmlns:ss=\"urn:schemas-microsoft-com:office:spreadsheet\">\n");
    output.push_str("    <Styles>\n");
    output.push_str("        <Style ss:ID=\"header\">\n");
    output.push_str("            <Font ss:Bold=\"1\"/>\n");
    output.push_str("            <Interior ss:Color=\"#D3D3D3\" ss:Pattern=\"Solid\"/>\n");
    output.push_str("        </Style>\n");
    output.push_str("    </Styles>\n");

    if !tables.nodes.is_empty() || tables.is_empty() {
        let rows = tables.nodes.iter().map(|row| {
            vec![
                Cell::Text(&row.label),
                Cell::Number(row.x),
                Cell::Number(row.y),
                Cell::Text(&row.layer),
            ]
        });
        write_sheet(&mut output, NODE_SHEET, &NODE_HEADERS.map(String::from), rows);
    }

    if !tables.lines.is_empty() {
        let rows = tables.lines.iter().map(|row| {
            vec![
                Cell::Text(&row.label),
                Cell::Text(&row.start_node),
                Cell::Text(&row.end_node),
                Cell::Number(row.start_x),
                Cell::Number(row.start_y),
                Cell::Number(row.end_x),
                Cell::Number(row.end_y),
                Cell::Number(row.length),
                Cell::Number(row.angle),
                Cell::Text(&row.layer),
            ]
        });
        write_sheet(&mut output, LINE_SHEET, &LINE_HEADERS.map(String::from), rows);
    }

    if !tables.areas.is_empty() {
        let max_vertices = tables.max_vertex_count();
        let headers: Vec<String> = AREA_HEADERS
            .iter()
            .map(|h| h.to_string())
            .chain((1..=max_vertices).map(|i| format!("Knoten {}", i)))
            .collect();
        let rows = tables.areas.iter().map(|row| {
            let mut cells = vec![
                Cell::Text(&row.label),
                Cell::Number(row.centroid_x),
                Cell::Number(row.centroid_y),
                Cell::Number(row.vertex_count as f64),
                Cell::Text(&row.layer),
                Cell::Number(row.area),
            ];
            cells.extend(row.node_labels.iter().map(|label| Cell::Text(label)));
            // Kürzere Umläufe mit leeren Zellen auffüllen
            cells.resize_with(AREA_HEADERS.len() + max_vertices, || Cell::Empty);
            cells
        });
        write_sheet(&mut output, AREA_SHEET, &headers, rows);
    }

    output.push_str("</Workbook>\n");
    output
}

fn write_sheet<'a>(
    output: &mut String,
    name: &str,
    headers: &[String],
    rows: impl Iterator<Item = Vec<Cell<'a>>>,
) {
    output.push_str(&format!(
        "    <Worksheet ss:Name=\"{}\">\n",
        escape_xml(name)
    ));
    output.push_str("        <Table>\n");

    output.push_str("            <Row>\n");
    for header in headers {
        output.push_str(&format!(
            "                <Cell ss:StyleID=\"header\">\
             <Data ss:Type=\"String\">{}</Data></Cell>\n",
            escape_xml(header)
        ));
    }
    output.push_str("            </Row>\n");

    for cells in rows {
        output.push_str("            <Row>\n");
        for cell in cells {
            write_cell(output, &cell);
        }
        output.push_str("            </Row>\n");
    }

    output.push_str("        </Table>\n");
    output.push_str("    </Worksheet>\n");
}

fn write_cell(output: &mut String, cell: &Cell<'_>) {
    match cell {
        Cell::Text(text) => output.push_str(&format!(
            "                <Cell><Data ss:Type=\"String\">{}</Data></Cell>\n",
            escape_xml(text)
        )),
        Cell::Number(value) => output.push_str(&format!(
            "                <Cell><Data ss:Type=\"Number\">{}</Data></Cell>\n",
            value
        )),
        Cell::Empty => output.push_str("                <Cell/>\n"),
    }
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Exporter, der eine Arbeitsmappe mit Zeitstempel im Zielverzeichnis ablegt
#[derive(Debug, Clone)]
pub struct SpreadsheetExporter {
    directory: PathBuf,
    file_stem: String,
}

impl SpreadsheetExporter {
    /// Erstellt einen Exporter für Verzeichnis und Dateinamen-Stamm
    pub fn new(directory: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_stem: file_stem.into(),
        }
    }

    /// Erstellt einen Exporter aus den Laufzeit-Optionen
    pub fn from_options(options: &TagOptions) -> Self {
        Self::new(options.export_directory(), options.export_file_stem.clone())
    }
}

impl TabularExporter for SpreadsheetExporter {
    fn export(&mut self, tables: &ExportTables) -> Result<String> {
        let content = write_workbook(tables);
        std::fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Export-Verzeichnis {} nicht anlegbar",
                self.directory.display()
            )
        })?;
        let path = timestamped_path(&self.directory, &self.file_stem, "xml", chrono::Local::now());
        std::fs::write(&path, content)
            .with_context(|| format!("Export nach {} fehlgeschlagen", path.display()))?;
        log::info!("Arbeitsmappe gespeichert nach: {}", path.display());
        Ok(path.display().to_string())
    }
}
