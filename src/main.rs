//! CAD Tag Creator (Kommandozeilen-Host).
//!
//! Liest Events zeilenweise als JSON (Datei oder stdin), verarbeitet sie gegen
//! eine In-Memory-Zeichnung und exportiert beim Abschluss die Tabellen.
//!
//! Aufruf: `cad-tag-creator [SKRIPT] [--config PFAD] [--out VERZEICHNIS]
//! [--format xml|json] [--drawing PFAD]`

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cad_tag_creator::host_bridge::{parse_script_line, InteractionSurface, Statistics};
use cad_tag_creator::{
    exporter_for, AppController, AppState, ExportFormat, HostBridge, MemoryDrawing, TagOptions,
};

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("CAD Tag Creator v{} startet...", env!("CARGO_PKG_VERSION"));

    let args = CliArgs::parse(std::env::args().skip(1))?;
    let options = args.load_options();
    AppRunner::new(options).run(&args)
}

/// Kommandozeilen-Argumente
#[derive(Debug, Default)]
struct CliArgs {
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    format: Option<ExportFormat>,
    drawing: Option<PathBuf>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(next_value(&mut args, &arg)?.into()),
                "--out" => parsed.out_dir = Some(next_value(&mut args, &arg)?.into()),
                "--drawing" => parsed.drawing = Some(next_value(&mut args, &arg)?.into()),
                "--format" => {
                    let name = next_value(&mut args, &arg)?;
                    let format = ExportFormat::parse(&name)
                        .with_context(|| format!("Unbekanntes Exportformat: {}", name))?;
                    parsed.format = Some(format);
                }
                flag if flag.starts_with("--") => bail!("Unbekannte Option: {}", flag),
                _ if parsed.script.is_none() => parsed.script = Some(arg.into()),
                _ => bail!("Mehr als ein Skript angegeben: {}", arg),
            }
        }
        Ok(parsed)
    }

    /// Optionen aus TOML laden (oder Standardwerte) und mit Argumenten überschreiben
    fn load_options(&self) -> TagOptions {
        let config_path = self.config.clone().unwrap_or_else(TagOptions::config_path);
        let mut options = TagOptions::load_from_file(&config_path);
        if let Some(dir) = &self.out_dir {
            options.export_dir = Some(dir.clone());
        }
        if let Some(format) = self.format {
            options.export_format = format;
        }
        options
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("Option {} erwartet einen Wert", flag))
}

/// Gibt Rückmeldungen der Engine auf der Konsole aus
#[derive(Default)]
struct ConsoleSurface {
    last_statistics: Statistics,
}

impl InteractionSurface for ConsoleSurface {
    fn on_statistics(&mut self, statistics: Statistics) {
        self.last_statistics = statistics;
        log::debug!(
            "Statistik: {} Knoten, {} Linien, {} Flächen",
            statistics.nodes,
            statistics.lines,
            statistics.areas
        );
    }

    fn on_next_start_number(&mut self, seq: u32) {
        println!("Nächste Startnummer: {}", seq);
    }

    fn on_message(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Verarbeitet alle Events eines Skripts
struct AppRunner {
    state: AppState,
    controller: AppController,
    drawing: MemoryDrawing,
    surface: ConsoleSurface,
}

impl AppRunner {
    fn new(options: TagOptions) -> Self {
        let drawing = MemoryDrawing::new(&options);
        Self {
            state: AppState::with_options(options),
            controller: AppController::new(),
            drawing,
            surface: ConsoleSurface::default(),
        }
    }

    fn run(mut self, args: &CliArgs) -> Result<()> {
        let reader: Box<dyn BufRead> = match &args.script {
            Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
                format!("Skript {} konnte nicht geöffnet werden", path.display())
            })?)),
            None => Box::new(BufReader::new(io::stdin())),
        };

        let mut exporter = exporter_for(&self.state.options);
        let mut failed = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line.context("Eingabe konnte nicht gelesen werden")?;
            let intent = match parse_script_line(&line, &self.state.options) {
                Ok(Some(intent)) => intent,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("Zeile {} übersprungen: {:#}", index + 1, e);
                    failed += 1;
                    continue;
                }
            };

            let mut host =
                HostBridge::new(&mut self.drawing, &mut self.surface, exporter.as_mut());
            // Fehler wurden bereits gemeldet und zurückgerollt
            if self
                .controller
                .handle_intent(&mut self.state, &mut host, intent)
                .is_err()
            {
                failed += 1;
            }
        }

        let command_log = &self.state.command_log;
        log::debug!("{} Commands ausgeführt", command_log.len());
        for (index, command) in command_log.entries().iter().enumerate() {
            log::debug!("  #{:>4}: {:?}", index + 1, command);
        }

        let statistics = self.surface.last_statistics;
        println!(
            "Stand: {} Knoten, {} Linien, {} Flächen ({} fehlerhafte Events)",
            statistics.nodes, statistics.lines, statistics.areas, failed
        );
        for (prefix, summary) in self.drawing.prefix_summary() {
            println!(
                "  {}: {} Knoten (bis Nr. {}), {} Linien, {} Flächen",
                prefix, summary.nodes, summary.max_node_seq, summary.lines, summary.areas
            );
        }
        if let Some(destination) = &self.state.last_export {
            println!("Export: {}", destination);
        }

        if let Some(path) = &args.drawing {
            let json = serde_json::to_string_pretty(&self.drawing)?;
            std::fs::write(path, json)
                .with_context(|| format!("Zeichnung nach {} nicht schreibbar", path.display()))?;
            log::info!("Zeichnung gespeichert nach: {}", path.display());
        }

        Ok(())
    }
}
