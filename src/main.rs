//! roomlight CLI: build a room graph from a JSON payload and decide which
//! lights to toggle.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use roomlight::config::RoomlightConfig;
use roomlight::export::ExportFormat;
use roomlight::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "roomlight", version, about = "Room occupancy graph and light-toggle derivation")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Namespace IRI for generated resources (overrides config).
    #[arg(long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph, classify rooms and print the full response as JSON.
    Generate {
        /// Path to a JSON payload with a "rooms" key.
        #[arg(long)]
        file: PathBuf,

        /// Graph text format: turtle or ntriples.
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Print only the three light-toggle sets.
    Classify {
        /// Path to a JSON payload with a "rooms" key.
        #[arg(long)]
        file: PathBuf,
    },

    /// Print only the serialized graph.
    Export {
        /// Path to a JSON payload with a "rooms" key.
        #[arg(long)]
        file: PathBuf,

        /// Graph text format: turtle or ntriples.
        #[arg(long)]
        format: Option<ExportFormat>,
    },
}

fn read_payload(file: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(file).into_diagnostic()?;
    serde_json::from_str(&content).into_diagnostic()
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = RoomlightConfig::resolve(cli.config.as_deref())?;
    if let Some(ns) = cli.namespace {
        config.namespace = ns;
    }
    let pipeline = Pipeline::from_config(&config)?;

    match cli.command {
        Commands::Generate { file, format } => {
            let payload = read_payload(&file)?;
            let pipeline = pipeline.with_format(format.unwrap_or(config.format));
            let response = pipeline.generate(&payload)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&response).into_diagnostic()?
            );
        }

        Commands::Classify { file } => {
            let payload = read_payload(&file)?;
            let toggle = pipeline.classify(&payload)?;

            let sections = [
                ("Rooms with people", &toggle.rooms_with_people),
                (
                    "Rooms with lights on and no people",
                    &toggle.rooms_with_lights_on_and_no_people,
                ),
                (
                    "Rooms with people and lights off",
                    &toggle.rooms_with_people_and_lights_off,
                ),
            ];
            for (title, rooms) in sections {
                println!("{title} ({}):", rooms.len());
                for room in rooms {
                    println!("  {room}");
                }
            }
        }

        Commands::Export { file, format } => {
            let payload = read_payload(&file)?;
            let pipeline = pipeline.with_format(format.unwrap_or(config.format));
            print!("{}", pipeline.export(&payload)?);
        }
    }

    Ok(())
}
