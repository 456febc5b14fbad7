use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::generate::{self, GenerateArgs};
use commands::gif::{self, GifArgs};
use commands::probe::{self, ProbeArgs};
use commands::rarity::{self, RarityArgs};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "lamina", about = "Deterministic layered collection generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the collection described by lamina.json.
    Generate(GenerateArgs),
    /// Aggregate rarity statistics over persisted metadata records.
    Rarity(RarityArgs),
    /// Assemble an animated GIF from a folder of rendered PNG frames.
    Gif(GifArgs),
    /// Generate without persisting anything and print the rarity report.
    Probe(ProbeArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        // Bare invocation generates, matching the common workflow.
        None => generate::run(&GenerateArgs::default()),
        Some(Command::Generate(args)) => generate::run(&args),
        Some(Command::Rarity(args)) => rarity::run(&args),
        Some(Command::Gif(args)) => gif::run(&args),
        Some(Command::Probe(args)) => probe::run(&args),
    }
}
