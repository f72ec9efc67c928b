//! Battlemap - procedural wargame terrain from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Random map, JSON on stdout
//! battlemap generate
//!
//! # Reproduce a shared battlefield as an ASCII preview
//! battlemap generate --seed 42 --scenario Raze --token-seed 7 --format ascii
//!
//! # Budgeted, weighted map from a settings file
//! battlemap generate --settings settings.ron --resources 2,0,3,1,4 --weighted
//! ```
//!
//! Output goes to stdout; logs go to stderr.

use std::path::PathBuf;

use battlemap_core::scenario::{Scenario, TokenStrategy};
use battlemap_tools::generate::{self, GenerateOptions, OutputFormat};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "battlemap")]
#[command(about = "Procedural terrain and scenario token layouts for tabletop wargames")]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a map and, with --scenario, its tokens
    Generate {
        /// Map seed (0-4294967295); random when omitted
        #[arg(short, long)]
        seed: Option<String>,

        /// Token seed; random when omitted
        #[arg(long)]
        token_seed: Option<String>,

        /// Scenario name or index
        #[arg(long)]
        scenario: Option<String>,

        /// Per-type resource budget, e.g. 2,0,3
        #[arg(short, long)]
        resources: Option<String>,

        /// Select terrain types by weight
        #[arg(short, long)]
        weighted: bool,

        /// RON settings file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Debug overlay level (0-2)
        #[arg(short, long, default_value = "0")]
        debug_level: u8,
    },

    /// List scenarios and their indices
    Scenarios,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Ascii,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => Self::Json,
            Format::Ascii => Self::Ascii,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Generate {
            seed,
            token_seed,
            scenario,
            resources,
            weighted,
            settings,
            format,
            debug_level,
        } => {
            let options = GenerateOptions {
                seed,
                token_seed,
                scenario,
                resources,
                weighted,
                settings,
                debug_level,
                format: format.into(),
            };
            match generate::run(&options) {
                Ok(output) => println!("{output}"),
                Err(e) => {
                    tracing::error!("Generation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Scenarios => {
            for scenario in Scenario::ALL {
                let status = match scenario.strategy() {
                    TokenStrategy::Raze => "tokens",
                    TokenStrategy::NotImplemented => "no tokens yet",
                };
                println!("{:>2}  {:<16} {status}", scenario.index(), scenario.name());
            }
        }
    }
}
