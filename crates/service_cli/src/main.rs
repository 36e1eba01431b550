//! Precio CLI - Command Line Pricing Operations
//!
//! This is the operational entry point for the Precio pricing calculator.
//!
//! # Commands
//!
//! - `precio analyze --input <file>` - Analyse a cost model file
//! - `precio template` - Emit a starter cost model to fill in
//! - `precio demo` - Walk the pricing pipeline through a worked example
//! - `precio check` - Verify environment assumptions
//!
//! # Architecture
//!
//! As part of the **S**ervice layer in the I-P-S architecture, this crate
//! drives the pure engine from the command line; persistence and the HTTP
//! surface belong to `service_api`.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Precio pricing calculator CLI
#[derive(Parser)]
#[command(name = "precio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a cost model file and print the pricing breakdown
    Analyze {
        /// Path to the cost model file (TOML or JSON)
        #[arg(short, long)]
        input: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Skip the recommendation list for unviable models
        #[arg(long)]
        no_recommendations: bool,
    },

    /// Write a starter cost model to fill in
    Template {
        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Walk the pricing pipeline through a worked example
    Demo,

    /// Check environment assumptions the pipeline relies on
    Check,
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Analyze {
            input,
            format,
            no_recommendations,
        } => commands::analyze::run(&input, &format, no_recommendations),
        Commands::Template { output } => commands::template::run(output.as_deref()),
        Commands::Demo => commands::demo::run(),
        Commands::Check => commands::check::run(),
    }
}
