//! Recprep CLI - Recommendation Data Preparation
//!
//! Features:
//! - One-shot preprocessing of interaction and content CSVs
//! - JSON configuration overrides
//! - Run reports as text, JSON, or table

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

/// Recprep CLI - Recommendation data preparation
#[derive(Parser)]
#[command(name = "recprep")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Build user-item matrices and content features from raw CSVs", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the preprocessing pipeline
    Run {
        /// Directory holding consumer_transactions.csv and platform_content.csv
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,

        /// Directory for the three output CSVs
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// JSON file overriding pipeline settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the run summary to a JSON file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// JSON file overriding pipeline settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    recprep_core::init();

    match cli.command {
        Some(Commands::Run { input_dir, output_dir, config, report }) => {
            commands::run(&input_dir, &output_dir, config.as_deref(), report.as_deref(), &cli.format)?;
        }
        Some(Commands::Config { config }) => {
            commands::show_config(config.as_deref())?;
        }
        None => {
            commands::run(&PathBuf::from("."), &PathBuf::from("."), None, None, &cli.format)?;
        }
    }

    Ok(())
}
