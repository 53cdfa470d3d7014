//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TypeSift: column-type inference for tabular data
#[derive(Parser)]
#[command(name = "typesift")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file and report per-column types
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the full analysis as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the analysis as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long)]
        delimiter: Option<char>,
    },
}
