//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Kind;

/// Graded motor imagery left/right discrimination trainer
#[derive(Parser, Debug)]
#[command(name = "laterality")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a left/right discrimination test
    Run {
        /// Root of the asset tree (<root>/{hands,feet}/{left,right})
        #[arg(long, default_value = "assets")]
        assets: PathBuf,

        /// File the finished run is appended to
        #[arg(short, long, default_value = "log.txt")]
        out: PathBuf,

        /// Number of images to present
        #[arg(short, long, default_value = "30")]
        count: usize,

        /// Limit the run to 'hands' or 'feet'
        #[arg(long)]
        limit: Option<Kind>,

        /// Draw images with replacement instead of exhausting the set
        #[arg(long)]
        repeats: bool,

        /// Keep unequal bucket sizes instead of sampling down to the
        /// smallest bucket
        #[arg(long)]
        no_equal: bool,
    },

    /// Analyze a run log and print per-run summaries
    Analyze {
        /// Log file to analyze
        file: PathBuf,

        /// Write a one-row-per-run summary CSV to FILE
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Append to the summary CSV instead of overwriting it
        #[arg(short, long)]
        append: bool,

        /// Write each run's trials to N_<FILE>, N = 1, 2, 3, ...
        #[arg(long, value_name = "FILE")]
        detailed_csv: Option<PathBuf>,
    },
}
