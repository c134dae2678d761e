use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "valuemap")]
#[command(about = "Financial metrics and value-driver scoring for construction job costing", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-job earned revenue, billing position, and schedule warnings
    Metrics {
        /// JSON file holding an array of jobs
        jobs: PathBuf,
    },

    /// Roll jobs up into a weekly or monthly snapshot
    Snapshot {
        /// JSON file holding an array of jobs
        jobs: PathBuf,

        /// Company the jobs belong to
        #[arg(long, default_value = "default")]
        company: String,

        /// Snapshot date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Build the monthly rollup instead of the weekly one
        #[arg(long)]
        monthly: bool,
    },

    /// Score a questionnaire and report the adjusted multiple range
    Score {
        /// JSON file mapping question id to selected option value
        answers: PathBuf,

        /// Scoring configuration (defaults to the built-in model)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Compute adjusted EBITDA and business value from valuation inputs
    Valuation {
        /// JSON file holding valuation inputs, or an array of scenarios
        inputs: PathBuf,
    },
}
