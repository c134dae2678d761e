use anyhow::Result;
use clap::Parser;
use valuemap::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Metrics { jobs } => valuemap::commands::metrics::run(&jobs),
        Commands::Snapshot {
            jobs,
            company,
            date,
            monthly,
        } => valuemap::commands::snapshot::run(&jobs, &company, date, monthly),
        Commands::Score { answers, config } => {
            valuemap::commands::score::run(&answers, config.as_deref())
        }
        Commands::Valuation { inputs } => valuemap::commands::valuation::run(&inputs),
    }
}
