use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::ScoringConfig;
use crate::scoring::engine::{assess, Answers};

pub fn run(answers_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => ScoringConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScoringConfig::default(),
    };

    let raw = fs::read_to_string(answers_path)
        .with_context(|| format!("failed to read answers file {}", answers_path.display()))?;
    let answers: Answers = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse answers file {}", answers_path.display()))?;

    let assessment = assess(&answers, &config);
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
