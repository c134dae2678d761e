use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::core::Job;
use crate::period::{month_end_report, MonthlySnapshot, WeeklySnapshot};

pub fn run(jobs_path: &Path, company: &str, date: NaiveDate, monthly: bool) -> Result<()> {
    let raw = fs::read_to_string(jobs_path)
        .with_context(|| format!("failed to read jobs file {}", jobs_path.display()))?;
    let jobs: Vec<Job> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse jobs file {}", jobs_path.display()))?;

    if monthly {
        let snapshot = MonthlySnapshot::build(company, date, &jobs);
        log::info!(
            "monthly snapshot {} covers {} jobs",
            snapshot.key(),
            snapshot.snapshot_data.len()
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        println!(
            "{}",
            serde_json::to_string_pretty(&month_end_report(&snapshot))?
        );
    } else {
        let snapshot = WeeklySnapshot::build(company, date, &jobs);
        log::info!(
            "weekly snapshot {} covers {} active jobs",
            snapshot.key(),
            snapshot.active_job_count
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
