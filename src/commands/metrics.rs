use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::{BillingDifference, EarnedRevenue, Job};
use crate::costing::{
    all_schedule_warnings, billing_difference, earned_revenue, forecasted_profit,
    percent_complete, ScheduleWarning,
};
use crate::period::{job_metrics, JobMetrics};

#[derive(Serialize)]
struct JobReport {
    job_no: String,
    name: String,
    earned_revenue: EarnedRevenue,
    billing: BillingDifference,
    percent_complete: f64,
    forecasted_profit: f64,
    schedule_warnings: Vec<ScheduleWarning>,
}

#[derive(Serialize)]
struct MetricsReport {
    jobs: Vec<JobReport>,
    totals: JobMetrics,
}

pub fn run(jobs_path: &Path) -> Result<()> {
    let raw = fs::read_to_string(jobs_path)
        .with_context(|| format!("failed to read jobs file {}", jobs_path.display()))?;
    let jobs: Vec<Job> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse jobs file {}", jobs_path.display()))?;

    let report = MetricsReport {
        jobs: jobs
            .iter()
            .map(|job| JobReport {
                job_no: job.job_no.clone(),
                name: job.name.clone(),
                earned_revenue: earned_revenue(job),
                billing: billing_difference(job),
                percent_complete: percent_complete(job),
                forecasted_profit: forecasted_profit(job),
                schedule_warnings: all_schedule_warnings(job),
            })
            .collect(),
        totals: job_metrics(&jobs),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
