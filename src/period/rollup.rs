use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Job, JobStatus};
use crate::costing::{billing_difference, earned_revenue};
use crate::period::calendar::{month_info, week_info};

/// Running totals across a job collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JobMetrics {
    pub total_earned_revenue: f64,
    pub total_contract_value: f64,
    pub total_costs_to_date: f64,
    pub total_invoiced: f64,
    /// Sum of positive billing differences.
    pub total_over_billing: f64,
    /// Sum of the magnitudes of negative billing differences.
    pub total_under_billing: f64,
    pub job_count: usize,
}

/// Accumulate per-job metrics into collection totals.
///
/// Each job's billing difference lands in exactly one bucket: positive
/// differences add to over-billing, negative ones add their magnitude to
/// under-billing. A difference of zero touches neither.
pub fn job_metrics(jobs: &[Job]) -> JobMetrics {
    let mut metrics = JobMetrics::default();

    for job in jobs {
        metrics.total_earned_revenue += earned_revenue(job).total;
        metrics.total_contract_value += job.contract.sum();
        metrics.total_costs_to_date += job.costs.sum();
        metrics.total_invoiced += job.invoiced.sum();

        let position = billing_difference(job);
        if position.is_over_billed {
            metrics.total_over_billing += position.difference;
        } else if position.difference < 0.0 {
            metrics.total_under_billing += position.difference.abs();
        }

        metrics.job_count += 1;
    }

    metrics
}

/// Natural key of a weekly snapshot. ISO week-numbering year, not the
/// calendar year.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub company_id: String,
    pub year: i32,
    pub week: u32,
}

impl std::fmt::Display for WeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}-W{:02}", self.company_id, self.year, self.week)
    }
}

/// Natural key of a monthly snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub company_id: String,
    pub year: i32,
    pub month: u32,
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}-{:02}", self.company_id, self.year, self.month)
    }
}

/// Point-in-time weekly rollup of a company's active jobs.
///
/// Carries a denormalized copy of the contributing jobs (`snapshot_data`)
/// so later reports read the jobs as they were, not as they are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    pub company_id: String,
    pub year: i32,
    pub week_number: u32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_earned_revenue: f64,
    pub total_contract_value: f64,
    pub total_costs_to_date: f64,
    pub total_invoiced: f64,
    pub active_job_count: usize,
    pub snapshot_data: Vec<Job>,
}

impl WeeklySnapshot {
    /// Roll up the active jobs of a company for the ISO week containing
    /// `date`. Re-running for the same week produces the same key, so the
    /// store's upsert keeps exactly one row per week.
    pub fn build(company_id: &str, date: NaiveDate, jobs: &[Job]) -> Self {
        let week = week_info(date);
        let contributing: Vec<Job> = jobs
            .iter()
            .filter(|j| j.status == JobStatus::Active)
            .cloned()
            .collect();
        let metrics = job_metrics(&contributing);

        Self {
            company_id: company_id.to_string(),
            year: week.year,
            week_number: week.week,
            week_start: week.week_start,
            week_end: week.week_end,
            total_earned_revenue: metrics.total_earned_revenue,
            total_contract_value: metrics.total_contract_value,
            total_costs_to_date: metrics.total_costs_to_date,
            total_invoiced: metrics.total_invoiced,
            active_job_count: contributing.len(),
            snapshot_data: contributing,
        }
    }

    pub fn key(&self) -> WeekKey {
        WeekKey {
            company_id: self.company_id.clone(),
            year: self.year,
            week: self.week_number,
        }
    }
}

/// Point-in-time monthly rollup of a company's active and completed jobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub company_id: String,
    pub year: i32,
    pub month: u32,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub total_earned_revenue: f64,
    pub total_contract_value: f64,
    pub total_costs_to_date: f64,
    pub total_invoiced: f64,
    pub total_over_billing: f64,
    pub total_under_billing: f64,
    pub active_job_count: usize,
    pub completed_job_count: usize,
    /// Set once by `finalize_month`; whether a finalized month may be
    /// recomputed is the caller's policy, not enforced here.
    pub finalized_at: Option<DateTime<Utc>>,
    pub snapshot_data: Vec<Job>,
}

impl MonthlySnapshot {
    pub fn build(company_id: &str, date: NaiveDate, jobs: &[Job]) -> Self {
        let month = month_info(date);
        let contributing: Vec<Job> = jobs
            .iter()
            .filter(|j| matches!(j.status, JobStatus::Active | JobStatus::Completed))
            .cloned()
            .collect();
        let metrics = job_metrics(&contributing);
        let completed = contributing
            .iter()
            .filter(|j| j.status == JobStatus::Completed)
            .count();

        Self {
            company_id: company_id.to_string(),
            year: month.year,
            month: month.month,
            month_start: month.month_start,
            month_end: month.month_end,
            total_earned_revenue: metrics.total_earned_revenue,
            total_contract_value: metrics.total_contract_value,
            total_costs_to_date: metrics.total_costs_to_date,
            total_invoiced: metrics.total_invoiced,
            total_over_billing: metrics.total_over_billing,
            total_under_billing: metrics.total_under_billing,
            active_job_count: contributing.len() - completed,
            completed_job_count: completed,
            finalized_at: None,
            snapshot_data: contributing,
        }
    }

    pub fn key(&self) -> MonthKey {
        MonthKey {
            company_id: self.company_id.clone(),
            year: self.year,
            month: self.month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CostBreakdown, JobKind};

    fn job(id: &str, status: JobStatus, invoiced_labor: f64) -> Job {
        Job {
            id: id.to_string(),
            job_no: format!("24-{id}"),
            name: String::new(),
            status,
            kind: JobKind::FixedPrice,
            contract: CostBreakdown::new(100_000.0, 0.0, 0.0),
            budget: CostBreakdown::new(80_000.0, 0.0, 0.0),
            costs: CostBreakdown::new(40_000.0, 0.0, 0.0),
            cost_to_complete: CostBreakdown::default(),
            invoiced: CostBreakdown::new(invoiced_labor, 0.0, 0.0),
            labor_cost_per_hour: None,
            as_of: None,
            schedule: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn billing_buckets_never_overlap_for_one_job() {
        // Each job earns 50,000 (50% complete on a 100,000 contract).
        let jobs = vec![
            job("a", JobStatus::Active, 60_000.0), // over by 10,000
            job("b", JobStatus::Active, 45_000.0), // under by 5,000
            job("c", JobStatus::Active, 50_000.0), // exactly on track
        ];

        let metrics = job_metrics(&jobs);
        assert_eq!(metrics.total_over_billing, 10_000.0);
        assert_eq!(metrics.total_under_billing, 5_000.0);
        assert_eq!(metrics.total_earned_revenue, 150_000.0);
        assert_eq!(metrics.total_invoiced, 155_000.0);
    }

    #[test]
    fn weekly_snapshot_only_rolls_up_active_jobs() {
        let jobs = vec![
            job("a", JobStatus::Active, 0.0),
            job("b", JobStatus::Completed, 0.0),
            job("c", JobStatus::Pending, 0.0),
        ];

        let snap = WeeklySnapshot::build("co-1", date(2024, 1, 1), &jobs);
        assert_eq!(snap.active_job_count, 1);
        assert_eq!(snap.snapshot_data.len(), 1);
        assert_eq!(snap.year, 2024);
        assert_eq!(snap.week_number, 1);
        assert_eq!(snap.total_contract_value, 100_000.0);
    }

    #[test]
    fn monthly_snapshot_includes_completed_jobs() {
        let jobs = vec![
            job("a", JobStatus::Active, 0.0),
            job("b", JobStatus::Completed, 0.0),
            job("c", JobStatus::Archived, 0.0),
        ];

        let snap = MonthlySnapshot::build("co-1", date(2024, 3, 15), &jobs);
        assert_eq!(snap.active_job_count, 1);
        assert_eq!(snap.completed_job_count, 1);
        assert_eq!(snap.snapshot_data.len(), 2);
        assert!(snap.finalized_at.is_none());
    }

    #[test]
    fn same_week_rebuild_produces_same_key() {
        let jobs = vec![job("a", JobStatus::Active, 0.0)];
        let monday = WeeklySnapshot::build("co-1", date(2024, 7, 15), &jobs);
        let friday = WeeklySnapshot::build("co-1", date(2024, 7, 19), &jobs);

        assert_eq!(monday.key(), friday.key());
    }
}
