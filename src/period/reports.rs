use serde::Serialize;

use crate::core::Job;
use crate::costing::{billing_difference, earned_revenue, percent_complete};
use crate::period::rollup::{MonthlySnapshot, WeeklySnapshot};

/// Week-over-week earned-revenue movement for one job.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JobChange {
    pub job_id: String,
    pub job_no: String,
    pub current_earned: f64,
    pub previous_earned: f64,
    pub change: f64,
    pub percent_change: f64,
}

/// Totals line for one snapshot in the report history.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeeklyTotal {
    pub year: i32,
    pub week_number: u32,
    pub total_earned_revenue: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub year: i32,
    pub week_number: u32,
    pub total_earned_revenue: f64,
    pub previous_earned_revenue: f64,
    pub change: f64,
    pub percent_change: f64,
    /// Per-job movement, biggest gain first.
    pub job_changes: Vec<JobChange>,
    /// Earned-revenue totals for every snapshot given, newest first.
    pub totals: Vec<WeeklyTotal>,
}

fn percent_of(change: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        0.0 // a new baseline has no meaningful percent change
    } else {
        change / baseline * 100.0
    }
}

fn earned_in(snapshot: &WeeklySnapshot, job_id: &str) -> f64 {
    snapshot
        .snapshot_data
        .iter()
        .find(|j| j.id == job_id)
        .map(|j| earned_revenue(j).total)
        .unwrap_or(0.0)
}

/// Build the week-over-week report from stored snapshots, newest first.
///
/// Per-job deltas compare the two newest snapshots; a job absent from the
/// previous snapshot counts a previous earned of 0. Returns `None` when no
/// snapshot exists at all.
pub fn weekly_report(snapshots: &[WeeklySnapshot]) -> Option<WeeklyReport> {
    let current = snapshots.first()?;
    let previous = snapshots.get(1);

    let mut job_changes: Vec<JobChange> = current
        .snapshot_data
        .iter()
        .map(|job| {
            let current_earned = earned_revenue(job).total;
            let previous_earned = previous.map(|s| earned_in(s, &job.id)).unwrap_or(0.0);
            let change = current_earned - previous_earned;
            JobChange {
                job_id: job.id.clone(),
                job_no: job.job_no.clone(),
                current_earned,
                previous_earned,
                change,
                percent_change: percent_of(change, previous_earned),
            }
        })
        .collect();
    job_changes.sort_by(|a, b| b.change.partial_cmp(&a.change).unwrap_or(std::cmp::Ordering::Equal));

    let previous_total = previous.map(|s| s.total_earned_revenue).unwrap_or(0.0);
    let change = current.total_earned_revenue - previous_total;

    Some(WeeklyReport {
        year: current.year,
        week_number: current.week_number,
        total_earned_revenue: current.total_earned_revenue,
        previous_earned_revenue: previous_total,
        change,
        percent_change: percent_of(change, previous_total),
        job_changes,
        totals: snapshots
            .iter()
            .map(|s| WeeklyTotal {
                year: s.year,
                week_number: s.week_number,
                total_earned_revenue: s.total_earned_revenue,
            })
            .collect(),
    })
}

/// One job line of the month-end billing report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthEndRow {
    pub job_id: String,
    pub job_no: String,
    pub name: String,
    pub percent_complete: f64,
    pub contract_value: f64,
    pub costs_to_date: f64,
    pub forecasted_cost: f64,
    pub forecasted_profit: f64,
    pub forecasted_margin: f64,
    pub earned_revenue: f64,
    pub invoiced: f64,
    pub over_under_billing: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthEndReport {
    pub company_id: String,
    pub year: i32,
    pub month: u32,
    pub total_over_billing: f64,
    pub total_under_billing: f64,
    /// Worst billing outliers first, regardless of sign.
    pub rows: Vec<MonthEndRow>,
}

fn month_end_row(job: &Job) -> MonthEndRow {
    let contract_value = job.contract.sum();
    let costs_to_date = job.costs.sum();
    let forecasted_cost = costs_to_date + job.cost_to_complete.sum();
    let forecasted_profit = contract_value - forecasted_cost;
    let earned = earned_revenue(job);

    MonthEndRow {
        job_id: job.id.clone(),
        job_no: job.job_no.clone(),
        name: job.name.clone(),
        percent_complete: percent_complete(job),
        contract_value,
        costs_to_date,
        forecasted_cost,
        forecasted_profit,
        forecasted_margin: if contract_value == 0.0 {
            0.0
        } else {
            forecasted_profit / contract_value * 100.0
        },
        earned_revenue: earned.total,
        invoiced: job.invoiced.sum(),
        over_under_billing: billing_difference(job).difference,
    }
}

/// Recompute per-job forecasts from a monthly snapshot's denormalized jobs.
pub fn month_end_report(snapshot: &MonthlySnapshot) -> MonthEndReport {
    let mut rows: Vec<MonthEndRow> = snapshot.snapshot_data.iter().map(month_end_row).collect();
    rows.sort_by(|a, b| {
        b.over_under_billing
            .abs()
            .partial_cmp(&a.over_under_billing.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    MonthEndReport {
        company_id: snapshot.company_id.clone(),
        year: snapshot.year,
        month: snapshot.month,
        total_over_billing: snapshot.total_over_billing,
        total_under_billing: snapshot.total_under_billing,
        rows,
    }
}
