//! Orchestration over the storage boundary: fetch jobs, compute, upsert.
//!
//! These functions decide nothing about *when* to run (callers trigger
//! recomputation) and never retry storage failures; errors propagate to
//! whoever owns retry policy.

use chrono::{NaiveDate, Utc};
use log::{debug, info};

use crate::errors::EngineError;
use crate::period::{
    month_end_report, weekly_report, MonthEndReport, MonthKey, MonthlySnapshot, WeeklyReport,
    WeeklySnapshot,
};
use crate::storage::MetricsStore;
use crate::valuation::{value_growth, Valuation, ValuationInputs, ValuationUpdate, ValueGrowth};

/// Recompute and store the weekly snapshot for the ISO week containing
/// `date`. Safe to re-run: the store keeps one row per week key.
pub fn create_weekly_snapshot(
    store: &mut impl MetricsStore,
    company_id: &str,
    date: NaiveDate,
) -> Result<WeeklySnapshot, EngineError> {
    let jobs = store.fetch_jobs(company_id)?;
    let snapshot = WeeklySnapshot::build(company_id, date, &jobs);
    debug!(
        "weekly snapshot {} rolled up {} active jobs",
        snapshot.key(),
        snapshot.active_job_count
    );
    Ok(store.upsert_weekly_snapshot(snapshot.key(), snapshot)?)
}

/// Recompute and store the monthly snapshot for the month containing
/// `date`.
pub fn create_monthly_snapshot(
    store: &mut impl MetricsStore,
    company_id: &str,
    date: NaiveDate,
) -> Result<MonthlySnapshot, EngineError> {
    let jobs = store.fetch_jobs(company_id)?;
    let snapshot = MonthlySnapshot::build(company_id, date, &jobs);
    debug!(
        "monthly snapshot {} rolled up {} active / {} completed jobs",
        snapshot.key(),
        snapshot.active_job_count,
        snapshot.completed_job_count
    );
    Ok(store.upsert_monthly_snapshot(snapshot.key(), snapshot)?)
}

/// Stamp a stored monthly snapshot as finalized.
///
/// This is the only terminal mutation in the engine. Nothing here blocks a
/// later recomputation of the same month; that is a caller policy call.
pub fn finalize_month(
    store: &mut impl MetricsStore,
    key: &MonthKey,
) -> Result<MonthlySnapshot, EngineError> {
    let mut snapshot = store.fetch_monthly_snapshot(key)?;
    snapshot.finalized_at = Some(Utc::now());
    info!("finalized month {key}");
    Ok(store.upsert_monthly_snapshot(key.clone(), snapshot)?)
}

/// Week-over-week report from the most recent `limit` stored snapshots.
pub fn run_weekly_report(
    store: &impl MetricsStore,
    company_id: &str,
    limit: usize,
) -> Result<Option<WeeklyReport>, EngineError> {
    let snapshots = store.fetch_weekly_snapshots(company_id, limit, true)?;
    Ok(weekly_report(&snapshots))
}

/// Month-end billing report for one stored monthly snapshot.
pub fn run_month_end_report(
    store: &impl MetricsStore,
    key: &MonthKey,
) -> Result<MonthEndReport, EngineError> {
    let snapshot = store.fetch_monthly_snapshot(key)?;
    Ok(month_end_report(&snapshot))
}

/// Insert a valuation, optionally making it the company's current one.
pub fn create_valuation(
    store: &mut impl MetricsStore,
    company_id: &str,
    inputs: ValuationInputs,
    make_current: bool,
) -> Result<Valuation, EngineError> {
    let mut valuation = store.insert_valuation(company_id, inputs)?;
    if make_current {
        store.set_current_valuation(company_id, &valuation.id)?;
        valuation.is_current = true;
    }
    info!(
        "valuation {} for {company_id}: business value {:.0}",
        valuation.id, valuation.business_value
    );
    Ok(valuation)
}

/// Patch a stored valuation's inputs; derived figures are recomputed by
/// the store.
pub fn update_valuation(
    store: &mut impl MetricsStore,
    id: &str,
    update: &ValuationUpdate,
) -> Result<Valuation, EngineError> {
    Ok(store.update_valuation(id, update)?)
}

/// Business-value growth over the trailing `period_months` of stored
/// valuations.
pub fn run_value_growth(
    store: &impl MetricsStore,
    company_id: &str,
    period_months: u32,
) -> Result<Option<ValueGrowth>, EngineError> {
    let valuations = store.fetch_valuations(company_id)?;
    Ok(value_growth(&valuations, period_months))
}
