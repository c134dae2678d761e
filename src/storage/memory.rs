use std::collections::HashMap;

use chrono::Utc;

use crate::core::Job;
use crate::errors::StorageError;
use crate::period::{MonthKey, MonthlySnapshot, WeekKey, WeeklySnapshot};
use crate::storage::MetricsStore;
use crate::valuation::{Valuation, ValuationInputs, ValuationUpdate};

/// HashMap-backed store used by tests and the CLI.
///
/// Upserts are plain map inserts on the period key, so the idempotency of
/// snapshot recomputation falls straight out of the data structure.
#[derive(Debug, Default)]
pub struct MemoryStore {
    jobs: HashMap<String, Vec<Job>>,
    weekly: HashMap<WeekKey, WeeklySnapshot>,
    monthly: HashMap<MonthKey, MonthlySnapshot>,
    valuations: HashMap<String, Valuation>,
    next_valuation_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a company's job list, replacing any previous seed.
    pub fn seed_jobs(&mut self, company_id: &str, jobs: Vec<Job>) {
        self.jobs.insert(company_id.to_string(), jobs);
    }

    pub fn weekly_snapshot_count(&self) -> usize {
        self.weekly.len()
    }

    pub fn monthly_snapshot_count(&self) -> usize {
        self.monthly.len()
    }
}

impl MetricsStore for MemoryStore {
    fn fetch_jobs(&self, company_id: &str) -> Result<Vec<Job>, StorageError> {
        self.jobs
            .get(company_id)
            .cloned()
            .ok_or_else(|| StorageError::CompanyNotFound(company_id.to_string()))
    }

    fn upsert_weekly_snapshot(
        &mut self,
        key: WeekKey,
        snapshot: WeeklySnapshot,
    ) -> Result<WeeklySnapshot, StorageError> {
        self.weekly.insert(key, snapshot.clone());
        Ok(snapshot)
    }

    fn upsert_monthly_snapshot(
        &mut self,
        key: MonthKey,
        snapshot: MonthlySnapshot,
    ) -> Result<MonthlySnapshot, StorageError> {
        self.monthly.insert(key, snapshot.clone());
        Ok(snapshot)
    }

    fn fetch_weekly_snapshots(
        &self,
        company_id: &str,
        limit: usize,
        newest_first: bool,
    ) -> Result<Vec<WeeklySnapshot>, StorageError> {
        let mut snapshots: Vec<WeeklySnapshot> = self
            .weekly
            .values()
            .filter(|s| s.company_id == company_id)
            .cloned()
            .collect();
        snapshots.sort_by_key(|s| (s.year, s.week_number));
        if newest_first {
            snapshots.reverse();
        }
        snapshots.truncate(limit);
        Ok(snapshots)
    }

    fn fetch_monthly_snapshots(
        &self,
        company_id: &str,
        limit: usize,
        newest_first: bool,
    ) -> Result<Vec<MonthlySnapshot>, StorageError> {
        let mut snapshots: Vec<MonthlySnapshot> = self
            .monthly
            .values()
            .filter(|s| s.company_id == company_id)
            .cloned()
            .collect();
        snapshots.sort_by_key(|s| (s.year, s.month));
        if newest_first {
            snapshots.reverse();
        }
        snapshots.truncate(limit);
        Ok(snapshots)
    }

    fn fetch_monthly_snapshot(&self, key: &MonthKey) -> Result<MonthlySnapshot, StorageError> {
        self.monthly
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::SnapshotNotFound(key.to_string()))
    }

    fn insert_valuation(
        &mut self,
        company_id: &str,
        inputs: ValuationInputs,
    ) -> Result<Valuation, StorageError> {
        self.next_valuation_id += 1;
        let id = format!("val-{}", self.next_valuation_id);
        let valuation = Valuation::from_inputs(&id, company_id, inputs, Utc::now());
        self.valuations.insert(id, valuation.clone());
        Ok(valuation)
    }

    fn update_valuation(
        &mut self,
        id: &str,
        update: &ValuationUpdate,
    ) -> Result<Valuation, StorageError> {
        let existing = self
            .valuations
            .get(id)
            .ok_or_else(|| StorageError::ValuationNotFound(id.to_string()))?;

        // Re-derive from the patched inputs; derived fields never drift
        // from the inputs that produced them.
        let mut updated = Valuation::from_inputs(
            &existing.id,
            &existing.company_id,
            existing.inputs.apply(update),
            existing.created_at,
        );
        updated.is_current = existing.is_current;

        self.valuations.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    fn fetch_valuations(&self, company_id: &str) -> Result<Vec<Valuation>, StorageError> {
        let mut valuations: Vec<Valuation> = self
            .valuations
            .values()
            .filter(|v| v.company_id == company_id)
            .cloned()
            .collect();
        valuations.sort_by_key(|v| v.created_at);
        Ok(valuations)
    }

    fn set_current_valuation(
        &mut self,
        company_id: &str,
        valuation_id: &str,
    ) -> Result<(), StorageError> {
        if !self.valuations.contains_key(valuation_id) {
            return Err(StorageError::ValuationNotFound(valuation_id.to_string()));
        }

        for valuation in self
            .valuations
            .values_mut()
            .filter(|v| v.company_id == company_id)
        {
            valuation.is_current = valuation.id == valuation_id;
        }
        Ok(())
    }
}
