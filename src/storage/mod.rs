//! Storage collaborator boundary.
//!
//! The engine consumes this contract; it does not implement persistence
//! against a real backend. Snapshot writes are upserts on the period's
//! natural key, which is what makes recomputation idempotent: concurrent
//! writers for the same period race only on which computed values win
//! (last write), never on row count.

pub mod memory;

pub use memory::MemoryStore;

use crate::core::Job;
use crate::errors::StorageError;
use crate::period::{MonthKey, MonthlySnapshot, WeekKey, WeeklySnapshot};
use crate::valuation::{Valuation, ValuationInputs, ValuationUpdate};

pub trait MetricsStore {
    fn fetch_jobs(&self, company_id: &str) -> Result<Vec<Job>, StorageError>;

    /// Insert or replace the weekly snapshot stored under `key`.
    fn upsert_weekly_snapshot(
        &mut self,
        key: WeekKey,
        snapshot: WeeklySnapshot,
    ) -> Result<WeeklySnapshot, StorageError>;

    /// Insert or replace the monthly snapshot stored under `key`.
    fn upsert_monthly_snapshot(
        &mut self,
        key: MonthKey,
        snapshot: MonthlySnapshot,
    ) -> Result<MonthlySnapshot, StorageError>;

    /// Fetch up to `limit` weekly snapshots; newest first when
    /// `newest_first` is set, oldest first otherwise.
    fn fetch_weekly_snapshots(
        &self,
        company_id: &str,
        limit: usize,
        newest_first: bool,
    ) -> Result<Vec<WeeklySnapshot>, StorageError>;

    fn fetch_monthly_snapshots(
        &self,
        company_id: &str,
        limit: usize,
        newest_first: bool,
    ) -> Result<Vec<MonthlySnapshot>, StorageError>;

    fn fetch_monthly_snapshot(&self, key: &MonthKey) -> Result<MonthlySnapshot, StorageError>;

    fn insert_valuation(
        &mut self,
        company_id: &str,
        inputs: ValuationInputs,
    ) -> Result<Valuation, StorageError>;

    fn update_valuation(
        &mut self,
        id: &str,
        update: &ValuationUpdate,
    ) -> Result<Valuation, StorageError>;

    fn fetch_valuations(&self, company_id: &str) -> Result<Vec<Valuation>, StorageError>;

    /// Flag one valuation as current, clearing the flag everywhere else in
    /// the company. Keeps the one-current-per-company invariant.
    fn set_current_valuation(
        &mut self,
        company_id: &str,
        valuation_id: &str,
    ) -> Result<(), StorageError>;
}
