//! Per-job cost model and revenue recognition.
//!
//! Everything here is a pure function of a single [`Job`](crate::core::Job):
//! no side effects, no caching. Callers re-evaluate whenever any cost,
//! budget, contract, or T&M field changes.

pub mod billing;
pub mod earned_revenue;
pub mod schedule;

pub use billing::{billing_difference, forecasted_profit, percent_complete};
pub use earned_revenue::earned_revenue;
pub use schedule::{all_schedule_warnings, ScheduleWarning, WarningSeverity};
