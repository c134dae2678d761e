// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod costing;
pub mod errors;
pub mod period;
pub mod scoring;
pub mod service;
pub mod storage;
pub mod valuation;

// Re-export commonly used types
pub use crate::core::{
    BillingDifference, CostBreakdown, EarnedRevenue, Job, JobKind, JobSchedule, JobStatus,
    LaborBilling, MobilizationPhase, TmSettings,
};

pub use crate::costing::{
    all_schedule_warnings, billing_difference, earned_revenue, forecasted_profit,
    percent_complete, ScheduleWarning, WarningSeverity,
};

pub use crate::period::{
    job_metrics, month_end_report, month_info, week_info, weekly_report, JobMetrics, MonthEndReport,
    MonthEndRow, MonthInfo, MonthKey, MonthlySnapshot, WeekInfo, WeekKey, WeeklyReport,
    WeeklySnapshot,
};

pub use crate::scoring::{
    adjusted_multiple_range, assess, driver_scores, overall_score, recommendations,
    strengths_and_weaknesses, Answers, MultipleRange, Priority, StrategicRecommendation,
    StrengthsAndWeaknesses, ValueDriverAssessment, ValueDriverCategory, ValueDriverScore,
};

pub use crate::valuation::{
    adjusted_ebitda, business_value, compare_scenarios, ebitda_margin, value_growth,
    value_to_revenue, ScenarioComparison, Valuation, ValuationInputs, ValuationUpdate, ValueGrowth,
};

pub use crate::config::{CategoryWeights, Question, ScoringConfig};
pub use crate::errors::{EngineError, StorageError};
pub use crate::storage::{MemoryStore, MetricsStore};
