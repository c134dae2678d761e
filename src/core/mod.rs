use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One labor/material/other split of a dollar amount.
///
/// Every money figure on a job (contract, budget, costs to date, cost to
/// complete, invoiced) is carried as one of these so earned revenue can be
/// recognized per component rather than against a blended total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(default)]
    pub labor: f64,
    #[serde(default)]
    pub material: f64,
    #[serde(default)]
    pub other: f64,
}

impl CostBreakdown {
    pub fn new(labor: f64, material: f64, other: f64) -> Self {
        Self {
            labor,
            material,
            other,
        }
    }

    pub fn sum(&self) -> f64 {
        self.labor + self.material + self.other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Pending,
    Active,
    OnHold,
    Completed,
    Archived,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(JobStatus, &str)] = &[
            (JobStatus::Pending, "Pending"),
            (JobStatus::Active, "Active"),
            (JobStatus::OnHold, "On Hold"),
            (JobStatus::Completed, "Completed"),
            (JobStatus::Archived, "Archived"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

fn default_markup() -> f64 {
    1.0 // no markup
}

/// How labor is billed on a time-and-material job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LaborBilling {
    /// Contracted rate times contracted hours. A missing rate or hour count
    /// deserializes to 0.0 and yields zero labor revenue.
    FixedRate {
        #[serde(default)]
        bill_rate: f64,
        #[serde(default)]
        hours: f64,
    },
    /// Labor cost to date marked up by a multiplier.
    Markup {
        #[serde(default = "default_markup")]
        labor_markup: f64,
    },
}

impl Default for LaborBilling {
    fn default() -> Self {
        LaborBilling::Markup {
            labor_markup: default_markup(),
        }
    }
}

/// Billing settings for a time-and-material job.
///
/// Markups default to 1.0 (cost passed through unmarked) when absent from
/// the source record; the defaults are applied once here, at the serde
/// boundary, so the revenue math never re-checks for missing fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TmSettings {
    #[serde(default)]
    pub labor_billing: LaborBilling,
    #[serde(default = "default_markup")]
    pub material_markup: f64,
    #[serde(default = "default_markup")]
    pub other_markup: f64,
}

impl Default for TmSettings {
    fn default() -> Self {
        Self {
            labor_billing: LaborBilling::default(),
            material_markup: default_markup(),
            other_markup: default_markup(),
        }
    }
}

/// Revenue-recognition model for a job.
///
/// Fixed-price and time-and-material jobs earn revenue under different rules
/// and must never be conflated; the tagged union keeps the branch exhaustive
/// at compile time instead of probing for optional T&M fields at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "job_type", rename_all = "kebab-case")]
pub enum JobKind {
    FixedPrice,
    TimeMaterial(TmSettings),
}

/// A single mobilization window on a job schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MobilizationPhase {
    pub label: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mobilize: Option<NaiveDate>,
    #[serde(default)]
    pub demobilize: Option<NaiveDate>,
}

/// Contract and forecast dates used by the schedule-warning checks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSchedule {
    #[serde(default)]
    pub contract_end: Option<NaiveDate>,
    #[serde(default)]
    pub target_end: Option<NaiveDate>,
    #[serde(default)]
    pub projected_end: Option<NaiveDate>,
    #[serde(default)]
    pub phases: Vec<MobilizationPhase>,
}

/// A construction job as read from the job-cost ledger.
///
/// The engine never mutates a job; it only reads and derives. Mutation
/// happens outside the core through explicit update calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub job_no: String,
    #[serde(default)]
    pub name: String,
    pub status: JobStatus,
    #[serde(flatten)]
    pub kind: JobKind,
    #[serde(default)]
    pub contract: CostBreakdown,
    #[serde(default)]
    pub budget: CostBreakdown,
    #[serde(default)]
    pub costs: CostBreakdown,
    #[serde(default)]
    pub cost_to_complete: CostBreakdown,
    #[serde(default)]
    pub invoiced: CostBreakdown,
    #[serde(default)]
    pub labor_cost_per_hour: Option<f64>,
    /// Effective date for period bucketing; falls back to the run date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub schedule: Option<JobSchedule>,
}

/// Earned revenue split by component. `total` is always the exact sum of
/// the three components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EarnedRevenue {
    pub labor: f64,
    pub material: f64,
    pub other: f64,
    pub total: f64,
}

impl EarnedRevenue {
    pub fn from_components(labor: f64, material: f64, other: f64) -> Self {
        Self {
            labor,
            material,
            other,
            total: labor + material + other,
        }
    }
}

/// Invoiced-versus-earned position for a job.
///
/// `difference > 0` strictly means over-billed; zero is neither over- nor
/// under-billed (display layers call that "on track").
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BillingDifference {
    pub difference: f64,
    pub is_over_billed: bool,
    pub label: &'static str,
}
