//! Value-driver questionnaire scoring.
//!
//! Converts questionnaire answers into weighted per-category scores, an
//! overall score, and an adjustment to the valuation multiple range.

pub mod engine;
pub mod insights;
pub mod recommendations;

use serde::{Deserialize, Serialize};

pub use engine::{
    adjusted_multiple_range, assess, driver_scores, overall_score, Answers, ValueDriverAssessment,
};
pub use insights::{strengths_and_weaknesses, StrengthsAndWeaknesses};
pub use recommendations::{recommendations, Priority, StrategicRecommendation};

/// The fixed set of value drivers scored by the questionnaire.
///
/// Category weights live in [`ScoringConfig`](crate::config::ScoringConfig)
/// and sum to 1.0 across this set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueDriverCategory {
    FinancialPerformance,
    OwnerDependency,
    RevenueQuality,
    CustomerConcentration,
    ManagementTeam,
    GrowthPotential,
    CompetitivePosition,
    OperationalSystems,
    WorkforceStability,
    ProjectBacklog,
}

impl ValueDriverCategory {
    pub fn all() -> [ValueDriverCategory; 10] {
        [
            ValueDriverCategory::FinancialPerformance,
            ValueDriverCategory::OwnerDependency,
            ValueDriverCategory::RevenueQuality,
            ValueDriverCategory::CustomerConcentration,
            ValueDriverCategory::ManagementTeam,
            ValueDriverCategory::GrowthPotential,
            ValueDriverCategory::CompetitivePosition,
            ValueDriverCategory::OperationalSystems,
            ValueDriverCategory::WorkforceStability,
            ValueDriverCategory::ProjectBacklog,
        ]
    }
}

impl std::fmt::Display for ValueDriverCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(ValueDriverCategory, &str)] = &[
            (
                ValueDriverCategory::FinancialPerformance,
                "Financial Performance",
            ),
            (ValueDriverCategory::OwnerDependency, "Owner Dependency"),
            (ValueDriverCategory::RevenueQuality, "Revenue Quality"),
            (
                ValueDriverCategory::CustomerConcentration,
                "Customer Concentration",
            ),
            (ValueDriverCategory::ManagementTeam, "Management Team"),
            (ValueDriverCategory::GrowthPotential, "Growth Potential"),
            (
                ValueDriverCategory::CompetitivePosition,
                "Competitive Position",
            ),
            (
                ValueDriverCategory::OperationalSystems,
                "Operational Systems",
            ),
            (
                ValueDriverCategory::WorkforceStability,
                "Workforce Stability",
            ),
            (ValueDriverCategory::ProjectBacklog, "Project Backlog"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(c, _)| c == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

/// Weighted score for one category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueDriverScore {
    pub category: ValueDriverCategory,
    /// Weighted average of the category's answered questions, in [-2, 2].
    pub score: f64,
    /// The category's weight in the overall model.
    pub weight: f64,
    /// Contribution to the multiple adjustment: score × weight × 0.5.
    pub impact: f64,
}

/// Low/mid/high band of valuation multiples.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultipleRange {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}
