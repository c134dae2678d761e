use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::scoring::engine::IMPACT_SCALAR;
use crate::scoring::{ValueDriverCategory, ValueDriverScore};

const MAX_RECOMMENDATIONS: usize = 5;
const MAX_SCORE: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// An improvement plan for one value-driver category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategicRecommendation {
    pub category: ValueDriverCategory,
    pub priority: Priority,
    pub current_score: f64,
    /// One point of improvement, capped at the scale maximum.
    pub target_score: f64,
    /// Multiple-adjustment gain from reaching the target score.
    pub potential_value_impact: f64,
    pub action_items: Vec<String>,
    pub estimated_cost: f64,
    /// Value gained per dollar spent. `None`, not 0, when the plan has no
    /// cost to divide by.
    pub roi: Option<f64>,
}

fn priority_for(score: f64) -> Priority {
    if score < -0.5 {
        Priority::High
    } else if score < 0.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Improvement playbook per category: action items and a planning-level
/// cost estimate.
fn playbook(category: ValueDriverCategory) -> (&'static [&'static str], f64) {
    match category {
        ValueDriverCategory::FinancialPerformance => (
            &[
                "Move to monthly WIP reporting with committed-cost tracking",
                "Set gross-margin targets per division and review quarterly",
                "Engage a fractional CFO for forecasting discipline",
            ],
            45_000.0,
        ),
        ValueDriverCategory::OwnerDependency => (
            &[
                "Document estimating and bid-approval processes the owner holds",
                "Delegate top-customer relationships to a second contact",
                "Build a 90-day absence test into the annual plan",
            ],
            35_000.0,
        ),
        ValueDriverCategory::RevenueQuality => (
            &[
                "Grow maintenance and service agreements toward 20% of revenue",
                "Prioritize negotiated work over hard-bid work",
            ],
            30_000.0,
        ),
        ValueDriverCategory::CustomerConcentration => (
            &[
                "Cap any single customer below 25% of annual revenue",
                "Fund business development in one adjacent market",
            ],
            40_000.0,
        ),
        ValueDriverCategory::ManagementTeam => (
            &[
                "Hire or promote an operations leader with P&L ownership",
                "Put incentive compensation on division margins",
                "Run quarterly leadership reviews against written goals",
            ],
            120_000.0,
        ),
        ValueDriverCategory::GrowthPotential => (
            &[
                "Write a three-year growth plan with funded initiatives",
                "Qualify for larger bonding capacity",
            ],
            25_000.0,
        ),
        ValueDriverCategory::CompetitivePosition => (
            &[
                "Pursue certifications that gate competitor entry",
                "Track win rates by customer and bid type",
            ],
            20_000.0,
        ),
        ValueDriverCategory::OperationalSystems => (
            &[
                "Consolidate job costing onto one integrated platform",
                "Standardize project closeout and as-built handoff",
            ],
            60_000.0,
        ),
        ValueDriverCategory::WorkforceStability => (
            &[
                "Formalize apprenticeship and field-leadership tracks",
                "Benchmark compensation against regional union scale",
            ],
            30_000.0,
        ),
        ValueDriverCategory::ProjectBacklog => (
            &[
                "Maintain rolling 12-month backlog coverage of fixed costs",
                "Review pipeline-to-backlog conversion monthly",
            ],
            15_000.0,
        ),
    }
}

/// Generate improvement recommendations from scored categories.
///
/// Lowest-scoring categories come first (ascending score = highest
/// priority), capped at five. ROI relates the potential multiple impact,
/// in EBITDA terms, to the plan's estimated cost.
pub fn recommendations(
    scores: &[ValueDriverScore],
    config: &ScoringConfig,
) -> Vec<StrategicRecommendation> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|scored| {
            let target_score = (scored.score + 1.0).min(MAX_SCORE);
            let potential_value_impact = (target_score - scored.score) * scored.weight * IMPACT_SCALAR;
            let (actions, estimated_cost) = playbook(scored.category);
            let roi = if estimated_cost == 0.0 {
                None
            } else {
                Some(potential_value_impact * config.assumed_ebitda / estimated_cost)
            };

            StrategicRecommendation {
                category: scored.category,
                priority: priority_for(scored.score),
                current_score: scored.score,
                target_score,
                potential_value_impact,
                action_items: actions.iter().map(|s| s.to_string()).collect(),
                estimated_cost,
                roi,
            }
        })
        .collect()
}
