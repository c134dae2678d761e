use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::scoring::{MultipleRange, ValueDriverCategory};

/// Category weights for the value-driver model.
///
/// The ten weights sum to 1.0; together with the 0.5 impact scalar this
/// bounds the raw multiple adjustment at ±1.0 for uniform answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeights {
    #[serde(default = "default_financial_performance_weight")]
    pub financial_performance: f64,
    #[serde(default = "default_owner_dependency_weight")]
    pub owner_dependency: f64,
    #[serde(default = "default_revenue_quality_weight")]
    pub revenue_quality: f64,
    #[serde(default = "default_customer_concentration_weight")]
    pub customer_concentration: f64,
    #[serde(default = "default_management_team_weight")]
    pub management_team: f64,
    #[serde(default = "default_growth_potential_weight")]
    pub growth_potential: f64,
    #[serde(default = "default_competitive_position_weight")]
    pub competitive_position: f64,
    #[serde(default = "default_operational_systems_weight")]
    pub operational_systems: f64,
    #[serde(default = "default_workforce_stability_weight")]
    pub workforce_stability: f64,
    #[serde(default = "default_project_backlog_weight")]
    pub project_backlog: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            financial_performance: default_financial_performance_weight(),
            owner_dependency: default_owner_dependency_weight(),
            revenue_quality: default_revenue_quality_weight(),
            customer_concentration: default_customer_concentration_weight(),
            management_team: default_management_team_weight(),
            growth_potential: default_growth_potential_weight(),
            competitive_position: default_competitive_position_weight(),
            operational_systems: default_operational_systems_weight(),
            workforce_stability: default_workforce_stability_weight(),
            project_backlog: default_project_backlog_weight(),
        }
    }
}

impl CategoryWeights {
    pub fn weight(&self, category: ValueDriverCategory) -> f64 {
        match category {
            ValueDriverCategory::FinancialPerformance => self.financial_performance,
            ValueDriverCategory::OwnerDependency => self.owner_dependency,
            ValueDriverCategory::RevenueQuality => self.revenue_quality,
            ValueDriverCategory::CustomerConcentration => self.customer_concentration,
            ValueDriverCategory::ManagementTeam => self.management_team,
            ValueDriverCategory::GrowthPotential => self.growth_potential,
            ValueDriverCategory::CompetitivePosition => self.competitive_position,
            ValueDriverCategory::OperationalSystems => self.operational_systems,
            ValueDriverCategory::WorkforceStability => self.workforce_stability,
            ValueDriverCategory::ProjectBacklog => self.project_backlog,
        }
    }

    // Pure function: check one weight is in the valid (0, 1] range
    fn is_valid_weight(weight: f64) -> bool {
        weight > 0.0 && weight <= 1.0
    }

    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{name} weight must be greater than 0 and at most 1.0"))
        }
    }

    /// Validate that every weight is in range and the set sums to 1.0
    /// (with a small tolerance for floating point).
    pub fn validate(&self) -> Result<(), String> {
        for category in ValueDriverCategory::all() {
            Self::validate_weight(self.weight(category), &category.to_string())?;
        }

        let sum: f64 = ValueDriverCategory::all()
            .iter()
            .map(|&c| self.weight(c))
            .sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "category weights must sum to 1.0, but sum to {sum:.3}"
            ));
        }

        Ok(())
    }
}

// Default weights: financial results and owner reliance dominate what a
// buyer pays for a contractor.
fn default_financial_performance_weight() -> f64 {
    0.15
}
fn default_owner_dependency_weight() -> f64 {
    0.15
}
fn default_revenue_quality_weight() -> f64 {
    0.12
}
fn default_customer_concentration_weight() -> f64 {
    0.10
}
fn default_management_team_weight() -> f64 {
    0.10
}
fn default_growth_potential_weight() -> f64 {
    0.10
}
fn default_competitive_position_weight() -> f64 {
    0.08
}
fn default_operational_systems_weight() -> f64 {
    0.08
}
fn default_workforce_stability_weight() -> f64 {
    0.07
}
fn default_project_backlog_weight() -> f64 {
    0.05
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option value in [-2, 2].
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: ValueDriverCategory,
    pub text: String,
    /// Question weight within its category, in (0, 1].
    #[serde(default = "default_question_weight")]
    pub weight: f64,
    #[serde(default = "five_point_scale")]
    pub options: Vec<AnswerOption>,
}

fn default_question_weight() -> f64 {
    1.0
}

fn five_point_scale() -> Vec<AnswerOption> {
    [
        (-2.0, "Significant weakness"),
        (-1.0, "Weakness"),
        (0.0, "Neutral"),
        (1.0, "Strength"),
        (2.0, "Significant strength"),
    ]
    .iter()
    .map(|(value, label)| AnswerOption {
        value: *value,
        label: label.to_string(),
    })
    .collect()
}

fn question(id: &str, category: ValueDriverCategory, text: &str, weight: f64) -> Question {
    Question {
        id: id.to_string(),
        category,
        text: text.to_string(),
        weight,
        options: five_point_scale(),
    }
}

static QUESTION_BANK: Lazy<Vec<Question>> = Lazy::new(|| {
    use ValueDriverCategory::*;
    vec![
        question(
            "fp-margins",
            FinancialPerformance,
            "Gross margins have held or improved over the last three fiscal years",
            1.0,
        ),
        question(
            "fp-reporting",
            FinancialPerformance,
            "Monthly financials close within ten days with reviewed WIP schedules",
            0.8,
        ),
        question(
            "od-operations",
            OwnerDependency,
            "The business runs day to day without the owner making project decisions",
            1.0,
        ),
        question(
            "od-relationships",
            OwnerDependency,
            "Key customer and bonding relationships are held by people other than the owner",
            1.0,
        ),
        question(
            "rq-recurring",
            RevenueQuality,
            "Service and maintenance agreements produce predictable recurring revenue",
            1.0,
        ),
        question(
            "rq-negotiated",
            RevenueQuality,
            "Most work is negotiated or design-build rather than hard bid",
            0.7,
        ),
        question(
            "cc-spread",
            CustomerConcentration,
            "No single customer accounts for more than a quarter of annual revenue",
            1.0,
        ),
        question(
            "cc-repeat",
            CustomerConcentration,
            "Repeat customers make up the majority of the backlog",
            0.6,
        ),
        question(
            "mt-depth",
            ManagementTeam,
            "A second tier of managers owns estimating, field operations, and finance",
            1.0,
        ),
        question(
            "mt-retention",
            ManagementTeam,
            "Key managers are under retention or incentive agreements",
            0.7,
        ),
        question(
            "gp-market",
            GrowthPotential,
            "The served market supports measurable growth without new geographies",
            1.0,
        ),
        question(
            "gp-capacity",
            GrowthPotential,
            "Bonding capacity and working capital can fund larger projects",
            0.8,
        ),
        question(
            "cp-differentiation",
            CompetitivePosition,
            "The company wins work on capability or relationships, not price alone",
            1.0,
        ),
        question(
            "cp-barriers",
            CompetitivePosition,
            "Licenses, certifications, or niche expertise limit new competitors",
            0.7,
        ),
        question(
            "os-systems",
            OperationalSystems,
            "Job costing, scheduling, and billing run on integrated systems",
            1.0,
        ),
        question(
            "os-process",
            OperationalSystems,
            "Documented processes cover estimating through project closeout",
            0.8,
        ),
        question(
            "ws-field",
            WorkforceStability,
            "Field crews are stable with low voluntary turnover",
            1.0,
        ),
        question(
            "ws-pipeline",
            WorkforceStability,
            "Apprenticeship or training pipelines feed foreman-level roles",
            0.6,
        ),
        question(
            "pb-coverage",
            ProjectBacklog,
            "Signed backlog covers the next twelve months of fixed costs",
            1.0,
        ),
        question(
            "pb-quality",
            ProjectBacklog,
            "Backlog margins are at or above historical actuals",
            0.8,
        ),
    ]
});

fn default_questions() -> Vec<Question> {
    QUESTION_BANK.clone()
}

fn default_base_range() -> MultipleRange {
    // Typical EBITDA multiple band for a mid-size specialty contractor.
    MultipleRange {
        low: 2.5,
        mid: 3.25,
        high: 4.0,
    }
}

fn default_assumed_ebitda() -> f64 {
    500_000.0
}

/// Scoring model configuration.
///
/// Injected into the scoring engine rather than read from globals, so
/// tests can run alternate weight tables. Loadable from `valuemap.toml`
/// with per-field defaults for anything omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: CategoryWeights,
    #[serde(default = "default_questions")]
    pub questions: Vec<Question>,
    #[serde(default = "default_base_range")]
    pub base_range: MultipleRange,
    /// EBITDA used to express recommendation ROI in dollars. Callers
    /// should pass the company's real adjusted EBITDA; the default is a
    /// planning placeholder.
    #[serde(default = "default_assumed_ebitda")]
    pub assumed_ebitda: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            questions: default_questions(),
            base_range: default_base_range(),
            assumed_ebitda: default_assumed_ebitda(),
        }
    }
}

impl ScoringConfig {
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let raw = fs::read_to_string(path)?;
        let config: ScoringConfig = toml::from_str(&raw)?;
        config.validate().map_err(EngineError::Config)?;
        Ok(config)
    }

    /// Validate weights, questions, and option values.
    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;

        let mut seen = std::collections::HashSet::new();
        for question in &self.questions {
            if !seen.insert(&question.id) {
                return Err(format!("duplicate question id: {}", question.id));
            }
            if question.weight <= 0.0 || question.weight > 1.0 {
                return Err(format!(
                    "question {} weight must be greater than 0 and at most 1.0",
                    question.id
                ));
            }
            if question.options.is_empty() {
                return Err(format!("question {} has no options", question.id));
            }
            for option in &question.options {
                if !(-2.0..=2.0).contains(&option.value) {
                    return Err(format!(
                        "question {} option '{}' is outside [-2, 2]",
                        question.id, option.label
                    ));
                }
            }
        }

        Ok(())
    }
}
