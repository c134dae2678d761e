use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::scoring::insights::{strengths_and_weaknesses, StrengthsAndWeaknesses};
use crate::scoring::recommendations::{recommendations, StrategicRecommendation};
use crate::scoring::{MultipleRange, ValueDriverCategory, ValueDriverScore};

/// Questionnaire answers: question id → selected option value in [-2, 2].
pub type Answers = HashMap<String, f64>;

/// Caps each category's maximum swing on the multiple at half its weight.
pub const IMPACT_SCALAR: f64 = 0.5;

/// Bounds on the total multiple adjustment across all categories.
pub const MAX_TOTAL_ADJUSTMENT: f64 = 1.5;

// Hard reference floors for the adjusted range.
const LOW_FLOOR: f64 = 1.0;
const MID_FLOOR: f64 = 1.5;
const HIGH_FLOOR: f64 = 2.0;

/// Score every category with at least one answered question.
///
/// A category's score is the question-weight-weighted average of its
/// answers, so it stays in the same [-2, 2] range as the option values.
/// Categories with no answered question are omitted entirely, not scored
/// as 0; an unanswered section says nothing about the business.
pub fn driver_scores(answers: &Answers, config: &ScoringConfig) -> Vec<ValueDriverScore> {
    let mut order: Vec<ValueDriverCategory> = Vec::new();
    let mut accumulated: HashMap<ValueDriverCategory, (f64, f64)> = HashMap::new();

    for question in &config.questions {
        if let Some(&value) = answers.get(&question.id) {
            let entry = accumulated.entry(question.category).or_insert_with(|| {
                order.push(question.category);
                (0.0, 0.0)
            });
            entry.0 += value * question.weight;
            entry.1 += question.weight;
        }
    }

    order
        .into_iter()
        .map(|category| {
            let (weighted_sum, total_weight) = accumulated[&category];
            let score = weighted_sum / total_weight; // total_weight > 0 by construction
            let weight = config.weights.weight(category);
            ValueDriverScore {
                category,
                score,
                weight,
                impact: score * weight * IMPACT_SCALAR,
            }
        })
        .collect()
}

/// Apply the questionnaire's total impact to a base multiple range.
///
/// The summed impact is clamped to ±1.5 before being applied identically
/// to all three bounds, and each adjusted bound is floored (low ≥ 1.0,
/// mid ≥ 1.5, high ≥ 2.0) so no questionnaire outcome can push a multiple
/// below a sane reference floor.
pub fn adjusted_multiple_range(
    base: MultipleRange,
    answers: &Answers,
    config: &ScoringConfig,
) -> MultipleRange {
    let scores = driver_scores(answers, config);
    let total_adjustment: f64 = scores.iter().map(|s| s.impact).sum();
    let adjustment = total_adjustment.clamp(-MAX_TOTAL_ADJUSTMENT, MAX_TOTAL_ADJUSTMENT);

    MultipleRange {
        low: (base.low + adjustment).max(LOW_FLOOR),
        mid: (base.mid + adjustment).max(MID_FLOOR),
        high: (base.high + adjustment).max(HIGH_FLOOR),
    }
}

/// Weighted mean of category scores using category weights.
///
/// Distinct from the per-category normalization: question weights decide a
/// category's score, category weights decide how categories combine.
pub fn overall_score(answers: &Answers, config: &ScoringConfig) -> f64 {
    let scores = driver_scores(answers, config);
    let total_weight: f64 = scores.iter().map(|s| s.weight).sum();
    if total_weight == 0.0 {
        0.0
    } else {
        scores.iter().map(|s| s.score * s.weight).sum::<f64>() / total_weight
    }
}

/// Everything a dashboard persists for one completed questionnaire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValueDriverAssessment {
    pub scores: Vec<ValueDriverScore>,
    pub overall_score: f64,
    pub base_range: MultipleRange,
    pub adjusted_range: MultipleRange,
    pub strengths: Vec<ValueDriverScore>,
    pub weaknesses: Vec<ValueDriverScore>,
    pub recommendations: Vec<StrategicRecommendation>,
}

/// Run the full scoring pipeline over one answer set.
pub fn assess(answers: &Answers, config: &ScoringConfig) -> ValueDriverAssessment {
    let scores = driver_scores(answers, config);
    let StrengthsAndWeaknesses {
        strengths,
        weaknesses,
    } = strengths_and_weaknesses(&scores);

    ValueDriverAssessment {
        overall_score: overall_score(answers, config),
        base_range: config.base_range,
        adjusted_range: adjusted_multiple_range(config.base_range, answers, config),
        strengths,
        weaknesses,
        recommendations: recommendations(&scores, config),
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    /// Answer every question in a category with the same value.
    fn answer_category(answers: &mut Answers, config: &ScoringConfig, category: ValueDriverCategory, value: f64) {
        for q in config.questions.iter().filter(|q| q.category == category) {
            answers.insert(q.id.clone(), value);
        }
    }

    #[test]
    fn unanswered_categories_are_omitted_not_zeroed() {
        let cfg = config();
        let mut answers = Answers::new();
        answer_category(&mut answers, &cfg, ValueDriverCategory::OwnerDependency, 1.0);

        let scores = driver_scores(&answers, &cfg);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].category, ValueDriverCategory::OwnerDependency);
    }

    #[test]
    fn uniform_answers_score_the_answer_value() {
        let cfg = config();
        let mut answers = Answers::new();
        answer_category(&mut answers, &cfg, ValueDriverCategory::GrowthPotential, -2.0);

        let scores = driver_scores(&answers, &cfg);
        assert!((scores[0].score - (-2.0)).abs() < 1e-12);
    }

    #[test]
    fn impact_is_score_times_weight_times_half() {
        let cfg = config();
        let mut answers = Answers::new();
        answer_category(&mut answers, &cfg, ValueDriverCategory::OwnerDependency, -1.0);

        let scores = driver_scores(&answers, &cfg);
        let weight = cfg.weights.weight(ValueDriverCategory::OwnerDependency);
        assert_eq!(weight, 0.15);
        assert!((scores[0].impact - (-0.075)).abs() < 1e-12);
    }

    #[test]
    fn mixed_answers_take_question_weight_into_account() {
        let cfg = config();
        let questions: Vec<_> = cfg
            .questions
            .iter()
            .filter(|q| q.category == ValueDriverCategory::FinancialPerformance)
            .collect();
        assert!(questions.len() >= 2);

        let mut answers = Answers::new();
        answers.insert(questions[0].id.clone(), 2.0);
        answers.insert(questions[1].id.clone(), -2.0);

        let scores = driver_scores(&answers, &cfg);
        let expected = (2.0 * questions[0].weight - 2.0 * questions[1].weight)
            / (questions[0].weight + questions[1].weight);
        assert!((scores[0].score - expected).abs() < 1e-12);
    }

    #[test]
    fn adjustment_clamps_at_negative_limit_and_floors_hold() {
        let cfg = config();
        let mut answers = Answers::new();
        for category in ValueDriverCategory::all() {
            answer_category(&mut answers, &cfg, category, -2.0);
        }

        // All categories at -2 with weights summing to 1.0 gives a raw
        // adjustment of -1.0; force the clamp with a low base instead.
        let base = MultipleRange {
            low: 1.2,
            mid: 1.8,
            high: 2.4,
        };
        let adjusted = adjusted_multiple_range(base, &answers, &cfg);
        assert!(adjusted.low >= 1.0);
        assert!(adjusted.mid >= 1.5);
        assert!(adjusted.high >= 2.0);
    }

    #[test]
    fn best_possible_answers_raise_every_bound_by_one() {
        let cfg = config();
        let mut answers = Answers::new();
        for category in ValueDriverCategory::all() {
            answer_category(&mut answers, &cfg, category, 2.0);
        }

        // Σ impact = 2.0 × Σ weight × 0.5 = 1.0, inside the clamp.
        let base = cfg.base_range;
        let adjusted = adjusted_multiple_range(base, &answers, &cfg);
        assert!((adjusted.low - (base.low + 1.0)).abs() < 1e-9);
        assert!((adjusted.mid - (base.mid + 1.0)).abs() < 1e-9);
        assert!((adjusted.high - (base.high + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn overall_score_weights_by_category_weight() {
        let cfg = config();
        let mut answers = Answers::new();
        answer_category(&mut answers, &cfg, ValueDriverCategory::FinancialPerformance, 2.0); // weight 0.15
        answer_category(&mut answers, &cfg, ValueDriverCategory::ProjectBacklog, -2.0); // weight 0.05

        let overall = overall_score(&answers, &cfg);
        let expected = (2.0 * 0.15 - 2.0 * 0.05) / 0.20;
        assert!((overall - expected).abs() < 1e-12);
    }

    #[test]
    fn no_answers_score_zero_overall() {
        assert_eq!(overall_score(&Answers::new(), &config()), 0.0);
    }

    #[test]
    fn assessment_composes_all_pipeline_outputs() {
        let cfg = config();
        let mut answers = Answers::new();
        for category in ValueDriverCategory::all() {
            answer_category(&mut answers, &cfg, category, 1.0);
        }

        let assessment = assess(&answers, &cfg);
        assert_eq!(assessment.scores.len(), 10);
        assert_eq!(assessment.strengths.len(), 3);
        assert_eq!(assessment.weaknesses.len(), 3);
        assert_eq!(assessment.recommendations.len(), 5);
        assert!(assessment.adjusted_range.mid > assessment.base_range.mid);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn adjusted_bounds_never_break_their_floors(
            answer in -2.0..2.0f64,
            base_low in 0.0..10.0f64,
            spread in 0.0..5.0f64,
        ) {
            let cfg = ScoringConfig::default();
            let mut answers = Answers::new();
            for q in &cfg.questions {
                answers.insert(q.id.clone(), answer);
            }

            let base = MultipleRange {
                low: base_low,
                mid: base_low + spread,
                high: base_low + spread * 2.0,
            };
            let adjusted = adjusted_multiple_range(base, &answers, &cfg);

            prop_assert!(adjusted.low >= 1.0);
            prop_assert!(adjusted.mid >= 1.5);
            prop_assert!(adjusted.high >= 2.0);
        }

        #[test]
        fn category_scores_stay_in_answer_range(answer in -2.0..2.0f64) {
            let cfg = ScoringConfig::default();
            let mut answers = Answers::new();
            for q in &cfg.questions {
                answers.insert(q.id.clone(), answer);
            }

            for score in driver_scores(&answers, &cfg) {
                prop_assert!(score.score >= -2.0 && score.score <= 2.0);
            }
        }
    }
}
