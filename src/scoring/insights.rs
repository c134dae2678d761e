use serde::Serialize;

use crate::scoring::ValueDriverScore;

const TOP_COUNT: usize = 3;

#[derive(Clone, Debug, Serialize)]
pub struct StrengthsAndWeaknesses {
    /// Top 3 categories, highest score first.
    pub strengths: Vec<ValueDriverScore>,
    /// Bottom 3 categories, lowest score first.
    pub weaknesses: Vec<ValueDriverScore>,
}

/// Rank scored categories into strengths and weaknesses.
///
/// Uses a stable sort, so categories with equal scores keep their original
/// relative order. With fewer than six scored categories the two lists can
/// overlap.
pub fn strengths_and_weaknesses(scores: &[ValueDriverScore]) -> StrengthsAndWeaknesses {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    StrengthsAndWeaknesses {
        strengths: ranked.iter().take(TOP_COUNT).cloned().collect(),
        weaknesses: ranked.iter().rev().take(TOP_COUNT).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ValueDriverCategory;

    fn score(category: ValueDriverCategory, value: f64) -> ValueDriverScore {
        ValueDriverScore {
            category,
            score: value,
            weight: 0.1,
            impact: value * 0.1 * 0.5,
        }
    }

    #[test]
    fn strengths_are_top_three_descending() {
        let scores = vec![
            score(ValueDriverCategory::FinancialPerformance, 0.5),
            score(ValueDriverCategory::OwnerDependency, -1.5),
            score(ValueDriverCategory::RevenueQuality, 2.0),
            score(ValueDriverCategory::ManagementTeam, 1.0),
            score(ValueDriverCategory::GrowthPotential, -0.5),
        ];

        let ranked = strengths_and_weaknesses(&scores);
        let strengths: Vec<_> = ranked.strengths.iter().map(|s| s.category).collect();
        assert_eq!(
            strengths,
            vec![
                ValueDriverCategory::RevenueQuality,
                ValueDriverCategory::ManagementTeam,
                ValueDriverCategory::FinancialPerformance,
            ]
        );
    }

    #[test]
    fn weaknesses_are_bottom_three_worst_first() {
        let scores = vec![
            score(ValueDriverCategory::FinancialPerformance, 0.5),
            score(ValueDriverCategory::OwnerDependency, -1.5),
            score(ValueDriverCategory::RevenueQuality, 2.0),
            score(ValueDriverCategory::ManagementTeam, 1.0),
            score(ValueDriverCategory::GrowthPotential, -0.5),
        ];

        let ranked = strengths_and_weaknesses(&scores);
        let weaknesses: Vec<_> = ranked.weaknesses.iter().map(|s| s.category).collect();
        assert_eq!(
            weaknesses,
            vec![
                ValueDriverCategory::OwnerDependency,
                ValueDriverCategory::GrowthPotential,
                ValueDriverCategory::FinancialPerformance,
            ]
        );
    }

    #[test]
    fn short_lists_return_what_exists() {
        let scores = vec![score(ValueDriverCategory::ProjectBacklog, 1.0)];
        let ranked = strengths_and_weaknesses(&scores);
        assert_eq!(ranked.strengths.len(), 1);
        assert_eq!(ranked.weaknesses.len(), 1);
    }
}
