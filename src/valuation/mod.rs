//! Adjusted-EBITDA and business-value arithmetic.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Raw inputs to a valuation: trailing financials, owner addbacks, and the
/// chosen multiple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    #[serde(default)]
    pub annual_revenue: f64,
    #[serde(default)]
    pub net_profit: f64,
    #[serde(default)]
    pub owner_compensation: f64,
    #[serde(default)]
    pub depreciation: f64,
    #[serde(default)]
    pub interest: f64,
    #[serde(default)]
    pub taxes: f64,
    #[serde(default)]
    pub other_addbacks: f64,
    pub multiple: f64,
}

/// Partial update to stored valuation inputs. `None` fields are left
/// unchanged; derived values are recomputed after applying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationUpdate {
    pub annual_revenue: Option<f64>,
    pub net_profit: Option<f64>,
    pub owner_compensation: Option<f64>,
    pub depreciation: Option<f64>,
    pub interest: Option<f64>,
    pub taxes: Option<f64>,
    pub other_addbacks: Option<f64>,
    pub multiple: Option<f64>,
}

impl ValuationInputs {
    pub fn apply(&self, update: &ValuationUpdate) -> ValuationInputs {
        ValuationInputs {
            annual_revenue: update.annual_revenue.unwrap_or(self.annual_revenue),
            net_profit: update.net_profit.unwrap_or(self.net_profit),
            owner_compensation: update.owner_compensation.unwrap_or(self.owner_compensation),
            depreciation: update.depreciation.unwrap_or(self.depreciation),
            interest: update.interest.unwrap_or(self.interest),
            taxes: update.taxes.unwrap_or(self.taxes),
            other_addbacks: update.other_addbacks.unwrap_or(self.other_addbacks),
            multiple: update.multiple.unwrap_or(self.multiple),
        }
    }
}

/// A stored valuation with its derived figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub id: String,
    pub company_id: String,
    pub inputs: ValuationInputs,
    pub adjusted_ebitda: f64,
    pub business_value: f64,
    /// At most one valuation per company carries this flag.
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
}

impl Valuation {
    /// Derive a valuation from inputs; derived fields are never stored
    /// independently of the inputs that produced them.
    pub fn from_inputs(id: &str, company_id: &str, inputs: ValuationInputs, created_at: DateTime<Utc>) -> Self {
        let ebitda = adjusted_ebitda(&inputs);
        Self {
            id: id.to_string(),
            company_id: company_id.to_string(),
            inputs,
            adjusted_ebitda: ebitda,
            business_value: business_value(ebitda, inputs.multiple),
            is_current: false,
            created_at,
        }
    }
}

/// Net profit plus owner addbacks.
pub fn adjusted_ebitda(inputs: &ValuationInputs) -> f64 {
    inputs.net_profit
        + inputs.owner_compensation
        + inputs.depreciation
        + inputs.interest
        + inputs.taxes
        + inputs.other_addbacks
}

pub fn business_value(adjusted_ebitda: f64, multiple: f64) -> f64 {
    adjusted_ebitda * multiple
}

/// Adjusted EBITDA as a percent of revenue; 0 when revenue is 0.
pub fn ebitda_margin(adjusted_ebitda: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        adjusted_ebitda / revenue * 100.0
    }
}

/// Business value as a percent of revenue; 0 when revenue is 0.
pub fn value_to_revenue(business_value: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        business_value / revenue * 100.0
    }
}

/// Spread of one figure across compared scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub delta: f64,
}

fn field_range(values: impl Iterator<Item = f64>) -> FieldRange {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    FieldRange {
        min,
        max,
        delta: max - min,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub scenario_count: usize,
    pub multiple: FieldRange,
    pub adjusted_ebitda: FieldRange,
    pub business_value: FieldRange,
}

/// Compare at least two what-if scenarios field by field.
pub fn compare_scenarios(scenarios: &[ValuationInputs]) -> Option<ScenarioComparison> {
    if scenarios.len() < 2 {
        return None;
    }

    let ebitdas: Vec<f64> = scenarios.iter().map(adjusted_ebitda).collect();
    let values: Vec<f64> = scenarios
        .iter()
        .zip(&ebitdas)
        .map(|(s, &e)| business_value(e, s.multiple))
        .collect();

    Some(ScenarioComparison {
        scenario_count: scenarios.len(),
        multiple: field_range(scenarios.iter().map(|s| s.multiple)),
        adjusted_ebitda: field_range(ebitdas.iter().copied()),
        business_value: field_range(values.iter().copied()),
    })
}

/// Business-value movement between the latest valuation and the oldest one
/// inside the lookback window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueGrowth {
    pub baseline_value: f64,
    pub latest_value: f64,
    pub delta: f64,
    pub percent_change: f64,
    pub baseline_at: DateTime<Utc>,
    pub latest_at: DateTime<Utc>,
}

/// Growth over the trailing `period_months`.
///
/// Picks the most recent record and the oldest record dated within
/// `period_months` of it. Returns `None`, not zero, when fewer than two
/// records exist or the window holds only the latest record itself: a
/// growth figure against no baseline is meaningless.
pub fn value_growth(records: &[Valuation], period_months: u32) -> Option<ValueGrowth> {
    if records.len() < 2 {
        return None;
    }

    let latest = records.iter().max_by_key(|v| v.created_at)?;
    let cutoff = latest
        .created_at
        .checked_sub_months(Months::new(period_months))?;
    let baseline = records
        .iter()
        .filter(|v| v.created_at >= cutoff)
        .min_by_key(|v| v.created_at)?;

    if baseline.id == latest.id {
        return None;
    }

    let delta = latest.business_value - baseline.business_value;
    Some(ValueGrowth {
        baseline_value: baseline.business_value,
        latest_value: latest.business_value,
        delta,
        percent_change: if baseline.business_value == 0.0 {
            0.0
        } else {
            delta / baseline.business_value * 100.0
        },
        baseline_at: baseline.created_at,
        latest_at: latest.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn inputs(net_profit: f64, multiple: f64) -> ValuationInputs {
        ValuationInputs {
            annual_revenue: 5_000_000.0,
            net_profit,
            owner_compensation: 150_000.0,
            depreciation: 80_000.0,
            interest: 20_000.0,
            taxes: 50_000.0,
            other_addbacks: 10_000.0,
            multiple,
        }
    }

    fn at(y: i32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, 1, 0, 0, 0).unwrap()
    }

    fn valuation(id: &str, business_value_target: f64, created: DateTime<Utc>) -> Valuation {
        // multiple of 1.0 makes business value equal adjusted EBITDA
        Valuation::from_inputs(
            id,
            "co-1",
            ValuationInputs {
                net_profit: business_value_target,
                multiple: 1.0,
                ..ValuationInputs::default()
            },
            created,
        )
    }

    #[test]
    fn adjusted_ebitda_sums_profit_and_addbacks() {
        assert_eq!(adjusted_ebitda(&inputs(400_000.0, 3.0)), 710_000.0);
    }

    #[test]
    fn business_value_is_ebitda_times_multiple() {
        let i = inputs(400_000.0, 3.5);
        assert_eq!(business_value(adjusted_ebitda(&i), i.multiple), 2_485_000.0);
    }

    #[test]
    fn revenue_ratios_guard_zero_revenue() {
        assert_eq!(ebitda_margin(710_000.0, 0.0), 0.0);
        assert_eq!(value_to_revenue(2_485_000.0, 0.0), 0.0);
        assert!((ebitda_margin(710_000.0, 5_000_000.0) - 14.2).abs() < 1e-9);
    }

    #[test]
    fn update_patch_leaves_unset_fields_alone() {
        let updated = inputs(400_000.0, 3.0).apply(&ValuationUpdate {
            multiple: Some(4.0),
            ..ValuationUpdate::default()
        });
        assert_eq!(updated.multiple, 4.0);
        assert_eq!(updated.net_profit, 400_000.0);
    }

    #[test]
    fn scenario_comparison_needs_two() {
        assert!(compare_scenarios(&[inputs(400_000.0, 3.0)]).is_none());
    }

    #[test]
    fn scenario_comparison_spans_fields() {
        let comparison =
            compare_scenarios(&[inputs(400_000.0, 3.0), inputs(500_000.0, 4.0)]).unwrap();

        assert_eq!(comparison.scenario_count, 2);
        assert_eq!(comparison.multiple.delta, 1.0);
        assert_eq!(comparison.adjusted_ebitda.delta, 100_000.0);
        // 710,000 × 3 = 2,130,000 vs 810,000 × 4 = 3,240,000
        assert_eq!(comparison.business_value.min, 2_130_000.0);
        assert_eq!(comparison.business_value.max, 3_240_000.0);
    }

    #[test]
    fn growth_needs_two_records() {
        assert!(value_growth(&[valuation("a", 1_000_000.0, at(2024, 1))], 12).is_none());
    }

    #[test]
    fn growth_picks_oldest_record_inside_window() {
        let records = vec![
            valuation("a", 900_000.0, at(2023, 1)), // outside 12-month window
            valuation("b", 1_000_000.0, at(2023, 9)),
            valuation("c", 1_100_000.0, at(2024, 2)),
            valuation("d", 1_250_000.0, at(2024, 6)),
        ];

        let growth = value_growth(&records, 12).unwrap();
        assert_eq!(growth.baseline_value, 1_000_000.0);
        assert_eq!(growth.latest_value, 1_250_000.0);
        assert_eq!(growth.delta, 250_000.0);
        assert_eq!(growth.percent_change, 25.0);
    }

    #[test]
    fn growth_is_none_when_window_collapses_to_latest() {
        let records = vec![
            valuation("a", 900_000.0, at(2020, 1)),
            valuation("b", 1_250_000.0, at(2024, 6)),
        ];

        // Only the latest record falls inside the 12-month window.
        assert!(value_growth(&records, 12).is_none());
    }
}
