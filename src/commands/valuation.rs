use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::valuation::{
    adjusted_ebitda, business_value, compare_scenarios, ebitda_margin, value_to_revenue,
    ScenarioComparison, ValuationInputs,
};

#[derive(Serialize)]
struct ValuationReport {
    inputs: ValuationInputs,
    adjusted_ebitda: f64,
    business_value: f64,
    ebitda_margin: f64,
    value_to_revenue: f64,
}

#[derive(Serialize)]
struct ScenarioReport {
    scenarios: Vec<ValuationReport>,
    comparison: Option<ScenarioComparison>,
}

fn report(inputs: ValuationInputs) -> ValuationReport {
    let ebitda = adjusted_ebitda(&inputs);
    let value = business_value(ebitda, inputs.multiple);
    ValuationReport {
        adjusted_ebitda: ebitda,
        business_value: value,
        ebitda_margin: ebitda_margin(ebitda, inputs.annual_revenue),
        value_to_revenue: value_to_revenue(value, inputs.annual_revenue),
        inputs,
    }
}

pub fn run(inputs_path: &Path) -> Result<()> {
    let raw = fs::read_to_string(inputs_path)
        .with_context(|| format!("failed to read inputs file {}", inputs_path.display()))?;

    // Accept either a single inputs object or an array of scenarios.
    if let Ok(scenarios) = serde_json::from_str::<Vec<ValuationInputs>>(&raw) {
        let output = ScenarioReport {
            comparison: compare_scenarios(&scenarios),
            scenarios: scenarios.into_iter().map(report).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let inputs: ValuationInputs = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse inputs file {}", inputs_path.display()))?;
        println!("{}", serde_json::to_string_pretty(&report(inputs))?);
    }

    Ok(())
}
