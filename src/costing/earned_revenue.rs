use crate::core::{CostBreakdown, EarnedRevenue, Job, JobKind, LaborBilling, TmSettings};

/// Calculate earned revenue for a job, branching on its recognition model.
///
/// Time-and-material jobs earn billed labor (rate × hours or cost × markup)
/// plus marked-up material and other costs. Fixed-price jobs earn each
/// contract component in proportion to that component's cost-to-budget
/// ratio. The two models are never blended.
pub fn earned_revenue(job: &Job) -> EarnedRevenue {
    match &job.kind {
        JobKind::TimeMaterial(settings) => time_material_earned(&job.costs, settings),
        JobKind::FixedPrice => fixed_price_earned(&job.contract, &job.budget, &job.costs),
    }
}

fn time_material_earned(costs: &CostBreakdown, settings: &TmSettings) -> EarnedRevenue {
    let labor = match &settings.labor_billing {
        LaborBilling::FixedRate { bill_rate, hours } => bill_rate * hours,
        LaborBilling::Markup { labor_markup } => costs.labor * labor_markup,
    };
    let material = costs.material * settings.material_markup;
    let other = costs.other * settings.other_markup;

    EarnedRevenue::from_components(labor, material, other)
}

fn fixed_price_earned(
    contract: &CostBreakdown,
    budget: &CostBreakdown,
    costs: &CostBreakdown,
) -> EarnedRevenue {
    // Percent complete is computed per component, never as one blended
    // ratio: markup mix differs by component, and an aggregate percentage
    // would misallocate earned revenue across labor/material/other.
    let labor = contract.labor * component_ratio(costs.labor, budget.labor);
    let material = contract.material * component_ratio(costs.material, budget.material);
    let other = contract.other * component_ratio(costs.other, budget.other);

    EarnedRevenue::from_components(labor, material, other)
}

/// Cost-to-budget ratio for one component; 0 when the budget is 0.
fn component_ratio(cost: f64, budget: f64) -> f64 {
    if budget == 0.0 {
        0.0
    } else {
        cost / budget
    }
}
