use crate::core::{BillingDifference, Job, JobKind};
use crate::costing::earned_revenue;

/// Invoiced-versus-earned position for a job.
///
/// Over-billed is a strict inequality: a difference of exactly zero is
/// neither over- nor under-billed.
pub fn billing_difference(job: &Job) -> BillingDifference {
    let earned = earned_revenue(job);
    let difference = job.invoiced.sum() - earned.total;
    let is_over_billed = difference > 0.0;

    BillingDifference {
        difference,
        is_over_billed,
        label: if is_over_billed {
            "Over-billed"
        } else {
            "Under-billed"
        },
    }
}

/// Forecasted profit at completion.
///
/// T&M jobs forecast earned revenue minus cost to date; fixed-price jobs
/// forecast contract value minus total forecasted cost (cost to date plus
/// cost to complete).
pub fn forecasted_profit(job: &Job) -> f64 {
    match &job.kind {
        JobKind::TimeMaterial(_) => earned_revenue(job).total - job.costs.sum(),
        JobKind::FixedPrice => {
            job.contract.sum() - (job.costs.sum() + job.cost_to_complete.sum())
        }
    }
}

/// Whole-job percent complete on the 0-100 scale.
///
/// Coarse display figure only; revenue recognition uses per-component
/// ratios, not this one.
pub fn percent_complete(job: &Job) -> f64 {
    let budget = job.budget.sum();
    if budget == 0.0 {
        0.0
    } else {
        job.costs.sum() / budget * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CostBreakdown, JobStatus, LaborBilling, TmSettings};

    fn job() -> Job {
        Job {
            id: "j1".to_string(),
            job_no: "24-102".to_string(),
            name: String::new(),
            status: JobStatus::Active,
            kind: JobKind::FixedPrice,
            contract: CostBreakdown::new(60_000.0, 30_000.0, 10_000.0),
            budget: CostBreakdown::new(50_000.0, 20_000.0, 10_000.0),
            costs: CostBreakdown::new(25_000.0, 10_000.0, 5_000.0),
            cost_to_complete: CostBreakdown::new(25_000.0, 10_000.0, 5_000.0),
            invoiced: CostBreakdown::default(),
            labor_cost_per_hour: None,
            as_of: None,
            schedule: None,
        }
    }

    #[test]
    fn over_billed_requires_strictly_positive_difference() {
        let mut j = job();
        // Earned is exactly 50,000 for this job; invoice the same amount.
        j.invoiced = CostBreakdown::new(50_000.0, 0.0, 0.0);

        let position = billing_difference(&j);
        assert_eq!(position.difference, 0.0);
        assert!(!position.is_over_billed);
    }

    #[test]
    fn over_billing_reports_positive_difference() {
        let mut j = job();
        j.invoiced = CostBreakdown::new(55_000.0, 0.0, 0.0);

        let position = billing_difference(&j);
        assert_eq!(position.difference, 5_000.0);
        assert!(position.is_over_billed);
        assert_eq!(position.label, "Over-billed");
    }

    #[test]
    fn fixed_price_profit_subtracts_cost_to_complete() {
        // 100,000 contract − (40,000 spent + 40,000 remaining)
        assert_eq!(forecasted_profit(&job()), 20_000.0);
    }

    #[test]
    fn tm_profit_is_earned_minus_costs() {
        let mut j = job();
        j.kind = JobKind::TimeMaterial(TmSettings {
            labor_billing: LaborBilling::Markup { labor_markup: 1.5 },
            material_markup: 1.25,
            other_markup: 1.0,
        });
        j.costs = CostBreakdown::new(10_000.0, 10_000.0, 0.0);

        // Earned 15,000 + 12,500 + 0 = 27,500 against 20,000 cost
        assert_eq!(forecasted_profit(&j), 7_500.0);
    }

    #[test]
    fn percent_complete_is_zero_when_budget_is_zero() {
        let mut j = job();
        j.budget = CostBreakdown::default();

        assert_eq!(percent_complete(&j), 0.0);
    }

    #[test]
    fn percent_complete_uses_whole_job_sums() {
        assert_eq!(percent_complete(&job()), 50.0);
    }
}
