use serde::Serialize;

use crate::core::Job;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningSeverity {
    Warning,
    Critical,
}

impl std::fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningSeverity::Warning => write!(f, "Warning"),
            WarningSeverity::Critical => write!(f, "Critical"),
        }
    }
}

/// One schedule problem on a job. A job can accumulate several.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleWarning {
    pub severity: WarningSeverity,
    pub message: String,
    pub days_over: i64,
}

// Severity thresholds in days.
const DEMOBILIZE_CRITICAL_AFTER: i64 = 14;
const TARGET_CRITICAL_AFTER: i64 = 30;

/// Collect every schedule warning on a job, in check order.
///
/// Phase checks run first (each enabled mobilization phase against the
/// contract end date), then the projected-versus-target check. The checks
/// are independent; none suppresses another.
pub fn all_schedule_warnings(job: &Job) -> Vec<ScheduleWarning> {
    let Some(schedule) = &job.schedule else {
        return Vec::new();
    };

    let mut warnings = Vec::new();

    if let Some(contract_end) = schedule.contract_end {
        for phase in schedule.phases.iter().filter(|p| p.enabled) {
            if let Some(demobilize) = phase.demobilize {
                if demobilize > contract_end {
                    let days_over = (demobilize - contract_end).num_days();
                    warnings.push(ScheduleWarning {
                        severity: if days_over > DEMOBILIZE_CRITICAL_AFTER {
                            WarningSeverity::Critical
                        } else {
                            WarningSeverity::Warning
                        },
                        message: format!(
                            "{} demobilizes {} days after contract end",
                            phase.label, days_over
                        ),
                        days_over,
                    });
                }
            }
            if let Some(mobilize) = phase.mobilize {
                if mobilize > contract_end {
                    let days_over = (mobilize - contract_end).num_days();
                    // Mobilizing after the contract ends is always critical.
                    warnings.push(ScheduleWarning {
                        severity: WarningSeverity::Critical,
                        message: format!(
                            "{} mobilizes {} days after contract end",
                            phase.label, days_over
                        ),
                        days_over,
                    });
                }
            }
        }
    }

    if let (Some(projected), Some(target)) = (schedule.projected_end, schedule.target_end) {
        if projected > target {
            let days_late = (projected - target).num_days();
            warnings.push(ScheduleWarning {
                severity: if days_late > TARGET_CRITICAL_AFTER {
                    WarningSeverity::Critical
                } else {
                    WarningSeverity::Warning
                },
                message: format!("Projected completion {days_late} days past target"),
                days_over: days_late,
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CostBreakdown, JobKind, JobSchedule, JobStatus, MobilizationPhase};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn job_with(schedule: JobSchedule) -> Job {
        Job {
            id: "j1".to_string(),
            job_no: "24-103".to_string(),
            name: String::new(),
            status: JobStatus::Active,
            kind: JobKind::FixedPrice,
            contract: CostBreakdown::default(),
            budget: CostBreakdown::default(),
            costs: CostBreakdown::default(),
            cost_to_complete: CostBreakdown::default(),
            invoiced: CostBreakdown::default(),
            labor_cost_per_hour: None,
            as_of: None,
            schedule: Some(schedule),
        }
    }

    fn phase(label: &str, mobilize: Option<NaiveDate>, demobilize: Option<NaiveDate>) -> MobilizationPhase {
        MobilizationPhase {
            label: label.to_string(),
            enabled: true,
            mobilize,
            demobilize,
        }
    }

    #[test]
    fn no_schedule_means_no_warnings() {
        let mut job = job_with(JobSchedule::default());
        job.schedule = None;
        assert!(all_schedule_warnings(&job).is_empty());
    }

    #[test]
    fn late_demobilize_escalates_past_fourteen_days() {
        let job = job_with(JobSchedule {
            contract_end: Some(date(2024, 6, 30)),
            target_end: None,
            projected_end: None,
            phases: vec![
                phase("Sitework", None, Some(date(2024, 7, 10))),
                phase("Paving", None, Some(date(2024, 7, 20))),
            ],
        });

        let warnings = all_schedule_warnings(&job);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].severity, WarningSeverity::Warning); // 10 days
        assert_eq!(warnings[1].severity, WarningSeverity::Critical); // 20 days
    }

    #[test]
    fn late_mobilize_is_always_critical() {
        let job = job_with(JobSchedule {
            contract_end: Some(date(2024, 6, 30)),
            target_end: None,
            projected_end: None,
            phases: vec![phase("Punch list", Some(date(2024, 7, 1)), None)],
        });

        let warnings = all_schedule_warnings(&job);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, WarningSeverity::Critical);
        assert_eq!(warnings[0].days_over, 1);
    }

    #[test]
    fn disabled_phases_are_skipped() {
        let mut p = phase("Sitework", None, Some(date(2024, 8, 1)));
        p.enabled = false;
        let job = job_with(JobSchedule {
            contract_end: Some(date(2024, 6, 30)),
            target_end: None,
            projected_end: None,
            phases: vec![p],
        });

        assert!(all_schedule_warnings(&job).is_empty());
    }

    #[test]
    fn projected_past_target_escalates_past_thirty_days() {
        let job = job_with(JobSchedule {
            contract_end: None,
            target_end: Some(date(2024, 6, 30)),
            projected_end: Some(date(2024, 8, 15)),
            phases: Vec::new(),
        });

        let warnings = all_schedule_warnings(&job);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, WarningSeverity::Critical); // 46 days late
        assert_eq!(warnings[0].days_over, 46);
    }

    #[test]
    fn independent_checks_accumulate() {
        let job = job_with(JobSchedule {
            contract_end: Some(date(2024, 6, 30)),
            target_end: Some(date(2024, 6, 30)),
            projected_end: Some(date(2024, 7, 10)),
            phases: vec![phase("Sitework", None, Some(date(2024, 7, 5)))],
        });

        let warnings = all_schedule_warnings(&job);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].severity, WarningSeverity::Warning);
        assert_eq!(warnings[1].severity, WarningSeverity::Warning);
    }
}
