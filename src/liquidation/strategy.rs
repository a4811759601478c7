//! Typed concept computation strategies.
//!
//! The catalog's executable side: a closed set of calculation shapes
//! selected per concept in `concepts.yaml`. Free-text formulas are never
//! parsed; an unsupported shape is a config-authoring error caught at
//! deserialization time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeTotals};

use super::buckets::{HourBucketKind, HourBuckets};

/// Hours credited per qualifying excused-leave day when building the
/// attendance-bonus base.
const LEAVE_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Which running total a percent-of-earnings concept draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningsBase {
    /// Taxable earnings only.
    Taxable,
    /// Taxable earnings plus non-taxable allowances.
    Gross,
}

/// The inputs a strategy evaluation reads.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// The employee being liquidated.
    pub employee: &'a Employee,
    /// The employee's aggregated hour buckets for the period.
    pub buckets: &'a HourBuckets,
    /// The period end date, used for seniority.
    pub as_of: NaiveDate,
    /// Running totals over the lines already final. Zero during the first
    /// pass; populated before base-dependent strategies run.
    pub totals: &'a EmployeeTotals,
}

/// The computed figures for one concept line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyOutcome {
    /// Units the concept was applied to; only for rate-shaped strategies.
    pub quantity: Option<Decimal>,
    /// Value per unit; only for rate-shaped strategies.
    pub unit_value: Option<Decimal>,
    /// The line amount, unrounded.
    pub amount: Decimal,
}

/// A concept's calculation shape.
///
/// Tagged by `kind` in `concepts.yaml`:
///
/// ```yaml
/// strategy:
///   kind: hours_times_rate
///   bucket: night
///   multiplier: "1.133"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConceptStrategy {
    /// Bucket hours × hourly rate × multiplier.
    HoursTimesRate {
        /// The hour bucket the quantity comes from.
        bucket: HourBucketKind,
        /// Collective-agreement multiplier over the base rate.
        multiplier: Decimal,
    },
    /// Attendance bonus: a percentage over the qualifying hour base (day,
    /// night, and holiday hours plus credited excused leave; sick and
    /// accident days never qualify).
    AttendanceBonus {
        /// Bonus percentage.
        percent: Decimal,
    },
    /// Seniority bonus: base pay × years of service × a per-year percent.
    SeniorityBonus {
        /// Percent of base pay per completed year of service.
        percent_per_year: Decimal,
    },
    /// The salaried-staff base wage: the employee's monthly salary as one
    /// line, independent of hours.
    MonthlySalary,
    /// A flat amount, independent of hours.
    FixedAmount {
        /// The amount.
        amount: Decimal,
    },
    /// A percentage of the running earnings totals. Base-dependent:
    /// evaluated only after every earning line is final.
    PercentOfEarnings {
        /// The percentage applied.
        percent: Decimal,
        /// Which running total the percentage draws from.
        base: EarningsBase,
    },
}

impl ConceptStrategy {
    /// True when the strategy reads the running earnings totals and must
    /// wait for the second evaluation pass.
    pub fn is_base_dependent(&self) -> bool {
        matches!(self, ConceptStrategy::PercentOfEarnings { .. })
    }

    /// Evaluates the strategy for one employee.
    ///
    /// Returns `Ok(None)` when the concept yields nothing this period
    /// (zero hours in the bucket, zero base). Missing employee
    /// configuration a strategy requires is a per-employee error.
    pub fn evaluate(
        &self,
        concept_code: &str,
        ctx: &EvaluationContext<'_>,
    ) -> EngineResult<Option<StrategyOutcome>> {
        match self {
            ConceptStrategy::HoursTimesRate { bucket, multiplier } => {
                let quantity = ctx.buckets.hours(*bucket);
                if quantity.is_zero() {
                    return Ok(None);
                }
                let rate = hourly_rate(ctx.employee, concept_code)?;
                let unit_value = rate * multiplier;
                Ok(Some(outcome(quantity, unit_value)))
            }
            ConceptStrategy::AttendanceBonus { percent } => {
                let leave_hours =
                    Decimal::from(ctx.buckets.absences.qualifying_leave_days()) * LEAVE_DAY_HOURS;
                let quantity = ctx.buckets.day_hours
                    + ctx.buckets.night_hours
                    + ctx.buckets.holiday_hours
                    + leave_hours;
                if quantity.is_zero() {
                    return Ok(None);
                }
                let rate = hourly_rate(ctx.employee, concept_code)?;
                let unit_value = rate * percent / Decimal::ONE_HUNDRED;
                Ok(Some(outcome(quantity, unit_value)))
            }
            ConceptStrategy::SeniorityBonus { percent_per_year } => {
                let years = Decimal::from(ctx.employee.years_of_service(ctx.as_of));
                if years.is_zero() {
                    return Ok(None);
                }
                let base = seniority_base(ctx, concept_code)?;
                let unit_value = base * percent_per_year / Decimal::ONE_HUNDRED;
                Ok(Some(outcome(years, unit_value)))
            }
            ConceptStrategy::MonthlySalary => {
                let salary = ctx.employee.base_salary.ok_or_else(|| {
                    EngineError::RateNotFound {
                        employee_id: ctx.employee.id.clone(),
                        concept_code: concept_code.to_string(),
                    }
                })?;
                Ok(Some(StrategyOutcome {
                    quantity: None,
                    unit_value: None,
                    amount: salary,
                }))
            }
            ConceptStrategy::FixedAmount { amount } => Ok(Some(StrategyOutcome {
                quantity: None,
                unit_value: None,
                amount: *amount,
            })),
            ConceptStrategy::PercentOfEarnings { percent, base } => {
                let base_amount = match base {
                    EarningsBase::Taxable => ctx.totals.earnings,
                    EarningsBase::Gross => ctx.totals.earnings + ctx.totals.non_taxable,
                };
                if base_amount.is_zero() {
                    return Ok(None);
                }
                Ok(Some(StrategyOutcome {
                    quantity: None,
                    unit_value: None,
                    amount: base_amount * percent / Decimal::ONE_HUNDRED,
                }))
            }
        }
    }
}

fn outcome(quantity: Decimal, unit_value: Decimal) -> StrategyOutcome {
    StrategyOutcome {
        quantity: Some(quantity),
        unit_value: Some(unit_value),
        amount: quantity * unit_value,
    }
}

fn hourly_rate(employee: &Employee, concept_code: &str) -> EngineResult<Decimal> {
    employee.hourly_rate.ok_or_else(|| EngineError::RateNotFound {
        employee_id: employee.id.clone(),
        concept_code: concept_code.to_string(),
    })
}

/// Seniority draws from the monthly base salary when there is one, and
/// falls back to the period's worked hours at the hourly rate for hourly
/// staff.
fn seniority_base(ctx: &EvaluationContext<'_>, concept_code: &str) -> EngineResult<Decimal> {
    if let Some(salary) = ctx.employee.base_salary {
        return Ok(salary);
    }
    let rate = hourly_rate(ctx.employee, concept_code)?;
    Ok(rate * ctx.buckets.total_worked())
}
