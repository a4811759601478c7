//! The liquidation engine: per-employee concept evaluation over a period.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{ConceptEntry, PayrollConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ConceptLineItem, Employee, EmployeePayslip, EmployeeError, EmployeeTotals, Jornada,
    LiquidationPeriod, LiquidationReport, RunMode,
};

use super::buckets::HourBuckets;
use super::strategy::EvaluationContext;

/// Computes liquidation runs from reconciled jornadas and the concept
/// catalog.
///
/// The engine is pure: it reads its inputs and produces a report. It
/// never persists anything; the caller hands Execute-mode reports to a
/// sink, whole or not at all.
#[derive(Debug, Clone)]
pub struct LiquidationEngine {
    config: PayrollConfig,
}

impl LiquidationEngine {
    /// Creates an engine over the given payroll configuration.
    pub fn new(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Runs a liquidation for one period over the given roster.
    ///
    /// `jornadas` maps employee id to that employee's jornadas; entries
    /// outside the period's date range are ignored. Employees whose
    /// payroll class does not match the period are skipped silently.
    /// Per-employee failures are recorded in the report's error list and
    /// never abort the batch. A cancellation observed between employees
    /// aborts the whole run and discards partial results.
    pub fn run(
        &self,
        period: &LiquidationPeriod,
        roster: &[Employee],
        jornadas: &HashMap<String, Vec<Jornada>>,
        mode: RunMode,
        cancel: &AtomicBool,
    ) -> EngineResult<LiquidationReport> {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            year = period.year,
            month = period.month,
            ?mode,
            roster_size = roster.len(),
            "Starting liquidation run"
        );

        let mut payslips = Vec::new();
        let mut errors = Vec::new();
        let empty: Vec<Jornada> = Vec::new();

        for employee in roster {
            if cancel.load(Ordering::Relaxed) {
                warn!(%run_id, completed = payslips.len(), "Liquidation run cancelled");
                return Err(EngineError::Cancelled {
                    completed: payslips.len(),
                });
            }
            if employee.class != period.employee_class {
                continue;
            }

            let employee_jornadas = jornadas.get(&employee.id).unwrap_or(&empty);
            match self.liquidate_employee(period, employee, employee_jornadas) {
                Ok(payslip) => payslips.push(payslip),
                Err(error) => {
                    warn!(
                        %run_id,
                        employee_id = %employee.id,
                        %error,
                        "Employee skipped during liquidation"
                    );
                    errors.push(EmployeeError {
                        employee_id: employee.id.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        let mut period_totals = EmployeeTotals::zero();
        for payslip in &payslips {
            period_totals.merge(&payslip.totals);
        }

        info!(
            %run_id,
            payslips = payslips.len(),
            errors = errors.len(),
            "Liquidation run complete"
        );

        Ok(LiquidationReport {
            run_id,
            timestamp: Utc::now(),
            period: period.clone(),
            mode,
            payslips,
            period_totals,
            errors,
        })
    }

    /// Computes one employee's payslip.
    ///
    /// Two passes over the active concepts for the employee's class:
    /// everything except base-dependent strategies first, then the
    /// percent-of-earnings concepts against the now-final totals.
    fn liquidate_employee(
        &self,
        period: &LiquidationPeriod,
        employee: &Employee,
        jornadas: &[Jornada],
    ) -> EngineResult<EmployeePayslip> {
        let in_period = jornadas
            .iter()
            .filter(|j| period.contains_date(j.date));
        let buckets = HourBuckets::aggregate(in_period, &period.holidays);
        if buckets.has_negative() {
            return Err(EngineError::CalculationError {
                message: format!("negative hour bucket for employee '{}'", employee.id),
            });
        }

        let concepts = self.config.list_active_concepts(employee.class);
        let mut line_items = Vec::new();
        let mut totals = EmployeeTotals::zero();

        // First pass: everything that does not read the running totals.
        for entry in concepts.iter().filter(|c| !c.strategy.is_base_dependent()) {
            let ctx = EvaluationContext {
                employee,
                buckets: &buckets,
                as_of: period.date_to,
                totals: &totals,
            };
            if let Some(line) = evaluate_entry(entry, &ctx)? {
                totals.add_line(&line);
                line_items.push(line);
            }
        }

        // Second pass: base-dependent concepts see final earnings.
        let earned = totals.clone();
        for entry in concepts.iter().filter(|c| c.strategy.is_base_dependent()) {
            let ctx = EvaluationContext {
                employee,
                buckets: &buckets,
                as_of: period.date_to,
                totals: &earned,
            };
            if let Some(line) = evaluate_entry(entry, &ctx)? {
                totals.add_line(&line);
                line_items.push(line);
            }
        }

        Ok(EmployeePayslip {
            employee_id: employee.id.clone(),
            line_items,
            totals,
        })
    }

    /// The configuration the engine runs against.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}

fn evaluate_entry(
    entry: &ConceptEntry,
    ctx: &EvaluationContext<'_>,
) -> EngineResult<Option<ConceptLineItem>> {
    let outcome = entry.strategy.evaluate(&entry.code, ctx)?;
    Ok(outcome.map(|o| ConceptLineItem {
        concept_code: entry.code.clone(),
        quantity: o.quantity,
        unit_value: o.unit_value,
        amount: o.amount,
        category: entry.category,
    }))
}

/// Convenience for callers that have no cancellation source.
pub fn never_cancelled() -> AtomicBool {
    AtomicBool::new(false)
}
