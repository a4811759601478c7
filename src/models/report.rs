//! Liquidation report models.
//!
//! This module contains the [`LiquidationReport`] type and its associated
//! structures capturing all outputs of a liquidation run: per-employee
//! payslips, per-category totals, and the per-employee error list.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ConceptCategory, ConceptLineItem, LiquidationPeriod};

/// Whether a run is a preview or a committed liquidation.
///
/// Both modes execute the identical computation path; only Execute hands
/// the finished report to the persistence sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Compute and return the report without persisting anything.
    Simulate,
    /// Compute and persist the whole report, all-or-nothing.
    Execute,
}

/// Per-employee per-period aggregated totals by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// Sum of earning-category line amounts.
    pub earnings: Decimal,
    /// Sum of non-taxable line amounts.
    pub non_taxable: Decimal,
    /// Sum of deduction line amounts.
    pub deductions: Decimal,
    /// Sum of employer-contribution line amounts; informational.
    pub employer_contributions: Decimal,
}

impl EmployeeTotals {
    /// Zeroed totals.
    pub fn zero() -> Self {
        Self {
            earnings: Decimal::ZERO,
            non_taxable: Decimal::ZERO,
            deductions: Decimal::ZERO,
            employer_contributions: Decimal::ZERO,
        }
    }

    /// Net pay: earnings + non-taxable − deductions. Employer contributions
    /// are tracked but never subtracted.
    pub fn net(&self) -> Decimal {
        self.earnings + self.non_taxable - self.deductions
    }

    /// Accumulates one line item into the matching category bucket.
    /// Informational lines never touch totals.
    pub fn add_line(&mut self, line: &ConceptLineItem) {
        match line.category {
            ConceptCategory::Earning => self.earnings += line.amount,
            ConceptCategory::NonTaxable => self.non_taxable += line.amount,
            ConceptCategory::Deduction => self.deductions += line.amount,
            ConceptCategory::EmployerContribution => {
                self.employer_contributions += line.amount;
            }
            ConceptCategory::Informational => {}
        }
    }

    /// Column-wise sum with another totals record (period reduction).
    pub fn merge(&mut self, other: &EmployeeTotals) {
        self.earnings += other.earnings;
        self.non_taxable += other.non_taxable;
        self.deductions += other.deductions;
        self.employer_contributions += other.employer_contributions;
    }
}

/// The computed payslip for one employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayslip {
    /// The employee this payslip belongs to.
    pub employee_id: String,
    /// The concept line items, earnings first, base-dependent concepts last.
    pub line_items: Vec<ConceptLineItem>,
    /// Totals aggregated by category.
    pub totals: EmployeeTotals,
}

/// A per-employee failure recorded during a batch run.
///
/// One bad record never aborts the batch; it lands here instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeError {
    /// The employee that was skipped.
    pub employee_id: String,
    /// Why the employee could not be liquidated.
    pub reason: String,
}

/// The complete result of a liquidation run (resultado de liquidación).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed. Envelope metadata only; line items and
    /// totals are a pure function of the inputs.
    pub timestamp: DateTime<Utc>,
    /// The period that was liquidated.
    pub period: LiquidationPeriod,
    /// The mode the report was produced under.
    pub mode: RunMode,
    /// Payslips for every successfully computed employee.
    pub payslips: Vec<EmployeePayslip>,
    /// Column-wise totals over all successful payslips.
    pub period_totals: EmployeeTotals,
    /// Employees that failed, with reasons.
    pub errors: Vec<EmployeeError>,
}

impl LiquidationReport {
    /// Looks up the payslip for one employee, if it was computed.
    pub fn payslip_for(&self, employee_id: &str) -> Option<&EmployeePayslip> {
        self.payslips.iter().find(|p| p.employee_id == employee_id)
    }
}
