//! Reconciliation pass against an external reference run.
//!
//! Compares a computed liquidation report with authoritative totals from a
//! prior run, flagging per-employee mismatches and per-concept deltas.
//! Read-only: it never mutates the engine's output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::LiquidationReport;

/// Currency-rounding tolerance: two amounts within one cent agree.
pub const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// One employee's totals from the reference source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTotal {
    /// The employee the reference figures belong to.
    pub employee_id: String,
    /// Reference net amount.
    pub net: Decimal,
    /// Reference per-concept amounts, by concept code.
    #[serde(default)]
    pub concept_amounts: Vec<(String, Decimal)>,
}

/// Why a concept delta was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    /// Both sides have the concept but the amounts disagree.
    AmountMismatch,
    /// The engine computed the concept; the reference lacks it.
    MissingInReference,
    /// The reference has the concept; the engine did not compute it.
    MissingInComputed,
}

/// One concept-level disagreement for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDelta {
    /// The concept code that disagreed.
    pub concept_code: String,
    /// The engine's amount, when present.
    pub computed: Option<Decimal>,
    /// The reference amount, when present.
    pub reference: Option<Decimal>,
    /// What kind of disagreement this is.
    pub kind: DeltaKind,
}

/// The comparison verdict for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeComparison {
    /// The employee compared.
    pub employee_id: String,
    /// True when the net amounts agree within the epsilon.
    pub matched: bool,
    /// The engine's net amount, when a payslip exists.
    pub computed_net: Option<Decimal>,
    /// The reference net amount, when the reference covers the employee.
    pub reference_net: Option<Decimal>,
    /// Concept-level disagreements.
    pub deltas: Vec<ConceptDelta>,
}

/// The full output of a comparison pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Per-employee verdicts, one per employee on either side.
    pub employees: Vec<EmployeeComparison>,
    /// How many employees matched.
    pub matched_count: usize,
    /// How many employees were compared.
    pub total_count: usize,
    /// matched_count / total_count; 1 when there was nothing to compare.
    pub precision: Decimal,
}

fn within_epsilon(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= EPSILON
}

/// Compares a computed report against reference totals.
///
/// Every employee present on either side gets a verdict: an employee
/// missing from one side never matches. Concept deltas are only computed
/// for employees the reference carries per-concept figures for.
pub fn compare(report: &LiquidationReport, reference: &[ReferenceTotal]) -> ComparisonReport {
    let mut employees = Vec::new();

    for payslip in &report.payslips {
        let reference_total = reference.iter().find(|r| r.employee_id == payslip.employee_id);
        let computed_net = payslip.totals.net();

        let (matched, reference_net, deltas) = match reference_total {
            Some(reference_total) => {
                let matched = within_epsilon(computed_net, reference_total.net);
                let deltas = concept_deltas(payslip, reference_total);
                (matched, Some(reference_total.net), deltas)
            }
            None => (false, None, Vec::new()),
        };

        employees.push(EmployeeComparison {
            employee_id: payslip.employee_id.clone(),
            matched,
            computed_net: Some(computed_net),
            reference_net,
            deltas,
        });
    }

    // Reference rows with no computed payslip are mismatches too.
    for reference_total in reference {
        if report.payslip_for(&reference_total.employee_id).is_none() {
            employees.push(EmployeeComparison {
                employee_id: reference_total.employee_id.clone(),
                matched: false,
                computed_net: None,
                reference_net: Some(reference_total.net),
                deltas: Vec::new(),
            });
        }
    }

    let total_count = employees.len();
    let matched_count = employees.iter().filter(|e| e.matched).count();
    let precision = if total_count == 0 {
        Decimal::ONE
    } else {
        Decimal::from(matched_count) / Decimal::from(total_count)
    };

    ComparisonReport {
        employees,
        matched_count,
        total_count,
        precision,
    }
}

fn concept_deltas(
    payslip: &crate::models::EmployeePayslip,
    reference: &ReferenceTotal,
) -> Vec<ConceptDelta> {
    let mut deltas = Vec::new();

    for line in &payslip.line_items {
        match reference
            .concept_amounts
            .iter()
            .find(|(code, _)| *code == line.concept_code)
        {
            Some((_, reference_amount)) => {
                if !within_epsilon(line.rounded_amount(), *reference_amount) {
                    deltas.push(ConceptDelta {
                        concept_code: line.concept_code.clone(),
                        computed: Some(line.rounded_amount()),
                        reference: Some(*reference_amount),
                        kind: DeltaKind::AmountMismatch,
                    });
                }
            }
            None if !reference.concept_amounts.is_empty() => {
                deltas.push(ConceptDelta {
                    concept_code: line.concept_code.clone(),
                    computed: Some(line.rounded_amount()),
                    reference: None,
                    kind: DeltaKind::MissingInReference,
                });
            }
            None => {}
        }
    }

    for (code, reference_amount) in &reference.concept_amounts {
        let computed = payslip.line_items.iter().any(|l| &l.concept_code == code);
        if !computed {
            deltas.push(ConceptDelta {
                concept_code: code.clone(),
                computed: None,
                reference: Some(*reference_amount),
                kind: DeltaKind::MissingInComputed,
            });
        }
    }

    deltas
}
