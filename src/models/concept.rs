//! Payroll concept catalog types and line items.
//!
//! A concept is one payslip line item type (night hours, union dues,
//! seniority bonus) with a code and a calculation category. The catalog is
//! loaded from configuration; the formula text on a definition is
//! documentation only; the executable computation is a typed strategy
//! selected by concept code (see [`crate::liquidation::ConceptStrategy`]).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::EmployeeClass;

/// The calculation category of a payroll concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptCategory {
    /// Taxable remuneration; adds to net.
    Earning,
    /// Non-taxable remuneration; adds to net, excluded from the taxable base.
    NonTaxable,
    /// Withheld from the employee; subtracts from net.
    Deduction,
    /// Employer-side cost; tracked for accounting, never subtracted from net.
    EmployerContribution,
    /// Informational only; never affects totals.
    Informational,
}

/// A payroll concept definition from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptDefinition {
    /// Unique concept code (e.g. "HN" for night hours).
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Calculation category.
    pub category: ConceptCategory,
    /// Inactive concepts are skipped by the engine.
    pub active: bool,
    /// Prose copied from the external payroll system. Documentation only,
    /// never parsed or executed.
    pub formula_description: Option<String>,
    /// Default multiplier shown alongside the concept, informational.
    pub default_multiplier: Option<Decimal>,
    /// Which payroll classes this concept applies to.
    pub applies_to: Vec<EmployeeClass>,
}

impl ConceptDefinition {
    /// True when the concept applies to the given payroll class.
    pub fn applies_to_class(&self, class: EmployeeClass) -> bool {
        self.applies_to.contains(&class)
    }
}

/// One computed payslip line for one employee in one period.
///
/// `amount` is always populated; `quantity`/`unit_value` only when the
/// concept is quantity-times-rate shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptLineItem {
    /// The concept this line was computed for.
    pub concept_code: String,
    /// Units (hours, days, years) for rate-based concepts.
    pub quantity: Option<Decimal>,
    /// Monetary value per unit for rate-based concepts.
    pub unit_value: Option<Decimal>,
    /// The line amount, unrounded. Rounding happens only at serialization.
    pub amount: Decimal,
    /// The category copied from the concept definition.
    pub category: ConceptCategory,
}

impl ConceptLineItem {
    /// The amount rounded to 2 decimal places, for export consumers.
    ///
    /// # Example
    ///
    /// ```
    /// use jornada_engine::models::{ConceptCategory, ConceptLineItem};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let line = ConceptLineItem {
    ///     concept_code: "HN".to_string(),
    ///     quantity: Some(Decimal::from_str("7.8333").unwrap()),
    ///     unit_value: Some(Decimal::from_str("2096.05").unwrap()),
    ///     amount: Decimal::from_str("16419.1241").unwrap(),
    ///     category: ConceptCategory::Earning,
    /// };
    /// assert_eq!(line.rounded_amount(), Decimal::from_str("16419.12").unwrap());
    /// ```
    pub fn rounded_amount(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// The quantity scaled by 100 as an integer (2 implied decimals), the
    /// encoding fixed-width payroll exports use. `None` when the concept
    /// carries no quantity or the scaled value overflows.
    pub fn scaled_quantity(&self) -> Option<i64> {
        self.quantity.and_then(|q| {
            (q * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
    }
}
