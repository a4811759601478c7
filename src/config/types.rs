//! Configuration types for the attendance and liquidation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Rates, thresholds, and
//! the concept catalog are configuration inputs, never code constants.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::liquidation::ConceptStrategy;
use crate::models::{ConceptCategory, ConceptDefinition, EmployeeClass, ShiftKind};

/// Metadata about the payroll configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollMetadata {
    /// Human-readable name of the configuration set.
    pub name: String,
    /// The version or effective date of this configuration.
    pub version: String,
    /// ISO country code the rules were authored for.
    pub country: String,
}

/// A nominal shift window in plant-local time.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShiftWindow {
    /// Nominal start of the shift.
    pub start: NaiveTime,
    /// Nominal end of the shift; earlier than `start` means it crosses
    /// midnight.
    pub end: NaiveTime,
}

/// The night window used to split worked hours into day and night buckets.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NightWindow {
    /// Start of night hours (e.g. 22:00).
    pub start: NaiveTime,
    /// End of night hours the next morning (e.g. 06:00).
    pub end: NaiveTime,
}

/// Baselines and thresholds for the reconciler.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Baseline worked hours Monday through Friday.
    pub weekday_baseline_hours: Decimal,
    /// Baseline worked hours on Saturday (shortened schedule).
    pub saturday_baseline_hours: Decimal,
    /// The night window for the day/night hour split.
    pub night_window: NightWindow,
    /// Hours over baseline before unrecorded overtime is suspected.
    pub suspect_overtime_margin: Decimal,
}

/// The named shift catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftCatalogConfig {
    /// Morning shift window.
    pub morning: ShiftWindow,
    /// Afternoon shift window.
    pub afternoon: ShiftWindow,
    /// Night shift window (crosses midnight).
    pub night: ShiftWindow,
    /// Saturday variant: morning-only, shortened hours.
    pub saturday_morning: ShiftWindow,
}

impl ShiftCatalogConfig {
    /// Returns the nominal window for a shift kind on a regular weekday.
    /// Flexible employees have no window.
    pub fn window_for(&self, kind: ShiftKind) -> Option<ShiftWindow> {
        match kind {
            ShiftKind::Morning => Some(self.morning),
            ShiftKind::Afternoon => Some(self.afternoon),
            ShiftKind::Night => Some(self.night),
            ShiftKind::Flexible => None,
        }
    }
}

/// One concept catalog entry: the definition plus its executable strategy.
///
/// The strategy is a closed, typed set selected by concept code; the
/// `formula_description` prose is never parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptEntry {
    /// Unique concept code.
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Calculation category.
    pub category: ConceptCategory,
    /// Inactive concepts are skipped by the engine.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Documentation-only formula prose from the external payroll system.
    #[serde(default)]
    pub formula_description: Option<String>,
    /// Informational default multiplier.
    #[serde(default)]
    pub default_multiplier: Option<Decimal>,
    /// Which payroll classes this concept applies to.
    pub applies_to: Vec<EmployeeClass>,
    /// The typed computation strategy.
    pub strategy: ConceptStrategy,
}

fn default_active() -> bool {
    true
}

impl ConceptEntry {
    /// Builds the plain catalog definition for this entry.
    pub fn definition(&self) -> ConceptDefinition {
        ConceptDefinition {
            code: self.code.clone(),
            description: self.description.clone(),
            category: self.category,
            active: self.active,
            formula_description: self.formula_description.clone(),
            default_multiplier: self.default_multiplier,
            applies_to: self.applies_to.clone(),
        }
    }
}

/// Top-level structure of `payroll.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollFileConfig {
    /// Configuration set metadata.
    pub payroll: PayrollMetadata,
    /// Reconciler baselines and thresholds.
    pub schedule: ScheduleConfig,
}

/// Top-level structure of `shifts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsFileConfig {
    /// The named shift catalog.
    pub shifts: ShiftCatalogConfig,
}

/// Top-level structure of `concepts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptsFileConfig {
    /// The concept catalog.
    pub concepts: Vec<ConceptEntry>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: PayrollMetadata,
    schedule: ScheduleConfig,
    shifts: ShiftCatalogConfig,
    concepts: Vec<ConceptEntry>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: PayrollMetadata,
        schedule: ScheduleConfig,
        shifts: ShiftCatalogConfig,
        concepts: Vec<ConceptEntry>,
    ) -> Self {
        Self {
            metadata,
            schedule,
            shifts,
            concepts,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        &self.metadata
    }

    /// Returns the schedule baselines and thresholds.
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    /// Returns the shift catalog.
    pub fn shifts(&self) -> &ShiftCatalogConfig {
        &self.shifts
    }

    /// Returns every concept entry, active or not.
    pub fn concepts(&self) -> &[ConceptEntry] {
        &self.concepts
    }

    /// Returns the active concepts applicable to the given payroll class,
    /// in catalog order.
    pub fn list_active_concepts(&self, class: EmployeeClass) -> Vec<&ConceptEntry> {
        self.concepts
            .iter()
            .filter(|c| c.active && c.applies_to.contains(&class))
            .collect()
    }

    /// Looks up one concept entry by code.
    pub fn concept(&self, code: &str) -> Option<&ConceptEntry> {
        self.concepts.iter().find(|c| c.code == code)
    }
}
