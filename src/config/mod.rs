//! Configuration loading for the attendance and liquidation engine.
//!
//! Rates, thresholds, shift windows, and the concept catalog are all
//! configuration inputs loaded from YAML files.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ConceptEntry, ConceptsFileConfig, NightWindow, PayrollConfig, PayrollFileConfig,
    PayrollMetadata, ScheduleConfig, ShiftCatalogConfig, ShiftWindow, ShiftsFileConfig,
};
