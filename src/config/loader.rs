//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ConceptsFileConfig, PayrollConfig, PayrollFileConfig, ShiftsFileConfig,
};

/// Loads and provides access to the payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides the aggregated [`PayrollConfig`].
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── payroll.yaml   # Metadata + schedule baselines/thresholds
/// ├── shifts.yaml    # Named shift catalog
/// └── concepts.yaml  # Concept catalog with typed strategies
/// ```
///
/// # Example
///
/// ```no_run
/// use jornada_engine::config::ConfigLoader;
/// use jornada_engine::models::EmployeeClass;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// let concepts = loader.config().list_active_concepts(EmployeeClass::Jornal);
/// println!("{} active concepts for hourly staff", concepts.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/payroll")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if any
    /// required file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll_path = path.join("payroll.yaml");
        let payroll_file = Self::load_yaml::<PayrollFileConfig>(&payroll_path)?;

        let shifts_path = path.join("shifts.yaml");
        let shifts_file = Self::load_yaml::<ShiftsFileConfig>(&shifts_path)?;

        let concepts_path = path.join("concepts.yaml");
        let concepts_file = Self::load_yaml::<ConceptsFileConfig>(&concepts_path)?;

        let config = PayrollConfig::new(
            payroll_file.payroll,
            payroll_file.schedule,
            shifts_file.shifts,
            concepts_file.concepts,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the aggregated configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}
