//! Error types for the attendance and liquidation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during reconciliation and
//! liquidation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use jornada_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Concept code was not found in the catalog.
    #[error("Concept not found: {code}")]
    ConceptNotFound {
        /// The concept code that was not found.
        code: String,
    },

    /// An employee is missing the rate or salary a concept requires.
    #[error("Rate not found for employee '{employee_id}' evaluating concept '{concept_code}'")]
    RateNotFound {
        /// The employee missing the configuration.
        employee_id: String,
        /// The concept that needed it.
        concept_code: String,
    },

    /// A clock event could not be parsed from its raw representation.
    #[error("Invalid clock event for employee '{employee_id}': {message}")]
    InvalidClockEvent {
        /// The employee the event was recorded for.
        employee_id: String,
        /// A description of what made the event invalid.
        message: String,
    },

    /// A jornada violated the status/worked-hours invariant at the write boundary.
    #[error("Invalid jornada for employee '{employee_id}' on {date}: {message}")]
    InvalidJornada {
        /// The employee the jornada belongs to.
        employee_id: String,
        /// The anchor date of the jornada.
        date: NaiveDate,
        /// A description of the violated invariant.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The liquidation run was cancelled before completion.
    #[error("Liquidation run cancelled after {completed} employee(s)")]
    Cancelled {
        /// How many employees had been computed when the cancel was observed.
        completed: usize,
    },

    /// The backing record store could not be reached; fatal for the whole run.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
