//! Attendance reconciliation and payroll liquidation engine.
//!
//! This crate turns raw clock punches into reconciled per-day work
//! sessions (jornadas), aggregates them over payroll periods, and
//! computes per-employee payslip line items and totals from a typed
//! concept catalog. An optional comparator pass checks computed totals
//! against a prior authoritative run.

#![warn(missing_docs)]

pub mod api;
pub mod comparator;
pub mod config;
pub mod error;
pub mod liquidation;
pub mod models;
pub mod reconcile;
pub mod store;
