//! Core data models for the attendance and liquidation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod clock_event;
mod concept;
mod employee;
mod jornada;
mod period;
mod report;

pub use clock_event::{ClockEvent, PunchDirection};
pub use concept::{ConceptCategory, ConceptDefinition, ConceptLineItem};
pub use employee::{BargainingStatus, Employee, EmployeeClass};
pub use jornada::{
    AbsenceKind, DayState, InconsistencyKind, Jornada, JornadaOrigin, ShiftKind,
};
pub use period::{LiquidationPeriod, PeriodKind};
pub use report::{
    EmployeeError, EmployeePayslip, EmployeeTotals, LiquidationReport, RunMode,
};
