//! Request types for the attendance and liquidation API.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AbsenceKind, BargainingStatus, ClockEvent, Employee, EmployeeClass, Jornada, PunchDirection,
    RunMode, ShiftKind,
};
use crate::reconcile::DayPlanner;

/// Employee information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Payroll class.
    pub class: EmployeeClass,
    /// Collective-agreement coverage.
    pub bargaining: BargainingStatus,
    /// Hourly rate for rate-based concepts.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Monthly base salary for salaried staff.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Hire date, for seniority.
    pub hire_date: NaiveDate,
}

impl From<EmployeeRequest> for Employee {
    fn from(request: EmployeeRequest) -> Self {
        Employee {
            id: request.id,
            name: request.name,
            class: request.class,
            bargaining: request.bargaining,
            hourly_rate: request.hourly_rate,
            base_salary: request.base_salary,
            hire_date: request.hire_date,
        }
    }
}

/// One punch event in a reconcile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockEventRequest {
    /// When the punch happened, plant-local time.
    pub timestamp: NaiveDateTime,
    /// Entry or exit.
    pub direction: PunchDirection,
    /// The device that recorded the punch.
    #[serde(default = "default_device")]
    pub device_id: String,
}

fn default_device() -> String {
    "unknown".to_string()
}

/// A planned shift assignment for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAssignmentRequest {
    /// The date the plan covers.
    pub date: NaiveDate,
    /// The planned shift.
    pub shift: ShiftKind,
}

/// A recorded absence for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbsenceRequest {
    /// The date the absence covers.
    pub date: NaiveDate,
    /// The kind of absence.
    pub kind: AbsenceKind,
}

/// Request body for the `/reconcile` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// The employee whose punches are reconciled.
    pub employee: EmployeeRequest,
    /// First anchor date, inclusive.
    pub date_from: NaiveDate,
    /// Last anchor date, inclusive.
    pub date_to: NaiveDate,
    /// The reference "today" for inconsistency detection. Defaults to the
    /// server's current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Punch events covering the padded window.
    pub events: Vec<ClockEventRequest>,
    /// Planned shifts, if any.
    #[serde(default)]
    pub assigned_shifts: Vec<ShiftAssignmentRequest>,
    /// Recorded absences, if any.
    #[serde(default)]
    pub absences: Vec<AbsenceRequest>,
    /// Paid holidays in or around the range.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl ReconcileRequest {
    /// The request's punch events as domain clock events.
    pub fn clock_events(&self) -> Vec<ClockEvent> {
        self.events
            .iter()
            .map(|e| ClockEvent {
                employee_id: self.employee.id.clone(),
                timestamp: e.timestamp,
                direction: e.direction,
                device_id: e.device_id.clone(),
            })
            .collect()
    }
}

/// [`DayPlanner`] view over a reconcile request's planning data.
pub struct RequestPlanner<'a> {
    request: &'a ReconcileRequest,
}

impl<'a> RequestPlanner<'a> {
    /// Wraps a request.
    pub fn new(request: &'a ReconcileRequest) -> Self {
        Self { request }
    }
}

impl DayPlanner for RequestPlanner<'_> {
    fn planned_shift(&self, _employee_id: &str, date: NaiveDate) -> Option<ShiftKind> {
        self.request
            .assigned_shifts
            .iter()
            .find(|a| a.date == date)
            .map(|a| a.shift)
    }

    fn absence(&self, _employee_id: &str, date: NaiveDate) -> Option<AbsenceKind> {
        self.request
            .absences
            .iter()
            .find(|a| a.date == date)
            .map(|a| a.kind)
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.request.holidays.contains(&date)
    }
}

/// The period requested for a liquidation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// 1 or 2 for a fortnightly (hourly-class) run; absent for a monthly
    /// (salaried-class) run.
    #[serde(default)]
    pub fortnight: Option<u8>,
    /// Paid holidays inside the period.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

/// Request body for the `/liquidate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidateRequest {
    /// The period to liquidate.
    pub period: PeriodRequest,
    /// The employee roster.
    pub roster: Vec<EmployeeRequest>,
    /// Reconciled jornadas by employee id.
    #[serde(default)]
    pub jornadas: HashMap<String, Vec<Jornada>>,
    /// Simulate or Execute.
    pub mode: RunMode,
}
