//! Jornada (work session) model and related enums.
//!
//! A jornada is the reconciled record of one employee on one anchor civil
//! day: either a worked session, an absence-status day, or an empty day.
//! Night-crossing sessions are filed under the exit's civil date and appear
//! exactly once.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named shift classification.
///
/// Closed set replacing the source system's string-valued "turno" codes;
/// exhaustive matching everywhere removes silent typos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Morning shift, nominally 06:00–14:00.
    Morning,
    /// Afternoon shift, nominally 14:00–22:00.
    Afternoon,
    /// Night shift, nominally 22:00–06:00 the next day.
    Night,
    /// Outside the collective agreement: no fixed window, no overtime checks.
    Flexible,
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Morning => write!(f, "Morning"),
            ShiftKind::Afternoon => write!(f, "Afternoon"),
            ShiftKind::Night => write!(f, "Night"),
            ShiftKind::Flexible => write!(f, "Flexible"),
        }
    }
}

/// The kind of recorded absence covering a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    /// Annual leave.
    Vacation,
    /// Certified illness.
    Sick,
    /// Workplace accident leave.
    Accident,
    /// Other excused leave (study, family, union duty).
    Leave,
    /// Unexcused absence.
    Unexcused,
}

/// The kind of punch inconsistency detected on a jornada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InconsistencyKind {
    /// An entry was recorded but no matching exit, on a past day.
    MissingExit,
    /// An exit was recorded but no matching entry.
    MissingEntry,
    /// A past workday with an assigned shift had no punches and no absence.
    NoPunches,
}

/// How a jornada came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JornadaOrigin {
    /// Generated from clock events by the reconciler.
    Clock,
    /// Entered or fully edited by an operator.
    Manual,
    /// Reconciled from clock events, then partially edited.
    Mixed,
}

/// The mutually exclusive state of a jornada.
///
/// Exactly one of these holds for any valid jornada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    /// An absence status covers the day; no hours are worked.
    StatusDay,
    /// A worked session with at least one resolved endpoint.
    WorkedDay,
    /// No punches, no status: nothing happened.
    EmptyDay,
}

/// One reconciled work session (or absence/empty day) for one employee on
/// one anchor civil date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jornada {
    /// The employee the jornada belongs to.
    pub employee_id: String,
    /// The anchor civil date: for night-crossing sessions, the exit date.
    pub date: NaiveDate,
    /// The shift planning assigned for this day, if any.
    pub assigned_shift: Option<ShiftKind>,
    /// Actual clock-in instant; absent means unresolved.
    pub actual_entry: Option<NaiveDateTime>,
    /// Actual clock-out instant; absent means unresolved.
    pub actual_exit: Option<NaiveDateTime>,
    /// Total worked hours; absent when neither endpoint resolved.
    pub worked_hours: Option<Decimal>,
    /// Hours worked outside the night window.
    pub day_hours: Decimal,
    /// Hours worked inside the night window (22:00–06:00).
    pub night_hours: Decimal,
    /// Overtime hours at 50% surcharge, confirmed by an operator.
    pub overtime_50: Decimal,
    /// Overtime hours at 100% surcharge, confirmed by an operator.
    pub overtime_100: Decimal,
    /// Hours worked on a holiday date.
    pub holiday_hours: Decimal,
    /// How the jornada was produced.
    pub origin: JornadaOrigin,
    /// Absence status covering the day; mutually exclusive with worked hours.
    pub employee_status: Option<AbsenceKind>,
    /// Whether the reconciler flagged a punch inconsistency.
    pub has_inconsistency: bool,
    /// What kind of inconsistency was flagged, if any.
    pub inconsistency_kind: Option<InconsistencyKind>,
    /// Whether an operator resolved the flagged inconsistency.
    pub inconsistency_resolved: bool,
    /// Who resolved the inconsistency.
    pub resolved_by: Option<String>,
    /// Worked hours exceeded the baseline by more than the advisory margin
    /// with no operator-recorded overtime. Advisory only; never generates
    /// overtime line items by itself.
    pub suspected_overtime: bool,
    /// Advisory estimate of hours worked past the day's baseline, for
    /// operator review. Confirmed overtime lives in `overtime_50` and
    /// `overtime_100` only.
    #[serde(default)]
    pub informational_overtime: Decimal,
    /// Free-form operator notes.
    pub notes: Option<String>,
}

impl Jornada {
    /// Creates an empty jornada for the given employee and anchor date.
    pub fn empty(employee_id: &str, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date,
            assigned_shift: None,
            actual_entry: None,
            actual_exit: None,
            worked_hours: None,
            day_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
            overtime_50: Decimal::ZERO,
            overtime_100: Decimal::ZERO,
            holiday_hours: Decimal::ZERO,
            origin: JornadaOrigin::Clock,
            employee_status: None,
            has_inconsistency: false,
            inconsistency_kind: None,
            inconsistency_resolved: false,
            resolved_by: None,
            suspected_overtime: false,
            informational_overtime: Decimal::ZERO,
            notes: None,
        }
    }

    /// Creates a status day carrying the given absence kind and zero hours.
    pub fn for_status(employee_id: &str, date: NaiveDate, status: AbsenceKind) -> Self {
        let mut jornada = Self::empty(employee_id, date);
        jornada.employee_status = Some(status);
        jornada
    }

    /// Returns which of the three mutually exclusive day states holds.
    ///
    /// # Example
    ///
    /// ```
    /// use jornada_engine::models::{AbsenceKind, DayState, Jornada};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    /// let sick = Jornada::for_status("emp_001", date, AbsenceKind::Sick);
    /// assert_eq!(sick.day_state(), DayState::StatusDay);
    ///
    /// let empty = Jornada::empty("emp_001", date);
    /// assert_eq!(empty.day_state(), DayState::EmptyDay);
    /// ```
    pub fn day_state(&self) -> DayState {
        if self.employee_status.is_some() {
            DayState::StatusDay
        } else if self.actual_entry.is_some() || self.actual_exit.is_some() {
            DayState::WorkedDay
        } else {
            DayState::EmptyDay
        }
    }

    /// Validates the status/worked-hours invariant.
    ///
    /// A jornada carrying an absence status must have zero worked hours and
    /// no shift fields. Enforced at the upsert write boundary so a corrupt
    /// record never reaches downstream aggregation.
    pub fn validate(&self) -> Result<(), String> {
        if self.employee_status.is_some() {
            if self.worked_hours.unwrap_or(Decimal::ZERO) != Decimal::ZERO {
                return Err("absence status with nonzero worked hours".to_string());
            }
            if self.actual_entry.is_some() || self.actual_exit.is_some() {
                return Err("absence status with punch timestamps".to_string());
            }
            if self.assigned_shift.is_some() {
                return Err("absence status with a shift classification".to_string());
            }
        }
        if let Some(worked) = self.worked_hours {
            if worked < Decimal::ZERO {
                return Err(format!("negative worked hours: {worked}"));
            }
        }
        Ok(())
    }

    /// True when the session's entry hour is later than its exit hour,
    /// meaning it crossed midnight.
    pub fn is_night_shaped(&self) -> bool {
        match (self.actual_entry, self.actual_exit) {
            (Some(entry), Some(exit)) => entry.time() > exit.time(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_jornada_is_empty_day() {
        let jornada = Jornada::empty("emp_001", make_date("2026-03-10"));
        assert_eq!(jornada.day_state(), DayState::EmptyDay);
        assert!(jornada.validate().is_ok());
    }

    #[test]
    fn test_status_jornada_is_status_day() {
        let jornada =
            Jornada::for_status("emp_001", make_date("2026-03-10"), AbsenceKind::Vacation);
        assert_eq!(jornada.day_state(), DayState::StatusDay);
        assert!(jornada.validate().is_ok());
    }

    #[test]
    fn test_worked_jornada_is_worked_day() {
        let mut jornada = Jornada::empty("emp_001", make_date("2026-03-10"));
        jornada.actual_entry = Some(make_datetime("2026-03-10", "06:02:00"));
        jornada.actual_exit = Some(make_datetime("2026-03-10", "14:05:00"));
        jornada.worked_hours = Some(dec("8.05"));
        assert_eq!(jornada.day_state(), DayState::WorkedDay);
        assert!(jornada.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_status_with_worked_hours() {
        let mut jornada =
            Jornada::for_status("emp_001", make_date("2026-03-10"), AbsenceKind::Sick);
        jornada.worked_hours = Some(dec("4.0"));
        let err = jornada.validate().unwrap_err();
        assert!(err.contains("nonzero worked hours"));
    }

    #[test]
    fn test_validate_rejects_status_with_punches() {
        let mut jornada =
            Jornada::for_status("emp_001", make_date("2026-03-10"), AbsenceKind::Sick);
        jornada.actual_entry = Some(make_datetime("2026-03-10", "06:02:00"));
        assert!(jornada.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_worked_hours() {
        let mut jornada = Jornada::empty("emp_001", make_date("2026-03-10"));
        jornada.worked_hours = Some(dec("-1.0"));
        assert!(jornada.validate().is_err());
    }

    #[test]
    fn test_night_shaped_pair_detected() {
        let mut jornada = Jornada::empty("emp_001", make_date("2026-03-11"));
        jornada.actual_entry = Some(make_datetime("2026-03-10", "22:00:00"));
        jornada.actual_exit = Some(make_datetime("2026-03-11", "06:00:00"));
        assert!(jornada.is_night_shaped());
    }

    #[test]
    fn test_day_session_is_not_night_shaped() {
        let mut jornada = Jornada::empty("emp_001", make_date("2026-03-10"));
        jornada.actual_entry = Some(make_datetime("2026-03-10", "06:00:00"));
        jornada.actual_exit = Some(make_datetime("2026-03-10", "14:00:00"));
        assert!(!jornada.is_night_shaped());
    }

    #[test]
    fn test_open_session_is_not_night_shaped() {
        let mut jornada = Jornada::empty("emp_001", make_date("2026-03-10"));
        jornada.actual_entry = Some(make_datetime("2026-03-10", "22:00:00"));
        assert!(!jornada.is_night_shaped());
    }

    #[test]
    fn test_shift_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ShiftKind::Morning).unwrap(),
            "\"morning\""
        );
        assert_eq!(
            serde_json::to_string(&ShiftKind::Flexible).unwrap(),
            "\"flexible\""
        );
        let kind: ShiftKind = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(kind, ShiftKind::Night);
    }

    #[test]
    fn test_absence_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&AbsenceKind::Unexcused).unwrap(),
            "\"unexcused\""
        );
        let kind: AbsenceKind = serde_json::from_str("\"accident\"").unwrap();
        assert_eq!(kind, AbsenceKind::Accident);
    }

    #[test]
    fn test_jornada_serialization_round_trip() {
        let mut jornada = Jornada::empty("emp_001", make_date("2026-03-11"));
        jornada.actual_entry = Some(make_datetime("2026-03-10", "21:45:00"));
        jornada.actual_exit = Some(make_datetime("2026-03-11", "05:50:00"));
        jornada.assigned_shift = Some(ShiftKind::Night);
        jornada.worked_hours = Some(dec("8.08"));
        jornada.night_hours = dec("7.83");
        jornada.day_hours = dec("0.25");

        let json = serde_json::to_string(&jornada).unwrap();
        assert!(json.contains("\"assigned_shift\":\"night\""));
        let deserialized: Jornada = serde_json::from_str(&json).unwrap();
        assert_eq!(jornada, deserialized);
    }
}
