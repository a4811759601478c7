//! Storage seams for the engine's external collaborators.
//!
//! The core is a computation library; clock events, shift plans, absence
//! records, jornadas, and finished reports live behind these traits. The
//! in-memory implementation backs tests and the API server.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceKind, ClockEvent, Jornada, LiquidationReport, ShiftKind};
use crate::reconcile::DayPlanner;

/// Read access to the clock-event feed.
///
/// Callers resolving night shifts pad the requested window one day each
/// side of the target range.
pub trait ClockEventStore {
    /// Events for one employee within the date range, ordered by time.
    fn get_events(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<ClockEvent>>;
}

/// Read access to the shift planning table.
pub trait ShiftCatalog {
    /// The shift planned for the employee on the date, if any.
    fn get_assigned_shift(&self, employee_id: &str, date: NaiveDate) -> Option<ShiftKind>;
}

/// Read access to recorded absences.
pub trait AbsenceCalendar {
    /// The absence covering the employee on the date, if any.
    fn get_absence(&self, employee_id: &str, date: NaiveDate) -> Option<AbsenceKind>;
    /// Whether the date is a paid holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Persistence of reconciled jornadas, keyed by (employee_id, date).
pub trait JornadaStore {
    /// Idempotent keyed upsert. Validates the status/worked-hours
    /// invariant and rejects violating records.
    fn upsert_jornada(&self, jornada: Jornada) -> EngineResult<()>;
    /// One employee's jornada for a date, if stored.
    fn get_jornada(&self, employee_id: &str, date: NaiveDate) -> Option<Jornada>;
    /// One employee's jornadas within a date range, in date order.
    fn jornadas_between(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Vec<Jornada>;
}

/// Destination for Execute-mode liquidation reports.
pub trait ReportSink {
    /// Persists a whole report, all-or-nothing.
    fn persist_report(&self, report: &LiquidationReport) -> EngineResult<()>;
}

type EmployeeDateKey = (String, NaiveDate);

#[derive(Debug, Default)]
struct MemoryStoreInner {
    events: Vec<ClockEvent>,
    shifts: BTreeMap<EmployeeDateKey, ShiftKind>,
    absences: BTreeMap<EmployeeDateKey, AbsenceKind>,
    holidays: Vec<NaiveDate>,
    jornadas: BTreeMap<EmployeeDateKey, Jornada>,
    reports: Vec<LiquidationReport>,
}

/// In-memory implementation of every storage seam.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStoreInner> {
        // A poisoned lock still holds usable data.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds a clock event to the feed.
    pub fn add_event(&self, event: ClockEvent) {
        self.lock().events.push(event);
    }

    /// Plans a shift for an employee on a date.
    pub fn assign_shift(&self, employee_id: &str, date: NaiveDate, shift: ShiftKind) {
        self.lock()
            .shifts
            .insert((employee_id.to_string(), date), shift);
    }

    /// Records an absence for an employee on a date.
    pub fn record_absence(&self, employee_id: &str, date: NaiveDate, kind: AbsenceKind) {
        self.lock()
            .absences
            .insert((employee_id.to_string(), date), kind);
    }

    /// Marks a date as a paid holiday.
    pub fn add_holiday(&self, date: NaiveDate) {
        self.lock().holidays.push(date);
    }

    /// Reports persisted so far, in insertion order.
    pub fn persisted_reports(&self) -> Vec<LiquidationReport> {
        self.lock().reports.clone()
    }
}

impl ClockEventStore for MemoryStore {
    fn get_events(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> EngineResult<Vec<ClockEvent>> {
        let inner = self.lock();
        let mut events: Vec<ClockEvent> = inner
            .events
            .iter()
            .filter(|e| {
                e.employee_id == employee_id
                    && e.timestamp.date() >= date_from
                    && e.timestamp.date() <= date_to
            })
            .cloned()
            .collect();
        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }
}

impl ShiftCatalog for MemoryStore {
    fn get_assigned_shift(&self, employee_id: &str, date: NaiveDate) -> Option<ShiftKind> {
        self.lock()
            .shifts
            .get(&(employee_id.to_string(), date))
            .copied()
    }
}

impl AbsenceCalendar for MemoryStore {
    fn get_absence(&self, employee_id: &str, date: NaiveDate) -> Option<AbsenceKind> {
        self.lock()
            .absences
            .get(&(employee_id.to_string(), date))
            .copied()
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.lock().holidays.contains(&date)
    }
}

impl JornadaStore for MemoryStore {
    fn upsert_jornada(&self, jornada: Jornada) -> EngineResult<()> {
        if let Err(message) = jornada.validate() {
            return Err(EngineError::InvalidJornada {
                employee_id: jornada.employee_id.clone(),
                date: jornada.date,
                message,
            });
        }
        self.lock()
            .jornadas
            .insert((jornada.employee_id.clone(), jornada.date), jornada);
        Ok(())
    }

    fn get_jornada(&self, employee_id: &str, date: NaiveDate) -> Option<Jornada> {
        self.lock()
            .jornadas
            .get(&(employee_id.to_string(), date))
            .cloned()
    }

    fn jornadas_between(
        &self,
        employee_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Vec<Jornada> {
        self.lock()
            .jornadas
            .range((employee_id.to_string(), date_from)..=(employee_id.to_string(), date_to))
            .map(|(_, j)| j.clone())
            .collect()
    }
}

impl ReportSink for MemoryStore {
    fn persist_report(&self, report: &LiquidationReport) -> EngineResult<()> {
        self.lock().reports.push(report.clone());
        Ok(())
    }
}

impl DayPlanner for MemoryStore {
    fn planned_shift(&self, employee_id: &str, date: NaiveDate) -> Option<ShiftKind> {
        self.get_assigned_shift(employee_id, date)
    }

    fn absence(&self, employee_id: &str, date: NaiveDate) -> Option<AbsenceKind> {
        self.get_absence(employee_id, date)
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        AbsenceCalendar::is_holiday(self, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PunchDirection;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dt(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn event(employee_id: &str, ts: NaiveDateTime, direction: PunchDirection) -> ClockEvent {
        ClockEvent {
            employee_id: employee_id.to_string(),
            timestamp: ts,
            direction,
            device_id: "gate_1".to_string(),
        }
    }

    #[test]
    fn test_get_events_filters_and_sorts() {
        let store = MemoryStore::new();
        store.add_event(event(
            "emp_001",
            dt("2026-03-10", "14:00:00"),
            PunchDirection::Exit,
        ));
        store.add_event(event(
            "emp_001",
            dt("2026-03-10", "06:00:00"),
            PunchDirection::Entry,
        ));
        store.add_event(event(
            "emp_002",
            dt("2026-03-10", "06:00:00"),
            PunchDirection::Entry,
        ));
        store.add_event(event(
            "emp_001",
            dt("2026-04-01", "06:00:00"),
            PunchDirection::Entry,
        ));

        let events = store
            .get_events("emp_001", date("2026-03-09"), date("2026-03-11"))
            .unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].timestamp < events[1].timestamp);
    }

    #[test]
    fn test_upsert_is_keyed_and_idempotent() {
        let store = MemoryStore::new();
        let mut jornada = Jornada::empty("emp_001", date("2026-03-10"));
        jornada.day_hours = Decimal::from_str("8").unwrap();
        jornada.worked_hours = Some(Decimal::from_str("8").unwrap());

        store.upsert_jornada(jornada.clone()).unwrap();
        store.upsert_jornada(jornada.clone()).unwrap();

        let stored = store
            .jornadas_between("emp_001", date("2026-03-01"), date("2026-03-31"));
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], jornada);
    }

    #[test]
    fn test_upsert_rejects_invariant_violation() {
        let store = MemoryStore::new();
        let mut bad = Jornada::for_status("emp_001", date("2026-03-10"), AbsenceKind::Sick);
        bad.worked_hours = Some(Decimal::from_str("8").unwrap());

        let err = store.upsert_jornada(bad).unwrap_err();
        assert!(matches!(err, EngineError::InvalidJornada { .. }));
        assert!(store.get_jornada("emp_001", date("2026-03-10")).is_none());
    }

    #[test]
    fn test_jornadas_between_scopes_to_employee() {
        let store = MemoryStore::new();
        store
            .upsert_jornada(Jornada::empty("emp_001", date("2026-03-10")))
            .unwrap();
        store
            .upsert_jornada(Jornada::empty("emp_002", date("2026-03-10")))
            .unwrap();

        let stored = store
            .jornadas_between("emp_001", date("2026-03-01"), date("2026-03-31"));
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].employee_id, "emp_001");
    }

    #[test]
    fn test_day_planner_view() {
        let store = MemoryStore::new();
        store.assign_shift("emp_001", date("2026-03-10"), ShiftKind::Morning);
        store.record_absence("emp_001", date("2026-03-11"), AbsenceKind::Vacation);
        store.add_holiday(date("2026-03-24"));

        let planner: &dyn DayPlanner = &store;
        assert_eq!(
            planner.planned_shift("emp_001", date("2026-03-10")),
            Some(ShiftKind::Morning)
        );
        assert_eq!(
            planner.absence("emp_001", date("2026-03-11")),
            Some(AbsenceKind::Vacation)
        );
        assert!(planner.is_holiday(date("2026-03-24")));
        assert!(!planner.is_holiday(date("2026-03-25")));
    }
}
