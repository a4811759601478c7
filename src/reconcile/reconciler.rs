//! Day-level session reconciliation: punches in, jornadas out.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::ScheduleConfig;
use crate::models::{AbsenceKind, ClockEvent, Employee, Jornada, JornadaOrigin, ShiftKind};

use super::classify::{baseline_hours, classify_shift};
use super::inconsistency::{detect_inconsistency, suspect_overtime};
use super::pairing::{pair_session, session_hours, EventWindow, PairingKind, SessionPairing};
use super::split::split_day_night;

/// Per-day planning data the reconciler consults while walking a range.
///
/// Implemented by whatever holds shift assignments, the absence calendar,
/// and the holiday calendar.
pub trait DayPlanner {
    /// The shift planned for the employee on the given date, if any.
    fn planned_shift(&self, employee_id: &str, date: NaiveDate) -> Option<ShiftKind>;
    /// The absence status covering the employee on the given date, if any.
    fn absence(&self, employee_id: &str, date: NaiveDate) -> Option<AbsenceKind>;
    /// Whether the date is a paid holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Everything the reconciler needs to know about one anchor day beyond
/// the raw punches.
#[derive(Debug, Clone, Copy)]
pub struct DayContext {
    /// The anchor civil date being reconciled.
    pub anchor: NaiveDate,
    /// The current date; days at or after it never raise inconsistencies.
    pub today: NaiveDate,
    /// Externally planned shift for the anchor day, if any.
    pub planned_shift: Option<ShiftKind>,
    /// Absence status covering the anchor day, if any.
    pub absence: Option<AbsenceKind>,
    /// Whether the anchor day is a paid holiday.
    pub is_holiday: bool,
    /// Whether the day after the anchor is a paid holiday. Needed when a
    /// night session spills onto the next day.
    pub next_is_holiday: bool,
    /// Whether an operator already recorded overtime for this day.
    pub manual_overtime_recorded: bool,
}

/// The result of reconciling one anchor day.
///
/// A night session entering on the anchor day surfaces on the exit's
/// civil date, so the completed jornada comes back as `spillover` keyed
/// to the day after rather than as `target`. Writing both through a
/// keyed upsert keeps regeneration idempotent: walking the next day
/// recomputes the same jornada for the same key.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The jornada for the anchor day itself, if one exists.
    pub target: Option<Jornada>,
    /// A completed night session keyed to the day after the anchor.
    pub spillover: Option<Jornada>,
}

/// Reconciles raw punch events into per-day jornadas.
#[derive(Debug, Clone)]
pub struct Reconciler {
    schedule: ScheduleConfig,
}

impl Reconciler {
    /// Creates a reconciler over the given schedule parameters.
    pub fn new(schedule: ScheduleConfig) -> Self {
        Self { schedule }
    }

    /// Reconciles one anchor day from the employee's punch events.
    ///
    /// `events` must cover at least the 3-day window around the anchor;
    /// events outside it are ignored. Never errors: missing data yields a
    /// jornada with nulls and, where applicable, an inconsistency flag.
    pub fn reconcile_day(
        &self,
        employee: &Employee,
        events: &[ClockEvent],
        ctx: &DayContext,
    ) -> ReconcileOutcome {
        // Absence precedence: a recorded status overrides all punch
        // processing for the anchor day, stray punches included.
        if let Some(status) = ctx.absence {
            debug!(
                employee_id = %employee.id,
                date = %ctx.anchor,
                ?status,
                "Absence status overrides punches"
            );
            return ReconcileOutcome {
                target: Some(Jornada::for_status(&employee.id, ctx.anchor, status)),
                spillover: None,
            };
        }

        let window = EventWindow::collect(events, ctx.anchor);
        let pairing = pair_session(&window);
        debug!(
            employee_id = %employee.id,
            date = %ctx.anchor,
            kind = ?pairing.kind,
            "Paired session"
        );

        match pairing.kind {
            PairingKind::NightIntoTomorrow => {
                // The session anchors on the exit day; key it to tomorrow
                // and leave the anchor day without a jornada.
                let next = ctx
                    .anchor
                    .succ_opt()
                    .unwrap_or(ctx.anchor);
                let spillover = self.build_worked(
                    employee,
                    next,
                    &pairing,
                    None,
                    ctx.next_is_holiday,
                    ctx.today,
                    false,
                );
                ReconcileOutcome {
                    target: None,
                    spillover: Some(spillover),
                }
            }
            PairingKind::Empty => {
                let inconsistency = detect_inconsistency(
                    ctx.anchor,
                    ctx.today,
                    false,
                    false,
                    ctx.planned_shift,
                    false,
                );
                let target = inconsistency.map(|kind| {
                    let mut jornada = Jornada::empty(&employee.id, ctx.anchor);
                    jornada.has_inconsistency = true;
                    jornada.inconsistency_kind = Some(kind);
                    jornada
                });
                ReconcileOutcome {
                    target,
                    spillover: None,
                }
            }
            PairingKind::NightEndedToday | PairingKind::OpenNight | PairingKind::SameDay => {
                let target = self.build_worked(
                    employee,
                    ctx.anchor,
                    &pairing,
                    ctx.planned_shift,
                    ctx.is_holiday,
                    ctx.today,
                    ctx.manual_overtime_recorded,
                );
                ReconcileOutcome {
                    target: Some(target),
                    spillover: None,
                }
            }
        }
    }

    /// Walks a date range, reconciling each day and merging spillovers.
    ///
    /// Regeneration is destructive for clock-origin jornadas but preserves
    /// manually edited ones: a manual jornada in `existing` is carried
    /// through untouched and never overwritten by a recomputed session.
    /// The returned list may include one date past `to` when the last day
    /// holds a night session crossing into the next morning.
    pub fn reconcile_range(
        &self,
        employee: &Employee,
        from: NaiveDate,
        to: NaiveDate,
        today: NaiveDate,
        events: &[ClockEvent],
        planner: &dyn DayPlanner,
        existing: &BTreeMap<NaiveDate, Jornada>,
    ) -> Vec<Jornada> {
        let mut results: BTreeMap<NaiveDate, Jornada> = BTreeMap::new();

        let mut day = from;
        while day <= to {
            if let Some(kept) = existing.get(&day).filter(|j| j.origin == JornadaOrigin::Manual) {
                results.insert(day, kept.clone());
                day = next_day(day);
                continue;
            }

            let manual_overtime = existing
                .get(&day)
                .map(|j| !j.overtime_50.is_zero() || !j.overtime_100.is_zero())
                .unwrap_or(false);
            let next = next_day(day);
            let ctx = DayContext {
                anchor: day,
                today,
                planned_shift: planner.planned_shift(&employee.id, day),
                absence: planner.absence(&employee.id, day),
                is_holiday: planner.is_holiday(day),
                next_is_holiday: planner.is_holiday(next),
                manual_overtime_recorded: manual_overtime,
            };

            let outcome = self.reconcile_day(employee, events, &ctx);
            if let Some(target) = outcome.target {
                results.insert(day, target);
            }
            if let Some(spillover) = outcome.spillover {
                let manual_next = existing
                    .get(&spillover.date)
                    .is_some_and(|j| j.origin == JornadaOrigin::Manual);
                if !manual_next {
                    results.insert(spillover.date, spillover);
                }
            }

            day = next;
        }

        results.into_values().collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn build_worked(
        &self,
        employee: &Employee,
        anchor: NaiveDate,
        pairing: &SessionPairing,
        planned_shift: Option<ShiftKind>,
        is_holiday: bool,
        today: NaiveDate,
        manual_overtime_recorded: bool,
    ) -> Jornada {
        let mut jornada = Jornada::empty(&employee.id, anchor);
        jornada.actual_entry = pairing.entry;
        jornada.actual_exit = pairing.exit;
        jornada.assigned_shift = classify_shift(pairing.entry, planned_shift, employee.bargaining);

        if let (Some(entry), Some(exit)) = (pairing.entry, pairing.exit) {
            // A pair whose exit timestamp precedes the entry crossed
            // midnight with both punches filed under one civil day.
            // Reattach the exit to the next morning so the day/night
            // split covers the same interval the worked hours price.
            let exit = if exit < entry {
                exit + Duration::days(1)
            } else {
                exit
            };
            let worked = session_hours(entry, exit);
            jornada.worked_hours = Some(worked);

            if is_holiday {
                jornada.holiday_hours = worked;
            } else {
                let split = split_day_night(entry, exit, &self.schedule.night_window);
                jornada.day_hours = split.day_hours;
                jornada.night_hours = split.night_hours;
            }

            let baseline = baseline_hours(anchor, employee.bargaining, &self.schedule);
            jornada.suspected_overtime = suspect_overtime(
                worked,
                baseline,
                self.schedule.suspect_overtime_margin,
                manual_overtime_recorded,
            );
            jornada.informational_overtime = informational_overtime(worked, baseline);
        }

        if let Some(kind) = detect_inconsistency(
            anchor,
            today,
            pairing.entry.is_some(),
            pairing.exit.is_some(),
            jornada.assigned_shift,
            false,
        ) {
            jornada.has_inconsistency = true;
            jornada.inconsistency_kind = Some(kind);
        }

        jornada
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// Informational overtime estimate for a reconciled day.
///
/// Advisory figure surfaced on the jornada alongside the
/// suspected-overtime flag; never turned into confirmed overtime hours.
/// Zero when the baseline is zero, since a flexible schedule has no
/// expected duration to exceed.
pub fn informational_overtime(worked: Decimal, baseline: Decimal) -> Decimal {
    if baseline.is_zero() {
        return Decimal::ZERO;
    }
    (worked - baseline).max(Decimal::ZERO)
}
