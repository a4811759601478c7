//! Inconsistency and suspected-overtime detection for a reconciled day.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::{InconsistencyKind, ShiftKind};

/// Detects a punch inconsistency for one anchor day.
///
/// Missing-exit and missing-entry fire when a session has only one
/// endpoint and the day is already in the past. A past workday with an
/// assigned shift, no punches at all, and no recorded absence raises
/// `NoPunches`. Future days and Sundays never raise anything, and an
/// absence status suppresses detection entirely (the caller handles
/// absence precedence before reaching here).
pub fn detect_inconsistency(
    date: NaiveDate,
    today: NaiveDate,
    has_entry: bool,
    has_exit: bool,
    planned_shift: Option<ShiftKind>,
    has_absence: bool,
) -> Option<InconsistencyKind> {
    if date >= today || date.weekday() == Weekday::Sun || has_absence {
        return None;
    }

    match (has_entry, has_exit) {
        (true, false) => Some(InconsistencyKind::MissingExit),
        (false, true) => Some(InconsistencyKind::MissingEntry),
        (false, false) => {
            if planned_shift.is_some_and(|s| s != ShiftKind::Flexible) {
                Some(InconsistencyKind::NoPunches)
            } else {
                None
            }
        }
        (true, true) => None,
    }
}

/// Flags suspected unrecorded overtime.
///
/// Fires when worked hours exceed the baseline by more than the
/// configured margin and no overtime was recorded manually. Advisory
/// only: the reconciler never turns this into overtime hours, because a
/// long shift and true overtime are indistinguishable without operator
/// confirmation.
pub fn suspect_overtime(
    worked_hours: Decimal,
    baseline: Decimal,
    margin: Decimal,
    manual_overtime_recorded: bool,
) -> bool {
    if manual_overtime_recorded || baseline.is_zero() {
        return false;
    }
    worked_hours > baseline + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_missing_exit_on_past_day() {
        let kind = detect_inconsistency(
            date("2026-03-10"),
            date("2026-03-12"),
            true,
            false,
            Some(ShiftKind::Morning),
            false,
        );
        assert_eq!(kind, Some(InconsistencyKind::MissingExit));
    }

    #[test]
    fn test_missing_entry_on_past_day() {
        let kind = detect_inconsistency(
            date("2026-03-10"),
            date("2026-03-12"),
            false,
            true,
            None,
            false,
        );
        assert_eq!(kind, Some(InconsistencyKind::MissingEntry));
    }

    #[test]
    fn test_no_punches_requires_assigned_shift() {
        let with_shift = detect_inconsistency(
            date("2026-03-10"),
            date("2026-03-12"),
            false,
            false,
            Some(ShiftKind::Morning),
            false,
        );
        assert_eq!(with_shift, Some(InconsistencyKind::NoPunches));

        let without_shift = detect_inconsistency(
            date("2026-03-10"),
            date("2026-03-12"),
            false,
            false,
            None,
            false,
        );
        assert_eq!(without_shift, None);
    }

    #[test]
    fn test_flexible_shift_never_raises_no_punches() {
        let kind = detect_inconsistency(
            date("2026-03-10"),
            date("2026-03-12"),
            false,
            false,
            Some(ShiftKind::Flexible),
            false,
        );
        assert_eq!(kind, None);
    }

    #[test]
    fn test_future_day_never_raises() {
        let kind = detect_inconsistency(
            date("2026-03-12"),
            date("2026-03-10"),
            true,
            false,
            Some(ShiftKind::Morning),
            false,
        );
        assert_eq!(kind, None);
    }

    #[test]
    fn test_today_never_raises() {
        // The day is still in progress; an open entry is normal.
        let kind = detect_inconsistency(
            date("2026-03-10"),
            date("2026-03-10"),
            true,
            false,
            Some(ShiftKind::Morning),
            false,
        );
        assert_eq!(kind, None);
    }

    #[test]
    fn test_sunday_never_raises() {
        // 2026-03-15 is a Sunday.
        let kind = detect_inconsistency(
            date("2026-03-15"),
            date("2026-03-17"),
            false,
            false,
            Some(ShiftKind::Morning),
            false,
        );
        assert_eq!(kind, None);
    }

    #[test]
    fn test_absence_suppresses_detection() {
        let kind = detect_inconsistency(
            date("2026-03-10"),
            date("2026-03-12"),
            false,
            false,
            Some(ShiftKind::Morning),
            true,
        );
        assert_eq!(kind, None);
    }

    #[test]
    fn test_suspect_overtime_past_margin() {
        assert!(suspect_overtime(dec("8.8"), dec("8"), dec("0.75"), false));
        assert!(!suspect_overtime(dec("8.7"), dec("8"), dec("0.75"), false));
        assert!(!suspect_overtime(dec("8.75"), dec("8"), dec("0.75"), false));
    }

    #[test]
    fn test_manual_overtime_clears_suspicion() {
        assert!(!suspect_overtime(dec("10"), dec("8"), dec("0.75"), true));
    }

    #[test]
    fn test_flexible_baseline_never_suspect() {
        assert!(!suspect_overtime(dec("12"), Decimal::ZERO, dec("0.75"), false));
    }
}
