//! Shift classification and baseline hour rules.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use rust_decimal::Decimal;

use crate::config::ScheduleConfig;
use crate::models::{BargainingStatus, ShiftKind};

/// Classifies the shift a session belongs to.
///
/// A planned shift (from a roster assignment) always wins. Otherwise the
/// entry hour decides: 20:00–02:59 is Night, 04:00–09:59 is Morning,
/// 12:00–17:59 is Afternoon, and anything else stays unclassified. On
/// Saturdays only the morning variant runs, so any pre-noon entry is
/// Morning. Employees outside the bargaining agreement keep flexible
/// schedules and are never classified into a fixed shift.
pub fn classify_shift(
    entry: Option<NaiveDateTime>,
    planned: Option<ShiftKind>,
    bargaining: BargainingStatus,
) -> Option<ShiftKind> {
    if bargaining == BargainingStatus::Excluded {
        return Some(ShiftKind::Flexible);
    }
    if let Some(shift) = planned {
        return Some(shift);
    }

    let entry = entry?;
    let hour = entry.time().hour();

    if entry.date().weekday() == Weekday::Sat {
        return if hour < 12 {
            Some(ShiftKind::Morning)
        } else {
            None
        };
    }

    match hour {
        20..=23 | 0..=2 => Some(ShiftKind::Night),
        4..=9 => Some(ShiftKind::Morning),
        12..=17 => Some(ShiftKind::Afternoon),
        _ => None,
    }
}

/// Expected hours for a worked day.
///
/// Saturdays run the shorter morning-only shift. Flexible employees have
/// no fixed expectation, so overtime detection does not apply to them.
pub fn baseline_hours(
    date: NaiveDate,
    bargaining: BargainingStatus,
    schedule: &ScheduleConfig,
) -> Decimal {
    if bargaining == BargainingStatus::Excluded {
        return Decimal::ZERO;
    }
    if date.weekday() == Weekday::Sat {
        schedule.saturday_baseline_hours
    } else {
        schedule.weekday_baseline_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dt(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn schedule() -> ScheduleConfig {
        ScheduleConfig {
            weekday_baseline_hours: Decimal::from_str("8").unwrap(),
            saturday_baseline_hours: Decimal::from_str("7").unwrap(),
            night_window: crate::config::NightWindow {
                start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            },
            suspect_overtime_margin: Decimal::from_str("0.75").unwrap(),
        }
    }

    #[test]
    fn test_morning_entry_classifies_morning() {
        let shift = classify_shift(
            Some(dt("2026-03-10", "06:02:00")),
            None,
            BargainingStatus::Covered,
        );
        assert_eq!(shift, Some(ShiftKind::Morning));
    }

    #[test]
    fn test_late_evening_entry_classifies_night() {
        let shift = classify_shift(
            Some(dt("2026-03-10", "21:45:00")),
            None,
            BargainingStatus::Covered,
        );
        assert_eq!(shift, Some(ShiftKind::Night));
    }

    #[test]
    fn test_after_midnight_entry_still_night() {
        let shift = classify_shift(
            Some(dt("2026-03-11", "01:30:00")),
            None,
            BargainingStatus::Covered,
        );
        assert_eq!(shift, Some(ShiftKind::Night));
    }

    #[test]
    fn test_noon_entry_classifies_afternoon() {
        let shift = classify_shift(
            Some(dt("2026-03-10", "13:58:00")),
            None,
            BargainingStatus::Covered,
        );
        assert_eq!(shift, Some(ShiftKind::Afternoon));
    }

    #[test]
    fn test_ambiguous_entry_hour_is_unclassified() {
        // 10:30 falls between the morning and afternoon bands.
        let shift = classify_shift(
            Some(dt("2026-03-10", "10:30:00")),
            None,
            BargainingStatus::Covered,
        );
        assert_eq!(shift, None);
    }

    #[test]
    fn test_planned_shift_wins_over_entry_hour() {
        let shift = classify_shift(
            Some(dt("2026-03-10", "06:02:00")),
            Some(ShiftKind::Afternoon),
            BargainingStatus::Covered,
        );
        assert_eq!(shift, Some(ShiftKind::Afternoon));
    }

    #[test]
    fn test_excluded_employee_is_always_flexible() {
        let shift = classify_shift(
            Some(dt("2026-03-10", "06:02:00")),
            Some(ShiftKind::Morning),
            BargainingStatus::Excluded,
        );
        assert_eq!(shift, Some(ShiftKind::Flexible));
    }

    #[test]
    fn test_saturday_morning_only_rule() {
        // 2026-03-14 is a Saturday.
        let shift = classify_shift(
            Some(dt("2026-03-14", "06:05:00")),
            None,
            BargainingStatus::Covered,
        );
        assert_eq!(shift, Some(ShiftKind::Morning));

        let late = classify_shift(
            Some(dt("2026-03-14", "14:00:00")),
            None,
            BargainingStatus::Covered,
        );
        assert_eq!(late, None);
    }

    #[test]
    fn test_baseline_hours_by_day_and_bargaining() {
        let sched = schedule();
        let saturday = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert_eq!(
            baseline_hours(tuesday, BargainingStatus::Covered, &sched),
            Decimal::from_str("8").unwrap()
        );
        assert_eq!(
            baseline_hours(saturday, BargainingStatus::Covered, &sched),
            Decimal::from_str("7").unwrap()
        );
        assert_eq!(
            baseline_hours(tuesday, BargainingStatus::Excluded, &sched),
            Decimal::ZERO
        );
    }
}
