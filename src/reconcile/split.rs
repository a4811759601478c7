//! Day/night hour splitting for a resolved session.
//!
//! A session is segmented against the configured night window (nominally
//! 22:00–06:00) so night-differential hours can be paid separately. The
//! segment sum always equals the session's total worked hours.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;

use crate::config::NightWindow;

/// The day and night portions of one session, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayNightSplit {
    /// Hours outside the night window.
    pub day_hours: Decimal,
    /// Hours inside the night window.
    pub night_hours: Decimal,
}

/// Splits a session at the night-window boundaries.
///
/// The night window crosses midnight, so each civil day the session
/// touches contributes one night interval (day 22:00 → day+1 06:00 for
/// the nominal window). Overlap with those intervals is night time; the
/// remainder is day time.
///
/// # Example
///
/// ```
/// use jornada_engine::config::NightWindow;
/// use jornada_engine::reconcile::split_day_night;
/// use chrono::{NaiveDateTime, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let window = NightWindow {
///     start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
/// };
/// let entry = NaiveDateTime::parse_from_str("2026-03-09 21:45:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let exit = NaiveDateTime::parse_from_str("2026-03-10 05:50:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let split = split_day_night(entry, exit, &window);
/// assert_eq!(split.day_hours, Decimal::new(25, 2));  // 21:45–22:00
/// assert_eq!(split.day_hours + split.night_hours, Decimal::new(485, 0) / Decimal::new(60, 0));
/// ```
pub fn split_day_night(
    entry: NaiveDateTime,
    exit: NaiveDateTime,
    window: &NightWindow,
) -> DayNightSplit {
    if exit <= entry {
        return DayNightSplit {
            day_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
        };
    }

    let total_minutes = (exit - entry).num_minutes();
    let mut night_minutes: i64 = 0;

    // One night interval per civil day the session can touch, starting the
    // evening before the entry day.
    let mut day = entry.date() - Duration::days(1);
    let last_day = exit.date();
    while day <= last_day {
        let night_start = day.and_time(window.start);
        let night_end = if window.end <= window.start {
            (day + Duration::days(1)).and_time(window.end)
        } else {
            day.and_time(window.end)
        };

        let overlap_start = night_start.max(entry);
        let overlap_end = night_end.min(exit);
        if overlap_end > overlap_start {
            night_minutes += (overlap_end - overlap_start).num_minutes();
        }

        day += Duration::days(1);
    }

    let day_minutes = total_minutes - night_minutes;
    DayNightSplit {
        day_hours: Decimal::new(day_minutes, 0) / Decimal::new(60, 0),
        night_hours: Decimal::new(night_minutes, 0) / Decimal::new(60, 0),
    }
}
