//! Candidate pairing of punch events into a single work session.
//!
//! The reconciler looks at a 3-day window (the day before, the anchor day,
//! and the day after) so that night sessions crossing midnight can be
//! resolved. Pairing candidates are tried in a fixed priority order; the
//! first match wins.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{ClockEvent, PunchDirection};

/// Entries at or after this local time are night-session candidates.
pub fn night_entry_from() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).expect("Valid threshold time")
}

/// Exits before this local time are night-session candidates.
pub fn night_exit_before() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).expect("Valid threshold time")
}

/// Punch events for one employee partitioned over the 3-day window.
///
/// Entries and exits are kept per day, sorted chronologically.
#[derive(Debug, Clone, Default)]
pub struct EventWindow {
    /// Entries on the day before the anchor.
    pub prev_entries: Vec<NaiveDateTime>,
    /// Exits on the day before the anchor.
    pub prev_exits: Vec<NaiveDateTime>,
    /// Entries on the anchor day.
    pub target_entries: Vec<NaiveDateTime>,
    /// Exits on the anchor day.
    pub target_exits: Vec<NaiveDateTime>,
    /// Entries on the day after the anchor.
    pub next_entries: Vec<NaiveDateTime>,
    /// Exits on the day after the anchor.
    pub next_exits: Vec<NaiveDateTime>,
}

impl EventWindow {
    /// Partitions a batch of events around the anchor day.
    ///
    /// Events outside the 3-day window are ignored. Input order does not
    /// matter; each per-day list comes out sorted.
    pub fn collect(events: &[ClockEvent], anchor: NaiveDate) -> Self {
        let mut window = EventWindow::default();
        let prev = anchor.pred_opt();
        let next = anchor.succ_opt();

        for event in events {
            let day = event.timestamp.date();
            let bucket = if Some(day) == prev {
                match event.direction {
                    PunchDirection::Entry => &mut window.prev_entries,
                    PunchDirection::Exit => &mut window.prev_exits,
                }
            } else if day == anchor {
                match event.direction {
                    PunchDirection::Entry => &mut window.target_entries,
                    PunchDirection::Exit => &mut window.target_exits,
                }
            } else if Some(day) == next {
                match event.direction {
                    PunchDirection::Entry => &mut window.next_entries,
                    PunchDirection::Exit => &mut window.next_exits,
                }
            } else {
                continue;
            };
            bucket.push(event.timestamp);
        }

        window.prev_entries.sort();
        window.prev_exits.sort();
        window.target_entries.sort();
        window.target_exits.sort();
        window.next_entries.sort();
        window.next_exits.sort();
        window
    }

    fn first_night_entry(entries: &[NaiveDateTime]) -> Option<NaiveDateTime> {
        let threshold = night_entry_from();
        entries.iter().find(|e| e.time() >= threshold).copied()
    }

    fn last_morning_exit(exits: &[NaiveDateTime]) -> Option<NaiveDateTime> {
        let threshold = night_exit_before();
        exits.iter().rev().find(|e| e.time() < threshold).copied()
    }
}

/// How the anchor day's punches were resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingKind {
    /// A night session that entered the evening before and exited this
    /// morning. Surfaced on the anchor (exit) day.
    NightEndedToday,
    /// A night session entering this evening and exiting tomorrow morning.
    /// Surfaced on the day after, never on the anchor day.
    NightIntoTomorrow,
    /// A late entry with no exit anywhere in the window yet.
    OpenNight,
    /// A plain same-day pairing: earliest entry, latest exit. Either side
    /// may be missing.
    SameDay,
    /// No punches at all on the anchor day.
    Empty,
}

/// The resolved session endpoints for an anchor day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPairing {
    /// Which pairing rule matched.
    pub kind: PairingKind,
    /// Resolved clock-in, if any.
    pub entry: Option<NaiveDateTime>,
    /// Resolved clock-out, if any.
    pub exit: Option<NaiveDateTime>,
}

/// Pairs the window's punches into a session for the anchor day.
///
/// Candidates in priority order:
/// 1. Entry the evening before (≥ 18:00) plus an exit this morning
///    (< 12:00): the night session ended today and anchors here.
/// 2. Entry this evening (≥ 18:00) plus an exit tomorrow morning
///    (< 12:00): the session anchors on tomorrow.
/// 3. Entry this evening with no following exit in the window: open
///    night session.
/// 4. Same-day pairing: earliest entry and latest exit of the anchor day,
///    ignoring intermediate punches.
pub fn pair_session(window: &EventWindow) -> SessionPairing {
    // Rule 1: night session that ended this morning.
    if let (Some(entry), Some(exit)) = (
        EventWindow::first_night_entry(&window.prev_entries),
        EventWindow::last_morning_exit(&window.target_exits),
    ) {
        return SessionPairing {
            kind: PairingKind::NightEndedToday,
            entry: Some(entry),
            exit: Some(exit),
        };
    }

    // Rule 2: night session starting tonight, ending tomorrow morning.
    if let Some(entry) = EventWindow::first_night_entry(&window.target_entries) {
        if let Some(exit) = EventWindow::last_morning_exit(&window.next_exits) {
            return SessionPairing {
                kind: PairingKind::NightIntoTomorrow,
                entry: Some(entry),
                exit: Some(exit),
            };
        }

        // Rule 3: late entry, no exit anywhere after it yet.
        let same_day_exit_after = window.target_exits.iter().any(|e| *e > entry);
        if !same_day_exit_after {
            return SessionPairing {
                kind: PairingKind::OpenNight,
                entry: Some(entry),
                exit: None,
            };
        }
    }

    // Rule 4: default same-day pairing.
    let entry = window.target_entries.first().copied();
    let exit = window.target_exits.last().copied();
    if entry.is_none() && exit.is_none() {
        return SessionPairing {
            kind: PairingKind::Empty,
            entry: None,
            exit: None,
        };
    }
    SessionPairing {
        kind: PairingKind::SameDay,
        entry,
        exit,
    }
}

/// Worked duration in hours for a resolved entry/exit pair.
///
/// A negative raw difference (an exit time that looks earlier than the
/// entry on the same civil day) is interpreted as crossing midnight and
/// gets 24 hours added; the result is never negative.
pub fn session_hours(entry: NaiveDateTime, exit: NaiveDateTime) -> Decimal {
    let mut minutes = (exit - entry).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dt(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn event(ts: NaiveDateTime, direction: PunchDirection) -> ClockEvent {
        ClockEvent {
            employee_id: "emp_001".to_string(),
            timestamp: ts,
            direction,
            device_id: "gate_1".to_string(),
        }
    }

    // 2026-03-09 is a Monday.

    #[test]
    fn test_collect_partitions_by_day_and_direction() {
        let events = vec![
            event(dt("2026-03-09", "22:00:00"), PunchDirection::Entry),
            event(dt("2026-03-10", "06:00:00"), PunchDirection::Exit),
            event(dt("2026-03-10", "22:01:00"), PunchDirection::Entry),
            event(dt("2026-03-11", "06:02:00"), PunchDirection::Exit),
            // Outside the window, ignored.
            event(dt("2026-03-20", "08:00:00"), PunchDirection::Entry),
        ];

        let window = EventWindow::collect(&events, date("2026-03-10"));
        assert_eq!(window.prev_entries.len(), 1);
        assert_eq!(window.target_exits.len(), 1);
        assert_eq!(window.target_entries.len(), 1);
        assert_eq!(window.next_exits.len(), 1);
        assert!(window.prev_exits.is_empty());
    }

    #[test]
    fn test_night_ended_today_takes_priority() {
        let events = vec![
            event(dt("2026-03-09", "21:45:00"), PunchDirection::Entry),
            event(dt("2026-03-10", "05:50:00"), PunchDirection::Exit),
        ];
        let window = EventWindow::collect(&events, date("2026-03-10"));
        let pairing = pair_session(&window);

        assert_eq!(pairing.kind, PairingKind::NightEndedToday);
        assert_eq!(pairing.entry, Some(dt("2026-03-09", "21:45:00")));
        assert_eq!(pairing.exit, Some(dt("2026-03-10", "05:50:00")));
    }

    #[test]
    fn test_night_into_tomorrow() {
        let events = vec![
            event(dt("2026-03-10", "22:04:00"), PunchDirection::Entry),
            event(dt("2026-03-11", "06:01:00"), PunchDirection::Exit),
        ];
        let window = EventWindow::collect(&events, date("2026-03-10"));
        let pairing = pair_session(&window);

        assert_eq!(pairing.kind, PairingKind::NightIntoTomorrow);
        assert_eq!(pairing.entry, Some(dt("2026-03-10", "22:04:00")));
        assert_eq!(pairing.exit, Some(dt("2026-03-11", "06:01:00")));
    }

    #[test]
    fn test_open_night_session_without_exit() {
        let events = vec![event(dt("2026-03-10", "22:04:00"), PunchDirection::Entry)];
        let window = EventWindow::collect(&events, date("2026-03-10"));
        let pairing = pair_session(&window);

        assert_eq!(pairing.kind, PairingKind::OpenNight);
        assert!(pairing.exit.is_none());
    }

    #[test]
    fn test_same_day_earliest_entry_latest_exit() {
        let events = vec![
            event(dt("2026-03-10", "06:02:00"), PunchDirection::Entry),
            event(dt("2026-03-10", "12:00:00"), PunchDirection::Exit),
            event(dt("2026-03-10", "12:30:00"), PunchDirection::Entry),
            event(dt("2026-03-10", "14:05:00"), PunchDirection::Exit),
        ];
        let window = EventWindow::collect(&events, date("2026-03-10"));
        let pairing = pair_session(&window);

        assert_eq!(pairing.kind, PairingKind::SameDay);
        assert_eq!(pairing.entry, Some(dt("2026-03-10", "06:02:00")));
        assert_eq!(pairing.exit, Some(dt("2026-03-10", "14:05:00")));
    }

    #[test]
    fn test_morning_exit_only_yields_same_day_missing_entry() {
        // A night worker whose evening entry punch was lost: the morning
        // exit stands alone.
        let events = vec![event(dt("2026-03-10", "06:00:00"), PunchDirection::Exit)];
        let window = EventWindow::collect(&events, date("2026-03-10"));
        let pairing = pair_session(&window);

        assert_eq!(pairing.kind, PairingKind::SameDay);
        assert!(pairing.entry.is_none());
        assert_eq!(pairing.exit, Some(dt("2026-03-10", "06:00:00")));
    }

    #[test]
    fn test_no_punches_is_empty() {
        let window = EventWindow::collect(&[], date("2026-03-10"));
        assert_eq!(pair_session(&window).kind, PairingKind::Empty);
    }

    #[test]
    fn test_late_entry_with_later_same_day_exit_pairs_same_day() {
        // Entered 18:30, left 23:45 the same day: a long afternoon shift,
        // not an open night session.
        let events = vec![
            event(dt("2026-03-10", "18:30:00"), PunchDirection::Entry),
            event(dt("2026-03-10", "23:45:00"), PunchDirection::Exit),
        ];
        let window = EventWindow::collect(&events, date("2026-03-10"));
        let pairing = pair_session(&window);

        assert_eq!(pairing.kind, PairingKind::SameDay);
        assert_eq!(pairing.exit, Some(dt("2026-03-10", "23:45:00")));
    }

    #[test]
    fn test_afternoon_exit_next_day_not_a_night_candidate() {
        // Tomorrow's 14:00 exit is not before noon, so it cannot close
        // tonight's session.
        let events = vec![
            event(dt("2026-03-10", "22:00:00"), PunchDirection::Entry),
            event(dt("2026-03-11", "14:00:00"), PunchDirection::Exit),
        ];
        let window = EventWindow::collect(&events, date("2026-03-10"));
        let pairing = pair_session(&window);

        assert_eq!(pairing.kind, PairingKind::OpenNight);
    }

    #[test]
    fn test_session_hours_regular_day() {
        let hours = session_hours(dt("2026-03-10", "06:00:00"), dt("2026-03-10", "14:00:00"));
        assert_eq!(hours, dec("8"));
    }

    #[test]
    fn test_session_hours_cross_midnight() {
        let hours = session_hours(dt("2026-03-09", "21:45:00"), dt("2026-03-10", "05:50:00"));
        assert_eq!(hours.round_dp(2), dec("8.08"));
    }

    #[test]
    fn test_session_hours_never_negative_on_wrapped_times() {
        // Same civil day but exit time earlier than entry time: treated as
        // crossing midnight.
        let hours = session_hours(dt("2026-03-10", "22:00:00"), dt("2026-03-10", "06:00:00"));
        assert_eq!(hours, dec("8"));
    }
}
