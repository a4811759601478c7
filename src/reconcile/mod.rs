//! Session reconciliation: turns raw clock punches into per-day jornadas.
//!
//! The pipeline runs per employee per anchor day: partition punches over a
//! 3-day window, pair them into a session (night shifts anchor on the exit
//! date), compute worked hours and the day/night split, classify the shift,
//! and flag inconsistencies and suspected overtime. It never errors on
//! missing data.

mod classify;
mod inconsistency;
mod pairing;
mod reconciler;
mod split;

pub use classify::{baseline_hours, classify_shift};
pub use inconsistency::{detect_inconsistency, suspect_overtime};
pub use pairing::{pair_session, session_hours, EventWindow, PairingKind, SessionPairing};
pub use reconciler::{
    informational_overtime, DayContext, DayPlanner, ReconcileOutcome, Reconciler,
};
pub use split::{split_day_night, DayNightSplit};
