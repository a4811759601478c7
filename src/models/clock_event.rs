//! Clock event model and ingestion parsing.
//!
//! Clock events are the immutable facts produced by the biometric
//! terminals. They arrive with a timezone offset and are converted to
//! plant-local naive time exactly once, at the parse boundary. Everything
//! downstream works in civil local time.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// The direction of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchDirection {
    /// The employee clocked in.
    Entry,
    /// The employee clocked out.
    Exit,
}

/// A single punch recorded by a biometric terminal.
///
/// Read-only inside this engine: events are produced by hardware and
/// middleware and never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// The employee the punch belongs to.
    pub employee_id: String,
    /// The punch instant in plant-local civil time.
    pub timestamp: NaiveDateTime,
    /// Whether this was a clock-in or a clock-out.
    pub direction: PunchDirection,
    /// The terminal that recorded the punch.
    pub device_id: String,
}

impl ClockEvent {
    /// Builds a clock event from the raw middleware row.
    ///
    /// The raw timestamp must be RFC 3339 with an offset (that is how the
    /// terminal middleware emits it); it is converted to local naive time
    /// here. A malformed timestamp is rejected for this event only.
    ///
    /// # Example
    ///
    /// ```
    /// use jornada_engine::models::{ClockEvent, PunchDirection};
    ///
    /// let event = ClockEvent::from_raw(
    ///     "emp_001",
    ///     "2026-03-09T22:04:00-03:00",
    ///     PunchDirection::Entry,
    ///     "gate_1",
    /// ).unwrap();
    /// assert_eq!(event.timestamp.to_string(), "2026-03-09 22:04:00");
    /// ```
    pub fn from_raw(
        employee_id: &str,
        raw_timestamp: &str,
        direction: PunchDirection,
        device_id: &str,
    ) -> EngineResult<Self> {
        let parsed = DateTime::parse_from_rfc3339(raw_timestamp).map_err(|e| {
            EngineError::InvalidClockEvent {
                employee_id: employee_id.to_string(),
                message: format!("unparseable timestamp '{raw_timestamp}': {e}"),
            }
        })?;

        Ok(Self {
            employee_id: employee_id.to_string(),
            timestamp: parsed.naive_local(),
            direction,
            device_id: device_id.to_string(),
        })
    }

    /// Parses a batch of raw rows, dropping malformed ones.
    ///
    /// A bad row is logged and skipped; it never fails the whole batch.
    /// Returned events are sorted chronologically.
    pub fn parse_batch(rows: &[(String, String, PunchDirection, String)]) -> Vec<ClockEvent> {
        let mut events: Vec<ClockEvent> = rows
            .iter()
            .filter_map(|(employee_id, raw_ts, direction, device_id)| {
                match ClockEvent::from_raw(employee_id, raw_ts, *direction, device_id) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        warn!(employee_id = %employee_id, error = %e, "Dropping malformed clock event");
                        None
                    }
                }
            })
            .collect();
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        events
    }
}
