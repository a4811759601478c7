//! Aggregation of a period's jornadas into payable hour buckets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AbsenceKind, Jornada};

/// One of the payable hour categories a concept quantity can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourBucketKind {
    /// Hours worked outside the night window, on regular days.
    Day,
    /// Hours worked inside the night window.
    Night,
    /// Operator-confirmed overtime at 50% surcharge.
    Overtime50,
    /// Operator-confirmed overtime at 100% surcharge.
    Overtime100,
    /// Hours worked on a paid holiday.
    Holiday,
}

/// Absence-day counts by kind over a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceCounts {
    /// Annual leave days.
    pub vacation: u32,
    /// Certified sick days.
    pub sick: u32,
    /// Workplace accident days.
    pub accident: u32,
    /// Other excused leave days.
    pub leave: u32,
    /// Unexcused absence days.
    pub unexcused: u32,
}

impl AbsenceCounts {
    fn record(&mut self, kind: AbsenceKind) {
        match kind {
            AbsenceKind::Vacation => self.vacation += 1,
            AbsenceKind::Sick => self.sick += 1,
            AbsenceKind::Accident => self.accident += 1,
            AbsenceKind::Leave => self.leave += 1,
            AbsenceKind::Unexcused => self.unexcused += 1,
        }
    }

    /// Days of excused leave that still count toward attendance (vacation
    /// and other excused leave; sick and accident days do not).
    pub fn qualifying_leave_days(&self) -> u32 {
        self.vacation + self.leave
    }
}

/// An employee's hour totals for a liquidation period.
///
/// Pure and re-derivable: always recomputed from the jornada set, never
/// cached across edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBuckets {
    /// Day hours on regular days.
    pub day_hours: Decimal,
    /// Night hours.
    pub night_hours: Decimal,
    /// Confirmed overtime at 50%.
    pub overtime_50: Decimal,
    /// Confirmed overtime at 100%.
    pub overtime_100: Decimal,
    /// Hours worked on holidays.
    pub holiday_hours: Decimal,
    /// Absence-day counts by kind.
    pub absences: AbsenceCounts,
}

impl HourBuckets {
    /// Sums hour fields across a period's jornadas.
    ///
    /// Holiday jornadas carry their hours in `holiday_hours` only, so no
    /// hour is ever counted in two buckets. `holidays` is the period's
    /// holiday list: a jornada dated on one of them has its regular hours
    /// routed to the holiday bucket, which covers holidays registered
    /// after the day was reconciled. Confirmed overtime keeps its rate.
    pub fn aggregate<'a>(
        jornadas: impl IntoIterator<Item = &'a Jornada>,
        holidays: &[NaiveDate],
    ) -> Self {
        let mut buckets = HourBuckets::default();
        for jornada in jornadas {
            if let Some(status) = jornada.employee_status {
                buckets.absences.record(status);
                continue;
            }
            if holidays.contains(&jornada.date) {
                buckets.holiday_hours +=
                    jornada.day_hours + jornada.night_hours + jornada.holiday_hours;
            } else {
                buckets.day_hours += jornada.day_hours;
                buckets.night_hours += jornada.night_hours;
                buckets.holiday_hours += jornada.holiday_hours;
            }
            buckets.overtime_50 += jornada.overtime_50;
            buckets.overtime_100 += jornada.overtime_100;
        }
        buckets
    }

    /// The hours held in one bucket.
    pub fn hours(&self, kind: HourBucketKind) -> Decimal {
        match kind {
            HourBucketKind::Day => self.day_hours,
            HourBucketKind::Night => self.night_hours,
            HourBucketKind::Overtime50 => self.overtime_50,
            HourBucketKind::Overtime100 => self.overtime_100,
            HourBucketKind::Holiday => self.holiday_hours,
        }
    }

    /// Total hours actually worked across all buckets.
    pub fn total_worked(&self) -> Decimal {
        self.day_hours + self.night_hours + self.overtime_50 + self.overtime_100
            + self.holiday_hours
    }

    /// True when any bucket holds a negative figure, which can only come
    /// from corrupt input.
    pub fn has_negative(&self) -> bool {
        self.day_hours < Decimal::ZERO
            || self.night_hours < Decimal::ZERO
            || self.overtime_50 < Decimal::ZERO
            || self.overtime_100 < Decimal::ZERO
            || self.holiday_hours < Decimal::ZERO
    }
}
