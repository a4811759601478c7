//! Liquidation period model.
//!
//! A liquidation period fixes the civil date range, the payroll class it
//! covers, and the holidays falling inside it. Periods are immutable once
//! created; re-running a period replaces its line items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EmployeeClass;

/// The kind of liquidation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Full-month run for salaried staff.
    Monthly,
    /// 1st–15th run for hourly staff.
    FirstFortnight,
    /// 16th–end run for hourly staff.
    SecondFortnight,
    /// Vacation payout run.
    Vacation,
    /// Annual bonus (aguinaldo) run.
    Bonus,
    /// Final settlement on termination.
    FinalSettlement,
}

/// A payroll computation period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1–12).
    pub month: u32,
    /// Which fortnight (1 or 2), for fortnightly runs.
    pub fortnight: Option<u8>,
    /// The kind of run.
    pub kind: PeriodKind,
    /// First day covered (inclusive).
    pub date_from: NaiveDate,
    /// Last day covered (inclusive).
    pub date_to: NaiveDate,
    /// Which payroll class this run liquidates.
    pub employee_class: EmployeeClass,
    /// Public holidays falling inside the period.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

/// Returns the last civil day of the given month.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

impl LiquidationPeriod {
    /// Builds a monthly period for salaried staff.
    ///
    /// Returns `None` for an invalid year/month.
    ///
    /// # Example
    ///
    /// ```
    /// use jornada_engine::models::LiquidationPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = LiquidationPeriod::monthly(2026, 2).unwrap();
    /// assert_eq!(period.date_from, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    /// assert_eq!(period.date_to, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    /// ```
    pub fn monthly(year: i32, month: u32) -> Option<Self> {
        Some(Self {
            year,
            month,
            fortnight: None,
            kind: PeriodKind::Monthly,
            date_from: NaiveDate::from_ymd_opt(year, month, 1)?,
            date_to: last_day_of_month(year, month)?,
            employee_class: EmployeeClass::Mensual,
            holidays: Vec::new(),
        })
    }

    /// Builds a fortnightly period for hourly staff.
    ///
    /// Fortnight 1 covers the 1st–15th, fortnight 2 the 16th–end of month.
    /// Returns `None` for an invalid year/month or fortnight outside {1, 2}.
    pub fn fortnight(year: i32, month: u32, half: u8) -> Option<Self> {
        let (kind, date_from, date_to) = match half {
            1 => (
                PeriodKind::FirstFortnight,
                NaiveDate::from_ymd_opt(year, month, 1)?,
                NaiveDate::from_ymd_opt(year, month, 15)?,
            ),
            2 => (
                PeriodKind::SecondFortnight,
                NaiveDate::from_ymd_opt(year, month, 16)?,
                last_day_of_month(year, month)?,
            ),
            _ => return None,
        };
        Some(Self {
            year,
            month,
            fortnight: Some(half),
            kind,
            date_from,
            date_to,
            employee_class: EmployeeClass::Jornal,
            holidays: Vec::new(),
        })
    }

    /// Checks whether a date falls within this period, inclusive.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.date_from && date <= self.date_to
    }

    /// Checks whether the given date is a holiday inside this period.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_monthly_period_february_leap_year() {
        let period = LiquidationPeriod::monthly(2028, 2).unwrap();
        assert_eq!(period.date_to, make_date("2028-02-29"));
    }

    #[test]
    fn test_monthly_period_december() {
        let period = LiquidationPeriod::monthly(2026, 12).unwrap();
        assert_eq!(period.date_from, make_date("2026-12-01"));
        assert_eq!(period.date_to, make_date("2026-12-31"));
    }

    #[test]
    fn test_first_fortnight_bounds() {
        let period = LiquidationPeriod::fortnight(2026, 3, 1).unwrap();
        assert_eq!(period.kind, PeriodKind::FirstFortnight);
        assert_eq!(period.date_from, make_date("2026-03-01"));
        assert_eq!(period.date_to, make_date("2026-03-15"));
        assert_eq!(period.employee_class, EmployeeClass::Jornal);
    }

    #[test]
    fn test_second_fortnight_bounds() {
        let period = LiquidationPeriod::fortnight(2026, 4, 2).unwrap();
        assert_eq!(period.kind, PeriodKind::SecondFortnight);
        assert_eq!(period.date_from, make_date("2026-04-16"));
        assert_eq!(period.date_to, make_date("2026-04-30"));
    }

    #[test]
    fn test_invalid_fortnight_half_rejected() {
        assert!(LiquidationPeriod::fortnight(2026, 3, 3).is_none());
        assert!(LiquidationPeriod::fortnight(2026, 3, 0).is_none());
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(LiquidationPeriod::monthly(2026, 13).is_none());
    }

    #[test]
    fn test_contains_date_inclusive() {
        let period = LiquidationPeriod::fortnight(2026, 3, 1).unwrap();
        assert!(period.contains_date(make_date("2026-03-01")));
        assert!(period.contains_date(make_date("2026-03-15")));
        assert!(!period.contains_date(make_date("2026-03-16")));
        assert!(!period.contains_date(make_date("2026-02-28")));
    }

    #[test]
    fn test_is_holiday() {
        let mut period = LiquidationPeriod::monthly(2026, 3).unwrap();
        period.holidays.push(make_date("2026-03-24"));
        assert!(period.is_holiday(make_date("2026-03-24")));
        assert!(!period.is_holiday(make_date("2026-03-25")));
    }

    #[test]
    fn test_period_serialization_round_trip() {
        let period = LiquidationPeriod::fortnight(2026, 3, 2).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"kind\":\"second_fortnight\""));
        let deserialized: LiquidationPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}
