//! Employee model and related types.
//!
//! This module defines the Employee struct plus the payroll class and
//! bargaining-status enums used throughout reconciliation and liquidation.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The payroll class of an employee.
///
/// Determines which liquidation runs include the employee: hourly staff
/// are liquidated per fortnight, salaried staff per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeClass {
    /// Hourly ("jornal") staff, paid per fortnight.
    Jornal,
    /// Salaried ("mensual") staff, paid per month.
    Mensual,
}

/// Whether the employee is covered by the collective agreement.
///
/// Replaces the source system's hardcoded employee-id allow-list with an
/// explicit attribute on the employee master record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BargainingStatus {
    /// Covered by the collective agreement: overtime and shift rules apply.
    Covered,
    /// Outside the agreement: always classified Flexible, exempt from
    /// overtime computation and shift-anomaly checks.
    Excluded,
}

/// An employee subject to reconciliation and liquidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hourly vs salaried payroll class.
    pub class: EmployeeClass,
    /// Collective-agreement coverage.
    pub bargaining: BargainingStatus,
    /// Hourly rate; required for rate-based concepts on Jornal staff.
    pub hourly_rate: Option<Decimal>,
    /// Monthly base salary; required for salary-based concepts on Mensual staff.
    pub base_salary: Option<Decimal>,
    /// Date the employee was hired, used for the seniority bonus.
    pub hire_date: NaiveDate,
}

impl Employee {
    /// Returns whole years of service completed as of the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use jornada_engine::models::{BargainingStatus, Employee, EmployeeClass};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "R. Ibarra".to_string(),
    ///     class: EmployeeClass::Jornal,
    ///     bargaining: BargainingStatus::Covered,
    ///     hourly_rate: None,
    ///     base_salary: None,
    ///     hire_date: NaiveDate::from_ymd_opt(2019, 6, 15).unwrap(),
    /// };
    /// let as_of = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
    /// assert_eq!(employee.years_of_service(as_of), 6);
    /// ```
    pub fn years_of_service(&self, as_of: NaiveDate) -> u32 {
        if as_of <= self.hire_date {
            return 0;
        }
        let mut years = as_of.year() - self.hire_date.year();
        let anniversary_passed = (as_of.month(), as_of.day())
            >= (self.hire_date.month(), self.hire_date.day());
        if !anniversary_passed {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// True when the employee is outside the collective agreement.
    pub fn is_excluded(&self) -> bool {
        self.bargaining == BargainingStatus::Excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "R. Ibarra".to_string(),
            class: EmployeeClass::Jornal,
            bargaining: BargainingStatus::Covered,
            hourly_rate: Some(Decimal::from_str("1850.00").unwrap()),
            base_salary: None,
            hire_date: NaiveDate::from_ymd_opt(2019, 6, 15).unwrap(),
        }
    }

    #[test]
    fn test_years_of_service_before_anniversary() {
        let employee = create_test_employee();
        let as_of = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        assert_eq!(employee.years_of_service(as_of), 6);
    }

    #[test]
    fn test_years_of_service_after_anniversary() {
        let employee = create_test_employee();
        let as_of = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert_eq!(employee.years_of_service(as_of), 7);
    }

    #[test]
    fn test_years_of_service_before_hire_is_zero() {
        let employee = create_test_employee();
        let as_of = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(employee.years_of_service(as_of), 0);
    }

    #[test]
    fn test_is_excluded() {
        let mut employee = create_test_employee();
        assert!(!employee.is_excluded());
        employee.bargaining = BargainingStatus::Excluded;
        assert!(employee.is_excluded());
    }

    #[test]
    fn test_deserialize_jornal_employee() {
        let json = r#"{
            "id": "emp_001",
            "name": "R. Ibarra",
            "class": "jornal",
            "bargaining": "covered",
            "hourly_rate": "1850.00",
            "base_salary": null,
            "hire_date": "2019-06-15"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.class, EmployeeClass::Jornal);
        assert_eq!(employee.bargaining, BargainingStatus::Covered);
        assert_eq!(
            employee.hourly_rate,
            Some(Decimal::from_str("1850.00").unwrap())
        );
    }

    #[test]
    fn test_deserialize_mensual_excluded_employee() {
        let json = r#"{
            "id": "emp_002",
            "name": "M. Duarte",
            "class": "mensual",
            "bargaining": "excluded",
            "hourly_rate": null,
            "base_salary": "950000.00",
            "hire_date": "2015-02-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.class, EmployeeClass::Mensual);
        assert!(employee.is_excluded());
    }

    #[test]
    fn test_serialize_round_trip() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }
}
