//! Request types for the statutory payroll API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Department, EmployeeRecord, OrgDirectory, PayMonth, ReportingPeriod, Unit,
};

/// Request body for `POST /breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownRequest {
    /// The full monthly gross.
    #[serde(alias = "monthlyCTC", alias = "monthlyCtc")]
    pub monthly_ctc: Decimal,
    /// The month being paid, as `YYYY-MM`.
    pub month: PayMonth,
    /// Rate table to use instead of the server's.
    #[serde(default)]
    pub rates: Option<RateTable>,
}

/// Request body for `POST /payslip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employee being paid.
    pub employee: EmployeeRecord,
    /// The month being paid, as `YYYY-MM`.
    pub month: PayMonth,
    /// Department table used to print the department name.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Unit table used to print the unit name.
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// Request body for `POST /compliance/:scheme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceRequest {
    /// The employee roster.
    #[serde(alias = "employees")]
    pub roster: Vec<EmployeeRecord>,
    /// Department table for grouping.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Unit table for grouping.
    #[serde(default)]
    pub units: Vec<Unit>,
    /// Month reported on, for monthly schemes.
    #[serde(default)]
    pub month: Option<PayMonth>,
    /// Reporting period, for MLWF.
    #[serde(default)]
    pub period: Option<ReportingPeriod>,
}

/// Builds a directory when either lookup table was supplied.
pub(crate) fn directory_from(units: &[Unit], departments: &[Department]) -> Option<OrgDirectory> {
    if units.is_empty() && departments.is_empty() {
        None
    } else {
        Some(OrgDirectory::new(units.to_vec(), departments.to_vec()))
    }
}

impl ComplianceRequest {
    /// The lookup tables as a directory, if any were supplied.
    pub fn directory(&self) -> Option<OrgDirectory> {
        directory_from(&self.units, &self.departments)
    }

    /// The month for a monthly scheme: `month`, or the month of a monthly `period`.
    pub fn pay_month(&self) -> EngineResult<PayMonth> {
        match (self.month, self.period) {
            (Some(month), _) => Ok(month),
            (None, Some(ReportingPeriod::Month { month })) => Ok(month),
            _ => Err(EngineError::validation(
                "month",
                "a month (YYYY-MM) is required for this scheme",
            )),
        }
    }

    /// The reporting period for MLWF: `period`, or the single `month`.
    pub fn reporting_period(&self) -> EngineResult<ReportingPeriod> {
        match (self.period, self.month) {
            (Some(period), _) => Ok(period),
            (None, Some(month)) => Ok(ReportingPeriod::from(month)),
            (None, None) => Err(EngineError::validation(
                "period",
                "a reporting period or month is required for MLWF",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_breakdown_request() {
        let json = r#"{ "monthlyCTC": 30000, "month": "2025-06" }"#;

        let request: BreakdownRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.monthly_ctc, dec!(30000));
        assert_eq!(request.month, PayMonth::new(2025, 6).unwrap());
        assert!(request.rates.is_none());
    }

    #[test]
    fn test_breakdown_request_with_partial_rates() {
        let json = r#"{
            "monthly_ctc": "30000",
            "month": "2025-01",
            "rates": { "professionalTax": 175 }
        }"#;

        let request: BreakdownRequest = serde_json::from_str(json).unwrap();
        let rates = request.rates.unwrap();
        assert_eq!(rates.epf_percentage, dec!(12));
    }

    #[test]
    fn test_deserialize_compliance_request() {
        let json = r#"{
            "employees": [
                { "id": "1", "firstName": "Asha", "lastName": "Patil",
                  "employeeId": "EMP001", "departmentId": "d1", "salary": 30000 }
            ],
            "departments": [{ "id": "d1", "name": "Assembly", "unitId": "u1" }],
            "units": [{ "id": "u1", "name": "Pune Plant" }],
            "period": { "type": "year", "year": 2025 }
        }"#;

        let request: ComplianceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.roster.len(), 1);
        assert!(request.roster[0].is_active);
        assert!(request.directory().is_some());
        assert_eq!(
            request.reporting_period().unwrap(),
            ReportingPeriod::Year { year: 2025 }
        );
        assert!(request.pay_month().is_err());
    }

    #[test]
    fn test_compliance_month_doubles_as_period() {
        let json = r#"{ "roster": [], "month": "2025-12" }"#;

        let request: ComplianceRequest = serde_json::from_str(json).unwrap();
        let month = PayMonth::new(2025, 12).unwrap();
        assert!(request.directory().is_none());
        assert_eq!(request.pay_month().unwrap(), month);
        assert_eq!(request.reporting_period().unwrap(), ReportingPeriod::from(month));
    }
}
