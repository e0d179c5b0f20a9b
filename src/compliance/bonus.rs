//! Statutory bonus report.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculation::{percent_of, round_rupees};
use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    ComplianceContributionRow, ComplianceReport, ComplianceScheme, EmployeeRecord, OrgDirectory,
};

use super::roster::{ReportHeader, collect_report};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Aggregates the annual statutory minimum bonus.
///
/// Basic is taken from `monthly_ctc / 12` at the configured Basic
/// percentage and rounded, capped at the bonus wage ceiling, and the bonus
/// rate applied over twelve months. The bonus is an employer payment, so
/// the employee share is always zero.
///
/// # Example
///
/// ```
/// use statutory_payroll::compliance::aggregate_bonus;
/// use statutory_payroll::config::RateTable;
/// use statutory_payroll::models::EmployeeRecord;
///
/// let roster: Vec<EmployeeRecord> = serde_json::from_str(r#"[{
///     "id": "1", "firstName": "Asha", "employeeId": "EMP001", "salary": 20000
/// }]"#).unwrap();
///
/// let report = aggregate_bonus(&roster, &RateTable::default(), None).unwrap();
/// assert_eq!(report.totals.employer_contribution.to_string(), "833");
/// ```
pub fn aggregate_bonus(
    roster: &[EmployeeRecord],
    rates: &RateTable,
    directory: Option<&OrgDirectory>,
) -> EngineResult<ComplianceReport> {
    let header = ReportHeader {
        scheme: ComplianceScheme::Bonus,
        period: "Annual".to_string(),
        jurisdiction: None,
    };

    collect_report(header, roster, rates, directory, |employee| {
        let input = employee.compensation();
        input.validate()?;

        let basic = round_rupees(percent_of(
            input.monthly_ctc / MONTHS_PER_YEAR,
            rates.basic_salary_percentage,
        ));
        let eligible = basic.min(rates.bonus_wage_ceiling);
        let annual_bonus =
            round_rupees(percent_of(eligible, rates.bonus_percentage) * MONTHS_PER_YEAR);

        Ok(Some(ComplianceContributionRow::new(
            input.employee_id,
            employee.full_name(),
            eligible,
            Decimal::ZERO,
            annual_bonus,
        )))
    })
}
