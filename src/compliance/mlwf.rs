//! Maharashtra Labour Welfare Fund report.

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::{compute_employee_breakdown, mlwf_applies, round_rupees};
use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    ComplianceContributionRow, ComplianceReport, ComplianceScheme, EmployeeRecord, OrgDirectory,
    PayMonth, ReportingPeriod,
};

use super::roster::{ReportHeader, collect_report};

/// Aggregates MLWF contributions over a reporting period.
///
/// Each month of the period in which MLWF is levied counts as one cycle, and
/// each row carries the fixed employee and employer amounts once per cycle in
/// which the employee has pay. The row basis is the monthly CTC before any
/// paid or loss-of-pay days. A period with no MLWF month produces a report
/// without rows.
///
/// # Example
///
/// ```
/// use statutory_payroll::compliance::aggregate_mlwf;
/// use statutory_payroll::config::RateTable;
/// use statutory_payroll::models::{PayMonth, ReportingPeriod};
///
/// let january = ReportingPeriod::from(PayMonth::new(2025, 1).unwrap());
/// let report = aggregate_mlwf(&[], &RateTable::default(), &january, None).unwrap();
/// assert_eq!(report.row_count(), 0);
/// ```
pub fn aggregate_mlwf(
    roster: &[EmployeeRecord],
    rates: &RateTable,
    period: &ReportingPeriod,
    directory: Option<&OrgDirectory>,
) -> EngineResult<ComplianceReport> {
    let levied: Vec<PayMonth> = period
        .months()
        .into_iter()
        .filter(|month| mlwf_applies(*month, rates))
        .collect();

    if levied.is_empty() {
        info!(period = %period.label(), "No MLWF month in reporting period");
    }

    let header = ReportHeader {
        scheme: ComplianceScheme::Mlwf,
        period: period.label(),
        jurisdiction: Some("Maharashtra".to_string()),
    };

    collect_report(header, roster, rates, directory, |employee| {
        let input = employee.compensation();
        input.validate()?;

        let mut employee_share = Decimal::ZERO;
        let mut employer_share = Decimal::ZERO;
        for month in &levied {
            let breakdown = compute_employee_breakdown(&input, rates, *month)?;
            employee_share += breakdown.mlwf_employee;
            employer_share += breakdown.mlwf_employer;
        }

        if employee_share.is_zero() && employer_share.is_zero() {
            return Ok(None);
        }

        Ok(Some(ComplianceContributionRow::new(
            input.employee_id,
            employee.full_name(),
            round_rupees(input.monthly_ctc),
            round_rupees(employee_share),
            round_rupees(employer_share),
        )))
    })
}
