//! Provident Fund contribution report.

use tracing::debug;

use crate::calculation::{compute_breakdown, percent_of, round_rupees};
use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    ComplianceContributionRow, ComplianceReport, ComplianceScheme, EmployeeRecord, OrgDirectory,
    PayMonth,
};

use super::roster::{ReportHeader, collect_report};

/// Aggregates EPF contributions for `month`.
///
/// PF wages are reported on a standard month: the gross payable after
/// paid or loss-of-pay days is pro-rated by `pf_paid_days / pf_month_days`
/// (25 of 30 by default) and run through the breakdown engine. On the
/// resulting Basic, capped at the EPF wage ceiling, each row carries:
/// - employee share at `epf_percentage`
/// - employer share at `epf_percentage`
/// - EDLI and PF administration charges as additional employer charges
///
/// # Errors
///
/// Fails only when the rate table is invalid; employees with invalid input
/// are listed in the report's `skipped` list.
pub fn aggregate_pf(
    roster: &[EmployeeRecord],
    rates: &RateTable,
    month: PayMonth,
    directory: Option<&OrgDirectory>,
) -> EngineResult<ComplianceReport> {
    let header = ReportHeader {
        scheme: ComplianceScheme::Pf,
        period: month.label(),
        jurisdiction: None,
    };

    collect_report(header, roster, rates, directory, |employee| {
        pf_row(employee, rates, month).map(Some)
    })
}

fn pf_row(
    employee: &EmployeeRecord,
    rates: &RateTable,
    month: PayMonth,
) -> EngineResult<ComplianceContributionRow> {
    let input = employee.compensation();
    let payable = input.payable_gross(month.days_in_month())?;

    let pf_gross = payable * rates.pf_paid_days / rates.pf_month_days;
    let breakdown = compute_breakdown(pf_gross, rates, month)?;
    let basis = breakdown.basic.min(rates.epf_wage_ceiling);

    let employee_share = round_rupees(breakdown.epf_employee);
    let employer_share = round_rupees(percent_of(basis, rates.epf_percentage));
    let edli = round_rupees(percent_of(basis, rates.edli_percentage));
    let admin = round_rupees(percent_of(basis, rates.pf_admin_charges_percentage));

    debug!(
        employee_id = %input.employee_id,
        pf_gross = %pf_gross,
        basis = %basis,
        "PF wages computed"
    );

    Ok(ComplianceContributionRow::new(
        input.employee_id,
        employee.full_name(),
        round_rupees(basis),
        employee_share,
        employer_share,
    )
    .with_charge("edli", "EDLI", edli)
    .with_charge("admin", "PF admin charges", admin))
}
