//! Employees' State Insurance contribution report.

use crate::calculation::{compute_employee_breakdown, round_rupees};
use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    ComplianceContributionRow, ComplianceReport, ComplianceScheme, EmployeeRecord, OrgDirectory,
    PayMonth,
};

use super::roster::{ReportHeader, collect_report};

/// Aggregates ESI contributions for `month`.
///
/// Only employees whose monthly gross is within the ESI wage ceiling appear.
/// The employee and employer shares are each rounded to the rupee from the
/// exact contribution.
pub fn aggregate_esi(
    roster: &[EmployeeRecord],
    rates: &RateTable,
    month: PayMonth,
    directory: Option<&OrgDirectory>,
) -> EngineResult<ComplianceReport> {
    let header = ReportHeader {
        scheme: ComplianceScheme::Esi,
        period: month.label(),
        jurisdiction: None,
    };

    collect_report(header, roster, rates, directory, |employee| {
        let breakdown = compute_employee_breakdown(&employee.compensation(), rates, month)?;
        if !breakdown.esi_applicable {
            return Ok(None);
        }

        Ok(Some(ComplianceContributionRow::new(
            employee.employee_id.clone(),
            employee.full_name(),
            round_rupees(breakdown.gross),
            round_rupees(breakdown.esic),
            round_rupees(breakdown.esic_employer),
        )))
    })
}
