//! Professional Tax report.

use rust_decimal::Decimal;

use crate::calculation::{compute_employee_breakdown, round_rupees};
use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    ComplianceContributionRow, ComplianceReport, ComplianceScheme, EmployeeRecord, OrgDirectory,
    PayMonth,
};

use super::roster::{ReportHeader, collect_report};

/// Aggregates Professional Tax for `month` under the configured jurisdiction.
///
/// Every active salaried employee gets a row, including those whose slab
/// carries no tax. PT has no employer share.
pub fn aggregate_pt(
    roster: &[EmployeeRecord],
    rates: &RateTable,
    month: PayMonth,
    directory: Option<&OrgDirectory>,
) -> EngineResult<ComplianceReport> {
    let header = ReportHeader {
        scheme: ComplianceScheme::Pt,
        period: month.label(),
        jurisdiction: Some(rates.pt_jurisdiction.clone()),
    };

    collect_report(header, roster, rates, directory, |employee| {
        let breakdown = compute_employee_breakdown(&employee.compensation(), rates, month)?;
        Ok(Some(ComplianceContributionRow::new(
            employee.employee_id.clone(),
            employee.full_name(),
            round_rupees(breakdown.gross),
            round_rupees(breakdown.professional_tax),
            Decimal::ZERO,
        )))
    })
}
