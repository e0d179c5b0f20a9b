//! The roster walk shared by every compliance aggregator.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    ComplianceContributionRow, ComplianceReport, ComplianceScheme, ContributionGroups,
    ContributionTotals, EmployeeRecord, OrgDirectory, Placement, SkippedEmployee,
};

/// Unit label used when no directory is supplied.
pub const ALL_UNITS: &str = "All Units";

/// Department label used when no directory is supplied.
pub const ALL_DEPARTMENTS: &str = "All Departments";

/// Header fields of a report under construction.
pub(crate) struct ReportHeader {
    pub scheme: ComplianceScheme,
    pub period: String,
    pub jurisdiction: Option<String>,
}

/// Walks the roster and collects one row per eligible employee.
///
/// Inactive and unsalaried employees are left out without comment. `row_for`
/// returns `Ok(None)` for an employee the scheme does not cover, and an error
/// for input it cannot compute; the latter lands in the report's `skipped`
/// list and the walk carries on.
pub(crate) fn collect_report<F>(
    header: ReportHeader,
    roster: &[EmployeeRecord],
    rates: &RateTable,
    directory: Option<&OrgDirectory>,
    mut row_for: F,
) -> EngineResult<ComplianceReport>
where
    F: FnMut(&EmployeeRecord) -> EngineResult<Option<ComplianceContributionRow>>,
{
    rates.validate()?;

    let mut groups = ContributionGroups::new();
    let mut totals = ContributionTotals::default();
    let mut skipped = Vec::new();

    for employee in roster {
        if !employee.is_active || employee.salary == Decimal::ZERO {
            debug!(
                scheme = %header.scheme,
                employee_id = %employee.employee_id,
                active = employee.is_active,
                "Employee excluded from report"
            );
            continue;
        }

        match row_for(employee) {
            Ok(Some(row)) => {
                let placement = placement_of(employee, directory);
                totals.add(&row);
                groups
                    .entry(placement.unit_name)
                    .or_default()
                    .entry(placement.department_name)
                    .or_default()
                    .push(row);
            }
            Ok(None) => {
                debug!(
                    scheme = %header.scheme,
                    employee_id = %employee.employee_id,
                    "Employee not covered by scheme"
                );
            }
            Err(err) => {
                warn!(
                    scheme = %header.scheme,
                    employee_id = %employee.employee_id,
                    error = %err,
                    "Skipping employee"
                );
                skipped.push(SkippedEmployee {
                    employee_id: employee.employee_id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        scheme = %header.scheme,
        period = %header.period,
        rows = totals.employees,
        skipped = skipped.len(),
        total = %totals.total,
        "Compliance report aggregated"
    );

    Ok(ComplianceReport {
        scheme: header.scheme,
        period: header.period,
        jurisdiction: header.jurisdiction,
        groups,
        totals,
        skipped,
    })
}

fn placement_of(employee: &EmployeeRecord, directory: Option<&OrgDirectory>) -> Placement {
    match directory {
        Some(directory) => directory.placement(employee.department_id.as_deref()),
        None => Placement {
            unit_name: ALL_UNITS.to_string(),
            department_name: ALL_DEPARTMENTS.to_string(),
        },
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{directory, employee};
    use super::*;
    use crate::calculation::compute_employee_breakdown;
    use crate::error::EngineError;
    use crate::models::PayMonth;
    use rust_decimal_macros::dec;

    fn header() -> ReportHeader {
        ReportHeader {
            scheme: ComplianceScheme::Pt,
            period: "January 2025".to_string(),
            jurisdiction: None,
        }
    }

    fn flat_row(employee: &EmployeeRecord) -> EngineResult<Option<ComplianceContributionRow>> {
        employee.compensation().validate()?;
        Ok(Some(ComplianceContributionRow::new(
            employee.employee_id.clone(),
            employee.full_name(),
            employee.salary,
            dec!(1),
            dec!(2),
        )))
    }

    #[test]
    fn test_empty_roster_gives_empty_report() {
        let report =
            collect_report(header(), &[], &RateTable::default(), None, flat_row).unwrap();
        assert!(report.groups.is_empty());
        assert_eq!(report.totals, ContributionTotals::default());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_inactive_and_unsalaried_excluded_silently() {
        let mut inactive = employee("E1", "d1", dec!(30000));
        inactive.is_active = false;
        let unsalaried = employee("E2", "d1", dec!(0));
        let active = employee("E3", "d1", dec!(30000));

        let report = collect_report(
            header(),
            &[inactive, unsalaried, active],
            &RateTable::default(),
            None,
            flat_row,
        )
        .unwrap();

        assert_eq!(report.row_count(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_invalid_employee_skipped_and_batch_continues() {
        let roster = vec![
            employee("E1", "d1", dec!(-100)),
            employee("E2", "d1", dec!(30000)),
        ];

        let report =
            collect_report(header(), &roster, &RateTable::default(), None, flat_row).unwrap();

        assert_eq!(report.row_count(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].employee_id, "E1");
        assert!(report.skipped[0].reason.contains("monthly_ctc"));
    }

    #[test]
    fn test_huge_salary_skipped_and_batch_continues() {
        let rates = RateTable::default();
        let month = PayMonth::new(2025, 6).unwrap();
        let roster = vec![
            employee("E1", "d1", Decimal::MAX),
            employee("E2", "d1", dec!(30000)),
        ];

        let report = collect_report(header(), &roster, &rates, None, |employee| {
            let breakdown = compute_employee_breakdown(&employee.compensation(), &rates, month)?;
            Ok(Some(ComplianceContributionRow::new(
                employee.employee_id.clone(),
                employee.full_name(),
                breakdown.gross,
                breakdown.professional_tax,
                Decimal::ZERO,
            )))
        })
        .unwrap();

        assert_eq!(report.row_count(), 1);
        assert_eq!(report.rows().next().unwrap().employee_id, "E2");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].employee_id, "E1");
        assert!(report.skipped[0].reason.contains("exceeds the maximum"));
    }

    #[test]
    fn test_rows_without_directory_share_one_group() {
        let roster = vec![
            employee("E1", "d1", dec!(30000)),
            employee("E2", "d3", dec!(30000)),
        ];

        let report =
            collect_report(header(), &roster, &RateTable::default(), None, flat_row).unwrap();

        assert_eq!(report.groups.len(), 1);
        let rows = report.department_rows(ALL_UNITS, ALL_DEPARTMENTS).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_grouping_two_units_two_departments() {
        let roster = vec![
            employee("E1", "d1", dec!(30000)),
            employee("E2", "d1", dec!(30000)),
            employee("E3", "d2", dec!(30000)),
            employee("E4", "d3", dec!(30000)),
            employee("E5", "d4", dec!(30000)),
        ];
        let directory = directory();

        let report = collect_report(
            header(),
            &roster,
            &RateTable::default(),
            Some(&directory),
            flat_row,
        )
        .unwrap();

        let units: Vec<&str> = report.groups.keys().map(String::as_str).collect();
        assert_eq!(units, vec!["Nashik Depot", "Pune Plant"]);
        for departments in report.groups.values() {
            assert_eq!(departments.len(), 2);
            assert!(departments.values().all(|rows| !rows.is_empty()));
        }
        assert_eq!(report.department_rows("Pune Plant", "Assembly").unwrap().len(), 2);
        assert_eq!(report.row_count(), roster.len());
        assert_eq!(report.totals.employees, roster.len());
        assert_eq!(report.totals.total, dec!(15));
    }

    #[test]
    fn test_unknown_department_grouped_as_unassigned() {
        let roster = vec![employee("E1", "missing", dec!(30000))];
        let directory = directory();

        let report = collect_report(
            header(),
            &roster,
            &RateTable::default(),
            Some(&directory),
            flat_row,
        )
        .unwrap();

        assert!(report.department_rows("Unassigned", "Unassigned").is_some());
    }

    #[test]
    fn test_invalid_rates_fail_whole_report() {
        let rates = RateTable {
            epf_percentage: dec!(-1),
            ..RateTable::default()
        };
        let result = collect_report(header(), &[], &rates, None, flat_row);
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }
}
