//! Core data models for the statutory payroll engine.
//!
//! This module contains the plain data consumed and produced by the engine.

mod breakdown;
mod compliance;
mod employee;
mod organisation;
mod pay_month;
mod payslip;

pub use breakdown::{AuditStep, BreakdownExplanation, SalaryBreakdown};
pub use compliance::{
    AdditionalCharge, ComplianceContributionRow, ComplianceReport, ComplianceScheme,
    ContributionGroups, ContributionTotals, SkippedEmployee,
};
pub use employee::{
    EmployeeCompensationInput, EmployeeIdentity, EmployeeRecord, MAX_MONTHLY_CTC,
};
pub(crate) use employee::check_monthly_ctc;
pub use organisation::{Department, OrgDirectory, Placement, UNASSIGNED, Unit};
pub use pay_month::{PayMonth, ReportingPeriod};
pub use payslip::{PayslipStatement, StatementField, StatementLine, StatementRow};
