//! Employee roster records and the inputs derived from them.
//!
//! [`EmployeeRecord`] mirrors a row of the employee roster supplied by the
//! surrounding application. The engine works from the narrower
//! [`EmployeeCompensationInput`] and [`EmployeeIdentity`] projections.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::organisation::{OrgDirectory, UNASSIGNED};

/// Largest monthly CTC the engine accepts (one lakh crore rupees).
///
/// Every product the engine forms from a CTC at or below this bound stays
/// well inside `Decimal` range.
pub const MAX_MONTHLY_CTC: Decimal = dec!(1000000000000);

/// Rejects a monthly CTC that is negative or above [`MAX_MONTHLY_CTC`].
pub(crate) fn check_monthly_ctc(monthly_ctc: Decimal) -> EngineResult<()> {
    if monthly_ctc < Decimal::ZERO {
        return Err(EngineError::validation(
            "monthly_ctc",
            format!("{} must not be negative", monthly_ctc),
        ));
    }
    if monthly_ctc > MAX_MONTHLY_CTC {
        return Err(EngineError::validation(
            "monthly_ctc",
            format!("{} exceeds the maximum of {}", monthly_ctc, MAX_MONTHLY_CTC),
        ));
    }
    Ok(())
}

/// An employee as supplied by the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Internal record identifier.
    pub id: String,
    /// Given name.
    #[serde(alias = "firstName")]
    pub first_name: String,
    /// Family name.
    #[serde(default, alias = "lastName")]
    pub last_name: String,
    /// Employee code printed on reports and payslips.
    #[serde(alias = "employeeId")]
    pub employee_id: String,
    /// Department the employee belongs to.
    #[serde(default, alias = "departmentId")]
    pub department_id: Option<String>,
    /// Monthly CTC.
    pub salary: Decimal,
    /// Whether the employee is currently employed.
    #[serde(default = "default_active", alias = "isActive")]
    pub is_active: bool,
    /// Days paid this month, when attendance is tracked.
    #[serde(default, alias = "paidDays")]
    pub paid_days: Option<Decimal>,
    /// Loss-of-pay days this month, when attendance is tracked.
    #[serde(default, alias = "lopDays")]
    pub lop_days: Option<Decimal>,
    /// Salary bank account.
    #[serde(default, alias = "bankAccountNumber")]
    pub bank_account_number: Option<String>,
    /// EPF Universal Account Number.
    #[serde(default, alias = "uanNumber")]
    pub uan_number: Option<String>,
    /// ESIC insurance number.
    #[serde(default, alias = "esicNumber")]
    pub esic_number: Option<String>,
    /// Permanent Account Number.
    #[serde(default, alias = "panCard")]
    pub pan_card: Option<String>,
    /// Place of work.
    #[serde(default, alias = "workLocation")]
    pub work_location: Option<String>,
    /// Designation.
    #[serde(default)]
    pub position: Option<String>,
    /// Date of joining.
    #[serde(default, alias = "joinDate")]
    pub join_date: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl EmployeeRecord {
    /// Returns "First Last", tolerating an empty last name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Projects the compensation fields the breakdown engine consumes.
    pub fn compensation(&self) -> EmployeeCompensationInput {
        EmployeeCompensationInput {
            employee_id: self.employee_id.clone(),
            monthly_ctc: self.salary,
            paid_days: self.paid_days,
            lop_days: self.lop_days,
        }
    }

    /// Projects the identity fields printed on a payslip.
    pub fn identity(&self, directory: Option<&OrgDirectory>) -> EmployeeIdentity {
        let (unit, department) = match directory {
            Some(directory) => {
                let placement = directory.placement(self.department_id.as_deref());
                (Some(placement.unit_name), Some(placement.department_name))
            }
            None => (None, None),
        };

        EmployeeIdentity {
            employee_id: self.employee_id.clone(),
            name: self.full_name(),
            position: self.position.clone(),
            department: department.filter(|d| d != UNASSIGNED),
            unit: unit.filter(|u| u != UNASSIGNED),
            work_location: self.work_location.clone(),
            join_date: self.join_date,
            bank_account_number: self.bank_account_number.clone(),
            uan_number: self.uan_number.clone(),
            esic_number: self.esic_number.clone(),
            pan_card: self.pan_card.clone(),
        }
    }
}

/// The compensation fields a breakdown is computed from.
///
/// `monthly_ctc` is the full monthly gross. When `paid_days` or `lop_days`
/// is present the gross is pro-rated over the calendar month.
///
/// # Example
///
/// ```
/// use statutory_payroll::models::EmployeeCompensationInput;
/// use rust_decimal::Decimal;
///
/// let input = EmployeeCompensationInput {
///     employee_id: "EMP001".to_string(),
///     monthly_ctc: Decimal::from(30000),
///     paid_days: None,
///     lop_days: Some(Decimal::from(3)),
/// };
/// assert_eq!(input.payable_gross(30).unwrap(), Decimal::from(27000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompensationInput {
    /// Employee code.
    pub employee_id: String,
    /// Monthly CTC, treated as the full monthly gross.
    pub monthly_ctc: Decimal,
    /// Days paid this month; takes precedence over `lop_days`.
    #[serde(default)]
    pub paid_days: Option<Decimal>,
    /// Loss-of-pay days this month.
    #[serde(default)]
    pub lop_days: Option<Decimal>,
}

impl EmployeeCompensationInput {
    /// Rejects negative or out-of-range compensation and negative day counts.
    pub fn validate(&self) -> EngineResult<()> {
        check_monthly_ctc(self.monthly_ctc)?;
        for (field, days) in [("paid_days", self.paid_days), ("lop_days", self.lop_days)] {
            if let Some(days) = days.filter(|d| *d < Decimal::ZERO) {
                return Err(EngineError::validation(
                    field,
                    format!("{} must not be negative", days),
                ));
            }
        }
        Ok(())
    }

    /// Returns the gross payable for a month of `days_in_month` days.
    ///
    /// # Errors
    ///
    /// `Validation` when the input is negative or the day counts exceed the month.
    pub fn payable_gross(&self, days_in_month: u32) -> EngineResult<Decimal> {
        self.validate()?;
        let month_days = Decimal::from(days_in_month);

        let paid = match (self.paid_days, self.lop_days) {
            (Some(paid), _) => {
                if paid > month_days {
                    return Err(EngineError::validation(
                        "paid_days",
                        format!("{} exceeds the {} day month", paid, days_in_month),
                    ));
                }
                paid
            }
            (None, Some(lop)) => {
                if lop > month_days {
                    return Err(EngineError::validation(
                        "lop_days",
                        format!("{} exceeds the {} day month", lop, days_in_month),
                    ));
                }
                month_days - lop
            }
            (None, None) => return Ok(self.monthly_ctc),
        };

        Ok(self.monthly_ctc * paid / month_days)
    }
}

/// Identity fields printed in a payslip header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeIdentity {
    /// Employee code.
    pub employee_id: String,
    /// Full name.
    pub name: String,
    /// Designation.
    #[serde(default)]
    pub position: Option<String>,
    /// Department name.
    #[serde(default)]
    pub department: Option<String>,
    /// Unit name.
    #[serde(default)]
    pub unit: Option<String>,
    /// Place of work.
    #[serde(default)]
    pub work_location: Option<String>,
    /// Date of joining.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// Salary bank account.
    #[serde(default)]
    pub bank_account_number: Option<String>,
    /// EPF Universal Account Number.
    #[serde(default)]
    pub uan_number: Option<String>,
    /// ESIC insurance number.
    #[serde(default)]
    pub esic_number: Option<String>,
    /// Permanent Account Number.
    #[serde(default)]
    pub pan_card: Option<String>,
}
