//! Payslip statement layout.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{
    EmployeeIdentity, PayslipStatement, SalaryBreakdown, StatementField, StatementLine,
    StatementRow,
};

use super::words::amount_in_words;

/// Title printed at the top of every payslip.
pub const PAYSLIP_TITLE: &str = "Salary Slip";

const NOT_AVAILABLE: &str = "N/A";

/// Lays out a payslip from an identity and a computed breakdown.
///
/// Amounts come from [`SalaryBreakdown::rounded`]; the formatter performs no
/// payroll arithmetic of its own. Identity fields that are missing print as
/// "N/A".
///
/// # Example
///
/// ```
/// use statutory_payroll::calculation::compute_breakdown;
/// use statutory_payroll::config::RateTable;
/// use statutory_payroll::models::{EmployeeIdentity, PayMonth};
/// use statutory_payroll::payslip::format_payslip;
/// use rust_decimal::Decimal;
///
/// let month = PayMonth::new(2025, 1).unwrap();
/// let breakdown = compute_breakdown(Decimal::from(30000), &RateTable::default(), month).unwrap();
/// let identity = EmployeeIdentity {
///     employee_id: "EMP001".to_string(),
///     name: "Asha Patil".to_string(),
///     ..EmployeeIdentity::default()
/// };
///
/// let payslip = format_payslip(&identity, &breakdown, &month.label());
/// assert_eq!(payslip.net_pay_in_words, "Rupees Twenty Eight Thousand Only");
/// ```
pub fn format_payslip(
    identity: &EmployeeIdentity,
    breakdown: &SalaryBreakdown,
    month: &str,
) -> PayslipStatement {
    let display = breakdown.rounded();

    let earnings = [
        ("Basic", display.basic),
        ("Dearness Allowance", display.da),
        ("House Rent Allowance", display.hra),
        ("Conveyance Allowance", display.conveyance),
        ("Medical Allowance", display.medical),
        ("Special Allowance", display.special_allowance),
    ];
    let deductions = [
        ("Provident Fund", display.epf_employee),
        ("ESIC", display.esic),
        ("Professional Tax", display.professional_tax),
        ("MLWF", display.mlwf_employee),
    ];

    let row_count = earnings.len().max(deductions.len());
    let rows = (0..row_count)
        .map(|i| StatementRow {
            earning: earnings.get(i).map(|(label, amount)| line(label, *amount)),
            deduction: deductions.get(i).map(|(label, amount)| line(label, *amount)),
        })
        .collect();

    let net_pay_in_words = rupees_in_words(display.net);
    let net_pay_sentence = format!(
        "Net salary payable for {} is Rs. {} ({}).",
        month, display.net, net_pay_in_words
    );

    PayslipStatement {
        title: PAYSLIP_TITLE.to_string(),
        month: month.to_string(),
        employee_details: employee_details(identity),
        rows,
        gross_earnings: display.gross,
        total_deductions: display.total_deductions,
        net_pay: display.net,
        net_pay_in_words,
        net_pay_sentence,
    }
}

fn line(label: &str, amount: Decimal) -> StatementLine {
    StatementLine {
        label: label.to_string(),
        amount,
    }
}

fn employee_details(identity: &EmployeeIdentity) -> Vec<StatementField> {
    let or_na = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };
    let join_date = identity
        .join_date
        .map(|date| date.format("%d %b %Y").to_string());

    [
        ("Employee ID", or_na(Some(identity.employee_id.as_str()))),
        ("Name", or_na(Some(identity.name.as_str()))),
        ("Designation", or_na(identity.position.as_deref())),
        ("Department", or_na(identity.department.as_deref())),
        ("Unit", or_na(identity.unit.as_deref())),
        ("Work Location", or_na(identity.work_location.as_deref())),
        ("Date of Joining", or_na(join_date.as_deref())),
        ("Bank Account No.", or_na(identity.bank_account_number.as_deref())),
        ("UAN", or_na(identity.uan_number.as_deref())),
        ("ESIC No.", or_na(identity.esic_number.as_deref())),
        ("PAN", or_na(identity.pan_card.as_deref())),
    ]
    .into_iter()
    .map(|(label, value)| StatementField {
        label: label.to_string(),
        value,
    })
    .collect()
}

fn rupees_in_words(net: Decimal) -> String {
    let words = amount_in_words(net.abs().to_u64().unwrap_or(u64::MAX));
    if net < Decimal::ZERO {
        format!("Rupees Minus {} Only", words)
    } else {
        format!("Rupees {} Only", words)
    }
}
