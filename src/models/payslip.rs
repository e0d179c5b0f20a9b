//! Payslip statement models.
//!
//! A [`PayslipStatement`] is the fixed-layout data a document renderer needs;
//! all amounts are already rounded and no arithmetic is left to the renderer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A labelled identity field in the payslip header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementField {
    /// Field label.
    pub label: String,
    /// Field value.
    pub value: String,
}

/// A labelled rupee amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Line label.
    pub label: String,
    /// Rupee-rounded amount.
    pub amount: Decimal,
}

/// One row of the two-column earnings/deductions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Earning shown in the left column.
    pub earning: Option<StatementLine>,
    /// Deduction shown in the right column.
    pub deduction: Option<StatementLine>,
}

/// A formatted monthly payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipStatement {
    /// Document title.
    pub title: String,
    /// Month label as supplied by the caller.
    pub month: String,
    /// Identity fields in display order.
    pub employee_details: Vec<StatementField>,
    /// Earnings and deductions side by side.
    pub rows: Vec<StatementRow>,
    /// Total earnings.
    pub gross_earnings: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net payable.
    pub net_pay: Decimal,
    /// Net payable in words.
    pub net_pay_in_words: String,
    /// Closing sentence stating the net pay.
    pub net_pay_sentence: String,
}

impl PayslipStatement {
    /// Iterates the earning lines in display order.
    pub fn earnings(&self) -> impl Iterator<Item = &StatementLine> {
        self.rows.iter().filter_map(|r| r.earning.as_ref())
    }

    /// Iterates the deduction lines in display order.
    pub fn deductions(&self) -> impl Iterator<Item = &StatementLine> {
        self.rows.iter().filter_map(|r| r.deduction.as_ref())
    }

    /// Looks up an identity field by label.
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.employee_details
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}
