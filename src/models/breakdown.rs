//! Salary breakdown models for the statutory payroll engine.
//!
//! This module contains the [`SalaryBreakdown`] produced by the breakdown
//! engine, and the [`AuditStep`] records that explain how each line was
//! derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_rupees;

/// The full earnings and deductions breakdown for one month's gross.
///
/// Values returned by the engine are exact. Use [`SalaryBreakdown::rounded`]
/// for the rupee-rounded copy shown on payslips and reports.
///
/// Invariants:
/// - `gross == basic + da + hra + conveyance + medical + special_allowance`
/// - `total_deductions == epf_employee + esic + professional_tax + mlwf_employee`
/// - `net == gross - total_deductions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Monthly gross.
    pub gross: Decimal,
    /// Basic pay.
    pub basic: Decimal,
    /// House Rent Allowance.
    pub hra: Decimal,
    /// Dearness Allowance.
    pub da: Decimal,
    /// Conveyance allowance.
    pub conveyance: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Balancing allowance; never negative.
    pub special_allowance: Decimal,
    /// Employee EPF deduction on capped Basic.
    pub epf_employee: Decimal,
    /// Employee ESI deduction; zero above the ESI wage ceiling.
    pub esic: Decimal,
    /// Professional Tax deduction.
    pub professional_tax: Decimal,
    /// Employee MLWF deduction; zero outside MLWF months.
    pub mlwf_employee: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Take-home pay.
    pub net: Decimal,
    /// Employer EPF cost on capped Basic.
    pub epf_employer: Decimal,
    /// Employer ESI cost.
    pub esic_employer: Decimal,
    /// Employer MLWF contribution.
    pub mlwf_employer: Decimal,
    /// Whether gross fell within the ESI wage ceiling.
    pub esi_applicable: bool,
    /// Whether MLWF was levied for the month.
    pub mlwf_applicable: bool,
}

impl SalaryBreakdown {
    /// Returns the display copy: each line rounded to whole rupees, with
    /// `gross`, `total_deductions` and `net` rounded from the exact sums.
    ///
    /// # Example
    ///
    /// ```
    /// use statutory_payroll::calculation::compute_breakdown;
    /// use statutory_payroll::config::RateTable;
    /// use statutory_payroll::models::PayMonth;
    /// use rust_decimal::Decimal;
    ///
    /// let month = PayMonth::new(2025, 1).unwrap();
    /// let breakdown = compute_breakdown(Decimal::from(21000), &RateTable::default(), month).unwrap();
    /// assert_eq!(breakdown.esic, Decimal::new(1575, 1));
    /// assert_eq!(breakdown.rounded().esic, Decimal::from(158));
    /// ```
    pub fn rounded(&self) -> SalaryBreakdown {
        SalaryBreakdown {
            gross: round_rupees(self.gross),
            basic: round_rupees(self.basic),
            hra: round_rupees(self.hra),
            da: round_rupees(self.da),
            conveyance: round_rupees(self.conveyance),
            medical: round_rupees(self.medical),
            special_allowance: round_rupees(self.special_allowance),
            epf_employee: round_rupees(self.epf_employee),
            esic: round_rupees(self.esic),
            professional_tax: round_rupees(self.professional_tax),
            mlwf_employee: round_rupees(self.mlwf_employee),
            total_deductions: round_rupees(self.total_deductions),
            net: round_rupees(self.net),
            epf_employer: round_rupees(self.epf_employer),
            esic_employer: round_rupees(self.esic_employer),
            mlwf_employer: round_rupees(self.mlwf_employer),
            esi_applicable: self.esi_applicable,
            mlwf_applicable: self.mlwf_applicable,
        }
    }

    /// Sum of the earnings lines.
    pub fn total_earnings(&self) -> Decimal {
        self.basic + self.da + self.hra + self.conveyance + self.medical + self.special_allowance
    }

    /// Gross plus the employer-side statutory contributions.
    pub fn employer_cost(&self) -> Decimal {
        self.gross + self.epf_employer + self.esic_employer + self.mlwf_employer
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statute or policy the rule comes from.
    pub statute_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A breakdown together with the trace of rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownExplanation {
    /// The exact breakdown.
    pub breakdown: SalaryBreakdown,
    /// The rupee-rounded breakdown for display.
    pub display: SalaryBreakdown,
    /// One step per rule applied, in order.
    pub steps: Vec<AuditStep>,
}
