//! Compliance report models.
//!
//! Every statutory scheme report has the same shape: contribution rows
//! grouped by unit and then department, report-wide totals, and the list of
//! employees that could not be computed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The statutory schemes with a compliance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceScheme {
    /// Employees' Provident Fund.
    Pf,
    /// Employees' State Insurance.
    Esi,
    /// Professional Tax.
    Pt,
    /// Maharashtra Labour Welfare Fund.
    Mlwf,
    /// Statutory bonus.
    Bonus,
}

impl ComplianceScheme {
    /// Report title for the scheme.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Pf => "Provident Fund Contribution",
            Self::Esi => "ESI Contribution",
            Self::Pt => "Professional Tax",
            Self::Mlwf => "Labour Welfare Fund Contribution",
            Self::Bonus => "Statutory Bonus",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Pf => "pf",
            Self::Esi => "esi",
            Self::Pt => "pt",
            Self::Mlwf => "mlwf",
            Self::Bonus => "bonus",
        }
    }
}

impl fmt::Display for ComplianceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ComplianceScheme {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pf" | "epf" => Ok(Self::Pf),
            "esi" | "esic" => Ok(Self::Esi),
            "pt" => Ok(Self::Pt),
            "mlwf" | "lwf" => Ok(Self::Mlwf),
            "bonus" => Ok(Self::Bonus),
            _ => Err(EngineError::validation(
                "scheme",
                format!("unknown compliance scheme '{}'", s),
            )),
        }
    }
}

/// An employer-side charge reported alongside the main contribution,
/// such as EDLI or PF administration charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCharge {
    /// Short machine-readable code (e.g. "edli").
    pub code: String,
    /// Description for report columns.
    pub description: String,
    /// Rupee-rounded amount.
    pub amount: Decimal,
}

/// One employee's contribution under a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceContributionRow {
    /// Employee code.
    pub employee_id: String,
    /// Employee full name.
    pub employee_name: String,
    /// The wage the contribution was computed on.
    pub gross_or_basis: Decimal,
    /// Employee share.
    pub employee_contribution: Decimal,
    /// Employer share.
    pub employer_contribution: Decimal,
    /// Further employer-side charges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_charges: Vec<AdditionalCharge>,
    /// Employee share, employer share and additional charges combined.
    pub total: Decimal,
}

impl ComplianceContributionRow {
    /// Creates a row whose total is the two shares combined.
    pub fn new(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        gross_or_basis: Decimal,
        employee_contribution: Decimal,
        employer_contribution: Decimal,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            gross_or_basis,
            employee_contribution,
            employer_contribution,
            additional_charges: Vec::new(),
            total: employee_contribution + employer_contribution,
        }
    }

    /// Adds a charge and folds it into the row total.
    pub fn with_charge(
        mut self,
        code: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        self.total += amount;
        self.additional_charges.push(AdditionalCharge {
            code: code.into(),
            description: description.into(),
            amount,
        });
        self
    }

    /// Sum of the additional charges.
    pub fn additional_total(&self) -> Decimal {
        self.additional_charges.iter().map(|c| c.amount).sum()
    }
}

/// An employee left out of a report because their input was invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// Employee code.
    pub employee_id: String,
    /// Why the employee could not be computed.
    pub reason: String,
}

/// Report-wide sums.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTotals {
    /// Number of rows in the report.
    pub employees: usize,
    /// Sum of the contribution bases.
    pub gross_or_basis: Decimal,
    /// Sum of employee shares.
    pub employee_contribution: Decimal,
    /// Sum of employer shares.
    pub employer_contribution: Decimal,
    /// Sum of additional charges.
    pub additional_charges: Decimal,
    /// Grand total.
    pub total: Decimal,
}

impl ContributionTotals {
    /// Folds one row into the totals.
    pub fn add(&mut self, row: &ComplianceContributionRow) {
        self.employees += 1;
        self.gross_or_basis += row.gross_or_basis;
        self.employee_contribution += row.employee_contribution;
        self.employer_contribution += row.employer_contribution;
        self.additional_charges += row.additional_total();
        self.total += row.total;
    }
}

/// Rows keyed by unit name, then department name.
pub type ContributionGroups = BTreeMap<String, BTreeMap<String, Vec<ComplianceContributionRow>>>;

/// A compliance report for one scheme and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The scheme reported on.
    pub scheme: ComplianceScheme,
    /// Label of the period covered.
    pub period: String,
    /// Jurisdiction label, for state-levied schemes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// Rows grouped by unit and department.
    pub groups: ContributionGroups,
    /// Report-wide totals.
    pub totals: ContributionTotals,
    /// Employees whose input could not be computed.
    pub skipped: Vec<SkippedEmployee>,
}

impl ComplianceReport {
    /// Iterates every row in unit, department order.
    pub fn rows(&self) -> impl Iterator<Item = &ComplianceContributionRow> {
        self.groups.values().flat_map(|d| d.values()).flatten()
    }

    /// Number of rows in the report.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Rows for one department of one unit.
    pub fn department_rows(
        &self,
        unit_name: &str,
        department_name: &str,
    ) -> Option<&[ComplianceContributionRow]> {
        self.groups
            .get(unit_name)?
            .get(department_name)
            .map(Vec::as_slice)
    }
}
