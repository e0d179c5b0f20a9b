//! Rate table types for statutory payroll computation.
//!
//! This module contains the strongly-typed [`RateTable`] that is deserialized
//! from YAML configuration files or from the JSON settings object supplied by
//! the surrounding application.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_MONTHLY_CTC;

/// One row of a Professional Tax slab table.
///
/// Slabs are evaluated first-match: the first slab whose `gross_below`
/// exceeds the monthly gross supplies the tax. The final slab carries no
/// upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxSlab {
    /// Exclusive upper bound on monthly gross; `None` for the open-ended last slab.
    #[serde(default, alias = "grossBelow", skip_serializing_if = "Option::is_none")]
    pub gross_below: Option<Decimal>,
    /// Monthly tax for gross amounts falling in this slab.
    pub tax: Decimal,
}

/// How Professional Tax is levied.
///
/// Deserializes from either a bare amount (flat policy) or a list of slabs.
///
/// # Example
///
/// ```
/// use statutory_payroll::config::ProfessionalTaxPolicy;
/// use rust_decimal::Decimal;
///
/// let flat: ProfessionalTaxPolicy = serde_json::from_str("200").unwrap();
/// assert_eq!(flat, ProfessionalTaxPolicy::Flat(Decimal::from(200)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfessionalTaxPolicy {
    /// The same monthly amount for every salaried employee.
    Flat(Decimal),
    /// A slab table keyed on monthly gross.
    Slabs(Vec<ProfessionalTaxSlab>),
}

impl ProfessionalTaxPolicy {
    /// Checks the policy is usable: non-negative taxes, and for slab tables a
    /// strictly ascending sequence of bounds ending in one open-ended slab.
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            Self::Flat(tax) => check_tax(*tax)?,
            Self::Slabs(slabs) => {
                let Some((last, bounded)) = slabs.split_last() else {
                    return Err(EngineError::configuration(
                        "professional tax slab table is empty",
                    ));
                };

                let mut previous = Decimal::ZERO;
                for (index, slab) in bounded.iter().enumerate() {
                    let bound = slab.gross_below.ok_or_else(|| {
                        EngineError::configuration(format!(
                            "professional tax slab {} has no upper bound but is not the last slab",
                            index + 1
                        ))
                    })?;
                    if bound <= previous {
                        return Err(EngineError::configuration(format!(
                            "professional tax slab {} bound {} does not ascend past {}",
                            index + 1,
                            bound,
                            previous
                        )));
                    }
                    previous = bound;
                }

                if let Some(bound) = last.gross_below {
                    return Err(EngineError::configuration(format!(
                        "last professional tax slab is capped at {}; gross at or above it is not covered",
                        bound
                    )));
                }

                for slab in slabs {
                    check_tax(slab.tax)?;
                }
            }
        }
        Ok(())
    }
}

const MAX_PF_MONTH_DAYS: Decimal = dec!(31);

fn check_tax(tax: Decimal) -> EngineResult<()> {
    if tax < Decimal::ZERO {
        return Err(EngineError::validation(
            "professional_tax",
            format!("tax {} must not be negative", tax),
        ));
    }
    if tax > MAX_MONTHLY_CTC {
        return Err(EngineError::validation(
            "professional_tax",
            format!("tax {} exceeds the maximum of {}", tax, MAX_MONTHLY_CTC),
        ));
    }
    Ok(())
}

/// The statutory rate table every computation reads.
///
/// Any field absent from the source document falls back to the statutory
/// default from [`RateTable::default`], never to zero. Keys are accepted in
/// either `snake_case` or the `camelCase` used by the settings API.
///
/// # Example
///
/// ```
/// use statutory_payroll::config::RateTable;
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::from_json(r#"{ "hraPercentage": 40 }"#).unwrap();
/// assert_eq!(rates.hra_percentage, Decimal::from(40));
/// assert_eq!(rates.epf_percentage, Decimal::from(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Percentage of gross assigned to Basic.
    #[serde(alias = "basicSalaryPercentage")]
    pub basic_salary_percentage: Decimal,
    /// Percentage of Basic assigned to HRA.
    #[serde(alias = "hraPercentage")]
    pub hra_percentage: Decimal,
    /// Employee EPF rate applied to capped Basic.
    #[serde(alias = "epfPercentage")]
    pub epf_percentage: Decimal,
    /// Employer-side EPF cost rate (informational).
    #[serde(alias = "epfEmployerPercentage")]
    pub epf_employer_percentage: Decimal,
    /// Employee ESI rate applied to gross.
    #[serde(alias = "esicEmployeePercentage")]
    pub esic_employee_percentage: Decimal,
    /// Employer ESI rate applied to gross.
    #[serde(alias = "esicEmployerPercentage")]
    pub esic_employer_percentage: Decimal,
    /// Professional Tax policy, flat or slab based.
    #[serde(alias = "professionalTax")]
    pub professional_tax: ProfessionalTaxPolicy,
    /// Jurisdiction label printed on the Professional Tax report.
    #[serde(alias = "ptJurisdiction")]
    pub pt_jurisdiction: String,
    /// Basic above this amount is not subject to EPF.
    #[serde(alias = "epfWageCeiling")]
    pub epf_wage_ceiling: Decimal,
    /// Gross above this amount is exempt from ESI entirely.
    #[serde(alias = "esiWageCeiling")]
    pub esi_wage_ceiling: Decimal,
    /// Employee MLWF contribution per cycle.
    #[serde(alias = "mlwfEmployeeAmount")]
    pub mlwf_employee_amount: Decimal,
    /// Employer MLWF contribution per cycle.
    #[serde(alias = "mlwfEmployerAmount")]
    pub mlwf_employer_amount: Decimal,
    /// Calendar months (1-12) in which MLWF is collected.
    #[serde(alias = "mlwfMonths")]
    pub mlwf_months: BTreeSet<u32>,
    /// Charge MLWF in every month instead of only the configured months.
    #[serde(alias = "alwaysShowMlwf")]
    pub always_show_mlwf: bool,
    /// Employer EDLI rate on the PF wage.
    #[serde(alias = "edliPercentage")]
    pub edli_percentage: Decimal,
    /// Employer PF administration charges on the PF wage.
    #[serde(alias = "pfAdminChargesPercentage")]
    pub pf_admin_charges_percentage: Decimal,
    /// Paid days the PF report pro-rates monthly CTC to.
    #[serde(alias = "pfPaidDays")]
    pub pf_paid_days: Decimal,
    /// Month length the PF report pro-rates monthly CTC from.
    #[serde(alias = "pfMonthDays")]
    pub pf_month_days: Decimal,
    /// Statutory minimum bonus rate.
    #[serde(alias = "bonusPercentage")]
    pub bonus_percentage: Decimal,
    /// Monthly Basic above this amount does not count towards bonus.
    #[serde(alias = "bonusWageCeiling")]
    pub bonus_wage_ceiling: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            basic_salary_percentage: dec!(50),
            hra_percentage: dec!(50),
            epf_percentage: dec!(12),
            epf_employer_percentage: dec!(13),
            esic_employee_percentage: dec!(0.75),
            esic_employer_percentage: dec!(3.25),
            professional_tax: ProfessionalTaxPolicy::Flat(dec!(200)),
            pt_jurisdiction: "Maharashtra".to_string(),
            epf_wage_ceiling: dec!(15000),
            esi_wage_ceiling: dec!(21000),
            mlwf_employee_amount: dec!(25),
            mlwf_employer_amount: dec!(75),
            mlwf_months: BTreeSet::from([6, 12]),
            always_show_mlwf: false,
            edli_percentage: dec!(0.5),
            pf_admin_charges_percentage: dec!(0.5),
            pf_paid_days: dec!(25),
            pf_month_days: dec!(30),
            bonus_percentage: dec!(8.33),
            bonus_wage_ceiling: dec!(7000),
        }
    }
}

/// Fixed share of Basic paid as Dearness Allowance.
pub(crate) const DA_PERCENTAGE: Decimal = dec!(10);

impl RateTable {
    /// Parses a rate table from the JSON settings object and validates it.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let table: RateTable = serde_json::from_str(json)
            .map_err(|e| EngineError::validation("rate_table", e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Checks the invariants every computation relies on.
    ///
    /// # Errors
    ///
    /// - `Validation` for percentages outside 0..=100, negative amounts or
    ///   amounts above [`MAX_MONTHLY_CTC`], non-positive wage ceilings or day
    ///   counts, a PF standard month longer than 31 days, out-of-range MLWF
    ///   months, or a Basic/HRA split that would allocate more than the whole
    ///   gross
    /// - `Configuration` for a Professional Tax slab table that does not
    ///   cover every non-negative gross exactly once
    pub fn validate(&self) -> EngineResult<()> {
        let non_negative = [
            ("basic_salary_percentage", self.basic_salary_percentage),
            ("hra_percentage", self.hra_percentage),
            ("epf_percentage", self.epf_percentage),
            ("epf_employer_percentage", self.epf_employer_percentage),
            ("esic_employee_percentage", self.esic_employee_percentage),
            ("esic_employer_percentage", self.esic_employer_percentage),
            ("edli_percentage", self.edli_percentage),
            ("pf_admin_charges_percentage", self.pf_admin_charges_percentage),
            ("bonus_percentage", self.bonus_percentage),
            ("mlwf_employee_amount", self.mlwf_employee_amount),
            ("mlwf_employer_amount", self.mlwf_employer_amount),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(EngineError::validation(
                    field,
                    format!("{} must not be negative", value),
                ));
            }
        }

        let percentages = [
            ("basic_salary_percentage", self.basic_salary_percentage),
            ("hra_percentage", self.hra_percentage),
            ("epf_percentage", self.epf_percentage),
            ("epf_employer_percentage", self.epf_employer_percentage),
            ("esic_employee_percentage", self.esic_employee_percentage),
            ("esic_employer_percentage", self.esic_employer_percentage),
            ("edli_percentage", self.edli_percentage),
            ("pf_admin_charges_percentage", self.pf_admin_charges_percentage),
            ("bonus_percentage", self.bonus_percentage),
        ];
        if let Some((field, value)) = percentages
            .into_iter()
            .find(|(_, value)| *value > Decimal::ONE_HUNDRED)
        {
            return Err(EngineError::validation(
                field,
                format!("{}% exceeds 100%", value),
            ));
        }

        for (field, value) in [
            ("mlwf_employee_amount", self.mlwf_employee_amount),
            ("mlwf_employer_amount", self.mlwf_employer_amount),
        ] {
            if value > MAX_MONTHLY_CTC {
                return Err(EngineError::validation(
                    field,
                    format!("{} exceeds the maximum of {}", value, MAX_MONTHLY_CTC),
                ));
            }
        }

        let positive = [
            ("epf_wage_ceiling", self.epf_wage_ceiling),
            ("esi_wage_ceiling", self.esi_wage_ceiling),
            ("bonus_wage_ceiling", self.bonus_wage_ceiling),
            ("pf_paid_days", self.pf_paid_days),
            ("pf_month_days", self.pf_month_days),
        ];
        for (field, value) in positive {
            if value <= Decimal::ZERO {
                return Err(EngineError::validation(
                    field,
                    format!("{} must be positive", value),
                ));
            }
        }

        if self.pf_month_days > MAX_PF_MONTH_DAYS {
            return Err(EngineError::validation(
                "pf_month_days",
                format!("{} is longer than any month", self.pf_month_days),
            ));
        }

        if self.pf_paid_days > self.pf_month_days {
            return Err(EngineError::validation(
                "pf_paid_days",
                format!(
                    "{} paid days exceed the {} day month",
                    self.pf_paid_days, self.pf_month_days
                ),
            ));
        }

        // Basic + DA + HRA as a percentage of gross.
        let allocated = self.basic_salary_percentage
            * (Decimal::ONE_HUNDRED + self.hra_percentage + DA_PERCENTAGE)
            / Decimal::ONE_HUNDRED;
        if allocated > Decimal::ONE_HUNDRED {
            return Err(EngineError::validation(
                "basic_salary_percentage",
                format!(
                    "Basic, DA and HRA together take {}% of gross",
                    allocated.normalize()
                ),
            ));
        }

        if let Some(month) = self.mlwf_months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(EngineError::validation(
                "mlwf_months",
                format!("{} is not a calendar month", month),
            ));
        }

        self.professional_tax.validate()
    }
}
