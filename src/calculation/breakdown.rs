//! Payroll breakdown engine.
//!
//! This module derives the full earnings and deductions breakdown for a
//! monthly gross. Every report and payslip in the crate goes through
//! [`compute_breakdown`]; none of them re-derive these formulas.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::config::{DA_PERCENTAGE, ProfessionalTaxPolicy, RateTable};
use crate::error::EngineResult;
use crate::models::{
    AuditStep, BreakdownExplanation, EmployeeCompensationInput, PayMonth, SalaryBreakdown,
    check_monthly_ctc,
};

use super::mlwf::mlwf_applies;
use super::professional_tax::professional_tax_for;
use super::rounding::percent_of;

/// Monthly conveyance allowance.
pub const CONVEYANCE_ALLOWANCE: Decimal = dec!(1600);

/// Monthly medical allowance.
pub const MEDICAL_ALLOWANCE: Decimal = dec!(1250);

/// Computes the salary breakdown for a monthly gross.
///
/// Steps, all on exact values:
/// 1. Basic = gross × basic%; HRA = Basic × HRA%; DA = Basic × 10%
/// 2. Conveyance (1,600) and medical (1,250) are paid out of whatever gross
///    remains after Basic, DA and HRA, so low salaries receive less of them
/// 3. Special allowance is the remainder, which is never negative
/// 4. EPF = min(Basic, EPF ceiling) × EPF%
/// 5. ESI = gross × ESI% when gross is at or below the ESI ceiling, else 0
/// 6. Professional Tax from the configured flat amount or slab table
/// 7. MLWF when `month` is an MLWF month (or `always_show_mlwf` is set) and
///    gross is above zero
///
/// # Arguments
///
/// * `monthly_ctc` - The full monthly gross
/// * `rates` - The statutory rate table
/// * `month` - The month being paid, which gates MLWF
///
/// # Errors
///
/// - `Validation` when `monthly_ctc` is negative or above
///   [`MAX_MONTHLY_CTC`](crate::models::MAX_MONTHLY_CTC), or the rate table
///   is invalid
/// - `Configuration` when the Professional Tax slab table is unusable
///
/// # Examples
///
/// ```
/// use statutory_payroll::calculation::compute_breakdown;
/// use statutory_payroll::config::RateTable;
/// use statutory_payroll::models::PayMonth;
/// use rust_decimal::Decimal;
///
/// let month = PayMonth::new(2025, 1).unwrap();
/// let breakdown = compute_breakdown(Decimal::from(30000), &RateTable::default(), month).unwrap();
///
/// assert_eq!(breakdown.basic, Decimal::from(15000));
/// assert_eq!(breakdown.special_allowance, Decimal::from(3150));
/// assert_eq!(breakdown.epf_employee, Decimal::from(1800));
/// assert_eq!(breakdown.net, Decimal::from(28000));
/// ```
pub fn compute_breakdown(
    monthly_ctc: Decimal,
    rates: &RateTable,
    month: PayMonth,
) -> EngineResult<SalaryBreakdown> {
    check_monthly_ctc(monthly_ctc)?;
    rates.validate()?;

    let gross = monthly_ctc;
    let basic = percent_of(gross, rates.basic_salary_percentage);
    let hra = percent_of(basic, rates.hra_percentage);
    let da = percent_of(basic, DA_PERCENTAGE);

    // A validated table keeps Basic + DA + HRA within gross.
    let headroom = (gross - basic - da - hra).max(Decimal::ZERO);
    let conveyance = CONVEYANCE_ALLOWANCE.min(headroom);
    let medical = MEDICAL_ALLOWANCE.min(headroom - conveyance);
    let special_allowance = headroom - conveyance - medical;

    let epf_wage = basic.min(rates.epf_wage_ceiling);
    let epf_employee = percent_of(epf_wage, rates.epf_percentage);
    let epf_employer = percent_of(epf_wage, rates.epf_employer_percentage);

    let esi_applicable = gross <= rates.esi_wage_ceiling;
    let (esic, esic_employer) = if esi_applicable {
        (
            percent_of(gross, rates.esic_employee_percentage),
            percent_of(gross, rates.esic_employer_percentage),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let professional_tax = professional_tax_for(gross, &rates.professional_tax);

    // Nothing is collected from a month without pay.
    let mlwf_applicable = gross > Decimal::ZERO && mlwf_applies(month, rates);
    let (mlwf_employee, mlwf_employer) = if mlwf_applicable {
        (rates.mlwf_employee_amount, rates.mlwf_employer_amount)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let total_deductions = epf_employee + esic + professional_tax + mlwf_employee;
    let net = gross - total_deductions;

    Ok(SalaryBreakdown {
        gross,
        basic,
        hra,
        da,
        conveyance,
        medical,
        special_allowance,
        epf_employee,
        esic,
        professional_tax,
        mlwf_employee,
        total_deductions,
        net,
        epf_employer,
        esic_employer,
        mlwf_employer,
        esi_applicable,
        mlwf_applicable,
    })
}

/// Computes the breakdown for an employee, pro-rating the monthly CTC by
/// paid or loss-of-pay days first.
///
/// # Errors
///
/// `Validation` when the input is negative or its day counts exceed the month,
/// plus everything [`compute_breakdown`] rejects.
pub fn compute_employee_breakdown(
    input: &EmployeeCompensationInput,
    rates: &RateTable,
    month: PayMonth,
) -> EngineResult<SalaryBreakdown> {
    let gross = input.payable_gross(month.days_in_month())?;
    compute_breakdown(gross, rates, month)
}

/// Computes the breakdown and records an audit step for every rule applied.
pub fn explain_breakdown(
    monthly_ctc: Decimal,
    rates: &RateTable,
    month: PayMonth,
) -> EngineResult<BreakdownExplanation> {
    let breakdown = compute_breakdown(monthly_ctc, rates, month)?;
    let b = &breakdown;
    let mut steps: Vec<AuditStep> = Vec::new();

    let mut record = |rule_id: &str,
                      rule_name: &str,
                      statute_ref: &str,
                      input: serde_json::Value,
                      output: serde_json::Value,
                      reasoning: String| {
        let step_number = steps.len() as u32 + 1;
        steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            statute_ref: statute_ref.to_string(),
            input,
            output,
            reasoning,
        });
    };

    record(
        "basic_allocation",
        "Basic Pay",
        "Salary structure",
        json!({
            "gross": b.gross.normalize().to_string(),
            "basic_salary_percentage": rates.basic_salary_percentage.normalize().to_string()
        }),
        json!({ "basic": b.basic.normalize().to_string() }),
        format!(
            "{}% of gross {} = {}",
            rates.basic_salary_percentage.normalize(),
            b.gross.normalize(),
            b.basic.normalize()
        ),
    );

    record(
        "hra_da_allocation",
        "HRA and Dearness Allowance",
        "Salary structure",
        json!({
            "basic": b.basic.normalize().to_string(),
            "hra_percentage": rates.hra_percentage.normalize().to_string(),
            "da_percentage": DA_PERCENTAGE.to_string()
        }),
        json!({
            "hra": b.hra.normalize().to_string(),
            "da": b.da.normalize().to_string()
        }),
        format!(
            "HRA {}% and DA {}% of Basic {} = {} and {}",
            rates.hra_percentage.normalize(),
            DA_PERCENTAGE,
            b.basic.normalize(),
            b.hra.normalize(),
            b.da.normalize()
        ),
    );

    let fixed_reduced = b.conveyance < CONVEYANCE_ALLOWANCE || b.medical < MEDICAL_ALLOWANCE;
    record(
        "fixed_allowances",
        "Conveyance and Medical Allowances",
        "Salary structure",
        json!({
            "conveyance_allowance": CONVEYANCE_ALLOWANCE.to_string(),
            "medical_allowance": MEDICAL_ALLOWANCE.to_string()
        }),
        json!({
            "conveyance": b.conveyance.normalize().to_string(),
            "medical": b.medical.normalize().to_string(),
            "reduced_to_fit_gross": fixed_reduced
        }),
        if fixed_reduced {
            format!(
                "Gross left after Basic, DA and HRA only covers conveyance {} and medical {}",
                b.conveyance.normalize(),
                b.medical.normalize()
            )
        } else {
            format!(
                "Flat conveyance {} and medical {}",
                CONVEYANCE_ALLOWANCE, MEDICAL_ALLOWANCE
            )
        },
    );

    record(
        "special_allowance",
        "Special Allowance",
        "Salary structure",
        json!({ "gross": b.gross.normalize().to_string() }),
        json!({ "special_allowance": b.special_allowance.normalize().to_string() }),
        format!(
            "Gross less all other earnings leaves {}",
            b.special_allowance.normalize()
        ),
    );

    let epf_capped = b.basic > rates.epf_wage_ceiling;
    record(
        "epf",
        "Employees' Provident Fund",
        "EPF & MP Act 1952",
        json!({
            "basic": b.basic.normalize().to_string(),
            "epf_wage_ceiling": rates.epf_wage_ceiling.normalize().to_string(),
            "epf_percentage": rates.epf_percentage.normalize().to_string()
        }),
        json!({
            "epf_employee": b.epf_employee.normalize().to_string(),
            "epf_employer": b.epf_employer.normalize().to_string(),
            "ceiling_applied": epf_capped
        }),
        if epf_capped {
            format!(
                "Basic {} capped at {}; {}% = {}",
                b.basic.normalize(),
                rates.epf_wage_ceiling.normalize(),
                rates.epf_percentage.normalize(),
                b.epf_employee.normalize()
            )
        } else {
            format!(
                "{}% of Basic {} = {}",
                rates.epf_percentage.normalize(),
                b.basic.normalize(),
                b.epf_employee.normalize()
            )
        },
    );

    record(
        "esi",
        "Employees' State Insurance",
        "ESI Act 1948",
        json!({
            "gross": b.gross.normalize().to_string(),
            "esi_wage_ceiling": rates.esi_wage_ceiling.normalize().to_string(),
            "esic_employee_percentage": rates.esic_employee_percentage.normalize().to_string()
        }),
        json!({
            "applicable": b.esi_applicable,
            "esic": b.esic.normalize().to_string(),
            "esic_employer": b.esic_employer.normalize().to_string()
        }),
        if b.esi_applicable {
            format!(
                "Gross {} within ceiling {}; {}% = {}",
                b.gross.normalize(),
                rates.esi_wage_ceiling.normalize(),
                rates.esic_employee_percentage.normalize(),
                b.esic.normalize()
            )
        } else {
            format!(
                "Gross {} above ceiling {} - not covered by ESI",
                b.gross.normalize(),
                rates.esi_wage_ceiling.normalize()
            )
        },
    );

    let pt_policy = match &rates.professional_tax {
        ProfessionalTaxPolicy::Flat(_) => "flat",
        ProfessionalTaxPolicy::Slabs(_) => "slabs",
    };
    record(
        "professional_tax",
        "Professional Tax",
        &format!("{} Professional Tax", rates.pt_jurisdiction),
        json!({
            "gross": b.gross.normalize().to_string(),
            "policy": pt_policy
        }),
        json!({ "professional_tax": b.professional_tax.normalize().to_string() }),
        format!(
            "{} policy on gross {} = {}",
            pt_policy,
            b.gross.normalize(),
            b.professional_tax.normalize()
        ),
    );

    record(
        "mlwf",
        "Labour Welfare Fund",
        "Maharashtra Labour Welfare Fund Act 1953",
        json!({
            "month": month.to_string(),
            "mlwf_months": rates.mlwf_months,
            "always_show_mlwf": rates.always_show_mlwf
        }),
        json!({
            "applicable": b.mlwf_applicable,
            "mlwf_employee": b.mlwf_employee.normalize().to_string(),
            "mlwf_employer": b.mlwf_employer.normalize().to_string()
        }),
        if b.mlwf_applicable {
            format!("MLWF collected for {}", month.label())
        } else if mlwf_applies(month, rates) {
            format!("No pay in {}, so no MLWF is collected", month.label())
        } else {
            format!("{} is not an MLWF month", month.label())
        },
    );

    record(
        "net_pay",
        "Net Pay",
        "Salary structure",
        json!({
            "gross": b.gross.normalize().to_string(),
            "total_deductions": b.total_deductions.normalize().to_string()
        }),
        json!({ "net": b.net.normalize().to_string() }),
        format!(
            "{} - {} = {}",
            b.gross.normalize(),
            b.total_deductions.normalize(),
            b.net.normalize()
        ),
    );

    Ok(BreakdownExplanation {
        display: breakdown.rounded(),
        breakdown,
        steps,
    })
}
