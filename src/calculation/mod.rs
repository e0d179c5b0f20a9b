//! Calculation logic for the statutory payroll engine.
//!
//! This module contains the salary breakdown engine together with the rules
//! it applies: rupee rounding, Professional Tax slabs, and Labour Welfare
//! Fund month gating.

mod breakdown;
mod mlwf;
mod professional_tax;
mod rounding;

pub use breakdown::{
    CONVEYANCE_ALLOWANCE, MEDICAL_ALLOWANCE, compute_breakdown, compute_employee_breakdown,
    explain_breakdown,
};
pub use mlwf::{mlwf_applies, mlwf_cycles};
pub use professional_tax::professional_tax_for;
pub use rounding::round_rupees;

pub(crate) use rounding::percent_of;
