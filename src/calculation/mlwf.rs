//! Maharashtra Labour Welfare Fund month gating.
//!
//! MLWF is collected in the configured months only (June and December by
//! default) unless the rate table sets `always_show_mlwf`, in which case it is
//! collected every month.

use crate::config::RateTable;
use crate::models::{PayMonth, ReportingPeriod};

/// Returns true when MLWF is levied for `month`.
pub fn mlwf_applies(month: PayMonth, rates: &RateTable) -> bool {
    rates.always_show_mlwf || rates.mlwf_months.contains(&month.month())
}

/// Counts the MLWF collection cycles falling inside a reporting period.
///
/// # Examples
///
/// ```
/// use statutory_payroll::calculation::mlwf_cycles;
/// use statutory_payroll::config::RateTable;
/// use statutory_payroll::models::ReportingPeriod;
///
/// let rates = RateTable::default();
/// assert_eq!(mlwf_cycles(&ReportingPeriod::Year { year: 2025 }, &rates), 2);
/// ```
pub fn mlwf_cycles(period: &ReportingPeriod, rates: &RateTable) -> u32 {
    period
        .months()
        .into_iter()
        .filter(|month| mlwf_applies(*month, rates))
        .count() as u32
}
