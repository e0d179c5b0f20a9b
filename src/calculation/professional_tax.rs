//! Professional Tax evaluation.

use rust_decimal::Decimal;

use crate::config::ProfessionalTaxPolicy;

/// Returns the monthly Professional Tax for a monthly gross.
///
/// A flat policy charges its amount to any employee with a positive gross.
/// A slab policy charges the tax of the first slab whose `gross_below`
/// exceeds `gross`, falling through to the open-ended last slab.
///
/// # Examples
///
/// ```
/// use statutory_payroll::calculation::professional_tax_for;
/// use statutory_payroll::config::{ProfessionalTaxPolicy, ProfessionalTaxSlab};
/// use rust_decimal::Decimal;
///
/// let slabs = ProfessionalTaxPolicy::Slabs(vec![
///     ProfessionalTaxSlab { gross_below: Some(Decimal::from(7500)), tax: Decimal::ZERO },
///     ProfessionalTaxSlab { gross_below: Some(Decimal::from(10000)), tax: Decimal::from(175) },
///     ProfessionalTaxSlab { gross_below: None, tax: Decimal::from(200) },
/// ]);
///
/// assert_eq!(professional_tax_for(Decimal::from(9000), &slabs), Decimal::from(175));
/// assert_eq!(professional_tax_for(Decimal::from(10000), &slabs), Decimal::from(200));
/// ```
pub fn professional_tax_for(gross: Decimal, policy: &ProfessionalTaxPolicy) -> Decimal {
    match policy {
        ProfessionalTaxPolicy::Flat(tax) => {
            if gross > Decimal::ZERO {
                *tax
            } else {
                Decimal::ZERO
            }
        }
        ProfessionalTaxPolicy::Slabs(slabs) => slabs
            .iter()
            .find(|slab| slab.gross_below.is_none_or(|bound| gross < bound))
            .map_or(Decimal::ZERO, |slab| slab.tax),
    }
}
