//! Payslip statements.
//!
//! Turns a computed breakdown into the fixed two-column layout printed on a
//! payslip, including the net pay spelled out in words.

mod formatter;
mod words;

pub use formatter::{PAYSLIP_TITLE, format_payslip};
pub use words::{MAX_AMOUNT_IN_WORDS, amount_in_words};
