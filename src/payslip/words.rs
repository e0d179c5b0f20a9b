//! Rupee amounts in words, Indian numbering.

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Largest amount with a spelling: nine digits, up to 99 crore.
pub const MAX_AMOUNT_IN_WORDS: u64 = 999_999_999;

/// Spells a whole rupee amount using Crore, Lakh, Thousand and Hundred.
///
/// Returns `"Zero"` for 0 and `"Overflow"` for anything above nine digits.
///
/// # Examples
///
/// ```
/// use statutory_payroll::payslip::amount_in_words;
///
/// assert_eq!(amount_in_words(1500), "One Thousand Five Hundred");
/// assert_eq!(
///     amount_in_words(12345678),
///     "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred and Seventy Eight"
/// );
/// ```
pub fn amount_in_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }
    if amount > MAX_AMOUNT_IN_WORDS {
        return "Overflow".to_string();
    }

    let crore = amount / 10_000_000;
    let lakh = amount / 100_000 % 100;
    let thousand = amount / 1_000 % 100;
    let hundred = amount / 100 % 10;
    let rest = amount % 100;

    let mut parts: Vec<String> = Vec::new();
    for (value, unit) in [(crore, "Crore"), (lakh, "Lakh"), (thousand, "Thousand")] {
        if value > 0 {
            parts.push(format!("{} {}", two_digits(value), unit));
        }
    }
    if hundred > 0 {
        parts.push(format!("{} Hundred", ONES[hundred as usize]));
    }
    if rest > 0 {
        if parts.is_empty() {
            parts.push(two_digits(rest));
        } else {
            parts.push(format!("and {}", two_digits(rest)));
        }
    }

    parts.join(" ")
}

fn two_digits(value: u64) -> String {
    let value = value as usize;
    if value < 20 {
        ONES[value].to_string()
    } else if value % 10 == 0 {
        TENS[value / 10].to_string()
    } else {
        format!("{} {}", TENS[value / 10], ONES[value % 10])
    }
}
