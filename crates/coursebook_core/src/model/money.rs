//! Display helpers for monetary amounts.

/// Renders an amount as `$1,234.56`; negatives render as `-$1,234.56`.
///
/// Non-finite values render as-is (`inf`, `-inf`, `NaN`).
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // `-0.00` after rounding stays unsigned.
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn groups_thousands_and_keeps_two_decimals() {
        assert_eq!(format_currency(1500.0), "$1,500.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(200.0), "$200.00");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn negative_amounts_carry_leading_sign() {
        assert_eq!(format_currency(-1500.0), "-$1,500.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn non_finite_amounts_render_as_is() {
        assert_eq!(format_currency(f64::INFINITY), "inf");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_currency(f64::NAN), "NaN");
    }
}
