//! Display formatting for USD amounts.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Formats a decimal amount as a USD string: two decimal places, `$` prefix,
/// comma-grouped thousands. Negative amounts carry the sign before the `$`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::models::currency::format_usd;
///
/// assert_eq!(format_usd(dec!(1234.5)), "$1,234.50");
/// assert_eq!(format_usd(dec!(30)), "$30.00");
/// ```
pub fn format_usd(amount: Decimal) -> String {
    let cents = round_half_up(amount);
    let negative = cents.is_sign_negative() && !cents.is_zero();
    let text = format!("{:.2}", cents.abs());

    // `{:.2}` guarantees a "<digits>.<dd>" shape.
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn formats_whole_amounts_with_two_decimals() {
        assert_eq!(format_usd(dec!(30)), "$30.00");
    }

    #[test]
    fn formats_cents() {
        assert_eq!(format_usd(dec!(48.3)), "$48.30");
    }

    #[test]
    fn rounds_half_up_to_cents() {
        assert_eq!(format_usd(dec!(38.335)), "$38.34");
        assert_eq!(format_usd(dec!(115) / dec!(3)), "$38.33");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_usd(dec!(1234567.89)), "$1,234,567.89");
    }

    #[test]
    fn does_not_group_small_amounts() {
        assert_eq!(format_usd(dec!(999.99)), "$999.99");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
    }

    #[test]
    fn places_sign_before_currency_symbol() {
        assert_eq!(format_usd(dec!(-1234.5)), "-$1,234.50");
    }

    #[test]
    fn negative_amount_rounding_to_zero_drops_sign() {
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }
}
