//! Common rounding helpers for currency calculations.
//!
//! Both helpers round midpoints away from zero, the usual convention for
//! customer-facing currency amounts.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(38.333)), dec!(38.33));
/// assert_eq!(round_half_up(dec!(38.335)), dec!(38.34));
/// assert_eq!(round_half_up(dec!(-38.335)), dec!(-38.34)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to the nearest whole currency unit.
///
/// Midpoints round away from zero, so `38.50` becomes `39` and `-38.50`
/// becomes `-39`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(38.33)), dec!(38));
/// assert_eq!(round_to_unit(dec!(38.50)), dec!(39));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
