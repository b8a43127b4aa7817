//! Common utility functions for tax calculations.
//!
//! This module provides the rounding primitive shared by the forward and
//! inverse calculations, plus conversion of host floating-point values into
//! [`Decimal`] amounts.

use rust_decimal::Decimal;

use crate::calculations::TaxCalculatorError;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places, always carrying a scale of two
/// (so `100` becomes `100.00`) unless its magnitude leaves no room for it.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// assert_eq!(round_half_up(dec!(100)).to_string(), "100.00");
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Rounds `value` with [`round_half_up`] when `round` is set, otherwise
/// returns it untouched.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_if;
///
/// assert_eq!(round_if(dec!(1.005), true), dec!(1.01));
/// assert_eq!(round_if(dec!(1.005), false), dec!(1.005));
/// ```
pub fn round_if(
    value: Decimal,
    round: bool,
) -> Decimal {
    if round { round_half_up(value) } else { value }
}

/// Converts a host `f64` into a [`Decimal`].
///
/// # Errors
///
/// Returns [`TaxCalculatorError::NonFiniteNumber`] for NaN and infinities, and
/// [`TaxCalculatorError::OutOfRange`] for finite values too large for a
/// [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::decimal_from_f64;
///
/// assert_eq!(decimal_from_f64(0.05).unwrap(), dec!(0.05));
/// assert!(decimal_from_f64(f64::NAN).is_err());
/// ```
pub fn decimal_from_f64(value: f64) -> Result<Decimal, TaxCalculatorError> {
    if !value.is_finite() {
        return Err(TaxCalculatorError::NonFiniteNumber(value.to_string()));
    }
    Decimal::try_from(value).map_err(|_| TaxCalculatorError::OutOfRange(value.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(10.005));

        assert_eq!(result, dec!(10.01));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-10.005));

        assert_eq!(result, dec!(-10.01)); // Away from zero
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        let result = round_half_up(dec!(112.00));

        assert_eq!(result, dec!(112.00));
    }

    #[test]
    fn round_half_up_handles_long_fractions() {
        let result = round_half_up(dec!(97.08737864077669902912621359));

        assert_eq!(result, dec!(97.09));
    }

    #[test]
    fn round_half_up_pads_to_two_decimal_places() {
        assert_eq!(round_half_up(dec!(100)).to_string(), "100.00");
        assert_eq!(round_half_up(dec!(-1.0)).to_string(), "-1.00");
        assert_eq!(round_half_up(dec!(12.345)).to_string(), "12.35");
    }

    #[test]
    fn round_half_up_handles_maximum_value() {
        let result = round_half_up(Decimal::MAX);

        assert_eq!(result, Decimal::MAX);
    }

    #[test]
    fn round_half_up_handles_small_values() {
        let result = round_half_up(dec!(0.0049));

        assert_eq!(result, dec!(0.00));
    }

    // =========================================================================
    // round_if tests
    // =========================================================================

    #[test]
    fn round_if_rounds_when_enabled() {
        let result = round_if(dec!(0.015), true);

        assert_eq!(result, dec!(0.02));
    }

    #[test]
    fn round_if_leaves_value_when_disabled() {
        let result = round_if(dec!(0.015), false);

        assert_eq!(result, dec!(0.015));
    }

    // =========================================================================
    // decimal_from_f64 tests
    // =========================================================================

    #[test]
    fn decimal_from_f64_converts_rates() {
        assert_eq!(decimal_from_f64(0.05), Ok(dec!(0.05)));
        assert_eq!(decimal_from_f64(0.07), Ok(dec!(0.07)));
    }

    #[test]
    fn decimal_from_f64_converts_amounts() {
        assert_eq!(decimal_from_f64(112.0), Ok(dec!(112)));
        assert_eq!(decimal_from_f64(-3.5), Ok(dec!(-3.5)));
    }

    #[test]
    fn decimal_from_f64_rejects_nan() {
        let result = decimal_from_f64(f64::NAN);

        assert_eq!(
            result,
            Err(TaxCalculatorError::NonFiniteNumber("NaN".to_string()))
        );
    }

    #[test]
    fn decimal_from_f64_rejects_infinity() {
        assert_eq!(
            decimal_from_f64(f64::INFINITY),
            Err(TaxCalculatorError::NonFiniteNumber("inf".to_string()))
        );
        assert_eq!(
            decimal_from_f64(f64::NEG_INFINITY),
            Err(TaxCalculatorError::NonFiniteNumber("-inf".to_string()))
        );
    }

    #[test]
    fn decimal_from_f64_rejects_values_beyond_decimal_range() {
        let result = decimal_from_f64(1e30);

        assert!(matches!(result, Err(TaxCalculatorError::OutOfRange(_))));
    }
}
