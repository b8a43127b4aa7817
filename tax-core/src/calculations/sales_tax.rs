//! Forward and inverse tax breakdown calculations.
//!
//! Every rate applies independently to the same pre-tax base, so a
//! tax-inclusive total relates to its subtotal as
//! `total = subtotal * (1 + sum(rates))`. Two calculations are offered:
//!
//! | Calculation | Input     | Result sequence                       |
//! |-------------|-----------|---------------------------------------|
//! | [`forward`] | subtotal  | `[total, tax_sum, tax_1, .., tax_n]`    |
//! | [`inverse`] | total     | `[subtotal, tax_sum, tax_1, .., tax_n]` |
//!
//! # Rounding
//!
//! When rounding is enabled, every intermediate and final value is rounded
//! to two decimal places (half away from zero) at the point it is produced.
//! The tax sum in a forward calculation is therefore a sum of already-rounded
//! per-rate taxes, and the per-rate taxes in an inverse calculation are
//! derived from the already-rounded subtotal.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{forward, inverse};
//!
//! let rates = [dec!(0.05), dec!(0.07)];
//!
//! let breakdown = forward(dec!(100), &rates, true).unwrap();
//! assert_eq!(breakdown.to_vec(), vec![dec!(112), dec!(12), dec!(5), dec!(7)]);
//!
//! let breakdown = inverse(dec!(112), &rates, true).unwrap();
//! assert_eq!(breakdown.to_vec(), vec![dec!(100), dec!(12), dec!(5), dec!(7)]);
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{decimal_from_f64, round_if};
use crate::{CalculationDirection, TaxBreakdown, TaxCalculatorConfig};

/// Errors that can occur during tax breakdown calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxCalculatorError {
    /// A floating-point input was NaN or infinite.
    #[error("expected a finite number, got {0}")]
    NonFiniteNumber(String),

    /// A floating-point input is finite but does not fit in a decimal.
    #[error("number {0} is outside the representable decimal range")]
    OutOfRange(String),

    /// The rates sum to exactly -1, so `1 + sum(rates)` is zero and no
    /// subtotal can be extracted.
    #[error("tax rates sum to {rate_sum}, leaving a zero divisor for tax extraction")]
    ZeroRateDivisor { rate_sum: Decimal },

    /// An intermediate value exceeded the decimal range.
    #[error("arithmetic overflow while computing {step}")]
    Overflow { step: &'static str },
}

/// Calculates the tax-inclusive total and per-rate taxes from a subtotal.
///
/// # Arguments
///
/// * `subtotal` - The amount before taxes
/// * `rates` - Tax rates as fractions (0.05 = 5%), each applied to `subtotal`
/// * `round` - Round every value to two decimal places as it is produced
///
/// # Errors
///
/// Returns [`TaxCalculatorError::Overflow`] if any value exceeds the decimal
/// range.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::forward;
///
/// let breakdown = forward(dec!(19.999), &[], true).unwrap();
///
/// assert_eq!(breakdown.to_vec(), vec![dec!(20.00), dec!(0)]);
/// ```
pub fn forward(
    subtotal: Decimal,
    rates: &[Decimal],
    round: bool,
) -> Result<TaxBreakdown, TaxCalculatorError> {
    warn_negative_rates(rates);

    let subtotal = round_if(subtotal, round);

    let mut taxes = Vec::with_capacity(rates.len());
    let mut tax_sum = Decimal::ZERO;
    for &rate in rates {
        let tax = round_if(tax_amount(rate, subtotal)?, round);
        tax_sum = tax_sum
            .checked_add(tax)
            .ok_or(TaxCalculatorError::Overflow { step: "tax sum" })?;
        taxes.push(tax);
    }
    let tax_sum = round_if(tax_sum, round);

    let total = subtotal
        .checked_add(tax_sum)
        .ok_or(TaxCalculatorError::Overflow { step: "total" })?;
    let total = round_if(total, round);

    debug!(
        subtotal = %subtotal,
        tax_sum = %tax_sum,
        total = %total,
        rates = rates.len(),
        round,
        "Calculated taxes from subtotal"
    );

    Ok(TaxBreakdown {
        direction: CalculationDirection::Forward,
        subtotal,
        total,
        tax_sum,
        taxes,
    })
}

/// Extracts the subtotal and per-rate taxes from a tax-inclusive total.
///
/// The subtotal is `total / (1 + sum(rates))`. The tax sum and the per-rate
/// taxes are then derived from that subtotal, rounded first when `round` is
/// set.
///
/// Rate sums below zero are accepted; they produce a subtotal larger in
/// magnitude than the total (or of opposite sign once the sum drops below -1)
/// and are logged as warnings.
///
/// # Errors
///
/// Returns [`TaxCalculatorError::ZeroRateDivisor`] if the rates sum to exactly
/// -1, and [`TaxCalculatorError::Overflow`] if any value exceeds the decimal
/// range.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::inverse;
///
/// let breakdown = inverse(dec!(100), &[dec!(0.03)], true).unwrap();
///
/// assert_eq!(breakdown.subtotal, dec!(97.09));
/// assert_eq!(breakdown.tax_sum, dec!(2.91));
/// assert_eq!(breakdown.taxes, vec![dec!(2.91)]);
/// ```
pub fn inverse(
    total: Decimal,
    rates: &[Decimal],
    round: bool,
) -> Result<TaxBreakdown, TaxCalculatorError> {
    warn_negative_rates(rates);

    let total = round_if(total, round);

    let rate_sum = rates
        .iter()
        .try_fold(Decimal::ZERO, |acc, &rate| acc.checked_add(rate))
        .ok_or(TaxCalculatorError::Overflow { step: "rate sum" })?;
    let divisor = rate_sum
        .checked_add(Decimal::ONE)
        .ok_or(TaxCalculatorError::Overflow { step: "rate sum" })?;

    if divisor.is_zero() {
        warn!(rate_sum = %rate_sum, "Tax rates sum to -1; cannot extract subtotal");
        return Err(TaxCalculatorError::ZeroRateDivisor { rate_sum });
    }
    if rate_sum < Decimal::ZERO {
        warn!(
            rate_sum = %rate_sum,
            total = %total,
            "Tax rates sum below zero; extracted subtotal will exceed the total"
        );
    }

    let subtotal = total
        .checked_div(divisor)
        .ok_or(TaxCalculatorError::Overflow { step: "subtotal" })?;
    let subtotal = round_if(subtotal, round);

    let tax_sum = total
        .checked_sub(subtotal)
        .ok_or(TaxCalculatorError::Overflow { step: "tax sum" })?;
    let tax_sum = round_if(tax_sum, round);

    let taxes = rates
        .iter()
        .map(|&rate| tax_amount(rate, subtotal).map(|tax| round_if(tax, round)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        total = %total,
        subtotal = %subtotal,
        tax_sum = %tax_sum,
        rates = rates.len(),
        round,
        "Extracted taxes from total"
    );

    Ok(TaxBreakdown {
        direction: CalculationDirection::Inverse,
        subtotal,
        total,
        tax_sum,
        taxes,
    })
}

fn tax_amount(
    rate: Decimal,
    base: Decimal,
) -> Result<Decimal, TaxCalculatorError> {
    rate.checked_mul(base)
        .ok_or(TaxCalculatorError::Overflow { step: "tax amount" })
}

fn warn_negative_rates(rates: &[Decimal]) {
    for (index, rate) in rates.iter().enumerate() {
        if rate.is_sign_negative() && !rate.is_zero() {
            warn!(index, rate = %rate, "Negative tax rate");
        }
    }
}

/// Calculator bound to a fixed list of tax rates and a default rounding mode.
///
/// The rates and rounding mode are set at construction and never change.
/// [`TaxCalculator::forward`] and [`TaxCalculator::inverse`] delegate to the
/// free functions of the same name, using the stored rounding mode unless a
/// per-call override is given.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TaxCalculator;
///
/// let calculator = TaxCalculator::new(vec![dec!(0.05), dec!(0.07)]);
///
/// let breakdown = calculator.forward(dec!(100), None).unwrap();
/// assert_eq!(breakdown.total, dec!(112));
///
/// let breakdown = calculator.inverse(dec!(112), None).unwrap();
/// assert_eq!(breakdown.subtotal, dec!(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxCalculator {
    rates: Vec<Decimal>,
    round: bool,
}

impl TaxCalculator {
    /// Creates a calculator that rounds to two decimal places by default.
    pub fn new(rates: Vec<Decimal>) -> Self {
        Self::with_rounding(rates, true)
    }

    /// Creates a calculator with an explicit default rounding mode.
    pub fn with_rounding(
        rates: Vec<Decimal>,
        round: bool,
    ) -> Self {
        Self { rates, round }
    }

    /// Creates a calculator from a [`TaxCalculatorConfig`].
    pub fn from_config(config: TaxCalculatorConfig) -> Self {
        Self::with_rounding(config.rates, config.round)
    }

    /// Creates a calculator from floating-point rates.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculatorError::NonFiniteNumber`] or
    /// [`TaxCalculatorError::OutOfRange`] for the first rate that cannot be
    /// represented as a decimal.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::TaxCalculator;
    ///
    /// let calculator = TaxCalculator::from_f64_rates(&[0.05, 0.07], true).unwrap();
    /// assert_eq!(calculator.rates(), &[dec!(0.05), dec!(0.07)]);
    ///
    /// assert!(TaxCalculator::from_f64_rates(&[f64::NAN], true).is_err());
    /// ```
    pub fn from_f64_rates(
        rates: &[f64],
        round: bool,
    ) -> Result<Self, TaxCalculatorError> {
        let rates = rates
            .iter()
            .map(|&rate| decimal_from_f64(rate))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_rounding(rates, round))
    }

    /// The tax rates, in the order their taxes appear in results.
    pub fn rates(&self) -> &[Decimal] {
        &self.rates
    }

    /// The default rounding mode.
    pub fn rounds(&self) -> bool {
        self.round
    }

    /// Calculates taxes from a subtotal using the stored rates.
    ///
    /// `round` overrides the stored rounding mode when `Some`.
    ///
    /// # Errors
    ///
    /// See [`forward`].
    pub fn forward(
        &self,
        subtotal: Decimal,
        round: Option<bool>,
    ) -> Result<TaxBreakdown, TaxCalculatorError> {
        forward(subtotal, &self.rates, round.unwrap_or(self.round))
    }

    /// Extracts taxes from a total using the stored rates.
    ///
    /// `round` overrides the stored rounding mode when `Some`.
    ///
    /// # Errors
    ///
    /// See [`inverse`].
    pub fn inverse(
        &self,
        total: Decimal,
        round: Option<bool>,
    ) -> Result<TaxBreakdown, TaxCalculatorError> {
        inverse(total, &self.rates, round.unwrap_or(self.round))
    }
}

impl From<TaxCalculatorConfig> for TaxCalculator {
    fn from(config: TaxCalculatorConfig) -> Self {
        Self::from_config(config)
    }
}
