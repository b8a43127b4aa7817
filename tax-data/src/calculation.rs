use rust_decimal::Decimal;
use tax_core::{CalculationDirection, TaxBreakdown, TaxCalculator, TaxCalculatorError};

use crate::{LabeledRate, RateSchedule};

/// Label given to rates that come without a schedule.
pub const UNLABELED_RATE: &str = "rate";

/// Merges ad-hoc rates with a loaded schedule.
///
/// The ad-hoc rates come first, in the order given, followed by the
/// schedule's rates in file order.
pub fn combine_rates(
    rates: &[Decimal],
    schedule: Option<RateSchedule>,
) -> Vec<LabeledRate> {
    let mut combined: Vec<LabeledRate> = rates
        .iter()
        .map(|&rate| LabeledRate {
            label: UNLABELED_RATE.to_string(),
            rate,
        })
        .collect();

    if let Some(schedule) = schedule {
        combined.extend(schedule.rates);
    }
    combined
}

/// Runs one calculation in `direction` over `rates`.
///
/// # Errors
///
/// See [`tax_core::forward`] and [`tax_core::inverse`].
pub fn calculate(
    direction: CalculationDirection,
    amount: Decimal,
    rates: &[LabeledRate],
    round: bool,
) -> Result<TaxBreakdown, TaxCalculatorError> {
    let calculator = TaxCalculator::with_rounding(rates.iter().map(|r| r.rate).collect(), round);

    match direction {
        CalculationDirection::Forward => calculator.forward(amount, None),
        CalculationDirection::Inverse => calculator.inverse(amount, None),
    }
}
