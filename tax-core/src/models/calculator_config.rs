use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settings for building a [`TaxCalculator`](crate::TaxCalculator).
///
/// `round` defaults to `true` when omitted from serialized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculatorConfig {
    pub rates: Vec<Decimal>,
    #[serde(default = "default_round")]
    pub round: bool,
}

fn default_round() -> bool {
    true
}

impl Default for TaxCalculatorConfig {
    fn default() -> Self {
        Self {
            rates: Vec::new(),
            round: default_round(),
        }
    }
}
