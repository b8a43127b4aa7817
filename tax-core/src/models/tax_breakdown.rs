use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which way a breakdown was calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationDirection {
    /// Subtotal in, total out.
    Forward,
    /// Total in, subtotal out.
    Inverse,
}

impl CalculationDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Inverse => "inverse",
        }
    }
}

/// Result of a forward or inverse tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub direction: CalculationDirection,

    /// Amount before taxes (input for forward, derived for inverse).
    pub subtotal: Decimal,

    /// Amount after taxes (derived for forward, input for inverse).
    pub total: Decimal,

    pub tax_sum: Decimal,

    /// Per-rate tax amounts, positionally matching the input rates.
    pub taxes: Vec<Decimal>,
}

impl TaxBreakdown {
    /// The derived headline amount: the total for a forward calculation, the
    /// subtotal for an inverse one.
    pub fn amount(&self) -> Decimal {
        match self.direction {
            CalculationDirection::Forward => self.total,
            CalculationDirection::Inverse => self.subtotal,
        }
    }

    /// Number of values in the result sequence (`taxes.len() + 2`).
    pub fn len(&self) -> usize {
        self.taxes.len() + 2
    }

    /// Returns the positional result sequence:
    /// `[amount, tax_sum, tax_1, .., tax_n]` where `amount` is
    /// [`TaxBreakdown::amount`].
    pub fn to_vec(&self) -> Vec<Decimal> {
        let mut values = Vec::with_capacity(self.len());
        values.push(self.amount());
        values.push(self.tax_sum);
        values.extend_from_slice(&self.taxes);
        values
    }
}

impl From<TaxBreakdown> for Vec<Decimal> {
    fn from(breakdown: TaxBreakdown) -> Self {
        breakdown.to_vec()
    }
}
