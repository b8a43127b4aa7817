mod calculator_config;
mod tax_breakdown;

pub use calculator_config::TaxCalculatorConfig;
pub use tax_breakdown::{CalculationDirection, TaxBreakdown};
