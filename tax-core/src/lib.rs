pub mod calculations;
pub mod models;

pub use calculations::{TaxCalculator, TaxCalculatorError, forward, inverse};
pub use models::*;
