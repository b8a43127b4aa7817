//! Tax breakdown calculations.
//!
//! This module provides the forward (subtotal to total) and inverse
//! (total to subtotal) calculations over a flat list of independent tax
//! rates, along with the shared rounding helpers they rely on.

pub mod common;
pub mod sales_tax;

pub use sales_tax::{TaxCalculator, TaxCalculatorError, forward, inverse};
