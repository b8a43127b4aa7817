use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{TaxCalculator, TaxCalculatorConfig};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading rate schedules.
#[derive(Debug, Error)]
pub enum RateScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Rate schedule '{0}' not found")]
    UnknownSchedule(String),
}

impl From<csv::Error> for RateScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        RateScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a rate schedule CSV file.
///
/// - `schedule`: Name grouping the rates that apply together (e.g., `BC`)
/// - `label`: Display name for the tax (e.g., `PST`)
/// - `rate`: The tax rate as a decimal fraction (e.g., 0.07 for 7%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateRecord {
    pub schedule: String,
    pub label: String,
    pub rate: Decimal,
}

/// A tax rate with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledRate {
    pub label: String,
    pub rate: Decimal,
}

/// The ordered rates of one named schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSchedule {
    pub name: String,
    pub rates: Vec<LabeledRate>,
}

impl RateSchedule {
    /// The bare rates, in file order.
    pub fn rates(&self) -> Vec<Decimal> {
        self.rates.iter().map(|r| r.rate).collect()
    }

    pub fn to_config(
        &self,
        round: bool,
    ) -> TaxCalculatorConfig {
        TaxCalculatorConfig {
            rates: self.rates(),
            round,
        }
    }

    pub fn calculator(
        &self,
        round: bool,
    ) -> TaxCalculator {
        TaxCalculator::from_config(self.to_config(round))
    }
}

/// Loader for rate schedules from CSV files.
///
/// Rows sharing a `schedule` value form one schedule; their order in the file
/// is the order of the rates, and so of the taxes in calculation results.
pub struct RateScheduleLoader;

impl RateScheduleLoader {
    /// Parse rate records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice. Surrounding whitespace in fields is ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RateRecord>, RateScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RateRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "Parsed rate schedule CSV");
        Ok(records)
    }

    /// Distinct schedule names in order of first appearance.
    pub fn schedule_names(records: &[RateRecord]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in records {
            if !names.contains(&record.schedule) {
                names.push(record.schedule.clone());
            }
        }
        names
    }

    /// Collect the rates of schedule `name` (ASCII case-insensitive).
    pub fn schedule(
        records: &[RateRecord],
        name: &str,
    ) -> Result<RateSchedule, RateScheduleLoaderError> {
        let matching: Vec<&RateRecord> = records
            .iter()
            .filter(|r| r.schedule.eq_ignore_ascii_case(name))
            .collect();

        let Some(first) = matching.first() else {
            return Err(RateScheduleLoaderError::UnknownSchedule(name.to_string()));
        };

        Ok(RateSchedule {
            name: first.schedule.clone(),
            rates: matching
                .iter()
                .map(|r| LabeledRate {
                    label: r.label.clone(),
                    rate: r.rate,
                })
                .collect(),
        })
    }
}
