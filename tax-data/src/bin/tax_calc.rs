use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::CalculationDirection;
use tax_data::{RateScheduleLoader, calculate, combine_rates, format_breakdown, logging};
use tracing::info;

/// Calculate tax breakdowns from a subtotal, or extract them from a total.
///
/// Rates given with --rate come first, in command-line order, followed by
/// the rates of --schedule loaded from --file. The schedule CSV has the
/// columns:
/// - schedule: Name grouping rates that apply together (e.g., BC)
/// - label: Display name for the tax (e.g., PST)
/// - rate: The tax rate as a decimal (e.g., 0.07)
#[derive(Parser, Debug)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Tax rate as a decimal fraction (e.g., 0.05); repeat for several rates
    #[arg(short, long = "rate", global = true, allow_negative_numbers = true)]
    rates: Vec<Decimal>,

    /// Path to a CSV file of rate schedules
    #[arg(short, long, global = true, requires = "schedule")]
    file: Option<PathBuf>,

    /// Name of the schedule to use from --file
    #[arg(short, long, global = true, requires = "file")]
    schedule: Option<String>,

    /// Keep full precision instead of rounding to two decimal places
    #[arg(long, global = true, default_value_t = false)]
    no_round: bool,

    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the total and taxes from a pre-tax subtotal
    Forward {
        #[arg(allow_negative_numbers = true)]
        subtotal: Decimal,
    },

    /// Extract the subtotal and taxes from a tax-inclusive total
    Inverse {
        #[arg(allow_negative_numbers = true)]
        total: Decimal,
    },
}

impl Command {
    fn request(&self) -> (CalculationDirection, Decimal) {
        match *self {
            Command::Forward { subtotal } => (CalculationDirection::Forward, subtotal),
            Command::Inverse { total } => (CalculationDirection::Inverse, total),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.log_level.as_deref())?;

    let schedule = match (&args.file, &args.schedule) {
        (Some(path), Some(name)) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;

            let records = RateScheduleLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;

            let schedule = RateScheduleLoader::schedule(&records, name)
                .with_context(|| format!("Failed to load schedule from: {}", path.display()))?;

            info!(
                schedule = %schedule.name,
                rates = schedule.rates.len(),
                "Loaded rate schedule"
            );
            Some(schedule)
        }
        _ => None,
    };

    let rates = combine_rates(&args.rates, schedule);
    let (direction, amount) = args.command.request();

    let breakdown = calculate(direction, amount, &rates, !args.no_round)
        .context("Tax calculation failed")?;

    println!("{}", format_breakdown(&breakdown, &rates));

    Ok(())
}
