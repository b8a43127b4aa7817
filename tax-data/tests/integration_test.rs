//! Integration tests for calculating taxes from loaded rate schedules.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::CalculationDirection;
use tax_data::{RateScheduleLoader, RateScheduleLoaderError, format_breakdown};

const TEST_CSV: &str = include_str!("../test-data/rate_schedules.csv");

#[test]
fn test_load_all_schedules() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    assert_eq!(records.len(), 6);
    assert_eq!(
        RateScheduleLoader::schedule_names(&records),
        vec!["ON", "BC", "QC", "AB"]
    );
}

#[test]
fn test_forward_with_two_rate_schedule() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let calculator = RateScheduleLoader::schedule(&records, "BC")
        .expect("Missing schedule")
        .calculator(true);

    let result = calculator.forward(dec!(100), None).expect("Calculation failed");

    assert_eq!(result.to_vec(), vec![dec!(112), dec!(12), dec!(5), dec!(7)]);
}

#[test]
fn test_inverse_with_two_rate_schedule() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let calculator = RateScheduleLoader::schedule(&records, "BC")
        .expect("Missing schedule")
        .calculator(true);

    let result = calculator.inverse(dec!(112), None).expect("Calculation failed");

    assert_eq!(result.direction, CalculationDirection::Inverse);
    assert_eq!(result.to_vec(), vec![dec!(100), dec!(12), dec!(5), dec!(7)]);
}

#[test]
fn test_forward_rounds_fractional_rate() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let calculator = RateScheduleLoader::schedule(&records, "QC")
        .expect("Missing schedule")
        .calculator(true);

    // QST: 100 * 0.09975 = 9.975, rounded half away from zero
    let result = calculator.forward(dec!(100), None).expect("Calculation failed");

    assert_eq!(result.taxes, vec![dec!(5.00), dec!(9.98)]);
    assert_eq!(result.tax_sum, dec!(14.98));
    assert_eq!(result.total, dec!(114.98));
}

#[test]
fn test_inverse_recovers_forward_subtotal() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let calculator = RateScheduleLoader::schedule(&records, "QC")
        .expect("Missing schedule")
        .calculator(true);

    // 114.98 / 1.14975 = 100.0043...
    let result = calculator.inverse(dec!(114.98), None).expect("Calculation failed");

    assert_eq!(result.subtotal, dec!(100.00));
    assert_eq!(result.tax_sum, dec!(14.98));
    assert_eq!(result.taxes, vec![dec!(5.00), dec!(9.98)]);
}

#[test]
fn test_single_rate_schedule_without_rounding() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let calculator = RateScheduleLoader::schedule(&records, "ON")
        .expect("Missing schedule")
        .calculator(false);

    let result = calculator.forward(dec!(59.99), None).expect("Calculation failed");

    assert_eq!(result.taxes, vec![dec!(7.7987)]);
    assert_eq!(result.total, dec!(67.7887));
}

#[test]
fn test_unknown_schedule() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    let result = RateScheduleLoader::schedule(&records, "NS");

    assert!(matches!(
        result,
        Err(RateScheduleLoaderError::UnknownSchedule(name)) if name == "NS"
    ));
}

#[test]
fn test_report_labels_taxes_from_schedule() {
    let records = RateScheduleLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let schedule = RateScheduleLoader::schedule(&records, "BC").expect("Missing schedule");

    let result = schedule
        .calculator(true)
        .forward(dec!(100), None)
        .expect("Calculation failed");
    let text = format_breakdown(&result, &schedule.rates);

    assert!(text.starts_with("forward: ["));
    assert!(text.contains("GST (0.05): 5"));
    assert!(text.contains("PST (0.07): 7"));
    assert_eq!(text.lines().count(), 6);
}
