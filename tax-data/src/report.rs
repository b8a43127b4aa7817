use rust_decimal::Decimal;
use tax_core::TaxBreakdown;

use crate::LabeledRate;

/// Renders a breakdown as plain text.
///
/// The first line is the positional result sequence, prefixed by the
/// calculation direction. One line per component follows, with each tax
/// labelled from `rates` (positionally; missing labels fall back to `tax`).
pub fn format_breakdown(
    breakdown: &TaxBreakdown,
    rates: &[LabeledRate],
) -> String {
    let sequence = breakdown
        .to_vec()
        .iter()
        .map(Decimal::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("{}: [{}]", breakdown.direction.as_str(), sequence),
        format!("subtotal: {}", breakdown.subtotal),
    ];
    for (index, tax) in breakdown.taxes.iter().enumerate() {
        match rates.get(index) {
            Some(rate) => lines.push(format!("{} ({}): {}", rate.label, rate.rate, tax)),
            None => lines.push(format!("tax: {tax}")),
        }
    }
    lines.push(format!("tax sum: {}", breakdown.tax_sum));
    lines.push(format!("total: {}", breakdown.total));

    lines.join("\n")
}
