//! Numeric branch: subformat rules for columns whose values all parse
//! as numbers.

use crate::analysis::{ColumnAnalysis, ColumnStats, DataFormat, DataType};
use crate::input::ColumnInput;
use crate::stats::{compute_number_stats, NumberStats};

use super::confidence::calculate_confidence;
use super::ClassifierConfig;

/// Parse a single cell as a number. A comma is treated as a decimal
/// separator and normalized to a dot before parsing.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse every value; `None` if any value is non-numeric.
pub fn parse_all(values: &[&str]) -> Option<Vec<f64>> {
    values.iter().map(|v| parse_numeric(v)).collect()
}

fn all_integers(numbers: &[f64]) -> bool {
    numbers.iter().all(|n| n.fract() == 0.0)
}

/// Whether every value carries at most two decimal digits in its
/// written form.
fn max_two_decimal_places(values: &[&str]) -> bool {
    values.iter().all(|v| {
        let normalized = v.trim().replace(',', ".");
        match normalized.split_once('.') {
            Some((_, frac)) => frac.len() <= 2,
            None => true,
        }
    })
}

fn header_contains(header: &str, terms: &[&str]) -> bool {
    let lower = header.to_lowercase();
    terms.iter().any(|t| lower.contains(t))
}

/// Standard reasoning details for a numeric classification.
pub fn numeric_details(stats: &NumberStats) -> Vec<String> {
    vec![
        format!("Range: {} to {}", stats.min, stats.max),
        format!("Mean: {:.2}", stats.mean),
        format!("Median: {:.2}", stats.median),
        format!("Standard deviation: {:.2}", stats.std_dev),
    ]
}

/// Pick the numeric subformat, in priority order: year, probability,
/// rating, age, currency, then plain integer/decimal.
fn select_format(
    column: &ColumnInput,
    values: &[&str],
    numbers: &[f64],
    stats: &NumberStats,
) -> (DataFormat, &'static str) {
    let integral = all_integers(numbers);

    let is_year = integral
        && stats.min >= 1900.0
        && stats.max <= 2100.0
        && header_contains(&column.header, &["year", "yr"])
        && stats.unique_value_ratio <= 0.5
        && stats.skewness.abs() < 2.0;
    if is_year {
        return (DataFormat::Year, "Year values detected");
    }

    if stats.min >= 0.0 && stats.max <= 1.0 {
        return (DataFormat::Probability, "Probability values detected");
    }

    if integral && stats.min >= 0.0 && stats.max <= 5.0 {
        return (DataFormat::Rating, "Rating values detected");
    }

    let is_age = integral
        && stats.min >= 0.0
        && stats.max <= 150.0
        && header_contains(&column.header, &["age", "years"])
        && stats.mean >= 18.0
        && stats.mean <= 90.0
        && stats.std_dev <= 30.0;
    if is_age {
        return (DataFormat::Age, "Age values detected");
    }

    let is_currency = header_contains(&column.header, &["price", "cost", "amount", "payment"])
        && stats.min >= 0.0
        && max_two_decimal_places(values);
    if is_currency {
        return (DataFormat::Currency, "Currency values detected");
    }

    if integral {
        (DataFormat::Integer, "Integer values detected")
    } else {
        (DataFormat::Decimal, "Decimal numbers detected")
    }
}

/// Classify a column whose non-missing values all parse as numbers.
/// Returns `None` when any value is non-numeric, handing the column to
/// the text branch.
pub fn analyze_numeric(column: &ColumnInput, _config: &ClassifierConfig) -> Option<ColumnAnalysis> {
    let values = column.present_values();
    if values.is_empty() {
        return None;
    }
    let numbers = parse_all(&values)?;
    let stats = compute_number_stats(&numbers)?;

    let (format, main_reason) = select_format(column, &values, &numbers, &stats);
    let details = numeric_details(&stats);
    let stats = ColumnStats::Number(stats);
    let confidence = calculate_confidence(column.missing_value_ratio, format, Some(&stats));

    Some(ColumnAnalysis::new(
        &column.header,
        DataType::Number,
        format,
        confidence,
        column.missing_value_ratio,
        Some(stats),
        column.sample_values.clone(),
        main_reason,
        details,
    ))
}
