//! Shared confidence scoring.

use crate::analysis::{ColumnStats, DataFormat};

/// Compute the confidence for a classification.
///
/// Base 1.0 scaled by data completeness, with a corroboration boost for
/// two cases where header signal and value statistics agree: identifier
/// columns whose values are almost all distinct, and year columns whose
/// range sits fully inside [1900, 2100]. Matcher-driven rules multiply
/// the returned value by their match ratio afterwards.
pub fn calculate_confidence(
    missing_value_ratio: f64,
    data_format: DataFormat,
    stats: Option<&ColumnStats>,
) -> f64 {
    let mut confidence = 1.0 * (1.0 - missing_value_ratio);

    if let Some(stats) = stats {
        match stats {
            ColumnStats::Text(text) => {
                if data_format == DataFormat::Identifier && text.unique_ratio > 0.9 {
                    confidence *= 1.2;
                }
            }
            ColumnStats::Number(num) => {
                if data_format == DataFormat::Year && num.min >= 1900.0 && num.max <= 2100.0 {
                    confidence *= 1.2;
                }
            }
        }
    }

    confidence.min(1.0)
}
