//! Header-name overrides.
//!
//! A small set of header terms is trusted ahead of value inspection:
//! a column literally named `user_id` is an identifier even when its
//! values happen to be plain integers. The override yields to the
//! missing-data bailout, so a sparse column stays inconclusive no
//! matter what its header promises.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{ColumnAnalysis, ColumnStats, DataFormat, DataType};
use crate::input::ColumnInput;
use crate::stats::compute_number_stats;

use super::numeric::{numeric_details, parse_all};
use super::ClassifierConfig;

static ID_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bid\b|id$").unwrap());
static LATITUDE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(lat|latitude)\b").unwrap());
static LONGITUDE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(long|longitude|lng)\b").unwrap());
static YEAR_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(year|yr)\b").unwrap());
static AGE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(age|years?)\b").unwrap());
static FINANCIAL_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(price|cost|balance|fee|payment|salary|wage|income|revenue|budget)\b")
        .unwrap()
});

/// Recognized header term and the format it implies.
fn match_header(header: &str) -> Option<(DataFormat, &'static str)> {
    if ID_HEADER.is_match(header) {
        Some((DataFormat::Identifier, "identifier"))
    } else if LATITUDE_HEADER.is_match(header) {
        Some((DataFormat::Latitude, "latitude"))
    } else if LONGITUDE_HEADER.is_match(header) {
        Some((DataFormat::Longitude, "longitude"))
    } else if YEAR_HEADER.is_match(header) {
        Some((DataFormat::Year, "year"))
    } else if AGE_HEADER.is_match(header) {
        Some((DataFormat::Age, "age"))
    } else if FINANCIAL_HEADER.is_match(header) {
        Some((DataFormat::Currency, "financial"))
    } else {
        None
    }
}

/// Classify from the header name alone.
///
/// Returns `None` when no trusted term matches, or when the column has
/// too many missing values for a header claim to stand on its own.
pub fn analyze_header(column: &ColumnInput, config: &ClassifierConfig) -> Option<ColumnAnalysis> {
    if column.missing_value_ratio > config.missing_threshold {
        return None;
    }

    let (format, term) = match_header(&column.header)?;
    let data_type = format.data_type();
    let main_reason = format!("Column name indicates {} data", term);

    // When the values corroborate the numeric formats, attach their
    // statistics so the reasoning can cite the observed range.
    let mut stats = None;
    let mut details = vec![format!("Header '{}' matched {} pattern", column.header, term)];
    if data_type == DataType::Number {
        let values = column.present_values();
        if let Some(numbers) = parse_all(&values) {
            if let Some(number_stats) = compute_number_stats(&numbers) {
                details.extend(numeric_details(&number_stats));
                stats = Some(ColumnStats::Number(number_stats));
            }
        }
    }

    // Trusted terms classify at full confidence; completeness is only a
    // gate here, not a scale.
    Some(ColumnAnalysis::new(
        &column.header,
        data_type,
        format,
        1.0,
        column.missing_value_ratio,
        stats,
        column.sample_values.clone(),
        main_reason,
        details,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(header: &str, values: &[&str]) -> ColumnInput {
        ColumnInput::new(
            header,
            values.iter().map(|s| s.to_string()).collect(),
            5,
        )
        .unwrap()
    }

    fn config() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    #[test]
    fn test_id_header() {
        let col = column("user_id", &["1", "2", "3"]);
        let analysis = analyze_header(&col, &config()).unwrap();
        assert_eq!(analysis.data_format, DataFormat::Identifier);
        assert_eq!(analysis.data_type, DataType::String);
    }

    #[test]
    fn test_full_confidence_with_blanks_under_threshold() {
        // One blank of five stays under the bailout gate and does not
        // dilute the trusted-header confidence
        let col = column("user_id", &["u1", "u2", "u3", "u4", ""]);
        let analysis = analyze_header(&col, &config()).unwrap();
        assert_eq!(analysis.data_format, DataFormat::Identifier);
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn test_id_suffix() {
        let col = column("orderid", &["a1", "a2"]);
        let analysis = analyze_header(&col, &config()).unwrap();
        assert_eq!(analysis.data_format, DataFormat::Identifier);
    }

    #[test]
    fn test_year_header_attaches_stats() {
        let col = column("Birth Year", &["1985", "1990", "1978", "2001"]);
        let analysis = analyze_header(&col, &config()).unwrap();
        assert_eq!(analysis.data_format, DataFormat::Year);
        assert_eq!(analysis.data_type, DataType::Number);

        let stats = analysis.stats.as_ref().unwrap().as_number().unwrap();
        assert_eq!(stats.min, 1978.0);
        assert_eq!(stats.max, 2001.0);
        assert!(analysis
            .reasoning
            .details
            .iter()
            .any(|d| d.contains("1978 to 2001")));
    }

    #[test]
    fn test_year_header_non_numeric_values() {
        // The override still fires, but without stats to attach
        let col = column("year", &["early", "late"]);
        let analysis = analyze_header(&col, &config()).unwrap();
        assert_eq!(analysis.data_format, DataFormat::Year);
        assert!(analysis.stats.is_none());
    }

    #[test]
    fn test_latitude_and_longitude() {
        let lat = column("lat", &["52.52", "48.86"]);
        let lng = column("longitude", &["13.40", "2.35"]);
        assert_eq!(
            analyze_header(&lat, &config()).unwrap().data_format,
            DataFormat::Latitude
        );
        assert_eq!(
            analyze_header(&lng, &config()).unwrap().data_format,
            DataFormat::Longitude
        );
    }

    #[test]
    fn test_financial_header() {
        let col = column("monthly_salary", &["3200", "4100"]);
        let analysis = analyze_header(&col, &config()).unwrap();
        assert_eq!(analysis.data_format, DataFormat::Currency);
        assert_eq!(analysis.data_type, DataType::Number);
    }

    #[test]
    fn test_override_yields_to_missing_data() {
        let col = column("revenue", &["100", "", "", ""]);
        assert!(analyze_header(&col, &config()).is_none());
    }

    #[test]
    fn test_no_match() {
        let col = column("notes", &["a", "b"]);
        assert!(analyze_header(&col, &config()).is_none());
    }

    #[test]
    fn test_word_boundary_not_substring() {
        // "yearly" must not trip the year term
        assert!(match_header("yearly_growth").is_none());
        // but a bare "id" suffix is deliberately loose
        assert_eq!(match_header("orderid").unwrap().0, DataFormat::Identifier);
    }
}
