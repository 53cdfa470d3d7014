//! Column classification: an ordered rule list where the first rule to
//! produce a result wins.
//!
//! Rule order is fixed: header override, missing-data bailout, binary
//! values, the numeric branch, the text branch, and an inconclusive
//! fallback. Earlier rules are cheaper and more trustworthy; the text
//! branch accepts nearly everything, so it runs last.

mod confidence;
mod header;
mod numeric;
mod text;

use serde::{Deserialize, Serialize};

use crate::analysis::{ColumnAnalysis, DataFormat, DataType};
use crate::error::{Result, TypesiftError};
use crate::input::{ColumnInput, DEFAULT_SAMPLE_SIZE};

pub use confidence::calculate_confidence;
pub use numeric::parse_numeric;

/// Tunable thresholds for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Missing-value ratio above which a column is declared
    /// inconclusive without inspecting its values.
    pub missing_threshold: f64,
    /// Minimum fraction of values a pattern or dictionary must match.
    pub match_threshold: f64,
    /// Number of distinct sample values carried into results.
    pub sample_size: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            missing_threshold: 0.2,
            match_threshold: 0.8,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl ClassifierConfig {
    /// Reject unusable thresholds before any classification runs.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.missing_threshold) {
            return Err(TypesiftError::Config(format!(
                "missing_threshold must be in [0, 1], got {}",
                self.missing_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(TypesiftError::Config(format!(
                "match_threshold must be in [0, 1], got {}",
                self.match_threshold
            )));
        }
        if self.sample_size == 0 {
            return Err(TypesiftError::Config(
                "sample_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

const BINARY_TOKENS: &[&str] = &["true", "false", "0", "1", "yes", "no", "y", "n"];

/// Exactly two distinct values, both drawn from the recognized
/// true/false vocabulary. Confidence is fixed at 1.0: two clean
/// true/false states leave nothing to hedge on.
fn analyze_binary(column: &ColumnInput, _config: &ClassifierConfig) -> Option<ColumnAnalysis> {
    let values = column.present_values();
    if values.is_empty() {
        return None;
    }

    let mut distinct: Vec<String> = Vec::new();
    for value in &values {
        let lowered = value.to_lowercase();
        if !BINARY_TOKENS.contains(&lowered.as_str()) {
            return None;
        }
        if !distinct.contains(&lowered) {
            distinct.push(lowered);
        }
    }
    if distinct.len() != 2 {
        return None;
    }

    Some(ColumnAnalysis::new(
        &column.header,
        DataType::Boolean,
        DataFormat::Binary,
        1.0,
        column.missing_value_ratio,
        None,
        column.sample_values.clone(),
        format!("Two-valued column: {} / {}", distinct[0], distinct[1]),
        vec![format!("Distinct values: {}", distinct.len())],
    ))
}

/// Classify one column by running the rule list in order.
pub fn classify_column(column: &ColumnInput, config: &ClassifierConfig) -> ColumnAnalysis {
    if let Some(analysis) = header::analyze_header(column, config) {
        return analysis;
    }

    if column.missing_value_ratio > config.missing_threshold {
        return ColumnAnalysis::inconclusive(
            &column.header,
            column.missing_value_ratio,
            column.sample_values.clone(),
            "Too many missing values to classify",
            vec![format!(
                "Missing ratio {:.2} exceeds threshold {:.2}",
                column.missing_value_ratio, config.missing_threshold
            )],
        );
    }

    if let Some(analysis) = analyze_binary(column, config) {
        return analysis;
    }
    if let Some(analysis) = numeric::analyze_numeric(column, config) {
        return analysis;
    }
    if let Some(analysis) = text::analyze_text(column, config) {
        return analysis;
    }

    ColumnAnalysis::inconclusive(
        &column.header,
        column.missing_value_ratio,
        column.sample_values.clone(),
        "No classification rule matched",
        vec![],
    )
}

/// Classify every column of a dataset, preserving column order.
pub fn classify_dataset(columns: &[ColumnInput], config: &ClassifierConfig) -> Vec<ColumnAnalysis> {
    columns
        .iter()
        .map(|column| classify_column(column, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(header: &str, values: &[&str]) -> ColumnInput {
        ColumnInput::new(
            header,
            values.iter().map(|s| s.to_string()).collect(),
            DEFAULT_SAMPLE_SIZE,
        )
        .unwrap()
    }

    #[test]
    fn test_binary_yes_no() {
        let col = column("subscribed", &["Yes", "No", "Yes", "Yes"]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_eq!(analysis.data_type, DataType::Boolean);
        assert_eq!(analysis.data_format, DataFormat::Binary);
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn test_binary_confidence_unaffected_by_blanks() {
        // One blank of five: under the bailout threshold, and the fixed
        // binary confidence does not scale with completeness
        let col = column("flag", &["yes", "no", "yes", "no", ""]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_eq!(analysis.data_format, DataFormat::Binary);
        assert_eq!(analysis.missing_value_ratio, 0.2);
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn test_binary_requires_two_values() {
        // All-"yes" is categorical text, not binary
        let col = column("flag", &["yes", "yes", "yes"]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_ne!(analysis.data_format, DataFormat::Binary);
    }

    #[test]
    fn test_binary_zero_one_beats_integer() {
        let col = column("active", &["0", "1", "1", "0", "1"]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_eq!(analysis.data_format, DataFormat::Binary);
    }

    #[test]
    fn test_mixed_tokens_rejected() {
        let col = column("flag", &["yes", "no", "maybe"]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_ne!(analysis.data_format, DataFormat::Binary);
    }

    #[test]
    fn test_missing_bailout() {
        let col = column("revenue", &["100", "", "", ""]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_eq!(analysis.data_type, DataType::Unknown);
        assert_eq!(analysis.data_format, DataFormat::Inconclusive);
        assert_eq!(analysis.confidence, 0.0);
    }

    #[test]
    fn test_header_override_first() {
        let col = column("user_id", &["1", "2", "3", "4"]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_eq!(analysis.data_format, DataFormat::Identifier);
    }

    #[test]
    fn test_numeric_before_text() {
        let col = column("width", &["1.5", "2.25", "3.0"]);
        let analysis = classify_column(&col, &ClassifierConfig::default());
        assert_eq!(analysis.data_format, DataFormat::Decimal);
    }

    #[test]
    fn test_dataset_preserves_order() {
        let columns = vec![
            column("a", &["1", "2"]),
            column("b", &["x@y.com", "z@w.org"]),
        ];
        let results = classify_dataset(&columns, &ClassifierConfig::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].header, "A");
        assert_eq!(results[1].header, "B");
    }

    #[test]
    fn test_custom_threshold() {
        let config = ClassifierConfig {
            missing_threshold: 0.9,
            ..ClassifierConfig::default()
        };
        // 75% missing passes under the loosened threshold
        let col = column("score", &["10", "", "", ""]);
        let analysis = classify_column(&col, &config);
        assert_ne!(analysis.data_format, DataFormat::Inconclusive);
    }
}
