//! Text branch: dictionary membership, the regex battery, the
//! categorical heuristic, and generic text subtypes, tried in that
//! order.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{ColumnAnalysis, ColumnStats, DataFormat, DataType};
use crate::input::ColumnInput;
use crate::matchers::{check_patterns, COUNTRY_MATCHER, LANGUAGE_MATCHER};
use crate::stats::{compute_text_stats, TextStats};

use super::confidence::calculate_confidence;
use super::ClassifierConfig;

static SIMPLE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 _-]*$").unwrap());
static IDENTIFIER_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Fixed confidence for the categorical heuristic; it keys on value
/// diversity rather than a per-value match, so completeness scaling
/// does not apply.
const CATEGORICAL_CONFIDENCE: f64 = 0.9;

fn consistent_casing(values: &[&str]) -> bool {
    let all_lower = values.iter().all(|v| !v.chars().any(char::is_uppercase));
    let all_upper = values.iter().all(|v| !v.chars().any(char::is_lowercase));
    let all_title = values.iter().all(|v| {
        v.split_whitespace()
            .all(|w| w.chars().next().is_some_and(char::is_uppercase))
    });
    all_lower || all_upper || all_title
}

/// Low-diversity test: a hard cap on distinct values, a very low unique
/// ratio, or a moderate ratio backed by at least two shape signals
/// (short values, simple characters, consistent casing).
fn is_categorical(values: &[&str], stats: &TextStats) -> bool {
    let distinct: std::collections::HashSet<&str> = values.iter().copied().collect();
    // The hard cap needs at least one repeated value, otherwise any
    // short column would qualify.
    if distinct.len() <= 5 && values.len() > distinct.len() {
        return true;
    }
    if stats.unique_ratio < 0.1 {
        return true;
    }
    if stats.unique_ratio < 0.3 {
        let short = values.iter().all(|v| v.len() <= 30);
        let simple = values.iter().all(|v| SIMPLE_CHARS.is_match(v));
        let cased = consistent_casing(values);
        let signals = [short, simple, cased].iter().filter(|s| **s).count();
        return signals >= 2;
    }
    false
}

/// Classify a column as text. This branch always succeeds; it is the
/// last value-driven rule before the inconclusive fallback, and its
/// generic subtype accepts anything.
pub fn analyze_text(column: &ColumnInput, config: &ClassifierConfig) -> Option<ColumnAnalysis> {
    let values = column.present_values();
    if values.is_empty() {
        return None;
    }

    let text_stats = compute_text_stats(&values)?;
    let base = calculate_confidence(
        column.missing_value_ratio,
        DataFormat::Text,
        Some(&ColumnStats::Text(text_stats.clone())),
    );

    // Dictionary membership first: country and language names would
    // otherwise fall through to the categorical heuristic.
    let country_ratio = COUNTRY_MATCHER.match_ratio(&values);
    if country_ratio >= config.match_threshold {
        return Some(build(
            column,
            DataFormat::Country,
            base * country_ratio,
            text_stats,
            format!(
                "{:.0}% of values match known country names",
                country_ratio * 100.0
            ),
            vec![format!("Match ratio: {:.2}", country_ratio)],
        ));
    }

    let language_ratio = LANGUAGE_MATCHER.match_ratio(&values);
    if language_ratio >= config.match_threshold {
        return Some(build(
            column,
            DataFormat::Language,
            base * language_ratio,
            text_stats,
            format!(
                "{:.0}% of values match known language names",
                language_ratio * 100.0
            ),
            vec![format!("Match ratio: {:.2}", language_ratio)],
        ));
    }

    if let Some(pattern) = check_patterns(&values, config.match_threshold) {
        return Some(build(
            column,
            pattern.format,
            base * pattern.match_ratio,
            text_stats,
            format!("Values match the {} pattern", pattern.format),
            vec![format!("Match ratio: {:.2}", pattern.match_ratio)],
        ));
    }

    if is_categorical(&values, &text_stats) {
        let distinct: std::collections::HashSet<&str> = values.iter().copied().collect();
        let details = vec![
            format!("Distinct values: {}", distinct.len()),
            format!("Unique ratio: {:.2}", text_stats.unique_ratio),
        ];
        return Some(build(
            column,
            DataFormat::Categorical,
            CATEGORICAL_CONFIDENCE,
            text_stats,
            "Low value diversity indicates categories",
            details,
        ));
    }

    // Generic subtypes, highest-information shape first.
    let (format, main_reason) = if text_stats.unique_ratio > 0.9 {
        if text_stats.avg_length > 100.0 {
            (DataFormat::Description, "Long free-form text values")
        } else if text_stats.avg_length > 30.0 {
            (DataFormat::Title, "Medium-length distinct text values")
        } else if values.iter().all(|v| IDENTIFIER_SHAPE.is_match(v)) {
            (DataFormat::Identifier, "Distinct token-shaped values")
        } else {
            (DataFormat::Text, "Free-form text values")
        }
    } else {
        (DataFormat::Text, "Free-form text values")
    };

    // Identifier text can earn the uniqueness boost
    let confidence = calculate_confidence(
        column.missing_value_ratio,
        format,
        Some(&ColumnStats::Text(text_stats.clone())),
    );
    let details = vec![
        format!("Average length: {:.1}", text_stats.avg_length),
        format!("Unique ratio: {:.2}", text_stats.unique_ratio),
    ];
    Some(build(column, format, confidence, text_stats, main_reason, details))
}

fn build(
    column: &ColumnInput,
    format: DataFormat,
    confidence: f64,
    text_stats: TextStats,
    main_reason: impl Into<String>,
    details: Vec<String>,
) -> ColumnAnalysis {
    // Everything this branch emits is string-typed, including formats
    // like currency or percentage that carry symbols in their written
    // form.
    ColumnAnalysis::new(
        &column.header,
        DataType::String,
        format,
        confidence,
        column.missing_value_ratio,
        Some(ColumnStats::Text(text_stats)),
        column.sample_values.clone(),
        main_reason,
        details,
    )
}
