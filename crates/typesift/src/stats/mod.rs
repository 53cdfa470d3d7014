//! Numeric and text statistics for column values.
//!
//! Callers must filter missing/blank cells before computing statistics;
//! both entry points treat an empty slice as a contract violation and
//! return `None`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Statistics for a column whose values all parse as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (not sample-corrected).
    pub std_dev: f64,
    /// Third standardized moment: mean of cubed z-scores.
    pub skewness: f64,
    pub min: f64,
    pub max: f64,
    /// All values tied at the highest frequency (multi-modal allowed).
    pub modes: Vec<f64>,
    /// Fraction of values at the mode.
    pub mode_frequency: f64,
    /// Distinct values / total values.
    pub unique_value_ratio: f64,
}

/// Statistics for a column of text values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub avg_length: f64,
    /// Distinct values / total values.
    pub unique_ratio: f64,
    pub contains_numbers: bool,
    pub contains_special_chars: bool,
}

/// Compute numeric statistics over non-empty, finite values.
///
/// Median uses the standard even/odd midpoint rule over a sorted copy;
/// the input slice is never mutated. Returns `None` for empty input.
pub fn compute_number_stats(values: &[f64]) -> Option<NumberStats> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n;
    let median = if values.len() % 2 == 0 {
        (sorted[values.len() / 2 - 1] + sorted[values.len() / 2]) / 2.0
    } else {
        sorted[values.len() / 2]
    };

    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    // Mean of cubed z-scores; zero spread means zero skew by convention.
    let skewness = if std_dev == 0.0 {
        0.0
    } else {
        values
            .iter()
            .map(|x| ((x - mean) / std_dev).powi(3))
            .sum::<f64>()
            / n
    };

    // Frequency map keyed on the bit representation so -0.0 and 0.0 or
    // repeated parses land in the same bucket. Insertion order preserved
    // so modes come out in first-seen order.
    let mut freq: IndexMap<u64, (f64, usize)> = IndexMap::new();
    for &v in values {
        let entry = freq.entry(v.to_bits()).or_insert((v, 0));
        entry.1 += 1;
    }
    let max_freq = freq.values().map(|(_, c)| *c).max().unwrap_or(0);
    let modes: Vec<f64> = freq
        .values()
        .filter(|(_, c)| *c == max_freq)
        .map(|(v, _)| *v)
        .collect();

    Some(NumberStats {
        mean,
        median,
        std_dev,
        skewness,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        modes,
        mode_frequency: max_freq as f64 / n,
        unique_value_ratio: freq.len() as f64 / n,
    })
}

/// Compute text statistics over non-empty string values.
pub fn compute_text_stats<S: AsRef<str>>(values: &[S]) -> Option<TextStats> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let avg_length = values
        .iter()
        .map(|v| v.as_ref().chars().count())
        .sum::<usize>() as f64
        / n;

    let mut distinct: IndexMap<&str, ()> = IndexMap::new();
    for v in values {
        distinct.insert(v.as_ref(), ());
    }

    let contains_numbers = values
        .iter()
        .any(|v| v.as_ref().chars().any(|c| c.is_ascii_digit()));
    let contains_special_chars = values.iter().any(|v| {
        v.as_ref()
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace())
    });

    Some(TextStats {
        avg_length,
        unique_ratio: distinct.len() as f64 / n,
        contains_numbers,
        contains_special_chars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median_odd() {
        let stats = compute_number_stats(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
    }

    #[test]
    fn test_median_even() {
        let stats = compute_number_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_population_std_dev() {
        // Population variance of [2, 4, 4, 4, 5, 5, 7, 9] is 4.
        let stats =
            compute_number_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        let stats = compute_number_stats(&[1.0, 2.0, 3.0]).unwrap();
        assert!(stats.skewness.abs() < 1e-12);
    }

    #[test]
    fn test_skewness_zero_spread() {
        let stats = compute_number_stats(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_multimodal() {
        let stats = compute_number_stats(&[1.0, 1.0, 2.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.modes, vec![1.0, 2.0]);
        assert_eq!(stats.mode_frequency, 0.4);
    }

    #[test]
    fn test_unique_value_ratio() {
        let stats = compute_number_stats(&[1.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.unique_value_ratio, 0.75);
    }

    #[test]
    fn test_input_not_mutated() {
        let values = vec![3.0, 1.0, 2.0];
        let _ = compute_number_stats(&values);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(compute_number_stats(&[]).is_none());
        assert!(compute_text_stats::<&str>(&[]).is_none());
    }

    #[test]
    fn test_text_stats() {
        let stats = compute_text_stats(&["abc", "abc", "de!", "x1"]).unwrap();
        assert_eq!(stats.avg_length, (3 + 3 + 3 + 2) as f64 / 4.0);
        assert_eq!(stats.unique_ratio, 0.75);
        assert!(stats.contains_numbers);
        assert!(stats.contains_special_chars);
    }

    #[test]
    fn test_text_stats_plain() {
        let stats = compute_text_stats(&["alpha", "beta"]).unwrap();
        assert!(!stats.contains_numbers);
        assert!(!stats.contains_special_chars);
    }
}
