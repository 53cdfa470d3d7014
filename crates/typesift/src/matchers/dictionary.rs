//! Dictionary membership matching with fuzzy fallback.
//!
//! Matching runs in fixed priority order: exact normalized match, then
//! ISO-code match (country dictionary only), then a first-word bucket
//! lookup for large dictionaries, then substring containment and a
//! word-overlap heuristic for small ones. The bucket path exists to
//! bound comparison cost when a dictionary grows past
//! [`LARGE_SET_THRESHOLD`] entries.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::reference::{COUNTRIES, ISO_COUNTRY_CODES, LANGUAGES};

/// Dictionaries larger than this use the first-word bucket path instead
/// of a full scan.
pub const LARGE_SET_THRESHOLD: usize = 1000;

/// Minimum fraction of overlapping words for the word-overlap fallback.
pub const WORD_OVERLAP_CUTOFF: f64 = 0.5;

static STOP_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(the|and|of|&)\b").unwrap());

/// Strip punctuation and connective stop-words before fuzzy comparison.
fn clean(text: &str) -> String {
    let no_punct: String = text.chars().filter(|c| *c != '.' && *c != ',').collect();
    STOP_WORDS.replace_all(&no_punct, "").trim().to_string()
}

/// A precomputed, read-only membership dictionary.
pub struct DictionaryMatcher {
    /// Lowercased, trimmed entries.
    normalized: HashSet<String>,
    /// Cleaned entries, kept alongside for fuzzy comparison.
    cleaned: Vec<String>,
    /// First-word index, populated only for large dictionaries.
    first_word: Option<HashMap<String, Vec<String>>>,
    /// Auxiliary uppercase code set accepted as exact matches.
    codes: Option<HashSet<&'static str>>,
}

impl DictionaryMatcher {
    /// Build a matcher from dictionary entries.
    pub fn new(entries: &[&str]) -> Self {
        Self::build(entries, None)
    }

    /// Build a matcher that additionally accepts uppercase codes.
    pub fn with_codes(entries: &[&str], codes: &'static [&'static str]) -> Self {
        Self::build(entries, Some(codes.iter().copied().collect()))
    }

    fn build(entries: &[&str], codes: Option<HashSet<&'static str>>) -> Self {
        let normalized: HashSet<String> = entries
            .iter()
            .map(|e| e.to_lowercase().trim().to_string())
            .collect();

        let cleaned: Vec<String> = normalized.iter().map(|e| clean(e)).collect();

        let first_word = if normalized.len() > LARGE_SET_THRESHOLD {
            let mut map: HashMap<String, Vec<String>> = HashMap::new();
            for entry in &normalized {
                let first = entry.split_whitespace().next().unwrap_or("").to_string();
                map.entry(first).or_default().push(entry.clone());
            }
            Some(map)
        } else {
            None
        };

        Self {
            normalized,
            cleaned,
            first_word,
            codes,
        }
    }

    /// Whether a single value matches the dictionary.
    pub fn matches(&self, value: &str) -> bool {
        let normalized = value.to_lowercase().trim().to_string();
        if self.normalized.contains(&normalized) {
            return true;
        }

        if let Some(ref codes) = self.codes {
            if codes.contains(value.trim().to_uppercase().as_str()) {
                return true;
            }
        }

        let cleaned = clean(&normalized);
        if cleaned.is_empty() {
            return false;
        }

        // Large dictionaries: only compare against the first-word bucket.
        if let Some(ref buckets) = self.first_word {
            let first = normalized.split_whitespace().next().unwrap_or("");
            if let Some(bucket) = buckets.get(first) {
                return bucket
                    .iter()
                    .any(|entry| cleaned.contains(entry.as_str()) || entry.contains(&cleaned));
            }
            return false;
        }

        // Small dictionaries: substring containment first, then word overlap.
        for entry in &self.cleaned {
            if entry.is_empty() {
                continue;
            }
            if cleaned.contains(entry.as_str()) || entry.contains(&cleaned) {
                return true;
            }

            let value_words: Vec<&str> = cleaned.split_whitespace().collect();
            let entry_words: Vec<&str> = entry.split_whitespace().collect();
            let min_words = value_words.len().min(entry_words.len());
            if min_words == 0 {
                continue;
            }
            let common = value_words
                .iter()
                .filter(|w| entry_words.contains(w))
                .count();
            if common as f64 / min_words as f64 >= WORD_OVERLAP_CUTOFF {
                return true;
            }
        }

        false
    }

    /// Fraction of values matching the dictionary.
    pub fn match_ratio<S: AsRef<str>>(&self, values: &[S]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let matches = values.iter().filter(|v| self.matches(v.as_ref())).count();
        matches as f64 / values.len() as f64
    }
}

/// Country-name matcher, ISO alpha-2 codes accepted.
pub static COUNTRY_MATCHER: Lazy<DictionaryMatcher> =
    Lazy::new(|| DictionaryMatcher::with_codes(COUNTRIES, ISO_COUNTRY_CODES));

/// Language-name matcher.
pub static LANGUAGE_MATCHER: Lazy<DictionaryMatcher> =
    Lazy::new(|| DictionaryMatcher::new(LANGUAGES));
