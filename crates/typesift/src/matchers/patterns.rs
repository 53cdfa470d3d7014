//! Ordered regex battery for value-format recognition.
//!
//! Formats are checked in a fixed precedence order and the first format
//! whose match ratio clears the threshold wins. Date and datetime
//! candidates are validated semantically (real calendar dates) before
//! the purely syntactic patterns run, so `99/99/2024` never counts as a
//! date. The loose phone pattern runs last because it accepts most
//! digit-only strings.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::DataFormat;

/// Result of running the battery against a column.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
    /// The first format that cleared the threshold.
    pub format: DataFormat,
    /// Fraction of values matching that format.
    pub match_ratio: f64,
}

static TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(
        r"^(?:(?:[01]\d|2[0-3]):[0-5]\d(?::[0-5]\d)?(?:\.\d{1,3})?|[0-5]?\d:[0-5]\d(?:\.\d{1,3})?)$",
    )
    .unwrap()]
});

static CURRENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(
        r"^(?:[¥$€£]\s*-?\d+(?:,\d{3})*(?:\.\d{2})?|\d+(?:,\d{3})*(?:\.\d{2})?\s*[¥$€£])$",
    )
    .unwrap()]
});

static PERCENTAGE_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^-?\d*\.?\d+%$").unwrap()]);

static EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()]
});

static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(
        r"^https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b(?:[-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .unwrap()]
});

static UUID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
    )
    .unwrap()]
});

static COORDINATES_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^-?\d+\.\d+,\s*-?\d+\.\d+$").unwrap()]);

static IPV4_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .unwrap()]
});

static INTEGER_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^-?\d+$").unwrap()]);

static DECIMAL_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"^-?\d*\.\d+$").unwrap()]);

static SCIENTIFIC_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| vec![Regex::new(r"(?i)^-?\d*\.?\d+e[+-]?\d+$").unwrap()]);

static PHONE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(r"^(?:\+?\d{1,4}[-.\s]?)?(?:\(?\d{1,4}\)?[-.\s]?)*(?:\d[-.\s]?){4,}$").unwrap()]
});

/// Datetime time-suffix check used after the date part validates.
static TIME_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}(?::\d{2})?(?:\.\d{1,3})?(?:Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

/// The syntactic battery, in precedence order. Date and datetime are
/// handled separately (semantic validation) before this list runs.
static BATTERY: Lazy<Vec<(DataFormat, &'static Lazy<Vec<Regex>>)>> = Lazy::new(|| {
    vec![
        (DataFormat::Time, &TIME_PATTERNS),
        (DataFormat::Currency, &CURRENCY_PATTERNS),
        (DataFormat::Percentage, &PERCENTAGE_PATTERNS),
        (DataFormat::Email, &EMAIL_PATTERNS),
        (DataFormat::Url, &URL_PATTERNS),
        (DataFormat::Uuid, &UUID_PATTERNS),
        (DataFormat::Coordinates, &COORDINATES_PATTERNS),
        (DataFormat::Ipv4, &IPV4_PATTERNS),
        (DataFormat::Integer, &INTEGER_PATTERNS),
        (DataFormat::Decimal, &DECIMAL_PATTERNS),
        (DataFormat::Scientific, &SCIENTIFIC_PATTERNS),
        (DataFormat::Phone, &PHONE_PATTERNS),
    ]
});

/// Check whether a string is a real calendar date in one of the four
/// accepted layouts: ISO `YYYY-MM-DD`, US `M/D/YYYY`, EU `D.M.YYYY`, or
/// dash `D-M-YYYY`.
pub fn is_valid_date(value: &str) -> bool {
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return true;
    }

    if let Some((m, d, y)) = split_three(value, '/') {
        return ymd_valid(y, m, d);
    }
    if let Some((d, m, y)) = split_three(value, '.') {
        return ymd_valid(y, m, d);
    }
    // Valid ISO forms were handled above, so a dash split only sees the
    // day-first D-M-YYYY layout.
    if let Some((d, m, y)) = split_three(value, '-') {
        return ymd_valid(y, m, d);
    }

    false
}

fn split_three(value: &str, sep: char) -> Option<(u32, u32, i32)> {
    let parts: Vec<&str> = value.split(sep).collect();
    if parts.len() != 3 {
        return None;
    }
    let a: u32 = parts[0].parse().ok()?;
    let b: u32 = parts[1].parse().ok()?;
    let c: i32 = parts[2].parse().ok()?;
    // Require a 4-digit year in the last position
    if parts[2].len() != 4 {
        return None;
    }
    Some((a, b, c))
}

fn ymd_valid(year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Check whether a string is a valid date with a time suffix, separated
/// by a space or `T`.
pub fn is_valid_datetime(value: &str) -> bool {
    let (date_part, time_part) = match value.split_once(|c: char| c == ' ' || c == 'T') {
        Some(pair) => pair,
        None => return false,
    };

    is_valid_date(date_part) && TIME_SUFFIX.is_match(time_part)
}

/// Fraction of values matching any of the given patterns.
fn ratio_matching(values: &[&str], patterns: &[Regex]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let matches = values
        .iter()
        .filter(|v| patterns.iter().any(|p| p.is_match(v)))
        .count();
    matches as f64 / values.len() as f64
}

/// Fraction of values satisfying a predicate.
fn ratio_where(values: &[&str], pred: impl Fn(&str) -> bool) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let matches = values.iter().filter(|v| pred(v)).count();
    matches as f64 / values.len() as f64
}

/// Run the ordered battery against a column's values.
///
/// First-match-wins: datetime, then date (both semantically validated),
/// then the syntactic patterns in battery order. Returns `None` when no
/// format clears the threshold.
pub fn check_patterns(values: &[&str], threshold: f64) -> Option<PatternMatch> {
    if values.is_empty() {
        return None;
    }

    let datetime_ratio = ratio_where(values, is_valid_datetime);
    if datetime_ratio >= threshold {
        return Some(PatternMatch {
            format: DataFormat::Datetime,
            match_ratio: datetime_ratio,
        });
    }

    let date_ratio = ratio_where(values, is_valid_date);
    if date_ratio >= threshold {
        return Some(PatternMatch {
            format: DataFormat::Date,
            match_ratio: date_ratio,
        });
    }

    for (format, patterns) in BATTERY.iter() {
        let ratio = ratio_matching(values, patterns);
        if ratio >= threshold {
            return Some(PatternMatch {
                format: *format,
                match_ratio: ratio,
            });
        }
    }

    None
}
