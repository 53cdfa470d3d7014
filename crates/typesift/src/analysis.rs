//! Classification result types and the result builder.

use serde::{Deserialize, Serialize};

use crate::stats::{NumberStats, TextStats};

/// Coarse semantic category for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Text values.
    String,
    /// Numeric values (integer or decimal).
    Number,
    /// Binary true/false values.
    Boolean,
    /// Date values.
    Date,
    /// Unable to determine type.
    Unknown,
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Unknown
    }
}

/// Fine-grained format within a [`DataType`]. Closed vocabulary: every
/// classification resolves to exactly one of these members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    // String formats
    Text,
    Categorical,
    Identifier,
    Email,
    Phone,
    Date,
    Datetime,
    Time,
    Percentage,
    Coordinates,
    Country,
    Language,
    Ipv4,
    Url,
    Uuid,
    Description,
    Title,
    // Number formats
    Integer,
    Decimal,
    Scientific,
    Year,
    Age,
    Rating,
    Probability,
    Currency,
    Latitude,
    Longitude,
    // Boolean
    Binary,
    // Unknown
    Inconclusive,
}

impl DataFormat {
    /// The coarse data type this format belongs to.
    ///
    /// `Currency` appears both as a header/value-driven number format and
    /// as a symbol-bearing string pattern; it maps to `Number` here since
    /// that is how the numeric branch reports it. The text branch sets the
    /// data type explicitly when a regex pattern fires.
    pub fn data_type(&self) -> DataType {
        match self {
            DataFormat::Integer
            | DataFormat::Decimal
            | DataFormat::Scientific
            | DataFormat::Year
            | DataFormat::Age
            | DataFormat::Rating
            | DataFormat::Probability
            | DataFormat::Currency
            | DataFormat::Latitude
            | DataFormat::Longitude => DataType::Number,
            DataFormat::Binary => DataType::Boolean,
            DataFormat::Inconclusive => DataType::Unknown,
            _ => DataType::String,
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataFormat::Text => "text",
            DataFormat::Categorical => "categorical",
            DataFormat::Identifier => "identifier",
            DataFormat::Email => "email",
            DataFormat::Phone => "phone",
            DataFormat::Date => "date",
            DataFormat::Datetime => "datetime",
            DataFormat::Time => "time",
            DataFormat::Percentage => "percentage",
            DataFormat::Coordinates => "coordinates",
            DataFormat::Country => "country",
            DataFormat::Language => "language",
            DataFormat::Ipv4 => "ipv4",
            DataFormat::Url => "url",
            DataFormat::Uuid => "uuid",
            DataFormat::Description => "description",
            DataFormat::Title => "title",
            DataFormat::Integer => "integer",
            DataFormat::Decimal => "decimal",
            DataFormat::Scientific => "scientific",
            DataFormat::Year => "year",
            DataFormat::Age => "age",
            DataFormat::Rating => "rating",
            DataFormat::Probability => "probability",
            DataFormat::Currency => "currency",
            DataFormat::Latitude => "latitude",
            DataFormat::Longitude => "longitude",
            DataFormat::Binary => "binary",
            DataFormat::Inconclusive => "inconclusive",
        };
        write!(f, "{}", name)
    }
}

/// Statistics attached to a classification, numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Number(NumberStats),
    Text(TextStats),
}

impl ColumnStats {
    /// Numeric statistics, if this is a numeric column.
    pub fn as_number(&self) -> Option<&NumberStats> {
        match self {
            ColumnStats::Number(s) => Some(s),
            ColumnStats::Text(_) => None,
        }
    }

    /// Text statistics, if this is a text column.
    pub fn as_text(&self) -> Option<&TextStats> {
        match self {
            ColumnStats::Text(s) => Some(s),
            ColumnStats::Number(_) => None,
        }
    }
}

/// Human-readable justification for a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reasoning {
    /// One-sentence main justification.
    pub main_reason: String,
    /// Supporting facts (ratios, ranges, sample values).
    pub details: Vec<String>,
}

/// The classification produced for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    /// Human-readable header, transformed from the raw header text.
    pub header: String,
    /// Coarse semantic category.
    pub data_type: DataType,
    /// Fine-grained format within the data type.
    pub data_format: DataFormat,
    /// Confidence in the classification, clamped to [0, 1].
    pub confidence: f64,
    /// Fraction of cells that were missing.
    pub missing_value_ratio: f64,
    /// Computed statistics, when the winning rule inspected values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ColumnStats>,
    /// Sample of distinct non-missing values.
    pub sample_values: Vec<String>,
    /// Justification for the classification.
    pub reasoning: Reasoning,
}

impl ColumnAnalysis {
    /// Build an analysis record, humanizing the header and clamping the
    /// confidence. Every rule terminates through this constructor so the
    /// result shape is uniform regardless of which rule fired.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        header: &str,
        data_type: DataType,
        data_format: DataFormat,
        confidence: f64,
        missing_value_ratio: f64,
        stats: Option<ColumnStats>,
        sample_values: Vec<String>,
        main_reason: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            header: humanize_header(header),
            data_type,
            data_format,
            confidence: confidence.clamp(0.0, 1.0),
            missing_value_ratio,
            stats,
            sample_values,
            reasoning: Reasoning {
                main_reason: main_reason.into(),
                details,
            },
        }
    }

    /// Terminal result for a column no rule could classify.
    pub fn inconclusive(
        header: &str,
        missing_value_ratio: f64,
        sample_values: Vec<String>,
        main_reason: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::new(
            header,
            DataType::Unknown,
            DataFormat::Inconclusive,
            0.0,
            missing_value_ratio,
            None,
            sample_values,
            main_reason,
            details,
        )
    }
}

/// Transform a raw header into display form: separators and camelCase
/// boundaries become spaces, words are title-cased, `id` becomes `ID`,
/// and existing all-caps tokens are preserved.
pub fn humanize_header(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut spaced = String::with_capacity(raw.len() + 8);
    let mut prev: Option<char> = None;
    for c in raw.chars() {
        if c == '-' || c == '_' || c == '.' {
            spaced.push(' ');
            prev = Some(' ');
            continue;
        }
        // camelCase and digit-to-upper boundaries
        if c.is_uppercase() {
            if let Some(p) = prev {
                if p.is_lowercase() || p.is_ascii_digit() {
                    spaced.push(' ');
                }
            }
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced
        .split_whitespace()
        .map(|word| {
            if word.eq_ignore_ascii_case("id") {
                "ID".to_string()
            } else if word.chars().all(|c| !c.is_lowercase()) {
                // Acronyms and digit runs stay as-is
                word.to_string()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>()
                            + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
