//! CSV/TSV parser with delimiter detection.

use std::io::BufRead;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, TypesiftError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files into a [`DataTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let contents = std::fs::read(path).map_err(|e| TypesiftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let data_table = self.parse_bytes(&contents, delimiter)?;

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_name(delimiter).to_string(),
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse raw CSV text with delimiter auto-detection.
    pub fn parse_str(&self, text: &str) -> Result<DataTable> {
        let bytes = text.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_bytes(bytes, delimiter)
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let named_headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            if self.config.max_rows.is_some_and(|max| rows.len() >= max) {
                break;
            }
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(TypesiftError::EmptyData("No data rows found".to_string()));
        }

        // Headerless input: synthesize names from the first row's width.
        let headers = if self.config.has_header {
            named_headers
        } else {
            let width = rows.first().map(Vec::len).unwrap_or(0);
            (1..=width).map(|i| format!("column_{}", i)).collect()
        };

        if headers.is_empty() {
            return Err(TypesiftError::EmptyData("No columns found".to_string()));
        }

        // Flexible mode admits uneven records; normalize every row to
        // the header width.
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Format label for a detected delimiter.
fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Detect the delimiter by scoring each candidate over the first few
/// lines. Falls back to comma when nothing scores.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = bytes
        .lines()
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if lines.is_empty() {
        return Err(TypesiftError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best = (0usize, b',');
    for &delim in DELIMITERS {
        let score = delimiter_score(&lines, delim);
        if score > best.0 {
            best = (score, delim);
        }
    }
    Ok(best.1)
}

/// Score a candidate delimiter: a delimiter that appears the same
/// number of times on every line is almost certainly the real one, so
/// consistency dwarfs raw frequency. Tabs get a small edge since they
/// rarely occur inside field values.
fn delimiter_score(lines: &[String], delim: u8) -> usize {
    let counts: Vec<usize> = lines
        .iter()
        .map(|line| count_delimiter_in_line(line, delim))
        .collect();

    let first = counts[0];
    if first == 0 {
        return 0;
    }
    if counts.iter().all(|&c| c == first) {
        first * 1000 + if delim == b'\t' { 100 } else { 0 }
    } else {
        first
    }
}

/// Count delimiter occurrences in a line, ignoring quoted sections.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        let data = b"a;b;c\n1;2;3";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_prefers_consistency() {
        // Commas appear but at uneven counts; pipes are consistent
        let data = b"a|b,c\n1|2\n3|4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b'|');
    }

    #[test]
    fn test_detect_delimiter_quoted_commas_ignored() {
        let data = b"a;\"1,2,3\"\nb;\"4,5\"\nc;\"6\"";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        let ages: Vec<&str> = table.column_values(1).collect();
        assert_eq!(ages, vec!["30", "25"]);
    }

    #[test]
    fn test_parse_str_detects_delimiter() {
        let parser = Parser::new();
        let table = parser.parse_str("x\ty\n1\t2\n").unwrap();
        assert_eq!(table.delimiter, b'\t');
    }

    #[test]
    fn test_parse_normalizes_uneven_rows() {
        let parser = Parser::new();
        let data = b"a,b,c\n1,2\n3,4,5,6\n";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["3", "4", "5"]);
    }

    #[test]
    fn test_parse_headerless() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"1,2\n3,4\n", b',').unwrap();

        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_max_rows_respected() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(2),
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"a\n1\n2\n3\n4\n", b',').unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_parse_quoted_cells() {
        let parser = Parser::new();
        let data = b"name,notes\nAlice,\"loves, commas\"\n";
        let table = parser.parse_bytes(data, b',').unwrap();
        let notes: Vec<&str> = table.column_values(1).collect();
        assert_eq!(notes, vec!["loves, commas"]);
    }

    #[test]
    fn test_empty_input_is_error() {
        let parser = Parser::new();
        assert!(parser.parse_str("").is_err());
    }
}
