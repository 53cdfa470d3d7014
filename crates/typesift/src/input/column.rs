//! Per-column input extraction.

use indexmap::IndexSet;

use super::source::DataTable;
use crate::error::{Result, TypesiftError};

/// Default number of sample values carried on a column.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// One column's raw values plus derived signals, built once before
/// classification and never mutated.
#[derive(Debug, Clone)]
pub struct ColumnInput {
    /// Raw header text.
    pub header: String,
    /// Every cell of the column, in row order (may contain blanks).
    pub values: Vec<String>,
    /// Empty-cell count divided by total cell count.
    pub missing_value_ratio: f64,
    /// First distinct non-missing values, in column order.
    pub sample_values: Vec<String>,
}

impl ColumnInput {
    /// Build a column input from a header and raw cells.
    ///
    /// Fails with [`TypesiftError::EmptyColumn`] when the column has no
    /// cells at all; classifying nothing is a caller error, not an
    /// inconclusive result.
    pub fn new(header: impl Into<String>, values: Vec<String>, sample_size: usize) -> Result<Self> {
        let header = header.into();
        if values.is_empty() {
            return Err(TypesiftError::EmptyColumn(header));
        }

        let missing = values
            .iter()
            .filter(|v| DataTable::is_missing_value(v))
            .count();
        let missing_value_ratio = missing as f64 / values.len() as f64;

        let mut distinct: IndexSet<&str> = IndexSet::new();
        for v in &values {
            if !DataTable::is_missing_value(v) {
                distinct.insert(v.as_str());
            }
        }
        let sample_values: Vec<String> = distinct
            .iter()
            .take(sample_size)
            .map(|s| s.to_string())
            .collect();

        Ok(Self {
            header,
            values,
            missing_value_ratio,
            sample_values,
        })
    }

    /// All non-missing values, trimmed, in row order.
    pub fn present_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|v| !DataTable::is_missing_value(v))
            .map(|v| v.trim())
            .collect()
    }
}

/// Transpose row-major data into per-column inputs.
///
/// Column count is taken from the first data row; rows with a different
/// width are rejected as ragged. Missing trailing headers are synthesized
/// as `column_N`.
pub fn extract_columns(
    headers: &[String],
    rows: &[Vec<String>],
    sample_size: usize,
) -> Result<Vec<ColumnInput>> {
    let first = rows
        .first()
        .ok_or_else(|| TypesiftError::EmptyData("No data rows to classify".to_string()))?;
    let width = first.len();
    if width == 0 {
        return Err(TypesiftError::EmptyData("First data row has no cells".to_string()));
    }

    for (idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(TypesiftError::RaggedRow {
                row: idx,
                expected: width,
                found: row.len(),
            });
        }
    }

    (0..width)
        .map(|col| {
            let header = headers
                .get(col)
                .cloned()
                .unwrap_or_else(|| format!("column_{}", col + 1));
            let values: Vec<String> = rows.iter().map(|row| row[col].clone()).collect();
            ColumnInput::new(header, values, sample_size)
        })
        .collect()
}

/// Extract column inputs from a parsed [`DataTable`].
pub fn columns_from_table(table: &DataTable, sample_size: usize) -> Result<Vec<ColumnInput>> {
    extract_columns(&table.headers, &table.rows, sample_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_missing_ratio_and_samples() {
        let col = ColumnInput::new(
            "status",
            vec![
                "active".into(),
                "".into(),
                "inactive".into(),
                "active".into(),
                "NULL".into(),
            ],
            DEFAULT_SAMPLE_SIZE,
        )
        .unwrap();

        assert_eq!(col.missing_value_ratio, 0.4);
        assert_eq!(col.sample_values, vec!["active", "inactive"]);
    }

    #[test]
    fn test_sample_values_capped() {
        let values: Vec<String> = (0..10).map(|i| format!("v{}", i)).collect();
        let col = ColumnInput::new("x", values, 5).unwrap();
        assert_eq!(col.sample_values.len(), 5);
        assert_eq!(col.sample_values[0], "v0");
    }

    #[test]
    fn test_empty_column_rejected() {
        assert!(ColumnInput::new("x", vec![], 5).is_err());
    }

    #[test]
    fn test_extract_columns_transposes() {
        let headers = vec!["a".to_string(), "b".to_string()];
        let data = rows(&[&["1", "x"], &["2", "y"]]);
        let columns = extract_columns(&headers, &data, 5).unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].values, vec!["1", "2"]);
        assert_eq!(columns[1].values, vec!["x", "y"]);
    }

    #[test]
    fn test_extract_columns_rejects_ragged() {
        let headers = vec!["a".to_string(), "b".to_string()];
        let data = rows(&[&["1", "x"], &["2"]]);
        let err = extract_columns(&headers, &data, 5).unwrap_err();
        assert!(matches!(err, TypesiftError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn test_extract_columns_synthesizes_headers() {
        let headers = vec!["a".to_string()];
        let data = rows(&[&["1", "x"]]);
        let columns = extract_columns(&headers, &data, 5).unwrap();
        assert_eq!(columns[1].header, "column_2");
    }
}
