//! Main TypeSift struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::ColumnAnalysis;
use crate::classify::{self, ClassifierConfig};
use crate::error::{Result, TypesiftError};
use crate::input::{columns_from_table, extract_columns, ColumnInput, DataTable, Parser, ParserConfig, SourceMetadata};

/// Configuration for TypeSift analysis.
#[derive(Debug, Clone, Default)]
pub struct TypeSiftConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Classifier thresholds.
    pub classifier: ClassifierConfig,
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// One classification per column, in column order.
    pub columns: Vec<ColumnAnalysis>,
}

impl DatasetAnalysis {
    /// Write the analysis to a file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| TypesiftError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// The main type-inference engine.
pub struct TypeSift {
    config: TypeSiftConfig,
    parser: Parser,
}

impl TypeSift {
    /// Create a new engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(TypeSiftConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: TypeSiftConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Analyze a data file: parse, extract columns, classify each one.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<DatasetAnalysis> {
        let (table, source) = self.parser.parse_file(path)?;
        let columns = self.analyze_table(&table)?;
        Ok(DatasetAnalysis { source, columns })
    }

    /// Analyze raw delimited text, detecting the delimiter.
    pub fn analyze_str(&self, text: &str) -> Result<Vec<ColumnAnalysis>> {
        let table = self.parser.parse_str(text)?;
        self.analyze_table(&table)
    }

    /// Classify every column of an already-parsed table.
    pub fn analyze_table(&self, table: &DataTable) -> Result<Vec<ColumnAnalysis>> {
        self.config.classifier.validate()?;
        let columns = columns_from_table(table, self.config.classifier.sample_size)?;
        Ok(classify::classify_dataset(&columns, &self.config.classifier))
    }
}

impl Default for TypeSift {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a single column given its header and raw cells.
pub fn classify_column(
    header: &str,
    values: Vec<String>,
    config: &ClassifierConfig,
) -> Result<ColumnAnalysis> {
    config.validate()?;
    let column = ColumnInput::new(header, values, config.sample_size)?;
    Ok(classify::classify_column(&column, config))
}

/// Classify every column of row-major data.
///
/// Rows must be rectangular; the column count is taken from the first
/// data row and a mismatch is rejected as ragged.
pub fn classify_dataset(
    headers: &[String],
    rows: &[Vec<String>],
    config: &ClassifierConfig,
) -> Result<Vec<ColumnAnalysis>> {
    config.validate()?;
    let columns = extract_columns(headers, rows, config.sample_size)?;
    Ok(classify::classify_dataset(&columns, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DataFormat, DataType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_analyze_simple_csv() {
        let content = "name,email,score\nAlice,a@x.com,0.9\nBob,b@y.org,0.4\nCara,c@z.net,0.7\n";
        let file = create_test_file(content);

        let engine = TypeSift::new();
        let result = engine.analyze(file.path()).unwrap();

        assert_eq!(result.source.row_count, 3);
        assert_eq!(result.source.column_count, 3);
        assert_eq!(result.columns.len(), 3);
        assert_eq!(result.columns[1].data_format, DataFormat::Email);
        assert_eq!(result.columns[2].data_format, DataFormat::Probability);
    }

    #[test]
    fn test_analyze_str() {
        let engine = TypeSift::new();
        let columns = engine
            .analyze_str("active\nyes\nno\nyes\n")
            .unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].data_type, DataType::Boolean);
    }

    #[test]
    fn test_analyze_tsv_autodetect() {
        let content = "city\tcountry\nBerlin\tGermany\nParis\tFrance\nTokyo\tJapan\n";
        let file = create_test_file(content);

        let engine = TypeSift::new();
        let result = engine.analyze(file.path()).unwrap();
        assert_eq!(result.source.format, "tsv");
        assert_eq!(result.columns[1].data_format, DataFormat::Country);
    }

    #[test]
    fn test_classify_column_free_function() {
        let analysis = classify_column(
            "user_id",
            vec!["u1".into(), "u2".into(), "u3".into()],
            &ClassifierConfig::default(),
        )
        .unwrap();
        assert_eq!(analysis.header, "User ID");
        assert_eq!(analysis.data_format, DataFormat::Identifier);
    }

    #[test]
    fn test_classify_dataset_rejects_ragged() {
        let headers = vec!["a".to_string(), "b".to_string()];
        let rows = vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string()],
        ];
        assert!(classify_dataset(&headers, &rows, &ClassifierConfig::default()).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClassifierConfig {
            missing_threshold: 1.5,
            ..ClassifierConfig::default()
        };
        let err = classify_column("x", vec!["1".into()], &config).unwrap_err();
        assert!(matches!(err, crate::error::TypesiftError::Config(_)));

        let config = ClassifierConfig {
            sample_size: 0,
            ..ClassifierConfig::default()
        };
        assert!(classify_dataset(
            &["a".to_string()],
            &[vec!["1".to_string()]],
            &config
        )
        .is_err());
    }

    #[test]
    fn test_save_writes_json() {
        let content = "city,population\nBerlin,3700000\nParis,2100000\n";
        let input = create_test_file(content);

        let engine = TypeSift::new();
        let result = engine.analyze(input.path()).unwrap();

        let out = NamedTempFile::new().unwrap();
        result.save(out.path()).unwrap();

        let written = std::fs::read_to_string(out.path()).unwrap();
        let parsed: DatasetAnalysis = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.columns.len(), 2);
        assert_eq!(parsed.source.row_count, 2);
    }

    #[test]
    fn test_results_serialize() {
        let analysis = classify_column(
            "amount",
            vec!["$1.00".into(), "$2.50".into()],
            &ClassifierConfig::default(),
        )
        .unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"data_format\":\"currency\""));
    }
}
