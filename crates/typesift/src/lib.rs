//! TypeSift: statistical type inference for tabular data.
//!
//! TypeSift inspects the columns of a CSV/TSV file and assigns each one
//! a coarse data type and a fine-grained format, together with a
//! confidence score and a human-readable explanation of how the
//! decision was reached.
//!
//! Classification runs an ordered rule list per column: trusted header
//! terms first, then a missing-data bailout, binary detection, numeric
//! subformats, and finally dictionary and regex matching over text.
//! The first rule to produce a result wins.
//!
//! # Example
//!
//! ```no_run
//! use typesift::TypeSift;
//!
//! let engine = TypeSift::new();
//! let result = engine.analyze("data.csv").unwrap();
//!
//! for column in &result.columns {
//!     println!("{}: {} ({:.0}%)", column.header, column.data_format, column.confidence * 100.0);
//! }
//! ```

pub mod analysis;
pub mod classify;
pub mod error;
pub mod input;
pub mod matchers;
pub mod stats;

mod typesift;

pub use crate::typesift::{classify_column, classify_dataset, DatasetAnalysis, TypeSift, TypeSiftConfig};
pub use analysis::{humanize_header, ColumnAnalysis, ColumnStats, DataFormat, DataType, Reasoning};
pub use classify::ClassifierConfig;
pub use error::{Result, TypesiftError};
pub use input::{ColumnInput, DataTable, Parser, ParserConfig, SourceMetadata};
pub use stats::{NumberStats, TextStats};
