//! Input parsing and column extraction.

mod column;
mod parser;
mod source;

pub use column::{columns_from_table, extract_columns, ColumnInput, DEFAULT_SAMPLE_SIZE};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
