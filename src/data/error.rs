use thiserror::Error;

/// Errors raised while loading the input table
///
/// All of them are fatal: a dataset that fails to load never reaches the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Error encountered when reading CSV data
    #[error("CSV error: {0}")]
    Csv(String),
    /// Error during row deserialization
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: u64, reason: String },
    /// One or more required columns are absent after header renaming
    #[error("Missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    /// Two headers resolve to the same column
    #[error("Column {column} appears more than once (headers: {headers:?})")]
    DuplicateColumn {
        column: String,
        headers: Vec<String>,
    },
    /// A volume is negative or not a finite number
    #[error("Invalid {column} value {value} at line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: f64,
    },
}
