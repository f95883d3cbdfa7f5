/// Error types for catalog construction and view assembly.
///
/// "No data" situations (no country selected, a stale region, an unknown wine)
/// are not errors and never show up here.

use thiserror::Error;

/// The input table violates the positional column contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{expected}' at position {position}")]
    MissingColumn { expected: &'static str, position: usize },

    #[error("expected column '{expected}' at position {position}, found '{found}'")]
    ColumnOutOfOrder {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("row {row}: expected {expected} values, found {found}")]
    RowWidth { row: usize, expected: usize, found: usize },

    #[error("row {row}: cannot read '{value}' in column '{column}' as {expected}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("food attribute '{0}' is declared more than once")]
    DuplicateFoodAttribute(String),

    #[error("food attribute at position {0} has an empty name")]
    EmptyFoodAttribute(usize),

    #[error("record {row}: expected {expected} food flags, found {found}")]
    FoodFlagCount { row: usize, expected: usize, found: usize },

    #[error("malformed CSV: {0}")]
    Csv(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unknown selection field '{0}'")]
    UnknownField(String),

    #[error("view bundle is missing: {}", .missing.join(", "))]
    IncompleteBundle { missing: Vec<&'static str> },

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
