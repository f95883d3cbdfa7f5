/// WineStats Column Values
///
/// The raw cell model of a positional table. A catalog is built from rows of
/// `ColumnValue`s whose meaning is fixed by column position, so values here are
/// deliberately loose: the catalog decides how each cell is coerced.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    String,
    Bool,
}

impl ColumnType {
    /// Returns the widest type able to hold values of both `self` and `other`.
    ///
    /// Integers widen to floats; any other disagreement falls back to String.
    pub fn widen(self, other: ColumnType) -> ColumnType {
        match (self, other) {
            (a, b) if a == b => a,
            (ColumnType::Int64, ColumnType::Float64) | (ColumnType::Float64, ColumnType::Int64) => {
                ColumnType::Float64
            }
            _ => ColumnType::String,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "INT64",
            ColumnType::Float64 => "FLOAT64",
            ColumnType::String => "STRING",
            ColumnType::Bool => "BOOL",
        }
    }
}

/// Column value enum to support multiple types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Int64(i64),
    Float64(f64),
    String(String),
    Bool(bool),
    Null,
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            ColumnValue::Int64(_) => Some(ColumnType::Int64),
            ColumnValue::Float64(_) => Some(ColumnType::Float64),
            ColumnValue::String(_) => Some(ColumnType::String),
            ColumnValue::Bool(_) => Some(ColumnType::Bool),
            ColumnValue::Null => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric access. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ColumnValue::Float64(v) => Some(*v),
            ColumnValue::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            ColumnValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ColumnValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text rendering of any scalar; NULL becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            ColumnValue::String(s) => s.clone(),
            ColumnValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Int64(v) => write!(f, "{}", v),
            ColumnValue::Float64(v) => write!(f, "{}", v),
            ColumnValue::String(v) => write!(f, "{}", v),
            ColumnValue::Bool(v) => write!(f, "{}", v),
            ColumnValue::Null => write!(f, "NULL"),
        }
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::String(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::String(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Float64(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Int64(value)
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_widening() {
        assert_eq!(ColumnValue::Int64(12).as_f64(), Some(12.0));
        assert_eq!(ColumnValue::Float64(12.5).as_f64(), Some(12.5));
        assert_eq!(ColumnValue::Float64(12.5).as_i64(), None);
        assert_eq!(ColumnValue::String("12".to_string()).as_f64(), None);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(ColumnValue::Null.to_text(), "");
        assert_eq!(ColumnValue::from("Rioja").to_text(), "Rioja");
        assert_eq!(ColumnValue::Int64(7).to_text(), "7");
        assert_eq!(ColumnValue::Bool(true).to_text(), "true");
    }

    #[test]
    fn test_type_widening() {
        assert_eq!(ColumnType::Int64.widen(ColumnType::Int64), ColumnType::Int64);
        assert_eq!(ColumnType::Int64.widen(ColumnType::Float64), ColumnType::Float64);
        assert_eq!(ColumnType::Float64.widen(ColumnType::Int64), ColumnType::Float64);
        assert_eq!(ColumnType::Bool.widen(ColumnType::Int64), ColumnType::String);
    }
}
