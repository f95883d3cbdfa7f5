/// WineStats Raw Table
///
/// A `RawTable` is the positional input a catalog is built from: a schema of
/// named, typed columns and rows of values addressed by column position.
/// Column meaning is fixed by position, not by name, so rows are plain
/// vectors rather than maps.
///
/// # Examples
///
/// ```
/// use winestats::{RawTable, Schema, ColumnType, ColumnValue};
///
/// let schema = Schema::new(vec![
///     ("country".to_string(), ColumnType::String),
///     ("price".to_string(), ColumnType::Float64),
/// ]);
/// let mut table = RawTable::new(schema);
/// table.append_row(vec![ColumnValue::from("France"), ColumnValue::from(24.5)]).unwrap();
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get_value(0, "country").unwrap().as_string(), Some("France"));
/// ```

use crate::column::{ColumnType, ColumnValue};
use crate::error::SchemaError;

/// Schema definition with column names and types, in column order.
///
/// # Examples
///
/// ```
/// use winestats::{Schema, ColumnType};
///
/// let schema = Schema::new(vec![
///     ("country".to_string(), ColumnType::String),
///     ("region".to_string(), ColumnType::String),
///     ("Pasta".to_string(), ColumnType::Bool),
/// ]);
///
/// assert_eq!(schema.len(), 3);
/// assert_eq!(schema.get_column_index("region"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<(String, ColumnType)>,
}

impl Schema {
    pub fn new(columns: Vec<(String, ColumnType)>) -> Self {
        Schema { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get_column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the index of the first column with this exact name.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    /// Returns (name, type) for the column at `index`.
    pub fn get_column_info(&self, index: usize) -> Option<(&str, ColumnType)> {
        self.columns.get(index).map(|(name, ty)| (name.as_str(), *ty))
    }
}

/// Positional table of raw rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    schema: Schema,
    rows: Vec<Vec<ColumnValue>>,
}

impl RawTable {
    pub fn new(schema: Schema) -> Self {
        RawTable {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<ColumnValue>] {
        &self.rows
    }

    pub fn get_value(&self, row: usize, column: &str) -> Option<&ColumnValue> {
        let col_idx = self.schema.get_column_index(column)?;
        self.rows.get(row)?.get(col_idx)
    }

    /// Append one row. The row must carry exactly one value per schema column.
    pub fn append_row(&mut self, row: Vec<ColumnValue>) -> Result<(), SchemaError> {
        if row.len() != self.schema.len() {
            return Err(SchemaError::RowWidth {
                row: self.rows.len(),
                expected: self.schema.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append multiple rows at once. No rows are inserted if any row is invalid.
    pub fn append_rows(&mut self, rows: Vec<Vec<ColumnValue>>) -> Result<usize, SchemaError> {
        let start = self.rows.len();
        for (offset, row) in rows.iter().enumerate() {
            if row.len() != self.schema.len() {
                return Err(SchemaError::RowWidth {
                    row: start + offset,
                    expected: self.schema.len(),
                    found: row.len(),
                });
            }
        }
        let count = rows.len();
        self.rows.extend(rows);
        Ok(count)
    }

    /// Create a table from column names and already-typed rows.
    ///
    /// Each column's type is widened over its non-null cells; an all-null
    /// column is STRING.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<ColumnValue>>) -> Result<RawTable, SchemaError> {
        let types: Vec<ColumnType> = (0..columns.len())
            .map(|col| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .filter_map(ColumnValue::column_type)
                    .reduce(ColumnType::widen)
                    .unwrap_or(ColumnType::String)
            })
            .collect();

        let mut table = RawTable::new(Schema::new(columns.into_iter().zip(types).collect()));
        table.append_rows(rows)?;
        Ok(table)
    }

    /// Create a table from CSV text.
    ///
    /// The first line is the header row. Column types are inferred across all
    /// data rows:
    /// - "true"/"false" (case-insensitive) → BOOL
    /// - integers → INT64
    /// - numbers with decimals → FLOAT64 (integer columns widen when mixed)
    /// - everything else → STRING
    ///
    /// Empty cells become NULL. Every cell is trimmed, so text values lose
    /// leading and trailing whitespace. A leading UTF-8 byte order mark is
    /// ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use winestats::RawTable;
    ///
    /// let csv = "country,price,Pasta\nItaly,12,True\nItaly,14.5,False";
    /// let table = RawTable::from_csv(csv).unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.get_value(0, "price").unwrap().as_f64(), Some(12.0));
    /// ```
    pub fn from_csv(csv: &str) -> Result<RawTable, SchemaError> {
        let csv = csv.strip_prefix('\u{feff}').unwrap_or(csv);
        let mut all_rows = parse_csv_rows(csv)?;

        if all_rows.is_empty() {
            return Err(SchemaError::Csv("CSV is empty".to_string()));
        }

        let column_names: Vec<String> = all_rows
            .remove(0)
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();
        if column_names.iter().all(|name| name.is_empty()) {
            return Err(SchemaError::Csv("CSV header is empty".to_string()));
        }

        let rows: Vec<Vec<String>> = all_rows
            .into_iter()
            .filter(|row| !row.iter().all(|f| f.trim().is_empty()))
            .collect();

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != column_names.len() {
                return Err(SchemaError::RowWidth {
                    row: idx,
                    expected: column_names.len(),
                    found: row.len(),
                });
            }
        }

        let types = infer_column_types(column_names.len(), &rows);
        let schema = Schema::new(column_names.iter().cloned().zip(types.iter().copied()).collect());

        let mut table = RawTable::new(schema);
        for (row_idx, row_values) in rows.iter().enumerate() {
            let mut row = Vec::with_capacity(row_values.len());
            for (col_idx, raw) in row_values.iter().enumerate() {
                row.push(parse_csv_value(raw, types[col_idx]).map_err(|expected| {
                    SchemaError::InvalidValue {
                        row: row_idx,
                        column: column_names[col_idx].clone(),
                        value: raw.clone(),
                        expected,
                    }
                })?);
            }
            table.append_row(row)?;
        }

        Ok(table)
    }
}

/// Parse CSV text into rows, handling quoted fields with embedded newlines
fn parse_csv_rows(csv: &str) -> Result<Vec<Vec<String>>, SchemaError> {
    let mut rows = Vec::new();
    let mut current_row = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = csv.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // Doubled quote is an escaped quote
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current_field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => {
                in_quotes = true;
            }
            ',' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_field));
            }
            '\n' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_field));
                rows.push(std::mem::take(&mut current_row));
            }
            '\r' if !in_quotes => {
                // Skip \r, will be followed by \n
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    if in_quotes {
        return Err(SchemaError::Csv("unterminated quoted field".to_string()));
    }

    if !current_field.is_empty() || !current_row.is_empty() {
        current_row.push(current_field);
        rows.push(current_row);
    }

    Ok(rows)
}

/// Infer one type per column, widening across every non-empty cell
fn infer_column_types(width: usize, rows: &[Vec<String>]) -> Vec<ColumnType> {
    (0..width)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .filter(|value| !value.trim().is_empty())
                .map(|value| infer_type_from_csv_value(value))
                .reduce(ColumnType::widen)
                .unwrap_or(ColumnType::String)
        })
        .collect()
}

/// Infer the type of a single CSV value
fn infer_type_from_csv_value(value: &str) -> ColumnType {
    let trimmed = value.trim();

    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return ColumnType::Bool;
    }

    if trimmed.parse::<i64>().is_ok() {
        return ColumnType::Int64;
    }

    if trimmed.parse::<f64>().is_ok() {
        return ColumnType::Float64;
    }

    ColumnType::String
}

/// Parse a CSV value into a ColumnValue based on the column type.
/// On failure returns the name of the expected type.
fn parse_csv_value(value: &str, col_type: ColumnType) -> Result<ColumnValue, &'static str> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Ok(ColumnValue::Null);
    }

    match col_type {
        ColumnType::Int64 => trimmed
            .parse::<i64>()
            .map(ColumnValue::Int64)
            .map_err(|_| col_type.name()),
        ColumnType::Float64 => trimmed
            .parse::<f64>()
            .map(ColumnValue::Float64)
            .map_err(|_| col_type.name()),
        ColumnType::Bool => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(ColumnValue::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(ColumnValue::Bool(false))
            } else {
                Err(col_type.name())
            }
        }
        ColumnType::String => Ok(ColumnValue::String(trimmed.to_string())),
    }
}
