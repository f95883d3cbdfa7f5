/// WineStats Catalog
///
/// The catalog is the immutable, in-memory table of wine records that every
/// filter and view reads from. It is built once, either from a positional
/// `RawTable` (fixed columns first, every later column a food attribute) or
/// from records plus an explicit food-attribute manifest, and is never mutated
/// afterwards. Share it between sessions with `Arc<Catalog>`.
///
/// # Examples
///
/// ```
/// use winestats::Catalog;
///
/// let csv = "\
/// country,region,winery,name,alcohol_content,num_ratings,rating,price,bold,tannin,sweet,acidic,Beef,Fish
/// France,Burgundy,Domaine A,Pinot 2019,13.0,120,4.2,35.0,3.1,2.5,1.2,3.9,true,false
/// ";
/// let catalog = Catalog::from_csv(csv).unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.food_attrs(), &["Beef".to_string(), "Fish".to_string()]);
/// ```

use crate::column::ColumnValue;
use crate::error::SchemaError;
use crate::region::NormalizedRegion;
use crate::table::RawTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Fixed columns, in the order a raw table must present them.
pub const FIXED_COLUMNS: [&str; 12] = [
    "country",
    "region",
    "winery",
    "name",
    "alcohol_content",
    "num_ratings",
    "rating",
    "price",
    "bold",
    "tannin",
    "sweet",
    "acidic",
];

/// One wine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    /// Raw region label; compare through `NormalizedRegion` only.
    pub region: String,
    pub winery: String,
    pub name: String,
    pub alcohol_content: f64,
    pub num_ratings: i64,
    pub rating: f64,
    pub price: f64,
    pub bold: f64,
    pub tannin: f64,
    pub sweet: f64,
    pub acidic: f64,
    /// One flag per catalog food attribute, in manifest order.
    pub foods: Vec<bool>,
}

impl Record {
    /// Whether the food attribute at `index` is set. Out-of-range is `false`.
    pub fn has_food(&self, index: usize) -> bool {
        self.foods.get(index).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    /// regions[i] is the normalized form of records[i].region
    regions: Vec<NormalizedRegion>,
    food_attrs: Vec<String>,
}

impl Catalog {
    /// Build a catalog from records and an explicit food-attribute manifest.
    pub fn new(records: Vec<Record>, food_attrs: Vec<String>) -> Result<Self, SchemaError> {
        validate_food_attrs(&food_attrs, 0)?;

        for (row, record) in records.iter().enumerate() {
            if record.foods.len() != food_attrs.len() {
                return Err(SchemaError::FoodFlagCount {
                    row,
                    expected: food_attrs.len(),
                    found: record.foods.len(),
                });
            }
        }

        let regions = records.iter().map(|r| NormalizedRegion::new(&r.region)).collect();

        log::debug!(
            "catalog built: {} records, {} food attributes",
            records.len(),
            food_attrs.len()
        );

        Ok(Catalog {
            records,
            regions,
            food_attrs,
        })
    }

    pub fn empty() -> Self {
        Catalog::default()
    }

    /// Build a catalog from a positional raw table.
    ///
    /// The first twelve columns must be `FIXED_COLUMNS` in order (header
    /// matching ignores case and treats spaces and hyphens as underscores;
    /// `Country_region` and `Number of Ratings` are accepted as aliases).
    /// Every column after them is a food attribute.
    pub fn from_table(table: &RawTable) -> Result<Self, SchemaError> {
        let names = table.schema().get_column_names();
        let canonical: Vec<String> = names.iter().map(|n| canonical_header(n)).collect();

        for (position, &expected) in FIXED_COLUMNS.iter().enumerate() {
            match canonical.get(position) {
                Some(found) if found.as_str() == expected => {}
                found => {
                    let present = canonical.iter().any(|c| c.as_str() == expected);
                    return Err(match (found, present) {
                        (Some(_), true) => SchemaError::ColumnOutOfOrder {
                            expected,
                            found: names[position].to_string(),
                            position,
                        },
                        _ => SchemaError::MissingColumn { expected, position },
                    });
                }
            }
        }

        let food_attrs: Vec<String> = names[FIXED_COLUMNS.len()..]
            .iter()
            .map(|n| n.trim().to_string())
            .collect();
        validate_food_attrs(&food_attrs, FIXED_COLUMNS.len())?;

        let mut records = Vec::with_capacity(table.len());
        for (row_idx, row) in table.rows().iter().enumerate() {
            records.push(record_from_row(row_idx, &names, row)?);
        }

        Catalog::new(records, food_attrs)
    }

    /// Parse CSV text and build the catalog positionally.
    pub fn from_csv(csv: &str) -> Result<Self, SchemaError> {
        Catalog::from_table(&RawTable::from_csv(csv)?)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Normalized region of the record at `index`.
    pub fn normalized_region(&self, index: usize) -> Option<&NormalizedRegion> {
        self.regions.get(index)
    }

    pub fn food_attrs(&self) -> &[String] {
        &self.food_attrs
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries, sorted ascending.
    pub fn countries(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn canonical_header(name: &str) -> String {
    let canonical: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_lowercase() })
        .collect();

    match canonical.as_str() {
        "country_region" => "region".to_string(),
        "number_of_ratings" => "num_ratings".to_string(),
        _ => canonical,
    }
}

fn validate_food_attrs(food_attrs: &[String], offset: usize) -> Result<(), SchemaError> {
    let mut seen = HashSet::with_capacity(food_attrs.len());
    for (i, attr) in food_attrs.iter().enumerate() {
        if attr.trim().is_empty() {
            return Err(SchemaError::EmptyFoodAttribute(offset + i));
        }
        if !seen.insert(attr.as_str()) {
            return Err(SchemaError::DuplicateFoodAttribute(attr.clone()));
        }
    }
    Ok(())
}

static NULL_CELL: ColumnValue = ColumnValue::Null;

fn record_from_row(row: usize, names: &[&str], values: &[ColumnValue]) -> Result<Record, SchemaError> {
    let cell = |col: usize| values.get(col).unwrap_or(&NULL_CELL);
    let invalid = |col: usize, expected: &'static str| SchemaError::InvalidValue {
        row,
        column: names.get(col).copied().unwrap_or_default().to_string(),
        value: cell(col).to_string(),
        expected,
    };

    let float = |col: usize| cell(col).as_f64().ok_or_else(|| invalid(col, "FLOAT64"));

    let integer = |col: usize| match cell(col) {
        ColumnValue::Int64(v) => Ok(*v),
        ColumnValue::Float64(v) if v.is_finite() && v.fract() == 0.0 => Ok(*v as i64),
        _ => Err(invalid(col, "INT64")),
    };

    let flag = |col: usize| match cell(col) {
        ColumnValue::Bool(b) => Ok(*b),
        ColumnValue::Null => Ok(false),
        ColumnValue::Int64(v @ (0 | 1)) => Ok(*v == 1),
        ColumnValue::Float64(v) if *v == 0.0 || *v == 1.0 => Ok(*v == 1.0),
        _ => Err(invalid(col, "BOOL")),
    };

    let foods = (FIXED_COLUMNS.len()..names.len())
        .map(flag)
        .collect::<Result<Vec<bool>, SchemaError>>()?;

    Ok(Record {
        country: cell(0).to_text(),
        region: cell(1).to_text(),
        winery: cell(2).to_text(),
        name: cell(3).to_text(),
        alcohol_content: float(4)?,
        num_ratings: integer(5)?,
        rating: float(6)?,
        price: float(7)?,
        bold: float(8)?,
        tannin: float(9)?,
        sweet: float(10)?,
        acidic: float(11)?,
        foods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;
    use crate::table::Schema;

    fn fixed_schema(foods: &[&str]) -> Schema {
        let mut columns: Vec<(String, ColumnType)> = vec![
            ("Country".to_string(), ColumnType::String),
            ("Country_region".to_string(), ColumnType::String),
            ("Winery".to_string(), ColumnType::String),
            ("Name".to_string(), ColumnType::String),
            ("Alcohol content".to_string(), ColumnType::Float64),
            ("Number of Ratings".to_string(), ColumnType::Int64),
            ("Rating".to_string(), ColumnType::Float64),
            ("Price".to_string(), ColumnType::Float64),
            ("Bold".to_string(), ColumnType::Float64),
            ("Tannin".to_string(), ColumnType::Float64),
            ("Sweet".to_string(), ColumnType::Float64),
            ("Acidic".to_string(), ColumnType::Float64),
        ];
        columns.extend(foods.iter().map(|f| (f.to_string(), ColumnType::Bool)));
        Schema::new(columns)
    }

    fn row(country: &str, region: &str, price: f64, foods: &[bool]) -> Vec<ColumnValue> {
        let mut values: Vec<ColumnValue> = vec![
            country.into(),
            region.into(),
            "Winery".into(),
            "Wine".into(),
            13.5.into(),
            ColumnValue::Int64(100),
            4.0.into(),
            price.into(),
            3.0.into(),
            2.0.into(),
            1.0.into(),
            4.0.into(),
        ];
        values.extend(foods.iter().map(|f| ColumnValue::Bool(*f)));
        values
    }

    #[test]
    fn test_from_table_positional_food_attrs() {
        let mut table = RawTable::new(fixed_schema(&["Beef", "Pasta", "Shellfish"]));
        table.append_row(row("France", " burgundy ", 20.0, &[true, false, true])).unwrap();

        let catalog = Catalog::from_table(&table).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.food_attrs(), &["Beef", "Pasta", "Shellfish"]);
        let record = catalog.record(0).unwrap();
        assert_eq!(record.region, " burgundy ");
        assert_eq!(record.foods, vec![true, false, true]);
        assert_eq!(catalog.normalized_region(0).unwrap().as_str(), "Burgundy");
    }

    #[test]
    fn test_from_table_missing_column() {
        let schema = Schema::new(vec![
            ("country".to_string(), ColumnType::String),
            ("winery".to_string(), ColumnType::String),
        ]);
        let err = Catalog::from_table(&RawTable::new(schema)).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumn { expected: "region", position: 1 });
    }

    #[test]
    fn test_from_table_column_out_of_order() {
        let mut columns: Vec<(String, ColumnType)> = FIXED_COLUMNS
            .iter()
            .map(|c| (c.to_string(), ColumnType::String))
            .collect();
        columns.swap(2, 3);
        let err = Catalog::from_table(&RawTable::new(Schema::new(columns))).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ColumnOutOfOrder { expected: "winery", found: "name".to_string(), position: 2 }
        );
    }

    #[test]
    fn test_from_table_rejects_bad_cells() {
        let mut table = RawTable::new(fixed_schema(&["Beef"]));
        let mut bad = row("Italy", "Tuscany", 10.0, &[true]);
        bad[7] = "cheap".into();
        table.append_row(bad).unwrap();

        match Catalog::from_table(&table).unwrap_err() {
            SchemaError::InvalidValue { row, column, expected, .. } => {
                assert_eq!(row, 0);
                assert_eq!(column, "Price");
                assert_eq!(expected, "FLOAT64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_food_flag_coercion() {
        let mut table = RawTable::new(fixed_schema(&["Beef", "Fish", "Pork"]));
        let mut values = row("Chile", "Maipo", 9.0, &[]);
        values.extend([ColumnValue::Int64(1), ColumnValue::Null, ColumnValue::Int64(0)]);
        table.append_row(values).unwrap();

        let catalog = Catalog::from_table(&table).unwrap();
        assert_eq!(catalog.record(0).unwrap().foods, vec![true, false, false]);
    }

    #[test]
    fn test_new_with_manifest_validates() {
        let record = Record {
            country: "Spain".to_string(),
            region: "Rioja".to_string(),
            winery: "Bodega".to_string(),
            name: "Tinto".to_string(),
            alcohol_content: 14.0,
            num_ratings: 10,
            rating: 3.8,
            price: 12.0,
            bold: 4.0,
            tannin: 3.0,
            sweet: 1.0,
            acidic: 3.0,
            foods: vec![true],
        };

        let err = Catalog::new(vec![record.clone()], vec!["Lamb".into(), "Game".into()]).unwrap_err();
        assert_eq!(err, SchemaError::FoodFlagCount { row: 0, expected: 2, found: 1 });

        let err = Catalog::new(vec![], vec!["Lamb".into(), "Lamb".into()]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateFoodAttribute("Lamb".to_string()));

        let catalog = Catalog::new(vec![record], vec!["Lamb".into()]).unwrap();
        assert_eq!(catalog.countries(), vec!["Spain".to_string()]);
    }

    #[test]
    fn test_countries_sorted_distinct() {
        let mut table = RawTable::new(fixed_schema(&[]));
        for country in ["Spain", "France", "Spain", "Argentina"] {
            table.append_row(row(country, "X", 1.0, &[])).unwrap();
        }
        let catalog = Catalog::from_table(&table).unwrap();
        assert_eq!(catalog.countries(), vec!["Argentina", "France", "Spain"]);
    }

    #[test]
    fn test_from_csv_with_byte_order_mark() {
        let csv = "\u{feff}Country,Country_region,Winery,Name,Alcohol content,Number of Ratings,\
                   Rating,Price,Bold,Tannin,Sweet,Acidic,Beef\n\
                   Chile,Maipo,Vina A,Carmenere,13.5,40,3.9,12.0,4,3,1,3,1\n";
        let catalog = Catalog::from_csv(csv).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.countries(), vec!["Chile"]);
        assert_eq!(catalog.food_attrs(), &["Beef"]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.food_attrs().is_empty());
        assert!(catalog.countries().is_empty());
    }
}
