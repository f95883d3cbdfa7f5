/// Python bindings for WineStats using PyO3
///
/// Exposes the catalog and the dashboard facade so a Python presentation
/// layer can drive the filter chain and render the views. Every payload comes
/// back as plain dicts and lists.

use pyo3::prelude::*;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::types::{PyBool, PyDict, PyList};
use std::sync::Arc;

use crate::catalog::Catalog as RustCatalog;
use crate::column::ColumnValue;
use crate::config::EngineConfig;
use crate::dashboard::Dashboard as RustDashboard;
use crate::selection::SelectionUpdate;
use crate::error::EngineError;
use crate::table::RawTable;

// ============================================================================
// Conversions
// ============================================================================

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Convert a Python scalar to a ColumnValue
fn py_to_column_value(value: &Bound<'_, PyAny>) -> PyResult<ColumnValue> {
    if value.is_none() {
        return Ok(ColumnValue::Null);
    }

    // Bool must be checked before int (bool is subclass of int in Python)
    if value.is_instance_of::<PyBool>() {
        return Ok(ColumnValue::Bool(value.extract()?));
    }
    if let Ok(v) = value.extract::<i64>() {
        return Ok(ColumnValue::Int64(v));
    }
    if let Ok(v) = value.extract::<f64>() {
        return Ok(ColumnValue::Float64(v));
    }
    if let Ok(v) = value.extract::<String>() {
        return Ok(ColumnValue::String(v));
    }

    Err(PyTypeError::new_err(format!(
        "unsupported cell type: {}",
        value.get_type().name()?
    )))
}

/// Convert a serialized payload into nested Python dicts and lists
fn json_to_py(py: Python, value: &serde_json::Value) -> PyResult<PyObject> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(py.None()),
        Value::Bool(b) => Ok(b.to_object(py)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_object(py))
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_object(py))
            } else {
                Ok(n.as_f64().unwrap_or(f64::NAN).to_object(py))
            }
        }
        Value::String(s) => Ok(s.to_object(py)),
        Value::Array(items) => {
            let list = PyList::empty_bound(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            Ok(list.to_object(py))
        }
        Value::Object(map) => {
            let dict = PyDict::new_bound(py);
            for (key, item) in map {
                dict.set_item(key, json_to_py(py, item)?)?;
            }
            Ok(dict.to_object(py))
        }
    }
}

fn to_py<T: serde::Serialize>(py: Python, payload: &T) -> PyResult<PyObject> {
    let value = serde_json::to_value(payload).map_err(value_error)?;
    json_to_py(py, &value)
}

// ============================================================================
// Catalog
// ============================================================================

/// Immutable wine catalog
#[pyclass(name = "Catalog", unsendable)]
#[derive(Clone)]
pub struct PyCatalog {
    inner: Arc<RustCatalog>,
}

#[pymethods]
impl PyCatalog {
    /// Build a catalog from CSV text: fixed columns first, then food columns.
    #[staticmethod]
    fn from_csv(csv: &str) -> PyResult<Self> {
        let catalog = RustCatalog::from_csv(csv).map_err(value_error)?;
        Ok(PyCatalog {
            inner: Arc::new(catalog),
        })
    }

    /// Build a catalog from a header list and a list of row lists.
    #[staticmethod]
    fn from_rows(columns: Vec<String>, rows: Vec<Vec<Bound<'_, PyAny>>>) -> PyResult<Self> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(py_to_column_value).collect::<PyResult<Vec<_>>>())
            .collect::<PyResult<Vec<_>>>()?;

        let table = RawTable::from_rows(columns, rows).map_err(value_error)?;
        let catalog = RustCatalog::from_table(&table).map_err(value_error)?;
        Ok(PyCatalog {
            inner: Arc::new(catalog),
        })
    }

    fn countries(&self) -> Vec<String> {
        self.inner.countries()
    }

    fn food_attrs(&self) -> Vec<String> {
        self.inner.food_attrs().to_vec()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Catalog(records={}, food_attrs={})",
            self.inner.len(),
            self.inner.food_attrs().len()
        )
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Selection state plus the views derived from it
#[pyclass(name = "Dashboard", unsendable)]
pub struct PyDashboard {
    inner: RustDashboard,
}

#[pymethods]
impl PyDashboard {
    #[new]
    #[pyo3(signature = (catalog, top_foods=None, reset_dependents=None))]
    fn new(catalog: PyRef<'_, PyCatalog>, top_foods: Option<usize>, reset_dependents: Option<bool>) -> Self {
        let mut config = EngineConfig::from_env();
        if let Some(top_foods) = top_foods {
            config.top_foods = top_foods;
        }
        if let Some(reset_dependents) = reset_dependents {
            config.reset_dependents = reset_dependents;
        }

        PyDashboard {
            inner: RustDashboard::new(Arc::clone(&catalog.inner), config),
        }
    }

    /// Update the selection: `select(country="France", region=None)`.
    ///
    /// A string sets a field, `None` or "" clears it, omitted fields are kept.
    /// Returns the resulting selection as a dict.
    #[pyo3(signature = (**fields))]
    fn select(&mut self, py: Python, fields: Option<&Bound<'_, PyDict>>) -> PyResult<PyObject> {
        let mut update = SelectionUpdate::new();

        if let Some(fields) = fields {
            for (key, value) in fields.iter() {
                let key: String = key.extract()?;
                let value: Option<String> = value.extract()?;
                update = update.field(&key, value.as_deref()).map_err(|e| match e {
                    EngineError::UnknownField(name) => PyTypeError::new_err(format!(
                        "select() got an unexpected keyword argument '{}'",
                        name
                    )),
                    other => value_error(other),
                })?;
            }
        }

        let state = self.inner.apply(update);
        to_py(py, state)
    }

    fn clear(&mut self, py: Python) -> PyResult<PyObject> {
        let state = self.inner.clear();
        to_py(py, state)
    }

    fn selection(&self, py: Python) -> PyResult<PyObject> {
        to_py(py, self.inner.state())
    }

    /// Option lists for the four filter controls
    fn options(&self, py: Python) -> PyResult<PyObject> {
        to_py(py, &self.inner.options())
    }

    /// Every view for the current selection
    fn views(&self, py: Python) -> PyResult<PyObject> {
        to_py(py, &self.inner.views())
    }

    fn views_json(&self) -> PyResult<String> {
        self.inner.views().to_json().map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!("Dashboard(selection={:?})", self.inner.state())
    }
}

// ============================================================================
// Module Definition
// ============================================================================

/// Python module for WineStats
#[pymodule]
fn winestats(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCatalog>()?;
    m.add_class::<PyDashboard>()?;
    Ok(())
}
