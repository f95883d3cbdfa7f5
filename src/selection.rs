/// Selection state: the user's current narrowing of the catalog.
///
/// A selection is replaced, never merged with validation. Applying an update
/// does not clear dependent fields when an upstream one changes; stale
/// combinations simply produce empty views downstream.

use crate::error::{EngineError, Result};
use crate::region::NormalizedRegion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionState {
    pub country: Option<String>,
    pub region: Option<NormalizedRegion>,
    pub wine_name: Option<String>,
    pub winery: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = non_empty(country.into());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(NormalizedRegion::new(region)).filter(|r| !r.is_empty());
        self
    }

    pub fn with_winery(mut self, winery: impl Into<String>) -> Self {
        self.winery = non_empty(winery.into());
        self
    }

    pub fn with_wine(mut self, wine_name: impl Into<String>) -> Self {
        self.wine_name = non_empty(wine_name.into());
        self
    }

    /// The selected country. An empty string counts as unset.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref().filter(|c| !c.is_empty())
    }

    pub fn region(&self) -> Option<&NormalizedRegion> {
        self.region.as_ref().filter(|r| !r.is_empty())
    }

    pub fn winery(&self) -> Option<&str> {
        self.winery.as_deref().filter(|w| !w.is_empty())
    }

    pub fn wine_name(&self) -> Option<&str> {
        self.wine_name.as_deref().filter(|w| !w.is_empty())
    }

    /// Copy with empty-string fields turned into `None`.
    pub fn canonical(&self) -> SelectionState {
        SelectionState {
            country: self.country().map(str::to_string),
            region: self.region().cloned(),
            wine_name: self.wine_name().map(str::to_string),
            winery: self.winery().map(str::to_string),
        }
    }
}

/// What an update does to one selection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change<T> {
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for Change<T> {
    fn default() -> Self {
        Change::Keep
    }
}

impl<T> Change<T> {
    fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Change::Keep => current,
            Change::Set(value) => Some(value),
            Change::Clear => None,
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Change::Keep)
    }
}

/// A partial update to a `SelectionState`.
///
/// ```
/// use winestats::{apply_selection, SelectionState, SelectionUpdate};
///
/// let state = apply_selection(&SelectionState::new(), SelectionUpdate::new().country("France"));
/// let state = apply_selection(&state, SelectionUpdate::new().region(" burgundy "));
///
/// assert_eq!(state.country(), Some("France"));
/// assert_eq!(state.region().map(|r| r.as_str()), Some("Burgundy"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionUpdate {
    pub country: Change<String>,
    pub region: Change<NormalizedRegion>,
    pub wine_name: Change<String>,
    pub winery: Change<String>,
}

impl SelectionUpdate {
    pub fn new() -> Self {
        SelectionUpdate::default()
    }

    /// Set the country; an empty string clears it.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = set_or_clear(country.into());
        self
    }

    /// Set the region from a raw or normalized label; blank clears it.
    pub fn region(mut self, region: &str) -> Self {
        let region = NormalizedRegion::new(region);
        self.region = if region.is_empty() {
            Change::Clear
        } else {
            Change::Set(region)
        };
        self
    }

    pub fn winery(mut self, winery: impl Into<String>) -> Self {
        self.winery = set_or_clear(winery.into());
        self
    }

    pub fn wine(mut self, wine_name: impl Into<String>) -> Self {
        self.wine_name = set_or_clear(wine_name.into());
        self
    }

    pub fn clear_country(mut self) -> Self {
        self.country = Change::Clear;
        self
    }

    pub fn clear_region(mut self) -> Self {
        self.region = Change::Clear;
        self
    }

    pub fn clear_winery(mut self) -> Self {
        self.winery = Change::Clear;
        self
    }

    pub fn clear_wine(mut self) -> Self {
        self.wine_name = Change::Clear;
        self
    }

    /// Set or clear a field by name. `None` and "" clear it.
    ///
    /// Accepts `country`, `region`, `winery`, and `wine` or `wine_name`.
    pub fn field(self, name: &str, value: Option<&str>) -> Result<Self> {
        let value = value.unwrap_or_default();
        match name {
            "country" => Ok(self.country(value)),
            "region" => Ok(self.region(value)),
            "winery" => Ok(self.winery(value)),
            "wine" | "wine_name" => Ok(self.wine(value)),
            other => Err(EngineError::UnknownField(other.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_keep() && self.region.is_keep() && self.wine_name.is_keep() && self.winery.is_keep()
    }
}

/// Replace the fields named by `update`, leaving the others untouched.
/// Dependent fields are not cleared.
pub fn apply_selection(current: &SelectionState, update: SelectionUpdate) -> SelectionState {
    let next = SelectionState {
        country: update.country.apply(current.country.clone()),
        region: update.region.apply(current.region.clone()),
        wine_name: update.wine_name.apply(current.wine_name.clone()),
        winery: update.winery.apply(current.winery.clone()),
    };
    log::debug!("selection updated: {:?} -> {:?}", current, next);
    next
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

fn set_or_clear(value: String) -> Change<String> {
    if value.is_empty() {
        Change::Clear
    } else {
        Change::Set(value)
    }
}
