/// WineStats Filter Engine
///
/// Computes the option lists for each dependent filter level and the filtered
/// subset of the catalog for a selection. A `FilteredSubset` is an index
/// mapping into the catalog (subset position → catalog row), kept in catalog
/// order.
///
/// Constraints apply in a fixed order: country (exact), then region
/// (normalized equality), then winery (exact). The wine name only scopes the
/// taste profile and is not applied here. A selection that no longer fits the
/// catalog yields an empty subset, never an error.

use crate::catalog::{Catalog, Record};
use crate::region::NormalizedRegion;
use crate::selection::SelectionState;
use serde::Serialize;
use std::collections::BTreeSet;

/// The catalog rows matching a selection, in catalog order.
#[derive(Debug, Clone)]
pub struct FilteredSubset<'a> {
    catalog: &'a Catalog,
    subset_to_catalog: Vec<usize>,
}

impl<'a> FilteredSubset<'a> {
    pub fn empty(catalog: &'a Catalog) -> Self {
        FilteredSubset {
            catalog,
            subset_to_catalog: Vec::new(),
        }
    }

    /// Every catalog row, unfiltered.
    pub fn all(catalog: &'a Catalog) -> Self {
        FilteredSubset {
            catalog,
            subset_to_catalog: (0..catalog.len()).collect(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn len(&self) -> usize {
        self.subset_to_catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subset_to_catalog.is_empty()
    }

    /// Catalog row indices of the subset, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.subset_to_catalog
    }

    pub fn get(&self, index: usize) -> Option<&'a Record> {
        let catalog = self.catalog;
        self.subset_to_catalog.get(index).and_then(|&row| catalog.record(row))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let catalog = self.catalog;
        self.subset_to_catalog.iter().filter_map(move |&row| catalog.record(row))
    }

    /// Keep only the rows for which `predicate` holds. Order is preserved.
    pub fn narrow<F>(&self, mut predicate: F) -> FilteredSubset<'a>
    where
        F: FnMut(usize, &Record) -> bool,
    {
        let catalog = self.catalog;
        let subset_to_catalog = self
            .subset_to_catalog
            .iter()
            .copied()
            .filter(|&row| catalog.record(row).map_or(false, |r| predicate(row, r)))
            .collect();
        FilteredSubset {
            catalog,
            subset_to_catalog,
        }
    }
}

/// Option lists for every filter control.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub regions: Vec<NormalizedRegion>,
    pub wineries: Vec<String>,
    pub wines: Vec<String>,
}

/// Distinct countries, sorted ascending.
pub fn country_options(catalog: &Catalog) -> Vec<String> {
    catalog.countries()
}

/// Distinct normalized regions within `country`, sorted ascending.
/// Empty when no country is selected.
pub fn region_options(catalog: &Catalog, country: Option<&str>) -> Vec<NormalizedRegion> {
    let Some(country) = active(country) else {
        return Vec::new();
    };

    catalog
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.country == country)
        .filter_map(|(row, _)| catalog.normalized_region(row))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct wineries within `country` and, if given, `region`; sorted ascending.
pub fn winery_options(catalog: &Catalog, country: Option<&str>, region: Option<&NormalizedRegion>) -> Vec<String> {
    distinct_within(catalog, country, region, |r| r.winery.as_str())
}

/// Distinct wine names within `country` and, if given, `region`; sorted ascending.
pub fn wine_options(catalog: &Catalog, country: Option<&str>, region: Option<&NormalizedRegion>) -> Vec<String> {
    distinct_within(catalog, country, region, |r| r.name.as_str())
}

/// All option lists for the current selection.
pub fn filter_options(catalog: &Catalog, state: &SelectionState) -> FilterOptions {
    let country = state.country();
    let region = state.region();
    FilterOptions {
        countries: country_options(catalog),
        regions: region_options(catalog, country),
        wineries: winery_options(catalog, country, region),
        wines: wine_options(catalog, country, region),
    }
}

/// The catalog rows matching every constraint set in `state`.
///
/// Without a country there is no active filter and the subset is empty.
pub fn filtered_subset<'a>(catalog: &'a Catalog, state: &SelectionState) -> FilteredSubset<'a> {
    let Some(country) = state.country() else {
        return FilteredSubset::empty(catalog);
    };

    let mut subset = FilteredSubset::all(catalog).narrow(|_, r| r.country == country);

    if let Some(region) = state.region() {
        let before = subset.len();
        subset = subset.narrow(|row, _| catalog.normalized_region(row) == Some(region));
        if before > 0 && subset.is_empty() {
            log::debug!("region '{}' matches nothing in country '{}'", region, country);
        }
    }

    if let Some(winery) = state.winery() {
        let before = subset.len();
        subset = subset.narrow(|_, r| r.winery == winery);
        if before > 0 && subset.is_empty() {
            log::debug!("winery '{}' matches nothing under the current selection", winery);
        }
    }

    log::trace!("filtered subset: {} of {} records", subset.len(), catalog.len());
    subset
}

fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn distinct_within<F>(
    catalog: &Catalog,
    country: Option<&str>,
    region: Option<&NormalizedRegion>,
    key: F,
) -> Vec<String>
where
    F: Fn(&Record) -> &str,
{
    let Some(country) = active(country) else {
        return Vec::new();
    };
    let region = region.filter(|r| !r.is_empty());

    catalog
        .records()
        .iter()
        .enumerate()
        .filter(|(row, r)| {
            r.country == country
                && region.map_or(true, |region| catalog.normalized_region(*row) == Some(region))
        })
        .map(|(_, r)| key(r))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
