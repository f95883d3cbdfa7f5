/// Dashboard facade: holds the catalog, configuration and current selection,
/// and produces the option lists and view bundle for that selection.

use crate::aggregate::{
    alcohol_price_points, alcohol_series, food_popularity_matrix, food_suggestions,
    price_distribution, rating_count_series, rating_price_points, taste_profile, top_food_ranking,
};
use crate::bundle::{assemble, DerivedViewBundle, ViewParts};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::filter::{filter_options, filtered_subset, FilterOptions};
use crate::selection::{apply_selection, Change, SelectionState, SelectionUpdate};
use std::sync::Arc;

/// Filter, aggregate and assemble every view for `state`.
///
/// The winery narrows every view, charts included, not only the food
/// suggestions.
pub fn compute_views(catalog: &Catalog, state: &SelectionState, config: &EngineConfig) -> DerivedViewBundle {
    let subset = filtered_subset(catalog, state);
    let subject = state.winery().or(state.country());

    let parts = ViewParts {
        alcohol_series: alcohol_series(&subset),
        rating_count_series: rating_count_series(&subset),
        rating_price_points: rating_price_points(&subset),
        alcohol_price_points: alcohol_price_points(&subset),
        price_distribution: price_distribution(&subset),
        taste_profile: taste_profile(&subset, state.wine_name()),
        food_suggestions: food_suggestions(&subset, subject),
        food_popularity: food_popularity_matrix(catalog),
        top_foods: top_food_ranking(&subset, config.top_foods),
    };

    assemble(state.clone(), parts)
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    state: SelectionState,
}

impl Dashboard {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Dashboard {
            catalog,
            config,
            state: SelectionState::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Apply a selection change.
    ///
    /// With `reset_dependents`, a country change also clears region, winery
    /// and wine, and a region change clears winery and wine, unless the same
    /// update sets those fields itself.
    pub fn apply(&mut self, update: SelectionUpdate) -> &SelectionState {
        let update = if self.config.reset_dependents {
            self.with_dependents_reset(update)
        } else {
            update
        };
        self.state = apply_selection(&self.state, update);
        &self.state
    }

    /// Back to the empty selection.
    pub fn clear(&mut self) -> &SelectionState {
        self.state = SelectionState::new();
        &self.state
    }

    pub fn options(&self) -> FilterOptions {
        filter_options(&self.catalog, &self.state)
    }

    pub fn views(&self) -> DerivedViewBundle {
        compute_views(&self.catalog, &self.state, &self.config)
    }

    fn with_dependents_reset(&self, mut update: SelectionUpdate) -> SelectionUpdate {
        let country_changed = match &update.country {
            Change::Keep => false,
            Change::Set(country) => self.state.country() != Some(country.as_str()),
            Change::Clear => self.state.country().is_some(),
        };
        let region_changed = country_changed
            || match &update.region {
                Change::Keep => false,
                Change::Set(region) => self.state.region() != Some(region),
                Change::Clear => self.state.region().is_some(),
            };

        if country_changed && update.region.is_keep() {
            update.region = Change::Clear;
        }
        if region_changed {
            if update.winery.is_keep() {
                update.winery = Change::Clear;
            }
            if update.wine_name.is_keep() {
                update.wine_name = Change::Clear;
            }
        }
        update
    }
}
