/// Bundle cache
///
/// Memoizes `DerivedViewBundle`s by selection for one catalog. Selections are
/// keyed in canonical form, so an empty-string field and an unset field share
/// an entry. Replacing the catalog bumps the generation and drops every entry.

use crate::bundle::DerivedViewBundle;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::dashboard::compute_views;
use crate::selection::SelectionState;
use std::collections::HashMap;
use std::sync::Arc;

pub struct BundleCache {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    entries: HashMap<SelectionState, Arc<DerivedViewBundle>>,
    /// Incremented each time the catalog is replaced or the cache invalidated
    generation: u64,
    hits: u64,
    misses: u64,
}

/// Counters describing cache effectiveness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries currently stored
    pub entries: usize,
    pub generation: u64,
}

impl BundleCache {
    pub fn new(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        BundleCache {
            catalog,
            config,
            entries: HashMap::new(),
            generation: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Cached bundle for `state`, computing and storing it on a miss.
    pub fn get_or_compute(&mut self, state: &SelectionState) -> Arc<DerivedViewBundle> {
        let key = state.canonical();
        if let Some(bundle) = self.entries.get(&key) {
            self.hits += 1;
            log::trace!("bundle cache hit: {:?}", key);
            return Arc::clone(bundle);
        }

        self.misses += 1;
        log::trace!("bundle cache miss: {:?}", key);
        let bundle = Arc::new(compute_views(&self.catalog, &key, &self.config));

        let capacity = self.config.cache_capacity;
        if capacity == 0 {
            return bundle;
        }
        if self.entries.len() >= capacity {
            self.entries.clear();
        }
        self.entries.insert(key, Arc::clone(&bundle));
        bundle
    }

    /// Swap in a new catalog and drop every cached bundle.
    pub fn reload(&mut self, catalog: Arc<Catalog>) {
        self.catalog = catalog;
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
            generation: self.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Record;

    fn record(country: &str, name: &str, price: f64) -> Record {
        Record {
            country: country.to_string(),
            region: "Somewhere".to_string(),
            winery: "Estate".to_string(),
            name: name.to_string(),
            alcohol_content: 12.5,
            num_ratings: 10,
            rating: 3.9,
            price,
            bold: 3.0,
            tannin: 2.0,
            sweet: 2.0,
            acidic: 3.0,
            foods: vec![],
        }
    }

    fn catalog(records: Vec<Record>) -> Arc<Catalog> {
        Arc::new(Catalog::new(records, vec![]).unwrap())
    }

    #[test]
    fn test_same_state_computed_once() {
        let mut cache = BundleCache::new(catalog(vec![record("Chile", "Carmenere", 12.0)]), EngineConfig::default());
        let state = SelectionState::new().with_country("Chile");

        let first = cache.get_or_compute(&state);
        let second = cache.get_or_compute(&state);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_empty_string_fields_share_entry() {
        let mut cache = BundleCache::new(catalog(vec![record("Chile", "Carmenere", 12.0)]), EngineConfig::default());
        let plain = SelectionState::new().with_country("Chile");
        let padded = SelectionState {
            winery: Some(String::new()),
            ..plain.clone()
        };

        cache.get_or_compute(&plain);
        cache.get_or_compute(&padded);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_reload_drops_entries() {
        let mut cache = BundleCache::new(catalog(vec![record("Chile", "Carmenere", 12.0)]), EngineConfig::default());
        let state = SelectionState::new().with_country("Chile");
        assert_eq!(cache.get_or_compute(&state).alcohol_series.len(), 1);

        cache.reload(catalog(vec![
            record("Chile", "Carmenere", 12.0),
            record("Chile", "Pais", 9.0),
        ]));
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 1);

        assert_eq!(cache.get_or_compute(&state).alcohol_series.len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_capacity_bounds() {
        let records = vec![record("Chile", "Carmenere", 12.0), record("Peru", "Tannat", 15.0)];

        let config = EngineConfig::default().with_cache_capacity(1);
        let mut cache = BundleCache::new(catalog(records.clone()), config);
        cache.get_or_compute(&SelectionState::new().with_country("Chile"));
        cache.get_or_compute(&SelectionState::new().with_country("Peru"));
        assert_eq!(cache.len(), 1);

        let config = EngineConfig::default().with_cache_capacity(0);
        let mut cache = BundleCache::new(catalog(records), config);
        let state = SelectionState::new().with_country("Chile");
        cache.get_or_compute(&state);
        cache.get_or_compute(&state);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }
}
