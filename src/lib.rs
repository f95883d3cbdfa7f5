/// WineStats - Cascading Filter and Derived View Engine
///
/// An immutable wine catalog, a dependent filter chain (country, region,
/// winery, wine) and a set of pure aggregations that turn the filtered subset
/// into chart-ready payloads. Every view for a selection is produced together
/// as one `DerivedViewBundle`.

pub mod column;
pub mod table;
pub mod region;
pub mod catalog;
pub mod selection;
pub mod filter;
pub mod aggregate;
pub mod bundle;
pub mod config;
pub mod dashboard;
pub mod cache;
pub mod error;

pub use column::{ColumnType, ColumnValue};
pub use table::{RawTable, Schema};
pub use region::NormalizedRegion;
pub use catalog::{Catalog, Record, FIXED_COLUMNS};
pub use selection::{apply_selection, Change, SelectionState, SelectionUpdate};
pub use filter::{
    country_options, filter_options, filtered_subset, region_options, wine_options, winery_options,
    FilterOptions, FilteredSubset,
};
pub use aggregate::{
    alcohol_price_points, alcohol_series, food_popularity_matrix, food_suggestions, price_distribution,
    rating_count_series, rating_price_points, taste_profile, top_food_ranking, FoodCount,
    FoodPopularityMatrix, FoodSuggestions, PriceDistribution, PriceSummary, ScatterPoint, SeriesPoint,
    TasteProfile, DEFAULT_TOP_FOODS,
};
pub use bundle::{assemble, BundleBuilder, DerivedViewBundle, ViewParts};
pub use config::EngineConfig;
pub use dashboard::{compute_views, Dashboard};
pub use cache::{BundleCache, CacheStats};
pub use error::{EngineError, Result, SchemaError};

// Python bindings - only when python feature is enabled
#[cfg(feature = "python")]
mod python_bindings;
#[cfg(feature = "python")]
pub use python_bindings::*;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::sync::Arc;

    const WINES_CSV: &str = "\
Country,Country_region,Winery,Name,Alcohol content,Number of Ratings,Rating,Price,Bold,Tannin,Sweet,Acidic,Beef,Pasta,Shellfish
France,\" burgundy \",Domaine A,Pinot Noir,13.0,120,4.2,10.0,3.0,2.0,1.0,4.0,1,1,0
France,Burgundy,Domaine B,Chardonnay,13.5,80,4.0,20.0,2.0,1.0,1.5,4.5,0,1,1
France,Bordeaux,Chateau C,\"Merlot, Grand Vin\",14.0,300,4.4,30.0,4.5,4.0,1.0,3.0,1,0,0
Italy,Tuscany,Fattoria D,Chianti,13.0,95,3.9,18.0,3.5,3.5,1.0,4.0,1,1,0
";

    #[test]
    fn test_complete_workflow() {
        // Load the catalog from export-style headers
        let catalog = Arc::new(Catalog::from_csv(WINES_CSV).unwrap());
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.food_attrs(), &["Beef", "Pasta", "Shellfish"]);
        assert_eq!(catalog.countries(), vec!["France", "Italy"]);

        let mut dashboard = Dashboard::new(Arc::clone(&catalog), EngineConfig::default());

        // Nothing selected: options beyond countries are empty and so are the views
        let views = dashboard.views();
        assert!(views.alcohol_series.is_empty());
        assert!(views.price_distribution.is_no_data());
        assert_eq!(views.food_popularity.column_total("Beef"), Some(3));

        // Country, then region
        dashboard.apply(SelectionUpdate::new().country("France"));
        let options = dashboard.options();
        let regions: Vec<&str> = options.regions.iter().map(|r| r.as_str()).collect();
        assert_eq!(regions, vec!["Bordeaux", "Burgundy"]);

        dashboard.apply(SelectionUpdate::new().region("Burgundy"));
        let views = dashboard.views();
        let names: Vec<&str> = views.alcohol_series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pinot Noir", "Chardonnay"]);
        assert_eq!(views.rating_count_series[0].value, 120);

        let summary = views.price_distribution.summary().unwrap();
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 20.0);
        assert_eq!(summary.median, 15.0);

        assert_eq!(views.top_foods[0].food, "Pasta");
        assert_eq!(views.top_foods[0].count, 2);

        // Wine pick only scopes the taste profile
        dashboard.apply(SelectionUpdate::new().wine("Chardonnay"));
        let views = dashboard.views();
        assert_eq!(views.alcohol_series.len(), 2);
        assert_eq!(views.taste_profile.unwrap().acidic, 4.5);

        // The same selection through the cache is computed once
        let mut cache = BundleCache::new(catalog, EngineConfig::default());
        let first = cache.get_or_compute(dashboard.state());
        let second = cache.get_or_compute(dashboard.state());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, dashboard.views());

        let json = first.to_json().unwrap();
        assert!(json.contains("\"Chardonnay\""));
    }

    #[test]
    fn test_quoted_name_survives_csv() {
        let catalog = Catalog::from_csv(WINES_CSV).unwrap();
        let state = SelectionState::new().with_country("France").with_region("bordeaux");
        let wines = filter_options(&catalog, &state).wines;
        assert_eq!(wines, vec!["Merlot, Grand Vin"]);
    }
}
