/// WineStats View Assembler
///
/// Packages the nine view payloads and the selection they were computed for
/// into one immutable `DerivedViewBundle`. No computation happens here; the
/// builder only checks that every payload was supplied.

use crate::aggregate::{
    FoodCount, FoodPopularityMatrix, FoodSuggestions, PriceDistribution, ScatterPoint, SeriesPoint,
    TasteProfile,
};
use crate::error::{EngineError, Result};
use crate::selection::SelectionState;
use serde::Serialize;

/// Every view for one selection, produced together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViewBundle {
    pub selection: SelectionState,
    pub alcohol_series: Vec<SeriesPoint<f64>>,
    pub rating_count_series: Vec<SeriesPoint<i64>>,
    pub rating_price_points: Vec<ScatterPoint>,
    pub alcohol_price_points: Vec<ScatterPoint>,
    pub price_distribution: PriceDistribution,
    pub taste_profile: Option<TasteProfile>,
    pub food_suggestions: FoodSuggestions,
    pub food_popularity: FoodPopularityMatrix,
    pub top_foods: Vec<FoodCount>,
}

/// The nine payloads of a bundle, all present.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParts {
    pub alcohol_series: Vec<SeriesPoint<f64>>,
    pub rating_count_series: Vec<SeriesPoint<i64>>,
    pub rating_price_points: Vec<ScatterPoint>,
    pub alcohol_price_points: Vec<ScatterPoint>,
    pub price_distribution: PriceDistribution,
    pub taste_profile: Option<TasteProfile>,
    pub food_suggestions: FoodSuggestions,
    pub food_popularity: FoodPopularityMatrix,
    pub top_foods: Vec<FoodCount>,
}

/// One-shot assembly from a complete set of payloads.
pub fn assemble(selection: SelectionState, parts: ViewParts) -> DerivedViewBundle {
    let ViewParts {
        alcohol_series,
        rating_count_series,
        rating_price_points,
        alcohol_price_points,
        price_distribution,
        taste_profile,
        food_suggestions,
        food_popularity,
        top_foods,
    } = parts;

    DerivedViewBundle {
        selection,
        alcohol_series,
        rating_count_series,
        rating_price_points,
        alcohol_price_points,
        price_distribution,
        taste_profile,
        food_suggestions,
        food_popularity,
        top_foods,
    }
}

impl DerivedViewBundle {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Collects view payloads for a `DerivedViewBundle`.
///
/// ```
/// use winestats::{BundleBuilder, EngineError, SelectionState};
///
/// let err = BundleBuilder::new(SelectionState::new())
///     .alcohol_series(vec![])
///     .build()
///     .unwrap_err();
///
/// match err {
///     EngineError::IncompleteBundle { missing } => assert_eq!(missing.len(), 8),
///     other => panic!("unexpected error: {other}"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BundleBuilder {
    selection: SelectionState,
    alcohol_series: Option<Vec<SeriesPoint<f64>>>,
    rating_count_series: Option<Vec<SeriesPoint<i64>>>,
    rating_price_points: Option<Vec<ScatterPoint>>,
    alcohol_price_points: Option<Vec<ScatterPoint>>,
    price_distribution: Option<PriceDistribution>,
    // Outer Option: supplied or not. Inner: the profile may be absent.
    taste_profile: Option<Option<TasteProfile>>,
    food_suggestions: Option<FoodSuggestions>,
    food_popularity: Option<FoodPopularityMatrix>,
    top_foods: Option<Vec<FoodCount>>,
}

impl BundleBuilder {
    pub fn new(selection: SelectionState) -> Self {
        BundleBuilder {
            selection,
            ..Default::default()
        }
    }

    pub fn alcohol_series(mut self, series: Vec<SeriesPoint<f64>>) -> Self {
        self.alcohol_series = Some(series);
        self
    }

    pub fn rating_count_series(mut self, series: Vec<SeriesPoint<i64>>) -> Self {
        self.rating_count_series = Some(series);
        self
    }

    pub fn rating_price_points(mut self, points: Vec<ScatterPoint>) -> Self {
        self.rating_price_points = Some(points);
        self
    }

    pub fn alcohol_price_points(mut self, points: Vec<ScatterPoint>) -> Self {
        self.alcohol_price_points = Some(points);
        self
    }

    pub fn price_distribution(mut self, distribution: PriceDistribution) -> Self {
        self.price_distribution = Some(distribution);
        self
    }

    pub fn taste_profile(mut self, profile: Option<TasteProfile>) -> Self {
        self.taste_profile = Some(profile);
        self
    }

    pub fn food_suggestions(mut self, suggestions: FoodSuggestions) -> Self {
        self.food_suggestions = Some(suggestions);
        self
    }

    pub fn food_popularity(mut self, matrix: FoodPopularityMatrix) -> Self {
        self.food_popularity = Some(matrix);
        self
    }

    pub fn top_foods(mut self, ranking: Vec<FoodCount>) -> Self {
        self.top_foods = Some(ranking);
        self
    }

    /// Names of the payloads not supplied yet.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("alcohol_series", self.alcohol_series.is_none()),
            ("rating_count_series", self.rating_count_series.is_none()),
            ("rating_price_points", self.rating_price_points.is_none()),
            ("alcohol_price_points", self.alcohol_price_points.is_none()),
            ("price_distribution", self.price_distribution.is_none()),
            ("taste_profile", self.taste_profile.is_none()),
            ("food_suggestions", self.food_suggestions.is_none()),
            ("food_popularity", self.food_popularity.is_none()),
            ("top_foods", self.top_foods.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name)
        .collect()
    }

    pub fn build(self) -> Result<DerivedViewBundle> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(EngineError::IncompleteBundle { missing });
        }

        match self {
            BundleBuilder {
                selection,
                alcohol_series: Some(alcohol_series),
                rating_count_series: Some(rating_count_series),
                rating_price_points: Some(rating_price_points),
                alcohol_price_points: Some(alcohol_price_points),
                price_distribution: Some(price_distribution),
                taste_profile: Some(taste_profile),
                food_suggestions: Some(food_suggestions),
                food_popularity: Some(food_popularity),
                top_foods: Some(top_foods),
            } => Ok(assemble(
                selection,
                ViewParts {
                    alcohol_series,
                    rating_count_series,
                    rating_price_points,
                    alcohol_price_points,
                    price_distribution,
                    taste_profile,
                    food_suggestions,
                    food_popularity,
                    top_foods,
                },
            )),
            builder => Err(EngineError::IncompleteBundle {
                missing: builder.missing(),
            }),
        }
    }
}
