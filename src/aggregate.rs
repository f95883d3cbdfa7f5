/// WineStats Aggregation Engine
///
/// Pure functions from a filtered subset (or, for the popularity matrix, the
/// whole catalog) to the plain-data payloads a dashboard renders. None of them
/// fail: empty input produces an empty payload (empty series, `NoData`
/// distribution, absent taste profile, zero-count ranking).

use crate::catalog::{Catalog, Record};
use crate::filter::FilteredSubset;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default length of the top food ranking.
pub const DEFAULT_TOP_FOODS: usize = 5;

/// Multiplier on the interquartile range beyond which a price is an outlier.
const OUTLIER_IQR_FACTOR: f64 = 1.5;

/// One point of a per-wine series, in subset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<T> {
    pub name: String,
    pub value: T,
}

/// One point of a scatter view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub name: String,
}

/// Box-plot markers for the subset's prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    /// Every price, in subset order.
    pub prices: Vec<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    /// Smallest price within 1.5 IQR below q1 (lower whisker end).
    pub lower_fence: f64,
    /// Largest price within 1.5 IQR above q3 (upper whisker end).
    pub upper_fence: f64,
    /// outliers[i] flags prices[i].
    pub outliers: Vec<bool>,
}

impl PriceSummary {
    pub fn outlier_prices(&self) -> Vec<f64> {
        self.prices
            .iter()
            .zip(&self.outliers)
            .filter(|&(_, &flag)| flag)
            .map(|(&price, _)| price)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PriceDistribution {
    NoData,
    Summary(PriceSummary),
}

impl PriceDistribution {
    pub fn is_no_data(&self) -> bool {
        matches!(self, PriceDistribution::NoData)
    }

    pub fn summary(&self) -> Option<&PriceSummary> {
        match self {
            PriceDistribution::Summary(summary) => Some(summary),
            PriceDistribution::NoData => None,
        }
    }
}

/// Taste scores of one wine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasteProfile {
    pub wine: String,
    pub bold: f64,
    pub tannin: f64,
    pub sweet: f64,
    pub acidic: f64,
}

impl TasteProfile {
    fn from_record(record: &Record) -> Self {
        TasteProfile {
            wine: record.name.clone(),
            bold: record.bold,
            tannin: record.tannin,
            sweet: record.sweet,
            acidic: record.acidic,
        }
    }

    /// Labelled slices in display order.
    pub fn slices(&self) -> [(&'static str, f64); 4] {
        [
            ("Bold", self.bold),
            ("Tannin", self.tannin),
            ("Sweet", self.sweet),
            ("Acidic", self.acidic),
        ]
    }
}

/// Foods paired with at least one wine of the subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FoodSuggestions {
    /// What the suggestions are for: the selected winery, else the country.
    pub subject: Option<String>,
    /// In catalog attribute order.
    pub foods: Vec<String>,
}

impl FoodSuggestions {
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

/// Per-country counts of wines paired with each food, over the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FoodPopularityMatrix {
    /// Row labels, sorted ascending.
    pub countries: Vec<String>,
    /// Column labels, in catalog attribute order.
    pub foods: Vec<String>,
    /// counts[country][food]
    pub counts: Vec<Vec<usize>>,
}

impl FoodPopularityMatrix {
    pub fn get(&self, country: &str, food: &str) -> Option<usize> {
        let row = self.countries.iter().position(|c| c == country)?;
        let col = self.foods.iter().position(|f| f == food)?;
        Some(self.counts[row][col])
    }

    pub fn row(&self, country: &str) -> Option<&[usize]> {
        let row = self.countries.iter().position(|c| c == country)?;
        Some(&self.counts[row])
    }

    /// Sum of one food column across every country.
    pub fn column_total(&self, food: &str) -> Option<usize> {
        let col = self.foods.iter().position(|f| f == food)?;
        Some(self.counts.iter().map(|row| row[col]).sum())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodCount {
    pub food: String,
    pub count: usize,
}

/// (name, alcohol content) per wine, in subset order. Duplicate names are kept.
pub fn alcohol_series(subset: &FilteredSubset<'_>) -> Vec<SeriesPoint<f64>> {
    subset
        .iter()
        .map(|r| SeriesPoint {
            name: r.name.clone(),
            value: r.alcohol_content,
        })
        .collect()
}

/// (name, number of ratings) per wine, in subset order.
pub fn rating_count_series(subset: &FilteredSubset<'_>) -> Vec<SeriesPoint<i64>> {
    subset
        .iter()
        .map(|r| SeriesPoint {
            name: r.name.clone(),
            value: r.num_ratings,
        })
        .collect()
}

/// Rating (x) against price (y).
pub fn rating_price_points(subset: &FilteredSubset<'_>) -> Vec<ScatterPoint> {
    scatter(subset, |r| (r.rating, r.price))
}

/// Alcohol content (x) against price (y).
pub fn alcohol_price_points(subset: &FilteredSubset<'_>) -> Vec<ScatterPoint> {
    scatter(subset, |r| (r.alcohol_content, r.price))
}

fn scatter<F>(subset: &FilteredSubset<'_>, coords: F) -> Vec<ScatterPoint>
where
    F: Fn(&Record) -> (f64, f64),
{
    subset
        .iter()
        .map(|r| {
            let (x, y) = coords(r);
            ScatterPoint {
                x,
                y,
                name: r.name.clone(),
            }
        })
        .collect()
}

/// Quartile summary of the subset's prices.
///
/// Quartiles interpolate linearly between closest ranks. A price is an outlier
/// when it falls more than 1.5 IQR outside [q1, q3].
pub fn price_distribution(subset: &FilteredSubset<'_>) -> PriceDistribution {
    let prices: Vec<f64> = subset.iter().map(|r| r.price).collect();
    if prices.is_empty() {
        return PriceDistribution::NoData;
    }

    let mut sorted = prices.clone();
    sorted.sort_by(f64::total_cmp);

    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.50);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;
    let low = q1 - OUTLIER_IQR_FACTOR * iqr;
    let high = q3 + OUTLIER_IQR_FACTOR * iqr;

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let lower_fence = sorted.iter().copied().find(|&p| p >= low).unwrap_or(min);
    let upper_fence = sorted.iter().rev().copied().find(|&p| p <= high).unwrap_or(max);
    let outliers = prices.iter().map(|&p| p < low || p > high).collect();
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;

    PriceDistribution::Summary(PriceSummary {
        prices,
        min,
        q1,
        median,
        q3,
        max,
        mean,
        lower_fence,
        upper_fence,
        outliers,
    })
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = p * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Taste profile of the first wine in the subset named `wine_name`.
///
/// Absent when no wine is selected or the subset has no wine of that name.
pub fn taste_profile(subset: &FilteredSubset<'_>, wine_name: Option<&str>) -> Option<TasteProfile> {
    let wine_name = wine_name.filter(|w| !w.is_empty())?;
    subset
        .iter()
        .find(|r| r.name == wine_name)
        .map(TasteProfile::from_record)
}

/// Foods with at least one paired wine in `subset`, in catalog attribute order.
pub fn food_suggestions(subset: &FilteredSubset<'_>, subject: Option<&str>) -> FoodSuggestions {
    let foods = subset
        .catalog()
        .food_attrs()
        .iter()
        .enumerate()
        .filter(|(idx, _)| subset.iter().any(|r| r.has_food(*idx)))
        .map(|(_, food)| food.clone())
        .collect();

    FoodSuggestions {
        subject: subject.filter(|s| !s.is_empty()).map(str::to_string),
        foods,
    }
}

/// Per-country food pairing counts over the entire catalog.
///
/// Ignores any selection: this view always describes the full population.
pub fn food_popularity_matrix(catalog: &Catalog) -> FoodPopularityMatrix {
    let foods = catalog.food_attrs().to_vec();
    let mut by_country: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

    for record in catalog.records() {
        let row = by_country
            .entry(record.country.as_str())
            .or_insert_with(|| vec![0; foods.len()]);
        for (idx, count) in row.iter_mut().enumerate() {
            if record.has_food(idx) {
                *count += 1;
            }
        }
    }

    let (countries, counts): (Vec<String>, Vec<Vec<usize>>) = by_country
        .into_iter()
        .map(|(country, row)| (country.to_string(), row))
        .unzip();

    FoodPopularityMatrix {
        countries,
        foods,
        counts,
    }
}

/// Count of wines in `subset` paired with each food, highest first.
///
/// Ties keep catalog attribute order. Zero counts are kept, so an empty subset
/// ranks the first `k` attributes at zero.
pub fn top_food_ranking(subset: &FilteredSubset<'_>, k: usize) -> Vec<FoodCount> {
    let food_attrs = subset.catalog().food_attrs();
    let mut counts = vec![0usize; food_attrs.len()];
    for record in subset.iter() {
        for (idx, count) in counts.iter_mut().enumerate() {
            if record.has_food(idx) {
                *count += 1;
            }
        }
    }

    let mut ranking: Vec<FoodCount> = food_attrs
        .iter()
        .zip(counts)
        .map(|(food, count)| FoodCount {
            food: food.clone(),
            count,
        })
        .collect();

    // Stable sort keeps declared order among equal counts
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(k);
    ranking
}
