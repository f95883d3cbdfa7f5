use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use winestats::*;

const COUNTRIES: [&str; 6] = ["Argentina", "Chile", "France", "Italy", "Portugal", "Spain"];
const REGIONS: [&str; 4] = ["north valley", "South Coast", " RIVER BANK ", "High Plateau"];
const FOODS: [&str; 8] = ["Beef", "Lamb", "Pork", "Poultry", "Fish", "Shellfish", "Pasta", "Cheese"];

fn synthetic_catalog(size: usize) -> Catalog {
    let records = (0..size)
        .map(|i| Record {
            country: COUNTRIES[i % COUNTRIES.len()].to_string(),
            region: REGIONS[(i / COUNTRIES.len()) % REGIONS.len()].to_string(),
            winery: format!("Winery {}", i % 37),
            name: format!("Wine {}", i),
            alcohol_content: 11.0 + (i % 40) as f64 / 10.0,
            num_ratings: (i % 500) as i64,
            rating: 3.0 + (i % 20) as f64 / 10.0,
            price: 5.0 + (i % 97) as f64,
            bold: (i % 5) as f64,
            tannin: (i % 4) as f64,
            sweet: (i % 3) as f64,
            acidic: (i % 5) as f64,
            foods: (0..FOODS.len()).map(|f| (i + f) % 3 == 0).collect(),
        })
        .collect();

    Catalog::new(records, FOODS.iter().map(|f| f.to_string()).collect()).unwrap()
}

fn bench_filtered_subset(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_subset");
    let state = SelectionState::new().with_country("France").with_region("river bank");

    for size in [1000, 10000, 100000].iter() {
        let catalog = synthetic_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filtered_subset(black_box(&catalog), black_box(&state)).len());
        });
    }
    group.finish();
}

fn bench_filter_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_options");
    let state = SelectionState::new().with_country("Italy").with_region("South Coast");

    for size in [1000, 10000, 100000].iter() {
        let catalog = synthetic_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter_options(black_box(&catalog), black_box(&state)));
        });
    }
    group.finish();
}

fn bench_compute_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_views");
    let config = EngineConfig::default();
    let state = SelectionState::new()
        .with_country("Spain")
        .with_winery("Winery 5")
        .with_wine("Wine 5");

    for size in [1000, 10000, 100000].iter() {
        let catalog = synthetic_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| compute_views(black_box(&catalog), black_box(&state), &config));
        });
    }
    group.finish();
}

fn bench_food_popularity_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("food_popularity_matrix");

    for size in [1000, 10000, 100000].iter() {
        let catalog = synthetic_catalog(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| food_popularity_matrix(black_box(&catalog)));
        });
    }
    group.finish();
}

fn bench_cached_views(c: &mut Criterion) {
    let catalog = Arc::new(synthetic_catalog(10000));
    let mut cache = BundleCache::new(catalog, EngineConfig::default());
    let state = SelectionState::new().with_country("Chile");
    cache.get_or_compute(&state);

    c.bench_function("cached_views_hit", |b| {
        b.iter(|| cache.get_or_compute(black_box(&state)));
    });
}

fn bench_catalog_from_csv(c: &mut Criterion) {
    let mut csv = String::from(
        "country,region,winery,name,alcohol_content,num_ratings,rating,price,bold,tannin,sweet,acidic",
    );
    for food in FOODS.iter() {
        csv.push(',');
        csv.push_str(food);
    }
    csv.push('\n');
    for i in 0..5000 {
        csv.push_str(&format!(
            "{},\"{}\",Winery {},\"Wine {}, Reserve\",13.5,{},4.1,{}.5,4,3,1,3",
            COUNTRIES[i % COUNTRIES.len()],
            REGIONS[i % REGIONS.len()],
            i % 37,
            i,
            i % 500,
            i % 90
        ));
        for f in 0..FOODS.len() {
            csv.push_str(if (i + f) % 2 == 0 { ",1" } else { ",0" });
        }
        csv.push('\n');
    }

    c.bench_function("catalog_from_csv_5000", |b| {
        b.iter(|| Catalog::from_csv(black_box(&csv)).unwrap().len());
    });
}

criterion_group!(
    benches,
    bench_filtered_subset,
    bench_filter_options,
    bench_compute_views,
    bench_food_popularity_matrix,
    bench_cached_views,
    bench_catalog_from_csv,
);

criterion_main!(benches);
