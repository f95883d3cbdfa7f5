/// Dashboard Example
///
/// This example demonstrates:
/// - Loading a catalog from CSV with export-style headers
/// - Walking the dependent filter chain (country, region, winery, wine)
/// - Reading the derived views for each selection
/// - Serving repeated selections from the bundle cache

use std::sync::Arc;
use winestats::{BundleCache, Catalog, Dashboard, EngineConfig, SelectionUpdate};

const WINES: &str = "\
Country,Country_region,Winery,Name,Alcohol content,Number of Ratings,Rating,Price,Bold,Tannin,Sweet,Acidic,Beef,Lamb,Poultry,Shellfish,Cheese
France,Burgundy,Domaine Leroy,Bourgogne Rouge,13.0,412,4.1,45.0,3.0,2.5,1.0,4.0,1,0,1,0,1
France,\" burgundy \",Domaine Faiveley,Mercurey,13.5,188,3.9,28.0,3.5,3.0,1.0,4.0,1,1,1,0,0
France,Bordeaux,Chateau Margaux,Pavillon Rouge,13.5,960,4.5,190.0,4.5,4.0,1.0,3.5,1,1,0,0,1
France,Bordeaux,Chateau Talbot,Connetable,13.0,350,3.8,32.0,4.0,3.5,1.0,3.0,1,1,0,0,0
France,Loire,Domaine Huet,Le Haut-Lieu Sec,13.0,220,4.2,38.0,2.0,1.0,2.0,4.5,0,0,1,1,1
Italy,Tuscany,Antinori,Tignanello,14.0,1500,4.4,120.0,4.5,4.0,1.0,4.0,1,1,0,0,1
Italy,Piedmont,Vietti,Barolo Castiglione,14.5,640,4.3,65.0,4.5,5.0,1.0,4.5,1,1,0,0,1
Spain,Rioja,La Rioja Alta,Vina Ardanza,14.0,890,4.2,40.0,4.0,3.5,1.0,3.5,1,1,1,0,1
";

fn main() {
    println!("=== WineStats Dashboard Example ===\n");

    // 1. Load the catalog
    println!("1. Loading catalog...");
    let catalog = Arc::new(Catalog::from_csv(WINES).unwrap());
    println!("   {} wines, food attributes: {:?}\n", catalog.len(), catalog.food_attrs());

    let mut dashboard = Dashboard::new(Arc::clone(&catalog), EngineConfig::default());
    println!("   Countries: {:?}\n", dashboard.options().countries);

    // 2. Pick a country
    println!("2. Selecting France...");
    dashboard.apply(SelectionUpdate::new().country("France"));
    let options = dashboard.options();
    let regions: Vec<&str> = options.regions.iter().map(|r| r.as_str()).collect();
    println!("   Regions: {:?}", regions);
    println!("   Wineries: {:?}", options.wineries);

    let views = dashboard.views();
    if let Some(summary) = views.price_distribution.summary() {
        println!(
            "   Prices: min {:.2}, q1 {:.2}, median {:.2}, q3 {:.2}, max {:.2}, outliers {:?}",
            summary.min,
            summary.q1,
            summary.median,
            summary.q3,
            summary.max,
            summary.outlier_prices()
        );
    }
    for food in &views.top_foods {
        println!("   {:<10} {}", food.food, food.count);
    }
    println!();

    // 3. Narrow to a region and a winery
    println!("3. Selecting Bordeaux / Chateau Talbot...");
    dashboard.apply(SelectionUpdate::new().region("bordeaux").winery("Chateau Talbot"));
    let views = dashboard.views();
    for point in &views.rating_price_points {
        println!("   {}: rating {:.1}, price {:.2}", point.name, point.x, point.y);
    }
    println!(
        "   Foods for {}: {:?}\n",
        views.food_suggestions.subject.as_deref().unwrap_or("-"),
        views.food_suggestions.foods
    );

    // 4. Taste profile for one wine
    println!("4. Selecting wine Connetable...");
    dashboard.apply(SelectionUpdate::new().wine("Connetable"));
    match dashboard.views().taste_profile {
        Some(profile) => {
            for (label, score) in profile.slices() {
                println!("   {:<7} {:.1}", label, score);
            }
        }
        None => println!("   No taste profile"),
    }
    println!();

    // 5. Food popularity across the whole catalog
    println!("5. Food popularity by country...");
    let matrix = dashboard.views().food_popularity;
    println!("   {:<8} {:?}", "", matrix.foods);
    for (country, row) in matrix.countries.iter().zip(&matrix.counts) {
        println!("   {:<8} {:?}", country, row);
    }
    println!();

    // 6. Cache repeated selections
    println!("6. Caching bundles...");
    let mut cache = BundleCache::new(catalog, EngineConfig::default());
    for _ in 0..3 {
        cache.get_or_compute(dashboard.state());
    }
    let stats = cache.stats();
    println!("   hits: {}, misses: {}, entries: {}", stats.hits, stats.misses, stats.entries);

    println!("\n=== Example Complete ===");
}
