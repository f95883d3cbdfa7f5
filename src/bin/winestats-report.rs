/// WineStats Report
///
/// Loads a wine catalog CSV, applies a selection taken from the environment
/// and prints the filter options and the full view bundle as JSON.
///
/// Usage: winestats-report [CSV]   (or set WINESTATS_DATA)

use std::process::ExitCode;
use std::sync::Arc;

use winestats::{Catalog, Dashboard, EngineConfig, SelectionUpdate};

fn main() -> ExitCode {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WINESTATS_DATA").ok())
        .ok_or("no catalog given: pass a CSV path or set WINESTATS_DATA")?;

    let csv = std::fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
    let catalog = Catalog::from_csv(&csv)?;
    log::info!(
        "loaded {} wines with {} food attributes from {}",
        catalog.len(),
        catalog.food_attrs().len(),
        path
    );

    let mut dashboard = Dashboard::new(Arc::new(catalog), EngineConfig::from_env());
    dashboard.apply(selection_from_env());

    let report = serde_json::json!({
        "options": dashboard.options(),
        "views": dashboard.views(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn selection_from_env() -> SelectionUpdate {
    let var = |key: &str| std::env::var(key).ok();

    let mut update = SelectionUpdate::new();
    if let Some(country) = var("WINESTATS_COUNTRY") {
        update = update.country(country);
    }
    if let Some(region) = var("WINESTATS_REGION") {
        update = update.region(&region);
    }
    if let Some(winery) = var("WINESTATS_WINERY") {
        update = update.winery(winery);
    }
    if let Some(wine) = var("WINESTATS_WINE") {
        update = update.wine(wine);
    }
    update
}
