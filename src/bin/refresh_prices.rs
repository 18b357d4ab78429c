// src/bin/refresh_prices.rs

use std::env;
use std::sync::Arc;
use std::time::Duration;

use minifig_tracker::{
    config::AppConfig,
    scrapers::BricksetScraper,
    services::tracker::{BatchStatus, MinifigureTracker},
    store::JsonFileStore,
};

/// Re-scrape every tracked minifigure once and record price moves,
/// without starting the server.
///
/// Usage: cargo run --bin refresh_prices -- [store.json]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut config = AppConfig::from_env();
    if let Some(path) = env::args().nth(1) {
        config.store_path = path.into();
    }

    let store = JsonFileStore::new(config.store_path.clone());
    let scraper = BricksetScraper::new(
        config.brickset_base_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )?;
    let tracker = MinifigureTracker::new(Arc::new(store), Arc::new(scraper));

    println!(" Refreshing prices in {}...", config.store_path.display());
    let report = tracker.reconcile_all().await?;

    for entry in &report.entries {
        match &entry.status {
            BatchStatus::Updated => println!("    {}: updated", entry.id),
            BatchStatus::Unchanged => println!("    {}: unchanged", entry.id),
            BatchStatus::Failed(reason) => println!("    {}: failed ({})", entry.id, reason),
        }
    }

    println!("\n Refresh complete!");
    println!("    Updated: {}", report.updated());
    println!("    Unchanged: {}", report.unchanged());
    if report.failed() > 0 {
        println!("    Failed: {}", report.failed());
    }

    Ok(())
}
