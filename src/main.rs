use std::sync::Arc;
use std::time::Duration;

use minifig_tracker::{
    build_router,
    config::AppConfig,
    scrapers::BricksetScraper,
    services::tracker::MinifigureTracker,
    store::JsonFileStore,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,minifig_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    tracing::info!(
        store = %config.store_path.display(),
        source = %config.brickset_base_url,
        timeout_secs = config.http_timeout_secs,
        "Starting minifigure tracker"
    );

    let store = JsonFileStore::new(config.store_path.clone());
    let scraper = BricksetScraper::new(
        config.brickset_base_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )
    .expect("Failed to build HTTP client");

    let state = AppState {
        tracker: MinifigureTracker::new(Arc::new(store), Arc::new(scraper)),
    };

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(
        "Server listening on {}",
        listener
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| config.bind_addr.clone())
    );

    axum::serve(listener, app).await.expect("Server error");
}
