// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::tracker::MinifigureTracker;

#[derive(Clone)]
pub struct AppState {
    pub tracker: MinifigureTracker,
}

pub mod services {
    pub mod comparison;
    pub mod reconciliation;
    pub mod tracker;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod scrapers;
pub mod store;

/// Build the HTTP surface over the given state.
pub fn build_router(state: AppState) -> Router {
    use crate::handlers::{maj, minifigures};

    Router::new()
        .route("/", get(hello_tracker))
        .route(
            "/minifigures",
            get(minifigures::list_minifigures).post(minifigures::add_minifigure),
        )
        .route(
            "/minifigures/{id}",
            get(minifigures::add_minifigure_by_id)
                .put(minifigures::update_minifigure)
                .delete(minifigures::delete_minifigure),
        )
        .route("/maj", get(maj::reconcile_all_minifigures))
        .route("/maj/{id}", get(maj::reconcile_minifigure))
        .route("/update_quantity", post(minifigures::update_quantity))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello_tracker() -> &'static str {
    "Hello from the minifigure tracker!"
}
