use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::models::{
    api::{ErrorResponse, ReconcileResponse},
    minifigure::MinifigureView,
};
use crate::AppState;

/// Handler for GET /maj/{id}
/// Re-scrapes the prices of one minifigure and records any move
pub async fn reconcile_minifigure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReconcileResponse>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Reconciling prices for {}", id);

    let outcome = state.tracker.reconcile(&id).await.map_err(|e| {
        tracing::warn!(id = %id, "Reconciliation failed: {}", e);
        e
    })?;

    Ok(Json(ReconcileResponse {
        message: outcome.message().to_string(),
        minifigure: outcome.into_minifigure(),
    }))
}

/// Handler for GET /maj
/// Reconciles the whole collection, then returns the refreshed listing.
/// Per-item failures are logged, not returned.
pub async fn reconcile_all_minifigures(
    State(state): State<AppState>,
) -> Result<Json<Vec<MinifigureView>>, (StatusCode, Json<ErrorResponse>)> {
    let report = state.tracker.reconcile_all().await?;

    tracing::info!(
        "Batch reconciliation: {} updated, {} unchanged, {} failed",
        report.updated(),
        report.unchanged(),
        report.failed()
    );

    let views = state.tracker.list().await?;
    Ok(Json(views))
}
