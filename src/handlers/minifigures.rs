use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::error::TrackerError;
use crate::models::{
    api::{ErrorResponse, MessageResponse, QuantityUpdateRequest, StatusResponse},
    minifigure::{Minifigure, MinifigureView},
};
use crate::AppState;

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Turn a JSON body rejection into the same error shape as other failures
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| TrackerError::InvalidPayload(e.body_text()).into())
}

/// Handler for GET /minifigures
pub async fn list_minifigures(
    State(state): State<AppState>,
) -> Result<Json<Vec<MinifigureView>>, HandlerError> {
    let views = state.tracker.list().await?;
    tracing::debug!("Listing {} minifigures", views.len());
    Ok(Json(views))
}

/// Handler for POST /minifigures
pub async fn add_minifigure(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Minifigure>), HandlerError> {
    let body = json_body(payload)?;
    let record: Minifigure = serde_json::from_value(body)
        .map_err(|e| TrackerError::InvalidPayload(e.to_string()))?;

    let stored = state.tracker.add(record).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Handler for GET /minifigures/{id}
/// Scrapes the catalog for `id` and stores the result
pub async fn add_minifigure_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Minifigure>), HandlerError> {
    let stored = state.tracker.add_by_id(&id).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Handler for PUT /minifigures/{id}
pub async fn update_minifigure(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Minifigure>, HandlerError> {
    let patch = json_body(payload)?;
    let updated = state.tracker.update(&id, patch).await?;
    Ok(Json(updated))
}

/// Handler for DELETE /minifigures/{id}
pub async fn delete_minifigure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, HandlerError> {
    state.tracker.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Minifigure deleted successfully".to_string(),
    }))
}

/// Handler for POST /update_quantity
pub async fn update_quantity(
    State(state): State<AppState>,
    payload: Result<Json<QuantityUpdateRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, HandlerError> {
    let request = json_body(payload)?;

    let (Some(id), Some(quantity)) = (request.id, request.quantity) else {
        return Err(
            TrackerError::InvalidPayload("both \"id\" and \"quantity\" are required".to_string())
                .into(),
        );
    };

    state.tracker.set_quantity(&id, quantity).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
        message: "Quantity updated".to_string(),
    }))
}
