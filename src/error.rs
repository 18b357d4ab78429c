// src/error.rs

use axum::{http::StatusCode, Json};
use thiserror::Error;

use crate::models::api::ErrorResponse;
use crate::scrapers::SourceError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Minifigure not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Minifigure already exists: {0}")]
    Conflict(String),
}

impl TrackerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrackerError::NotFound(_) => StatusCode::NOT_FOUND,
            TrackerError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            TrackerError::Conflict(_) => StatusCode::CONFLICT,
            TrackerError::Source(_) => StatusCode::BAD_GATEWAY,
            TrackerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TrackerError> for (StatusCode, Json<ErrorResponse>) {
    fn from(e: TrackerError) -> Self {
        let status = e.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", e);
        }

        (
            status,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    }
}
