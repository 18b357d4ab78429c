use serde::{Deserialize, Serialize};

use super::minifigure::Minifigure;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/// Body of POST /update_quantity. Fields are optional so a missing one is
/// reported as a structured 400 instead of a rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantityUpdateRequest {
    pub id: Option<String>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub message: String,
    pub minifigure: Minifigure,
}
