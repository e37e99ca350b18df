use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::server::AppState;
use crate::storage::VectorStore;
use crate::Vector;

#[derive(Debug, Deserialize)]
pub struct CreateVectorRequest {
    pub dimensions: Vec<i64>,
    pub color: String,
    pub shape: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(detail) => {
                // Storage details stay in the log
                tracing::error!("Request failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Run a store operation on the blocking pool
async fn with_store<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut VectorStore) -> crate::Result<T> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let mut store = state
            .store
            .lock()
            .map_err(|_| ApiError::Internal("vector store lock poisoned".to_string()))?;
        f(&mut store).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("storage task failed: {}", e)))?
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "service": "vecstore"}))
}

pub async fn create_vector(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateVectorRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let mut vector = Vector::new(request.dimensions, request.color, request.shape);

    let to_insert = vector.clone();
    let id = with_store(&state, move |store| store.insert_vector_data(&to_insert)).await?;
    vector.set_id(id);

    tracing::info!("Created vector {}", id);
    Ok((StatusCode::CREATED, Json(vector.to_json())))
}

pub async fn get_vector(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let vector = with_store(&state, move |store| store.get_full_vector_data_by_id(id)).await?;

    match vector {
        Some(vector) => Ok(Json(vector.to_json())),
        None => Err(ApiError::NotFound(format!("Vector {} not found", id))),
    }
}
