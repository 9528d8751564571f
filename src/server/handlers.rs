use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::AppState;
use crate::data::{DatasetInfo, FilterCriteria};
use crate::pipeline::{run_cycle, Change, Snapshot};

/// Errors returned to HTTP clients, always as a JSON `{"error": ...}` body
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),
    /// The request was refused before any cycle ran
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("Cycle failed: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        tracing::error!("cycle task failed: {}", e);
        ApiError::Internal(e.to_string())
    }
}

/// Body of a stateless curve request
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CurveRequest {
    pub filters: FilterCriteria,
    #[serde(deserialize_with = "null_as_empty")]
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub id: Uuid,
    pub snapshot: Snapshot,
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/dataset
pub async fn dataset_info(State(state): State<Arc<AppState>>) -> Json<DatasetInfo> {
    Json(state.dataset.info())
}

/// POST /api/curve - one cycle, no session state kept
pub async fn curve(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CurveRequest>, JsonRejection>,
) -> Result<Json<Snapshot>, ApiError> {
    let Json(req) = body?;
    let dataset = Arc::clone(&state.dataset);
    let snapshot =
        tokio::task::spawn_blocking(move || run_cycle(&dataset, &req.filters, &req.brands)).await?;
    Ok(Json(snapshot))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let (id, snapshot) = tokio::task::spawn_blocking(move || state.open_session()).await?;
    Ok((StatusCode::CREATED, Json(SessionCreated { id, snapshot })))
}

/// POST /api/sessions/{id}
pub async fn update_session(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<Change>, JsonRejection>,
) -> Result<Json<Snapshot>, ApiError> {
    let Path(id) = path?;
    let Json(change) = body?;
    let snapshot = tokio::task::spawn_blocking(move || state.update_session(id, change)).await??;
    Ok(Json(snapshot))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.close_session(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<String>> = Deserialize::deserialize(deserializer)?;
    Ok(values.unwrap_or_default())
}
