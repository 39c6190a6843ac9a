//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tokio::task::JoinError;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::requests::{
    Document, RequestError, StatRequest, StatResponse, answer_stat_requests, process_document,
};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", post(answer_stats))
        .route("/process", post(process))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Answer stat requests against the preloaded network.
async fn answer_stats(
    State(state): State<AppState>,
    body: Result<Json<Vec<StatRequest>>, JsonRejection>,
) -> Result<Json<Vec<StatResponse>>, AppError> {
    let Json(requests) = body?;

    // Path searches are CPU-bound
    let responses = tokio::task::spawn_blocking(move || {
        answer_stat_requests(state.network, &state.router, &requests)
    })
    .await?;

    Ok(Json(responses))
}

/// Build a network from a full document and answer its stat requests.
async fn process(
    body: Result<Json<Document>, JsonRejection>,
) -> Result<Json<Vec<StatResponse>>, AppError> {
    let Json(document) = body?;
    let responses = tokio::task::spawn_blocking(move || process_document(&document)).await??;
    Ok(Json(responses))
}

/// Error body returned with every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body could not be understood
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// The server failed while answering
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Io(_) => AppError::Internal {
                message: err.to_string(),
            },
            _ => AppError::BadRequest {
                message: err.to_string(),
            },
        }
    }
}

impl From<JoinError> for AppError {
    fn from(err: JoinError) -> Self {
        AppError::Internal {
            message: format!("request task failed: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, error = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
