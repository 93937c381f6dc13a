//! REST API endpoints.
//!
//! Axum-based HTTP API for the comparison dashboard, the multi-metric
//! axes view, and the leaderboard. Everything the engine treats as a
//! caller obligation — player-count bounds, tag validation — happens
//! here at the boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::calculate::StatsError;
use crate::models::PlayerId;

pub mod routes;
pub mod state;

use state::AppState;

/// Product cap on side-by-side comparison size.
pub const MAX_COMPARE_PLAYERS: usize = 10;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        match err {
            // Contract violations by the caller.
            StatsError::InvalidInput | StatsError::InvalidMetric(_) => {
                ApiError::BadRequest(err.to_string())
            }
            // Blank identifiers are filtered at the boundary, so an
            // engine-level aggregation failure here is a server bug.
            StatsError::Aggregation { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

/// Parse a comma-separated player list, enforcing the comparison cap.
///
/// Shared between the HTTP boundary and the CLI.
pub fn parse_player_list(raw: &str) -> Result<Vec<(PlayerId, String)>, String> {
    let players: Vec<(PlayerId, String)> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| (PlayerId::from(name), name.to_string()))
        .collect();

    if players.is_empty() {
        return Err("at least one player is required".to_string());
    }
    if players.len() > MAX_COMPARE_PLAYERS {
        return Err(format!(
            "at most {MAX_COMPARE_PLAYERS} players can be compared"
        ));
    }
    Ok(players)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the API router. CORS is layered on by the binary so tests can
/// exercise the bare router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/dashboard", get(routes::dashboard::dashboard_stats))
        .route("/compare/axes", get(routes::compare::comparison_axes))
        .route("/leaderboard", get(routes::leaderboard::leaderboard))
        .route("/health", get(health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
