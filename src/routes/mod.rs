//! HTTP routes
//!
//! Endpoints:
//! - POST /compare - upload before/after PDFs, run the comparison
//! - GET /download-report/:id - summary PDF for a finished comparison
//! - GET /preview/:id/:side - original uploaded PDF for viewer display
//! - GET /health - liveness probe

pub mod compare;
pub mod preview;
pub mod report;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::compare::CompareError;
use crate::report::ReportError;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(compare::router())
        .merge(report::router())
        .merge(preview::router())
        .layer(DefaultBodyLimit::max(state.config().compare.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================================
// Error Response
// ============================================================================

/// Route-level error type, mapped onto JSON error bodies with stable codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing multipart field: {0}")]
    MissingField(&'static str),

    #[error("invalid multipart request: {0}")]
    InvalidMultipart(String),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("comparison not found: {0}")]
    ComparisonNotFound(String),

    #[error("unknown document side: {0}")]
    UnknownSide(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidMultipart(_)
            | ApiError::UnknownSide(_) => StatusCode::BAD_REQUEST,
            ApiError::Compare(_) => StatusCode::BAD_REQUEST,
            ApiError::ComparisonNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Report(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let code = match &self {
            ApiError::MissingField(_) => "MISSING_FIELD",
            ApiError::InvalidMultipart(_) => "INVALID_MULTIPART",
            ApiError::Compare(_) => "DOCUMENT_PARSE_ERROR",
            ApiError::Report(_) => "REPORT_ERROR",
            ApiError::ComparisonNotFound(_) => "COMPARISON_NOT_FOUND",
            ApiError::UnknownSide(_) => "UNKNOWN_SIDE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        };

        // Fatal parse errors name the offending input document
        let side = match &self {
            ApiError::Compare(e) => Some(e.side().to_string()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            side,
        });

        (status, body).into_response()
    }
}
