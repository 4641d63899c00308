//! Report download endpoint

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

use super::ApiError;
use crate::state::AppState;

/// Create the report router
pub fn router() -> Router<AppState> {
    Router::new().route("/download-report/:id", get(download_report))
}

/// GET /download-report/:id
///
/// Returns the pre-built summary PDF for a stored comparison. Unknown,
/// malformed, or evicted ids all surface as 404.
async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comparison_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::ComparisonNotFound(id.clone()))?;

    let stored = state
        .store()
        .get(&comparison_id)
        .ok_or(ApiError::ComparisonNotFound(id))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"comparison_report.pdf\"".to_string(),
            ),
        ],
        stored.report.clone(),
    ))
}
