//! Source document preview endpoint
//!
//! Serves back the uploaded PDFs so the viewer can render them with the
//! returned diff bounding boxes overlaid.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

use super::ApiError;
use crate::compare::Side;
use crate::state::AppState;

/// Create the preview router
pub fn router() -> Router<AppState> {
    Router::new().route("/preview/:id/:side", get(preview))
}

/// GET /preview/:id/:side
async fn preview(
    State(state): State<AppState>,
    Path((id, side)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let side = Side::from_str(&side).ok_or(ApiError::UnknownSide(side))?;

    let comparison_id =
        Uuid::parse_str(&id).map_err(|_| ApiError::ComparisonNotFound(id.clone()))?;

    let stored = state
        .store()
        .get(&comparison_id)
        .ok_or(ApiError::ComparisonNotFound(id))?;

    Ok((
        [(header::CONTENT_TYPE, "application/pdf")],
        stored.pdf_for(side).to_vec(),
    ))
}
