//! Compare endpoint
//!
//! POST /compare accepts a multipart form with `before` and `after` PDF
//! fields, runs the full comparison pipeline on a blocking task (MuPDF work
//! is CPU-bound), builds the summary report, and stores everything under a
//! fresh comparison id. The response carries the structured diff plus URLs
//! for the report and source previews, all keyed by that id.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::ApiError;
use crate::compare::{compare_pdf_bytes, BlockDiff, ComparisonResult, ExtractOptions};
use crate::report;
use crate::state::AppState;
use crate::store::StoredComparison;

/// Create the compare router
pub fn router() -> Router<AppState> {
    Router::new().route("/compare", post(compare))
}

/// Response body for POST /compare
#[derive(Serialize)]
pub struct CompareResponse {
    pub comparison_id: Uuid,
    /// True when no page differs
    #[serde(rename = "match")]
    pub is_match: bool,
    pub total_pages: usize,
    /// 1-indexed page numbers, ascending
    pub changed_pages: Vec<usize>,
    /// Page number -> block diffs; pages without text diffs omitted
    pub text_differences: BTreeMap<usize, Vec<BlockDiff>>,
    /// Percentage of unchanged pages
    pub confidence: f64,
    pub before_url: String,
    pub after_url: String,
    pub report_url: String,
}

/// POST /compare
async fn compare(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CompareResponse>, ApiError> {
    let mut before: Option<Vec<u8>> = None;
    let mut after: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "before" | "after" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidMultipart(e.to_string()))?
                    .to_vec();
                if name == "before" {
                    before = Some(data);
                } else {
                    after = Some(data);
                }
            }
            // Unknown fields are ignored, not rejected
            _ => {}
        }
    }

    let before = before.ok_or(ApiError::MissingField("before"))?;
    let after = after.ok_or(ApiError::MissingField("after"))?;

    tracing::info!(
        before_bytes = before.len(),
        after_bytes = after.len(),
        "starting comparison"
    );

    let options = ExtractOptions {
        render_dpi: state.config().compare.render_dpi,
    };

    // Extraction, diffing and report generation are all CPU-bound
    let (result, report_pdf, before, after) =
        tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
            let result = compare_pdf_bytes(&before, &after, options)?;
            let report_pdf = report::build_report(&result)?;
            Ok((result, report_pdf, before, after))
        })
        .await
        .map_err(|e| ApiError::Internal(format!("comparison task failed: {}", e)))??;

    let comparison_id = state.store().insert(StoredComparison {
        result: result.clone(),
        report: report_pdf,
        before_pdf: before,
        after_pdf: after,
        created_at: Utc::now(),
    });

    tracing::info!(
        %comparison_id,
        changed_pages = result.changed_pages.len(),
        total_pages = result.total_pages,
        "comparison stored"
    );

    Ok(Json(build_response(comparison_id, result)))
}

fn build_response(comparison_id: Uuid, result: ComparisonResult) -> CompareResponse {
    CompareResponse {
        comparison_id,
        is_match: result.is_match(),
        total_pages: result.total_pages,
        confidence: result.confidence,
        before_url: format!("/preview/{}/before", comparison_id),
        after_url: format!("/preview/{}/after", comparison_id),
        report_url: format!("/download-report/{}", comparison_id),
        changed_pages: result.changed_pages,
        text_differences: result.text_differences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_urls_embed_comparison_id() {
        let id = Uuid::new_v4();
        let result = ComparisonResult {
            total_pages: 2,
            changed_pages: vec![2],
            text_differences: BTreeMap::new(),
            confidence: 50.0,
        };
        let response = build_response(id, result);

        assert!(!response.is_match);
        assert_eq!(response.report_url, format!("/download-report/{}", id));
        assert_eq!(response.before_url, format!("/preview/{}/before", id));
        assert_eq!(response.after_url, format!("/preview/{}/after", id));
    }

    #[test]
    fn test_match_field_serializes_as_match() {
        let response = build_response(
            Uuid::new_v4(),
            ComparisonResult {
                total_pages: 0,
                changed_pages: vec![],
                text_differences: BTreeMap::new(),
                confidence: 100.0,
            },
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["match"], serde_json::Value::Bool(true));
    }
}
