//! Document comparator
//!
//! Orchestrates per-page comparison across a document pair and aggregates
//! the verdicts into a `ComparisonResult`. Page pairs are processed
//! sequentially in ascending page order; each pair reads only its own
//! immutable extracted content.

use std::collections::BTreeMap;

use super::error::{Result, Side};
use super::extract::{analyze_document, ExtractOptions};
use super::page::diff_page;
use super::types::{BlockDiff, ComparisonResult, DocumentAnalysis, PageDiffResult};

/// Compare two extracted documents.
///
/// `total_pages = max(before, after)`. A page present on only one side is
/// wholly changed: every block of the present side becomes a pure insert or
/// delete, and the page counts as visually changed.
pub fn compare_documents(before: &DocumentAnalysis, after: &DocumentAnalysis) -> ComparisonResult {
    let total_pages = before.page_count().max(after.page_count());

    let mut changed_pages = Vec::new();
    let mut text_differences = BTreeMap::new();

    for page_index in 0..total_pages {
        let result = match (before.pages.get(page_index), after.pages.get(page_index)) {
            (Some(b), Some(a)) => diff_page(page_index, b, a),
            (Some(b), None) => one_sided_page(page_index, b, Side::Before),
            (None, Some(a)) => one_sided_page(page_index, a, Side::After),
            (None, None) => unreachable!("page_index < total_pages"),
        };

        if result.changed {
            let page_number = page_index + 1;
            changed_pages.push(page_number);
            if !result.text_diffs.is_empty() {
                text_differences.insert(page_number, result.text_diffs);
            }
        }
    }

    let confidence = if total_pages == 0 {
        100.0
    } else {
        100.0 * (total_pages - changed_pages.len()) as f64 / total_pages as f64
    };

    ComparisonResult {
        total_pages,
        changed_pages,
        text_differences,
        confidence,
    }
}

/// Build the verdict for a page that exists on only one side.
fn one_sided_page(
    page_index: usize,
    present: &super::types::PageAnalysis,
    present_side: Side,
) -> PageDiffResult {
    let text_diffs = present
        .blocks
        .iter()
        .enumerate()
        .map(|(block_index, block)| {
            let (before_text, after_text) = match present_side {
                Side::Before => (block.text.clone(), String::new()),
                Side::After => (String::new(), block.text.clone()),
            };
            BlockDiff {
                block_index,
                before_text,
                after_text,
                bbox: Some(block.bbox),
            }
        })
        .collect();

    PageDiffResult {
        page_index,
        changed: true,
        text_diffs,
        visual_changed: true,
    }
}

/// Full pipeline: extract both documents, then compare.
///
/// Extraction failure on either side aborts the comparison with an error
/// naming the failing side; there is never a partial result. CPU-bound,
/// meant to run on a blocking task.
pub fn compare_pdf_bytes(
    before: &[u8],
    after: &[u8],
    options: ExtractOptions,
) -> Result<ComparisonResult> {
    let before_analysis = analyze_document(before, Side::Before, options)?;
    let after_analysis = analyze_document(after, Side::After, options)?;

    let result = compare_documents(&before_analysis, &after_analysis);

    tracing::info!(
        total_pages = result.total_pages,
        changed_pages = result.changed_pages.len(),
        confidence = result.confidence,
        "comparison complete"
    );

    Ok(result)
}
