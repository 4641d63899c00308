//! Document extraction
//!
//! Produces a `DocumentAnalysis` (text blocks + visual signatures for every
//! page) from raw PDF bytes via MuPDF. Extraction runs once per input
//! document; everything downstream reads the result immutably.
//!
//! MuPDF documents are not thread-safe, so callers run this on a blocking
//! task and never share the open document across threads. Each call opens a
//! fresh document and drops it on return.

use mupdf::{Colorspace, Document, Matrix, TextPageOptions};
use sha2::{Digest, Sha256};

use super::error::{CompareError, Result, Side};
use super::types::{BoundingBox, DocumentAnalysis, PageAnalysis, PageSignature, TextBlock};

/// PDF points per inch; MuPDF page coordinates are in points.
const POINTS_PER_INCH: f32 = 72.0;

/// Extraction settings.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Fixed rendering resolution for visual signatures. A configuration
    /// constant, never derived from the document, so signatures stay
    /// comparable across inputs.
    pub render_dpi: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { render_dpi: 144 }
    }
}

/// Extract text blocks and visual signatures for every page of a document.
///
/// Fails with a parse error naming `side` when the bytes are not a readable
/// PDF; per-page rendering failures degrade to a missing signature instead.
pub fn analyze_document(data: &[u8], side: Side, options: ExtractOptions) -> Result<DocumentAnalysis> {
    if !data.starts_with(b"%PDF") {
        return Err(CompareError::ParseError {
            side,
            message: "not a PDF document (missing %PDF header)".into(),
        });
    }

    let doc = Document::from_bytes(data, "application/pdf").map_err(|e| {
        CompareError::ParseError {
            side,
            message: e.to_string(),
        }
    })?;

    let page_count = doc.page_count().map_err(|e| CompareError::ParseError {
        side,
        message: format!("failed to read page count: {}", e),
    })? as usize;

    let mut pages = Vec::with_capacity(page_count);
    for page_index in 0..page_count {
        let page = doc
            .load_page(page_index as i32)
            .map_err(|e| CompareError::ExtractionError {
                side,
                message: format!("failed to load page {}: {}", page_index + 1, e),
            })?;

        let blocks = extract_text_blocks(&page, page_index).map_err(|e| {
            CompareError::ExtractionError {
                side,
                message: format!("text extraction failed on page {}: {}", page_index + 1, e),
            }
        })?;

        let signature = match page_signature(&page, options.render_dpi) {
            Ok(sig) => {
                tracing::debug!(
                    side = %side,
                    page = page_index + 1,
                    signature = %sig.to_hex(),
                    "page signature computed"
                );
                Some(sig)
            }
            Err(e) => {
                // Unrenderable pages are reported as visually changed rather
                // than failing the whole comparison.
                tracing::warn!(
                    side = %side,
                    page = page_index + 1,
                    error = %e,
                    "page rendering failed, treating page as visually changed"
                );
                None
            }
        };

        pages.push(PageAnalysis { blocks, signature });
    }

    tracing::debug!(side = %side, pages = page_count, "document analyzed");

    Ok(DocumentAnalysis { pages })
}

/// Extract ordered text blocks with bounding boxes from one page.
///
/// Block order is MuPDF's native layout order. Block text is whitespace
/// normalized; blocks that normalize to empty are dropped.
fn extract_text_blocks(page: &mupdf::Page, page_index: usize) -> std::result::Result<Vec<TextBlock>, mupdf::Error> {
    let text_page = page.to_text_page(TextPageOptions::empty())?;
    let mut blocks = Vec::new();

    for block in text_page.blocks() {
        let mut raw_text = String::new();
        let mut x0 = f32::MAX;
        let mut y0 = f32::MAX;
        let mut x1 = f32::MIN;
        let mut y1 = f32::MIN;

        for line in block.lines() {
            if !raw_text.is_empty() {
                raw_text.push(' ');
            }
            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    let quad = ch.quad();
                    x0 = x0.min(quad.ul.x.min(quad.ll.x));
                    y0 = y0.min(quad.ul.y.min(quad.ur.y));
                    x1 = x1.max(quad.ur.x.max(quad.lr.x));
                    y1 = y1.max(quad.ll.y.max(quad.lr.y));
                    raw_text.push(c);
                }
            }
        }

        let text = normalize_text(&raw_text);
        if text.is_empty() {
            continue;
        }

        blocks.push(TextBlock {
            text,
            bbox: BoundingBox::new(x0, y0, x1, y1),
            page_index,
        });
    }

    Ok(blocks)
}

/// Render a page at the configured DPI and hash the raw pixels.
///
/// Pixel dimensions are folded into the hash so two blank pages of different
/// sizes never collide.
fn page_signature(page: &mupdf::Page, render_dpi: u32) -> std::result::Result<PageSignature, mupdf::Error> {
    let scale = render_dpi as f32 / POINTS_PER_INCH;
    let matrix = Matrix::new_scale(scale, scale);
    let colorspace = Colorspace::device_rgb();
    let pixmap = page.to_pixmap(&matrix, &colorspace, false, false)?;

    let mut hasher = Sha256::new();
    hasher.update(pixmap.width().to_le_bytes());
    hasher.update(pixmap.height().to_le_bytes());
    hasher.update(pixmap.samples());

    Ok(PageSignature::new(hasher.finalize().into()))
}

/// Collapse all whitespace runs to single spaces and trim, so layout-only
/// line-break differences within a block are ignored.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_text("  Total:\n  $100 \t"), "Total: $100");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t "), "");
        assert_eq!(normalize_text("one two"), "one two");
    }

    #[test]
    fn test_non_pdf_bytes_fail_with_side() {
        let err = analyze_document(b"hello world", Side::Before, ExtractOptions::default())
            .unwrap_err();
        match err {
            CompareError::ParseError { side, .. } => assert_eq!(side, Side::Before),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_pdf_fails_with_side() {
        // Valid magic, garbage body
        let err = analyze_document(b"%PDF-1.7\ngarbage", Side::After, ExtractOptions::default())
            .unwrap_err();
        assert_eq!(err.side(), Side::After);
    }
}
