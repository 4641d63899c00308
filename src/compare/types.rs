//! Core comparison types
//!
//! Data model for the comparison pipeline: extracted page content on the way
//! in, block-level diffs and the document-level `ComparisonResult` on the way
//! out. Everything that crosses the HTTP boundary derives serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page coordinates (points, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// One contiguous run of text extracted from a page, the atomic unit of
/// comparison. Ordering within a page follows the extractor's native
/// top-to-bottom/left-to-right layout order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Whitespace-normalized block text
    pub text: String,
    /// Block bounding box on the page
    pub bbox: BoundingBox,
    /// Zero-based index of the page this block belongs to
    pub page_index: usize,
}

/// Fixed-size fingerprint of a rendered page (SHA-256 over raw pixels and
/// pixel dimensions). Used only for equality; any single-bit difference
/// means the page visually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSignature([u8; 32]);

impl PageSignature {
    pub fn new(digest: [u8; 32]) -> Self {
        Self(digest)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex rendering for logs
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Extracted content of a single page.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    /// Text blocks in layout order; empty for pages with no extractable text
    pub blocks: Vec<TextBlock>,
    /// Visual signature; `None` when rendering or hashing failed, which the
    /// differ treats as a visual change (conservative bias)
    pub signature: Option<PageSignature>,
}

impl PageAnalysis {
    /// Plain text content of each block, in block order.
    pub fn block_texts(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }
}

/// Extracted content of a whole document, one entry per page in document
/// order. Produced once per input document by the extractor and then only
/// read.
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalysis {
    pub pages: Vec<PageAnalysis>,
}

impl DocumentAnalysis {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// One changed text unit on a page.
///
/// For a replacement both texts are present; for a pure insert `before_text`
/// is empty and for a pure delete `after_text` is empty. The bounding box
/// prefers the after-side block when both exist, since it drives highlight
/// placement on the after-side view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDiff {
    /// Index of the block in the after sequence when present, otherwise in
    /// the before sequence
    pub block_index: usize,
    pub before_text: String,
    pub after_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

/// Verdict for one (before, after) page pair. Transient: consumed by the
/// document comparator, not persisted.
#[derive(Debug, Clone)]
pub struct PageDiffResult {
    /// Zero-based page index
    pub page_index: usize,
    pub changed: bool,
    pub text_diffs: Vec<BlockDiff>,
    pub visual_changed: bool,
}

/// Terminal artifact of the comparison core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// `max(before_page_count, after_page_count)`
    pub total_pages: usize,
    /// 1-indexed page numbers with any change, ascending
    pub changed_pages: Vec<usize>,
    /// 1-indexed page number -> block diffs; pages without text diffs are
    /// omitted entirely (a visually-changed page with identical text appears
    /// in `changed_pages` but not here)
    pub text_differences: BTreeMap<usize, Vec<BlockDiff>>,
    /// Percentage of unchanged pages in [0, 100]; 100.0 when both documents
    /// are empty
    pub confidence: f64,
}

impl ComparisonResult {
    /// True when no page differs in any way.
    pub fn is_match(&self) -> bool {
        self.changed_pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 50.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 30.0);
    }

    #[test]
    fn test_signature_equality_is_exact() {
        let a = PageSignature::new([7u8; 32]);
        let mut bytes = [7u8; 32];
        bytes[31] ^= 1;
        let b = PageSignature::new(bytes);
        assert_ne!(a, b);
        assert_eq!(a, PageSignature::new([7u8; 32]));
    }

    #[test]
    fn test_signature_hex_rendering() {
        let sig = PageSignature::new([0xabu8; 32]);
        assert_eq!(sig.to_hex(), "ab".repeat(32));
    }

    #[test]
    fn test_block_diff_serializes_without_null_bbox() {
        let diff = BlockDiff {
            block_index: 0,
            before_text: "a".into(),
            after_text: "b".into(),
            bbox: None,
        };
        let json = serde_json::to_string(&diff).unwrap();
        assert!(!json.contains("bbox"));
    }
}
