//! Comparison engine
//!
//! Compares two revisions of a PDF page by page:
//!
//! 1. `extract` pulls ordered text blocks (with bounding boxes) and a
//!    rendered-page signature out of each document, once per document.
//! 2. `diff` aligns each page pair's block texts with a classic LCS diff.
//! 3. `page` turns the alignment plus the signature check into a per-page
//!    verdict.
//! 4. `document` aggregates verdicts across all pages, handles page-count
//!    mismatch, and computes the confidence score.

pub mod diff;
pub mod document;
pub mod error;
pub mod extract;
pub mod page;
pub mod types;

pub use document::{compare_documents, compare_pdf_bytes};
pub use error::{CompareError, Side};
pub use extract::{analyze_document, ExtractOptions};
pub use types::{
    BlockDiff, BoundingBox, ComparisonResult, DocumentAnalysis, PageAnalysis, PageDiffResult,
    PageSignature, TextBlock,
};
