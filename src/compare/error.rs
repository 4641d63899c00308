//! Comparison error types

use std::fmt;

use thiserror::Error;

/// Which input document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Before,
    After,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Before => "before",
            Side::After => "after",
        }
    }

    /// Parse a side label from a path segment or form field name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "before" => Some(Side::Before),
            "after" => Some(Side::After),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the comparison pipeline.
///
/// Extraction failures are fatal to the whole comparison: without valid page
/// counts on both sides there is no meaningful partial result. Per-page
/// rendering failures are NOT represented here; they degrade locally to
/// `visual_changed = true` for the affected page.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A document could not be opened or parsed as a valid PDF.
    #[error("failed to parse {side} document: {message}")]
    ParseError { side: Side, message: String },

    /// Text extraction failed at the document level.
    #[error("text extraction failed on {side} document: {message}")]
    ExtractionError { side: Side, message: String },
}

impl CompareError {
    /// The input side the error is attributed to.
    pub fn side(&self) -> Side {
        match self {
            CompareError::ParseError { side, .. } => *side,
            CompareError::ExtractionError { side, .. } => *side,
        }
    }
}

/// Result type alias for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_roundtrip() {
        assert_eq!(Side::from_str("before"), Some(Side::Before));
        assert_eq!(Side::from_str("after"), Some(Side::After));
        assert_eq!(Side::from_str("sideways"), None);
        assert_eq!(Side::Before.to_string(), "before");
    }

    #[test]
    fn test_error_names_side() {
        let err = CompareError::ParseError {
            side: Side::After,
            message: "not a PDF".into(),
        };
        assert_eq!(err.side(), Side::After);
        assert!(err.to_string().contains("after"));
    }
}
