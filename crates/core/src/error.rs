//! Error types for tessbox box file handling.

use thiserror::Error;

/// Primary error type for box file operations.
#[derive(Error, Debug)]
pub enum BoxError {
    #[error("line {line}: box on page {page} has no page height (only {available} supplied)")]
    MissingPageHeight {
        page: usize,
        line: usize,
        available: usize,
    },

    #[error("document has {pages} pages but only {heights} page heights were supplied")]
    PageCountMismatch { pages: usize, heights: usize },

    #[error("line {line}: invalid {field} value {value:?}")]
    Numeric {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("page {page}, box {index}: coordinates do not fit in file space")]
    CoordinateOverflow { page: usize, index: usize },

    #[error("invalid combining symbols {symbols:?}: {source}")]
    InvalidSymbols {
        symbols: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid find query {0:?}: expected box text or coordinates (x1 y1 x2 y2)")]
    InvalidQuery(String),
}

impl BoxError {
    /// Returns true for structurally unusable input (the page/height
    /// bookkeeping does not line up with the data).
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            BoxError::MissingPageHeight { .. } | BoxError::PageCountMismatch { .. }
        )
    }

    /// Returns true when a coordinate or page field was not an integer, or
    /// coordinates could not be converted without overflowing.
    pub fn is_numeric_error(&self) -> bool {
        matches!(
            self,
            BoxError::Numeric { .. } | BoxError::CoordinateOverflow { .. }
        )
    }
}

/// Convenience Result type alias for BoxError.
pub type Result<T> = std::result::Result<T, BoxError>;
