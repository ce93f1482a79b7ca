//! Error taxonomy for the search surface.
//!
//! Validation errors are raised before any traversal begins. Per-file I/O
//! problems are logged and skipped, so the only error a running search can
//! produce is [`SearchError::Timeout`].

use std::path::PathBuf;
use std::time::Duration;

use crate::request::OutputMode;

/// The error type returned by [`search`](crate::search).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    /// An option value is out of range or names something unknown, such as
    /// an unrecognized file type or a zero `head_limit`.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The requested output mode needs a pattern but none was supplied.
    #[error("a search pattern is required for output mode `{mode}`")]
    PatternRequired {
        /// The mode that was requested without a pattern.
        mode: OutputMode,
    },

    /// The regex or glob pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// The root path does not exist or is not accessible.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The wall-clock deadline expired before the search completed.
    /// Partial results are discarded.
    #[error("search timeout: deadline of {0:?} expired")]
    Timeout(Duration),
}

impl SearchError {
    /// True if this error is the timeout kind. Bindings that map errors to
    /// host exception types branch on this.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SearchError::Timeout(_))
    }
}
