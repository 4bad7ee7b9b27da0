//! Error types for the nova layout engine.

use thiserror::Error;

/// Primary error type for layout reconstruction.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// The page dump could not be read or decoded. Raised once, before any
    /// page is processed.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A table detection strategy failed for a page. Callers inside the
    /// pipeline degrade this to an empty detection.
    #[error("table strategy '{strategy}' failed: {reason}")]
    StrategyFailed { strategy: String, reason: String },

    /// A conversion option is out of range or a config file is unreadable.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("thread pool error: {0}")]
    ThreadPool(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
