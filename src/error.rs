//! Error types for the price cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the price cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The upstream price service failed for a single item
    #[error("getting price for {item_code} from service: {source}")]
    LookupFailed {
        item_code: String,
        #[source]
        source: anyhow::Error,
    },

    /// One or more lookups of a batch failed; no partial prices are returned
    #[error("{failures} of {total} price lookups failed")]
    BatchFailed {
        failures: usize,
        total: usize,
        /// Underlying errors, kept for diagnostics only
        errors: Vec<CacheError>,
    },

    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A batch worker could not run to completion
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Number of failed lookups this error stands for.
    pub fn failure_count(&self) -> usize {
        match self {
            CacheError::BatchFailed { failures, .. } => *failures,
            _ => 1,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the price cache.
pub type Result<T> = std::result::Result<T, CacheError>;
