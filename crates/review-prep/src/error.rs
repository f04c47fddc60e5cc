//! Custom error types for the review dataset loader.
//!
//! This module provides the error hierarchy using `thiserror`. The loader has
//! one explicit precondition (the dataset file must exist); everything else
//! propagates from the underlying parse calls untranslated.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dataset loading and statistics.
#[derive(Error, Debug)]
pub enum DataError {
    /// The dataset file does not exist at the configured path.
    #[error("Dataset not found at {0}")]
    DatasetNotFound(PathBuf),

    /// A required column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid loader configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DataError>,
    },
}

impl DataError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DataError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error is the pre-parse missing-file failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::DatasetNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DataError::Polars(e).with_context(context))
    }
}
