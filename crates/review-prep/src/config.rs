//! Configuration for the dataset loader.
//!
//! The loader takes its dataset path from configuration rather than any
//! built-in default location; the path is a required builder argument.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seed used for reproducible sampling unless overridden.
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Configuration for [`crate::loader::ReviewLoader`].
///
/// # Example
///
/// ```rust,ignore
/// use review_prep::LoaderConfig;
///
/// let config = LoaderConfig::builder("data/raw/amazon_reviews.csv")
///     .sample_size(1000)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Path to the CSV file to load. Required; there is no default location.
    pub data_path: PathBuf,

    /// If set, the loader returns a random sample of this many rows
    /// (when smaller than the cleaned row count).
    /// Default: None
    pub sample_size: Option<usize>,

    /// Seed for the sampling RNG, kept fixed for reproducibility.
    /// Default: 42
    pub sample_seed: u64,
}

impl LoaderConfig {
    /// Create a new configuration builder for the given dataset path.
    pub fn builder(data_path: impl Into<PathBuf>) -> LoaderConfigBuilder {
        LoaderConfigBuilder {
            data_path: data_path.into(),
            sample_size: None,
            sample_seed: None,
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath);
        }
        if self.sample_size == Some(0) {
            return Err(ConfigValidationError::InvalidSampleSize);
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Dataset path must not be empty")]
    EmptyPath,

    #[error("Sample size must be at least 1 when set")]
    InvalidSampleSize,
}

impl From<ConfigValidationError> for crate::error::DataError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::DataError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`LoaderConfig`].
#[derive(Debug)]
pub struct LoaderConfigBuilder {
    data_path: PathBuf,
    sample_size: Option<usize>,
    sample_seed: Option<u64>,
}

impl LoaderConfigBuilder {
    /// Request a random sample of this many rows from the cleaned dataset.
    ///
    /// Values greater than or equal to the cleaned row count leave the
    /// dataset unchanged.
    pub fn sample_size(mut self, n: usize) -> Self {
        self.sample_size = Some(n);
        self
    }

    /// Override the sampling seed (default 42).
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `LoaderConfig` or an error if validation fails.
    pub fn build(self) -> Result<LoaderConfig, ConfigValidationError> {
        let config = LoaderConfig {
            data_path: self.data_path,
            sample_size: self.sample_size,
            sample_seed: self.sample_seed.unwrap_or(DEFAULT_SAMPLE_SEED),
        };

        config.validate()?;
        Ok(config)
    }
}
