//! Review Dataset Preparation Library
//!
//! Loads a CSV dataset of product reviews, applies fixed cleaning rules, and
//! computes descriptive statistics, built on Polars.
//!
//! # Overview
//!
//! The cleaning pipeline is a strict sequence:
//!
//! - Rows missing `reviewerName`, `overall`, or `reviewText` are dropped
//! - `overall` is coerced to numeric; rows it leaves null are dropped
//! - `reviewTime` converts to datetime only when every value parses
//! - Vote columns (`helpful_yes`, `total_vote`, ...) have nulls filled with 0
//! - An optional fixed-seed sample reduces the result reproducibly
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use review_prep::{DatasetStats, LoaderConfig, ReviewLoader, StatsReport};
//!
//! let config = LoaderConfig::builder("data/raw/amazon_reviews.csv")
//!     .sample_size(1000)
//!     .build()?;
//!
//! // Cleaned (and sampled) reviews as a DataFrame
//! let reviews = ReviewLoader::new(config.clone()).load()?;
//! println!("{} reviews ready", reviews.height());
//!
//! // Full-dataset statistics, regardless of the sample size
//! let stats = DatasetStats::collect(&config)?;
//! println!("{}", StatsReport::render(&stats));
//! ```
//!
//! The dataset path always comes from configuration; there is no built-in
//! default location.

pub mod config;
pub mod error;
pub mod loader;
pub mod stats;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, DEFAULT_SAMPLE_SEED, LoaderConfig, LoaderConfigBuilder};
pub use error::{DataError, Result, ResultExt};
pub use loader::{
    ESSENTIAL_COLUMNS, RATING_COLUMN, REVIEW_TIME_COLUMN, ReviewLoader, VOTE_COLUMNS,
};
pub use stats::{DatasetStats, DateRange, RatingCount, report::StatsReport};
