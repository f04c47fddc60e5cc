//! Dataset loading module.
//!
//! This module provides [`ReviewLoader`], which reads a review CSV from the
//! configured path, applies the fixed cleaning rules, and optionally draws a
//! reproducible random sample:
//!
//! 1. Drop rows missing a value in any essential column
//! 2. Coerce the rating column to numeric and drop rows left null
//! 3. Convert review times to datetime (whole column or not at all)
//! 4. Fill missing values in the vote columns with zero
//! 5. Sample with a fixed seed when a sample size is configured

mod cleaning;
mod datetime;
mod sampling;

use crate::config::LoaderConfig;
use crate::error::{DataError, Result};
use crate::utils::null_counts;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns whose absence disqualifies a row from the cleaned dataset.
pub const ESSENTIAL_COLUMNS: [&str; 3] = ["reviewerName", "overall", "reviewText"];

/// The rating column, coerced to numeric during cleaning.
pub const RATING_COLUMN: &str = "overall";

/// The review timestamp column, converted to datetime on a best-effort basis.
pub const REVIEW_TIME_COLUMN: &str = "reviewTime";

/// Optional numeric columns whose missing values default to zero when present.
pub const VOTE_COLUMNS: [&str; 7] = [
    "helpful_yes",
    "helpful_no",
    "total_vote",
    "score_pos_neg_diff",
    "score_average_rating",
    "wilson_lower_bound",
    "day_diff",
];

/// Loader for review CSV datasets.
///
/// Each call reads the file fresh from storage; nothing is cached and the
/// source file is never modified.
pub struct ReviewLoader {
    config: LoaderConfig,
}

impl ReviewLoader {
    /// Create a loader for the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The loader's configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load, clean, and (if configured) sample the dataset.
    ///
    /// Sampling only applies when the configured sample size is smaller than
    /// the cleaned row count; otherwise the full cleaned table is returned.
    pub fn load(&self) -> Result<DataFrame> {
        let df = self.load_unsampled()?;

        match self.config.sample_size {
            Some(n) if n < df.height() => {
                let sampled = sampling::sample_rows(&df, n, self.config.sample_seed)?;
                info!(rows = n, seed = self.config.sample_seed, "sampled reviews");
                Ok(sampled)
            }
            _ => Ok(df),
        }
    }

    /// Load and clean the dataset without sampling.
    ///
    /// This is the path used for dataset statistics, which are always
    /// computed over the full cleaned table.
    pub fn load_unsampled(&self) -> Result<DataFrame> {
        let path = &self.config.data_path;
        if !path.exists() {
            return Err(DataError::DatasetNotFound(path.clone()));
        }

        info!(path = %path.display(), "loading reviews dataset");
        let df = read_csv_with_fallbacks(path)?;

        info!(rows = df.height(), columns = df.width(), "initial shape");
        debug!(columns = ?df.get_column_names(), "columns");
        for (name, nulls) in null_counts(&df) {
            if nulls > 0 {
                debug!(column = %name, nulls, "missing values before cleaning");
            }
        }

        let (df, dropped) = cleaning::drop_missing_essentials(df)?;
        if dropped > 0 {
            info!(rows = dropped, "dropped rows missing essential columns");
        }

        let (mut df, dropped) = cleaning::coerce_rating(df)?;
        if dropped > 0 {
            info!(rows = dropped, "dropped rows with non-numeric ratings");
        }

        if datetime::convert_review_times(&mut df)? {
            info!("review time converted to datetime");
        } else {
            info!("could not convert review time to datetime");
        }

        let filled = cleaning::fill_vote_columns(&mut df)?;
        for name in &filled {
            debug!(column = %name, "filled missing vote values with zero");
        }

        info!(rows = df.height(), columns = df.width(), "after cleaning");
        Ok(df)
    }
}

/// Read a CSV with layered fallback strategies.
fn read_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: standard loading with explicit quote handling
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("standard loading failed: {}", e);
        }
    }

    // Strategy 2: default parse options
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("loading with default options failed: {}", e);
        }
    }

    // Strategy 3: pre-clean the raw content and parse from memory
    let content = std::fs::read_to_string(path)?;
    let cleaned = clean_csv_content(&content);
    let cursor = std::io::Cursor::new(cleaned);

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| {
            warn!("all CSV read strategies failed for {}", path.display());
            e.into()
        })
}

/// Strip doubled quotes and blank lines from raw CSV content.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
