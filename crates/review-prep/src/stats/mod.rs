//! Descriptive statistics over a cleaned review dataset.

pub mod report;

use crate::config::LoaderConfig;
use crate::error::{DataError, Result};
use crate::loader::{RATING_COLUMN, REVIEW_TIME_COLUMN, ReviewLoader};
use crate::utils::is_numeric_dtype;
use chrono::DateTime;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Count of reviews carrying one distinct rating value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCount {
    pub rating: f64,
    pub count: u64,
}

/// Earliest and latest review time, formatted from whatever form the
/// review-time column is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Summary statistics for a cleaned review dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Total row count.
    pub total_reviews: usize,
    /// Distinct reviewer names.
    pub unique_reviewers: usize,
    /// Mean rating (0.0 for an empty dataset).
    pub avg_rating: f64,
    /// Per-rating counts, ascending by rating value.
    pub rating_distribution: Vec<RatingCount>,
    /// Rows with a non-null review text.
    pub reviews_with_text: usize,
    /// Review-time span, when the column exists.
    pub date_range: Option<DateRange>,
    /// Mean of `helpful_yes`, when that column exists and is numeric.
    pub avg_helpful_votes: Option<f64>,
}

impl DatasetStats {
    /// Load the full dataset at the configured path and compute statistics.
    ///
    /// Statistics are always computed over the full cleaned table; the
    /// config's sample size is not applied here.
    pub fn collect(config: &LoaderConfig) -> Result<Self> {
        let loader = ReviewLoader::new(config.clone());
        let df = loader.load_unsampled()?;
        let stats = Self::compute(&df)?;
        info!(
            total = stats.total_reviews,
            reviewers = stats.unique_reviewers,
            avg_rating = stats.avg_rating,
            "dataset statistics computed"
        );
        Ok(stats)
    }

    /// Compute statistics from an already-cleaned frame.
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let reviewers = df
            .column("reviewerName")
            .map_err(|_| DataError::ColumnNotFound("reviewerName".to_string()))?
            .as_materialized_series();
        let ratings = df
            .column(RATING_COLUMN)
            .map_err(|_| DataError::ColumnNotFound(RATING_COLUMN.to_string()))?
            .as_materialized_series();
        let texts = df
            .column("reviewText")
            .map_err(|_| DataError::ColumnNotFound("reviewText".to_string()))?
            .as_materialized_series();

        let rating_values = ratings.cast(&DataType::Float64)?;

        Ok(Self {
            total_reviews: df.height(),
            unique_reviewers: reviewers.n_unique()?,
            avg_rating: rating_values.mean().unwrap_or(0.0),
            rating_distribution: rating_distribution(&rating_values)?,
            reviews_with_text: texts.len() - texts.null_count(),
            date_range: date_range(df)?,
            avg_helpful_votes: df
                .column("helpful_yes")
                .ok()
                .and_then(|col| col.as_materialized_series().mean()),
        })
    }
}

/// Per-rating frequency counts, ascending by rating value.
fn rating_distribution(ratings: &Series) -> Result<Vec<RatingCount>> {
    let mut values: Vec<f64> = ratings.f64()?.into_iter().flatten().collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut distribution: Vec<RatingCount> = Vec::new();
    for value in values {
        match distribution.last_mut() {
            Some(last) if last.rating == value => last.count += 1,
            _ => distribution.push(RatingCount {
                rating: value,
                count: 1,
            }),
        }
    }
    Ok(distribution)
}

/// Span of the review-time column, in whatever form it is in.
///
/// Datetime columns format as dates; an unconverted text column falls back
/// to its lexicographic extremes, and a numeric one to its numeric extremes.
fn date_range(df: &DataFrame) -> Result<Option<DateRange>> {
    let series = match df.column(REVIEW_TIME_COLUMN) {
        Ok(col) => col.as_materialized_series(),
        Err(_) => return Ok(None),
    };

    match series.dtype() {
        DataType::Datetime(unit, _) => {
            let raw = series.cast(&DataType::Int64)?;
            let raw = raw.i64()?;
            let (min, max) = match (raw.min(), raw.max()) {
                (Some(min), Some(max)) => (min, max),
                _ => return Ok(None),
            };
            let unit = *unit;
            Ok(Some(DateRange {
                start: format_epoch(min, unit),
                end: format_epoch(max, unit),
            }))
        }
        DataType::String => {
            let strs = series.str()?;
            let min = strs.into_iter().flatten().min();
            let max = strs.into_iter().flatten().max();
            match (min, max) {
                (Some(min), Some(max)) => Ok(Some(DateRange {
                    start: min.to_string(),
                    end: max.to_string(),
                })),
                _ => Ok(None),
            }
        }
        dtype if is_numeric_dtype(dtype) => {
            let floats = series.cast(&DataType::Float64)?;
            let floats = floats.f64()?;
            match (floats.min(), floats.max()) {
                (Some(min), Some(max)) => Ok(Some(DateRange {
                    start: format!("{}", min),
                    end: format!("{}", max),
                })),
                _ => Ok(None),
            }
        }
        _ => Ok(None),
    }
}

fn format_epoch(value: i64, unit: TimeUnit) -> String {
    let millis = match unit {
        TimeUnit::Milliseconds => value,
        TimeUnit::Microseconds => value / 1_000,
        TimeUnit::Nanoseconds => value / 1_000_000,
    };
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated_frame() -> DataFrame {
        df!(
            "reviewerName" => &["a", "b", "a", "c", "a"],
            "overall" => &[5.0f64, 5.0, 4.0, 3.0, 5.0],
            "reviewText" => &["one", "two", "three", "four", "five"],
        )
        .unwrap()
    }

    #[test]
    fn test_compute_basic_stats() {
        let stats = DatasetStats::compute(&rated_frame()).unwrap();

        assert_eq!(stats.total_reviews, 5);
        assert_eq!(stats.unique_reviewers, 3);
        assert!((stats.avg_rating - 4.4).abs() < 1e-9);
        assert_eq!(stats.reviews_with_text, 5);
        assert_eq!(stats.date_range, None);
        assert_eq!(stats.avg_helpful_votes, None);
    }

    #[test]
    fn test_rating_distribution_ascending() {
        let stats = DatasetStats::compute(&rated_frame()).unwrap();

        assert_eq!(
            stats.rating_distribution,
            vec![
                RatingCount { rating: 3.0, count: 1 },
                RatingCount { rating: 4.0, count: 1 },
                RatingCount { rating: 5.0, count: 3 },
            ]
        );
    }

    #[test]
    fn test_compute_with_votes_and_dates() {
        let mut df = rated_frame();
        df.with_column(Series::new(
            "helpful_yes".into(),
            &[2.0f64, 0.0, 1.0, 0.0, 2.0],
        ))
        .unwrap();
        // kept as text; the stats fall back to lexicographic extremes
        df.with_column(Series::new(
            "reviewTime".into(),
            &["2009-09-13", "2011-01-02", "2010-06-30", "2009-09-13", "2012-12-01"],
        ))
        .unwrap();

        let stats = DatasetStats::compute(&df).unwrap();
        assert_eq!(stats.avg_helpful_votes, Some(1.0));
        let range = stats.date_range.unwrap();
        assert_eq!(range.start, "2009-09-13");
        assert_eq!(range.end, "2012-12-01");
    }

    #[test]
    fn test_compute_empty_frame() {
        let df = df!(
            "reviewerName" => Vec::<String>::new(),
            "overall" => Vec::<f64>::new(),
            "reviewText" => Vec::<String>::new(),
        )
        .unwrap();

        let stats = DatasetStats::compute(&df).unwrap();
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.avg_rating, 0.0);
        assert!(stats.rating_distribution.is_empty());
        assert_eq!(stats.date_range, None);
    }

    #[test]
    fn test_compute_missing_essential_column() {
        let df = df!("overall" => &[5.0f64]).unwrap();
        let err = DatasetStats::compute(&df).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
    }

    #[test]
    fn test_format_epoch_units() {
        let ms = 1_252_800_000_000i64; // 2009-09-13T00:00:00Z
        assert_eq!(format_epoch(ms, TimeUnit::Milliseconds), "2009-09-13");
        assert_eq!(format_epoch(ms * 1_000, TimeUnit::Microseconds), "2009-09-13");
        assert_eq!(format_epoch(ms * 1_000_000, TimeUnit::Nanoseconds), "2009-09-13");
    }
}
