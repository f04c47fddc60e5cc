//! Best-effort review-time conversion.
//!
//! The review timestamp column converts to datetime only when every non-null
//! value parses. A single unparseable value leaves the whole column in its
//! original form; partial per-row conversion would change the output shape.

use super::REVIEW_TIME_COLUMN;
use crate::error::Result;
use crate::utils::is_datetime_dtype;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::debug;

/// Date-only formats seen in review exports ("09 13, 2009" is the common one).
const DATE_FORMATS: [&str; 3] = ["%m %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Formats carrying a time-of-day component.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a single review-time value to epoch milliseconds (UTC).
fn parse_review_time(value: &str) -> Option<i64> {
    let trimmed = value.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
        }
    }
    None
}

/// Convert the review-time column to `Datetime(Milliseconds)` if possible.
///
/// Returns `Ok(true)` when the column is (or already was) datetime-typed and
/// `Ok(false)` when it was left in its original form. Never fails on
/// unparseable values; only polars errors propagate.
pub(crate) fn convert_review_times(df: &mut DataFrame) -> Result<bool> {
    let series = match df.column(REVIEW_TIME_COLUMN) {
        Ok(col) => col.as_materialized_series().clone(),
        Err(_) => {
            debug!(column = REVIEW_TIME_COLUMN, "column absent; nothing to convert");
            return Ok(false);
        }
    };

    if is_datetime_dtype(series.dtype()) {
        return Ok(true);
    }
    if series.dtype() != &DataType::String {
        debug!(dtype = ?series.dtype(), "review time is not text; left unconverted");
        return Ok(false);
    }

    let str_series = series.str()?;
    let mut millis: Vec<Option<i64>> = Vec::with_capacity(str_series.len());

    for opt_val in str_series.into_iter() {
        match opt_val {
            Some(val) => match parse_review_time(val) {
                Some(ms) => millis.push(Some(ms)),
                None => {
                    debug!(value = val, "unparseable review time; column left as-is");
                    return Ok(false);
                }
            },
            None => millis.push(None),
        }
    }

    let converted = Series::new(series.name().clone(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    df.replace(REVIEW_TIME_COLUMN, converted)?;
    Ok(true)
}
