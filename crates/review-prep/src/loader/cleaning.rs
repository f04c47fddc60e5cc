//! Row and column cleaning rules for review datasets.

use super::{ESSENTIAL_COLUMNS, RATING_COLUMN, VOTE_COLUMNS};
use crate::error::{DataError, Result};
use crate::utils::{is_numeric_dtype, parse_rating_str};
use polars::prelude::*;
use tracing::debug;

/// Drop every row that is null in any essential column.
///
/// Returns the filtered frame and the number of rows removed. A dataset
/// without one of the essential columns is rejected outright.
pub(crate) fn drop_missing_essentials(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();

    let mut mask: Option<BooleanChunked> = None;
    for name in ESSENTIAL_COLUMNS {
        let series = df
            .column(name)
            .map_err(|_| DataError::ColumnNotFound(name.to_string()))?
            .as_materialized_series();
        let not_null = series.is_not_null();
        mask = Some(match mask {
            Some(m) => &m & &not_null,
            None => not_null,
        });
    }

    let filtered = match mask {
        Some(m) => df.filter(&m)?,
        None => df,
    };
    let dropped = before - filtered.height();
    Ok((filtered, dropped))
}

/// Coerce the rating column to Float64 and drop rows left null.
///
/// String values are trimmed and parsed; unparseable values become null.
/// Numeric columns are cast. Any other dtype coerces to an all-null column,
/// so every such row is dropped.
pub(crate) fn coerce_rating(df: DataFrame) -> Result<(DataFrame, usize)> {
    let series = df
        .column(RATING_COLUMN)
        .map_err(|_| DataError::ColumnNotFound(RATING_COLUMN.to_string()))?
        .as_materialized_series()
        .clone();

    let coerced = match series.dtype() {
        dtype if is_numeric_dtype(dtype) => series.cast(&DataType::Float64)?,
        DataType::String => {
            let str_series = series.str()?;
            let values: Vec<Option<f64>> = str_series
                .into_iter()
                .map(|opt| opt.and_then(parse_rating_str))
                .collect();
            Series::new(series.name().clone(), values)
        }
        dtype => {
            debug!(?dtype, "rating column has no numeric reading; nulling out");
            Series::full_null(series.name().clone(), series.len(), &DataType::Float64)
        }
    };

    let mut df = df;
    df.replace(RATING_COLUMN, coerced)?;

    let before = df.height();
    let not_null = df
        .column(RATING_COLUMN)?
        .as_materialized_series()
        .is_not_null();
    let filtered = df.filter(&not_null)?;
    let dropped = before - filtered.height();
    Ok((filtered, dropped))
}

/// Fill nulls with zero in every vote column present with a numeric dtype.
///
/// Returns the names of the columns that actually had values filled.
/// Absent columns are skipped; a vote column that parsed as something other
/// than numeric is left untouched.
pub(crate) fn fill_vote_columns(df: &mut DataFrame) -> Result<Vec<String>> {
    let mut filled = Vec::new();

    for name in VOTE_COLUMNS {
        let series = match df.column(name) {
            Ok(col) => col.as_materialized_series().clone(),
            Err(_) => continue,
        };

        if !is_numeric_dtype(series.dtype()) {
            debug!(column = name, dtype = ?series.dtype(), "vote column is not numeric; left as-is");
            continue;
        }
        if series.null_count() == 0 {
            continue;
        }

        let replaced = series.fill_null(FillNullStrategy::Zero)?;
        df.replace(name, replaced)?;
        filled.push(name.to_string());
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn essentials_frame() -> DataFrame {
        df!(
            "reviewerName" => &[Some("alice"), None, Some("carol"), Some("dan")],
            "overall" => &[Some(5.0f64), Some(4.0), Some(3.0), Some(2.0)],
            "reviewText" => &[Some("great"), Some("fine"), None, Some("meh")],
        )
        .unwrap()
    }

    #[test]
    fn test_drop_missing_essentials() {
        let (cleaned, dropped) = drop_missing_essentials(essentials_frame()).unwrap();

        assert_eq!(cleaned.height(), 2);
        assert_eq!(dropped, 2);
        for name in ESSENTIAL_COLUMNS {
            assert_eq!(cleaned.column(name).unwrap().null_count(), 0);
        }
    }

    #[test]
    fn test_drop_missing_essentials_requires_columns() {
        let df = df!("overall" => &[5.0f64]).unwrap();
        let err = drop_missing_essentials(df).unwrap_err();
        assert!(matches!(err, DataError::ColumnNotFound(_)));
    }

    #[test]
    fn test_coerce_rating_from_strings() {
        let df = df!(
            "overall" => &[Some("5.0"), Some(" 4 "), Some("abc"), None, Some("1.5")],
        )
        .unwrap();

        let (cleaned, dropped) = coerce_rating(df).unwrap();

        assert_eq!(cleaned.height(), 3);
        assert_eq!(dropped, 2);
        let ratings = cleaned.column("overall").unwrap();
        assert_eq!(ratings.dtype(), &DataType::Float64);
        let values: Vec<f64> = ratings
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(values, vec![5.0, 4.0, 1.5]);
    }

    #[test]
    fn test_coerce_rating_casts_integers() {
        let df = df!("overall" => &[5i64, 4, 3]).unwrap();
        let (cleaned, dropped) = coerce_rating(df).unwrap();

        assert_eq!(dropped, 0);
        assert_eq!(
            cleaned.column("overall").unwrap().dtype(),
            &DataType::Float64
        );
    }

    #[test]
    fn test_coerce_rating_unsupported_dtype_drops_all() {
        let df = df!("overall" => &[true, false]).unwrap();
        let (cleaned, dropped) = coerce_rating(df).unwrap();

        assert_eq!(cleaned.height(), 0);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_fill_vote_columns() {
        let mut df = df!(
            "helpful_yes" => &[Some(3i64), None, Some(1)],
            "total_vote" => &[Some(4i64), Some(2), Some(1)],
            "other" => &[None::<i64>, None, None],
        )
        .unwrap();

        let filled = fill_vote_columns(&mut df).unwrap();

        assert_eq!(filled, vec!["helpful_yes".to_string()]);
        let helpful = df.column("helpful_yes").unwrap();
        assert_eq!(helpful.null_count(), 0);
        let values: Vec<i64> = helpful
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        // prior non-null values unchanged, nulls become zero
        assert_eq!(values, vec![3, 0, 1]);
        // non-vote columns untouched
        assert_eq!(df.column("other").unwrap().null_count(), 3);
    }

    #[test]
    fn test_fill_vote_columns_skips_non_numeric() {
        let mut df = df!(
            "helpful_yes" => &[Some("3"), None, Some("1")],
        )
        .unwrap();

        let filled = fill_vote_columns(&mut df).unwrap();
        assert!(filled.is_empty());
        assert_eq!(df.column("helpful_yes").unwrap().null_count(), 1);
    }
}
