//! Rendering of dataset statistics for humans and machines.

use super::DatasetStats;
use crate::error::Result;
use chrono::Local;
use std::fmt::Write;

/// Renders [`DatasetStats`] as a report.
pub struct StatsReport;

impl StatsReport {
    /// Render the human-readable statistics report.
    ///
    /// The rating distribution is listed ascending by rating value with the
    /// percentage of the total each rating represents.
    pub fn render(stats: &DatasetStats) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", "=".repeat(40));
        let _ = writeln!(out, "Dataset Statistics");
        let _ = writeln!(out, "{}", "=".repeat(40));
        let _ = writeln!(
            out,
            "Generated: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Reviews: {}", stats.total_reviews);
        let _ = writeln!(out, "Unique Reviewers: {}", stats.unique_reviewers);
        let _ = writeln!(out, "Average Rating: {:.2}", stats.avg_rating);
        let _ = writeln!(out, "Reviews with Text: {}", stats.reviews_with_text);

        match &stats.date_range {
            Some(range) => {
                let _ = writeln!(out, "Date Range: {} to {}", range.start, range.end);
            }
            None => {
                let _ = writeln!(out, "Date Range: n/a");
            }
        }
        match stats.avg_helpful_votes {
            Some(avg) => {
                let _ = writeln!(out, "Avg Helpful Votes: {:.2}", avg);
            }
            None => {
                let _ = writeln!(out, "Avg Helpful Votes: n/a");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Rating Distribution:");
        for bucket in &stats.rating_distribution {
            let pct = if stats.total_reviews > 0 {
                bucket.count as f64 / stats.total_reviews as f64 * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "  {} stars: {} ({:.1}%)",
                bucket.rating, bucket.count, pct
            );
        }

        out
    }

    /// Serialize the statistics as pretty-printed JSON.
    pub fn to_json(stats: &DatasetStats) -> Result<String> {
        Ok(serde_json::to_string_pretty(stats)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{DateRange, RatingCount};

    fn sample_stats() -> DatasetStats {
        DatasetStats {
            total_reviews: 5,
            unique_reviewers: 3,
            avg_rating: 4.4,
            rating_distribution: vec![
                RatingCount { rating: 3.0, count: 1 },
                RatingCount { rating: 4.0, count: 1 },
                RatingCount { rating: 5.0, count: 3 },
            ],
            reviews_with_text: 5,
            date_range: Some(DateRange {
                start: "2009-09-13".to_string(),
                end: "2012-12-01".to_string(),
            }),
            avg_helpful_votes: None,
        }
    }

    #[test]
    fn test_render_contains_core_lines() {
        let report = StatsReport::render(&sample_stats());

        assert!(report.contains("Total Reviews: 5"));
        assert!(report.contains("Unique Reviewers: 3"));
        assert!(report.contains("Average Rating: 4.40"));
        assert!(report.contains("Date Range: 2009-09-13 to 2012-12-01"));
        assert!(report.contains("Avg Helpful Votes: n/a"));
    }

    #[test]
    fn test_render_distribution_ascending_with_percentages() {
        let report = StatsReport::render(&sample_stats());

        let three = report.find("3 stars: 1 (20.0%)").unwrap();
        let four = report.find("4 stars: 1 (20.0%)").unwrap();
        let five = report.find("5 stars: 3 (60.0%)").unwrap();
        assert!(three < four && four < five);
    }

    #[test]
    fn test_json_roundtrip() {
        let stats = sample_stats();
        let json = StatsReport::to_json(&stats).unwrap();
        let parsed: DatasetStats = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.total_reviews, stats.total_reviews);
        assert_eq!(parsed.rating_distribution, stats.rating_distribution);
        assert_eq!(parsed.date_range, stats.date_range);
    }
}
