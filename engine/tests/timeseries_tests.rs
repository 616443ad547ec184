//! Tests for the time-series analysis service
//!
//! Covers the strict monotonic append invariant, trend estimation,
//! anomaly detection windows, and smoothing purity.

use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use farmsight_engine::config::TimeSeriesConfig;
use farmsight_engine::services::timeseries::{AnomalyStatus, TrendDirection, TrendWindow};
use farmsight_engine::{EngineError, TimeSeriesAnalyzer};
use shared::{IndexKind, IndexValue};

fn analyzer() -> TimeSeriesAnalyzer {
    TimeSeriesAnalyzer::new(TimeSeriesConfig::default())
}

fn point(day: i64, value: f64) -> IndexValue {
    IndexValue {
        kind: IndexKind::Ndvi,
        value,
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap() + Duration::days(day),
        saturated: false,
    }
}

/// Seed a fresh series with one point per day
fn seeded(values: &[f64]) -> (TimeSeriesAnalyzer, Uuid) {
    let analyzer = analyzer();
    let plot_id = Uuid::new_v4();
    for (day, value) in values.iter().enumerate() {
        analyzer
            .append(plot_id, IndexKind::Ndvi, point(day as i64, *value))
            .unwrap();
    }
    (analyzer, plot_id)
}

// ============================================================================
// Append Invariant Tests
// ============================================================================

mod append {
    use super::*;

    #[test]
    fn appends_strictly_increasing_timestamps() {
        let (analyzer, plot_id) = seeded(&[0.5, 0.55, 0.6]);
        assert_eq!(analyzer.len(plot_id, IndexKind::Ndvi), 3);
    }

    #[test]
    fn rejects_equal_timestamp() {
        let (analyzer, plot_id) = seeded(&[0.5]);
        let err = analyzer
            .append(plot_id, IndexKind::Ndvi, point(0, 0.6))
            .unwrap_err();

        assert!(matches!(err, EngineError::OutOfOrder { .. }));
        assert_eq!(analyzer.len(plot_id, IndexKind::Ndvi), 1);
    }

    #[test]
    fn rejects_earlier_timestamp_and_leaves_series_unchanged() {
        let (analyzer, plot_id) = seeded(&[0.5, 0.55]);
        let before = analyzer.values(plot_id, IndexKind::Ndvi);

        let err = analyzer
            .append(plot_id, IndexKind::Ndvi, point(0, 0.7))
            .unwrap_err();

        assert!(matches!(err, EngineError::OutOfOrder { .. }));
        assert_eq!(analyzer.values(plot_id, IndexKind::Ndvi), before);
    }

    #[test]
    fn rejects_mismatched_kind() {
        let analyzer = analyzer();
        let plot_id = Uuid::new_v4();
        let err = analyzer
            .append(plot_id, IndexKind::Ndwi, point(0, 0.5))
            .unwrap_err();

        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(analyzer.is_empty(plot_id, IndexKind::Ndwi));
    }

    #[test]
    fn series_are_isolated_per_plot_and_kind() {
        let analyzer = analyzer();
        let plot_a = Uuid::new_v4();
        let plot_b = Uuid::new_v4();

        analyzer.append(plot_a, IndexKind::Ndvi, point(0, 0.5)).unwrap();
        // Same timestamp is fine on a different key
        analyzer.append(plot_b, IndexKind::Ndvi, point(0, 0.5)).unwrap();

        assert_eq!(analyzer.len(plot_a, IndexKind::Ndvi), 1);
        assert_eq!(analyzer.len(plot_b, IndexKind::Ndvi), 1);
        assert!(analyzer.is_empty(plot_a, IndexKind::Ndwi));
    }
}

// ============================================================================
// Trend Tests
// ============================================================================

mod trend {
    use super::*;

    #[test]
    fn empty_series_has_no_trend() {
        let analyzer = analyzer();
        let result = analyzer.trend(Uuid::new_v4(), IndexKind::Ndvi, TrendWindow::Default);

        assert_eq!(result.samples, 0);
        assert!(result.trend.is_none());
    }

    #[test]
    fn single_point_has_no_trend() {
        let (analyzer, plot_id) = seeded(&[0.5]);
        let result = analyzer.trend(plot_id, IndexKind::Ndvi, TrendWindow::Default);

        assert_eq!(result.samples, 1);
        assert!(result.trend.is_none());
    }

    #[test]
    fn linear_growth_recovers_slope() {
        // 0.01 per day, perfectly linear
        let values: Vec<f64> = (0..10).map(|d| 0.5 + 0.01 * d as f64).collect();
        let (analyzer, plot_id) = seeded(&values);

        let result = analyzer.trend(plot_id, IndexKind::Ndvi, TrendWindow::Default);
        let estimate = result.trend.unwrap();

        assert_relative_eq!(estimate.slope_per_day, 0.01, epsilon = 1e-9);
        assert_relative_eq!(estimate.r_squared, 1.0, epsilon = 1e-9);
        assert_eq!(estimate.direction, TrendDirection::Improving);
    }

    #[test]
    fn declining_series_reports_declining() {
        let values: Vec<f64> = (0..10).map(|d| 0.8 - 0.02 * d as f64).collect();
        let (analyzer, plot_id) = seeded(&values);

        let estimate = analyzer
            .trend(plot_id, IndexKind::Ndvi, TrendWindow::Default)
            .trend
            .unwrap();

        assert!(estimate.slope_per_day < 0.0);
        assert_eq!(estimate.direction, TrendDirection::Declining);
    }

    #[test]
    fn flat_series_is_stable_with_full_confidence() {
        let (analyzer, plot_id) = seeded(&[0.6; 8]);

        let estimate = analyzer
            .trend(plot_id, IndexKind::Ndvi, TrendWindow::Default)
            .trend
            .unwrap();

        assert_relative_eq!(estimate.slope_per_day, 0.0, epsilon = 1e-12);
        assert_relative_eq!(estimate.r_squared, 1.0, epsilon = 1e-12);
        assert_eq!(estimate.direction, TrendDirection::Stable);
    }

    #[test]
    fn sample_window_limits_the_fit() {
        // 20 flat days then 5 rising days; a 5-sample window sees only the rise
        let mut values = vec![0.5; 20];
        values.extend((0..5).map(|d| 0.5 + 0.05 * d as f64));
        let (analyzer, plot_id) = seeded(&values);

        let result = analyzer.trend(plot_id, IndexKind::Ndvi, TrendWindow::Samples(5));

        assert_eq!(result.samples, 5);
        assert_relative_eq!(result.trend.unwrap().slope_per_day, 0.05, epsilon = 1e-9);
    }

    #[test]
    fn day_window_filters_by_timestamp() {
        let values: Vec<f64> = (0..30).map(|d| 0.5 + 0.01 * d as f64).collect();
        let (analyzer, plot_id) = seeded(&values);

        let result = analyzer.trend(plot_id, IndexKind::Ndvi, TrendWindow::Days(7));

        // Newest point minus 7 days keeps 8 points
        assert_eq!(result.samples, 8);
        assert!(result.trend.is_some());
    }
}

// ============================================================================
// Anomaly Tests
// ============================================================================

mod anomaly {
    use super::*;

    #[test]
    fn warmup_points_are_unknown() {
        let (analyzer, plot_id) = seeded(&[0.6; 10]);
        let result = analyzer.detect_anomaly(plot_id, IndexKind::Ndvi);

        assert_eq!(result.window, 7);
        for point in &result.points[..6] {
            assert_eq!(point.status, AnomalyStatus::Unknown);
            assert!(point.deviation.is_none());
        }
        for point in &result.points[6..] {
            assert_eq!(point.status, AnomalyStatus::Normal);
        }
    }

    #[test]
    fn spike_beyond_threshold_is_flagged() {
        let mut values = vec![0.6; 9];
        values.push(0.9);
        let (analyzer, plot_id) = seeded(&values);

        let result = analyzer.detect_anomaly(plot_id, IndexKind::Ndvi);
        let last = result.points.last().unwrap();

        assert_eq!(last.status, AnomalyStatus::Anomalous);
        assert!(last.deviation.unwrap() > 0.15);
    }

    #[test]
    fn mild_wobble_stays_normal() {
        let mut values = vec![0.6; 9];
        values.push(0.63);
        let (analyzer, plot_id) = seeded(&values);

        let result = analyzer.detect_anomaly(plot_id, IndexKind::Ndvi);
        let last = result.points.last().unwrap();

        assert_eq!(last.status, AnomalyStatus::Normal);
    }

    #[test]
    fn near_zero_baseline_is_unknown() {
        // NDWI around zero: relative deviation is undefined
        let analyzer = analyzer();
        let plot_id = Uuid::new_v4();
        for day in 0..8 {
            let value = IndexValue {
                kind: IndexKind::Ndwi,
                value: if day % 2 == 0 { 1e-9 } else { -1e-9 },
                timestamp: point(day, 0.0).timestamp,
                saturated: false,
            };
            analyzer.append(plot_id, IndexKind::Ndwi, value).unwrap();
        }

        let result = analyzer.detect_anomaly(plot_id, IndexKind::Ndwi);
        assert!(result
            .points
            .iter()
            .all(|p| p.status == AnomalyStatus::Unknown));
    }

    #[test]
    fn shorter_configured_window_warms_up_faster() {
        let config = TimeSeriesConfig {
            anomaly_window: 3,
            ..TimeSeriesConfig::default()
        };
        let analyzer = TimeSeriesAnalyzer::new(config);
        let plot_id = Uuid::new_v4();
        for (day, value) in [0.6, 0.6, 0.6, 0.6].iter().enumerate() {
            analyzer
                .append(plot_id, IndexKind::Ndvi, point(day as i64, *value))
                .unwrap();
        }

        let result = analyzer.detect_anomaly(plot_id, IndexKind::Ndvi);
        assert_eq!(result.points[1].status, AnomalyStatus::Unknown);
        assert_eq!(result.points[2].status, AnomalyStatus::Normal);
    }
}

// ============================================================================
// Smoothing Tests
// ============================================================================

mod smoothing {
    use super::*;

    #[test]
    fn output_length_matches_series() {
        let (analyzer, plot_id) = seeded(&[0.5, 0.6, 0.7, 0.8]);
        let smoothed = analyzer.smooth(plot_id, IndexKind::Ndvi, 3);

        assert_eq!(smoothed.len(), 4);
    }

    #[test]
    fn trailing_mean_values() {
        let (analyzer, plot_id) = seeded(&[0.3, 0.6, 0.9]);
        let smoothed = analyzer.smooth(plot_id, IndexKind::Ndvi, 2);

        assert_relative_eq!(smoothed[0].value, 0.3, epsilon = 1e-12);
        assert_relative_eq!(smoothed[1].value, 0.45, epsilon = 1e-12);
        assert_relative_eq!(smoothed[2].value, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn smoothing_does_not_mutate_the_series() {
        let (analyzer, plot_id) = seeded(&[0.3, 0.6, 0.9]);
        let before = analyzer.values(plot_id, IndexKind::Ndvi);

        let _ = analyzer.smooth(plot_id, IndexKind::Ndvi, 2);

        assert_eq!(analyzer.values(plot_id, IndexKind::Ndvi), before);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A failed append never changes the stored series
    #[test]
    fn prop_failed_append_preserves_series(
        values in proptest::collection::vec(0.0..1.0f64, 1..20),
        offset in 0..50i64
    ) {
        let (analyzer, plot_id) = seeded(&values);
        let before = analyzer.values(plot_id, IndexKind::Ndvi);

        // Any timestamp at or before the last stored day must be rejected
        let last_day = values.len() as i64 - 1;
        let stale = point(last_day - offset, 0.5);
        let result = analyzer.append(plot_id, IndexKind::Ndvi, stale);

        prop_assert!(result.is_err());
        prop_assert_eq!(analyzer.values(plot_id, IndexKind::Ndvi), before);
    }

    /// Smoothing output is bounded by the input extremes
    #[test]
    fn prop_smoothing_bounded(
        values in proptest::collection::vec(0.0..1.0f64, 1..30),
        window in 1..10usize
    ) {
        let (analyzer, plot_id) = seeded(&values);
        let smoothed = analyzer.smooth(plot_id, IndexKind::Ndvi, window);

        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for p in smoothed {
            prop_assert!(p.value >= lo - 1e-12 && p.value <= hi + 1e-12);
        }
    }
}
