//! Time-series trend and anomaly analysis service
//!
//! Maintains one append-only series per (plot, index) key. Timestamps are
//! strictly increasing; a failed append leaves the series untouched. The
//! store is a keyed map behind a read-write lock with a per-key mutex, so
//! at most one writer touches a series at a time while readers work on
//! cloned snapshots.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use shared::{IndexKind, IndexValue};

use crate::config::TimeSeriesConfig;
use crate::error::{EngineError, EngineResult};

/// Storage key for one series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SeriesKey {
    plot_id: Uuid,
    kind: IndexKind,
}

/// Lookback selection for trend estimation
#[derive(Debug, Clone, Copy)]
pub enum TrendWindow {
    /// Configured default sample count
    Default,
    /// Trailing sample count
    Samples(usize),
    /// Trailing day span measured from the newest point
    Days(i64),
}

/// Direction a series is heading, for presentation
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// Least-squares fit over the lookback window
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TrendEstimate {
    pub slope_per_day: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
}

/// Trend over the trailing window of one series
#[derive(Debug, Clone, Serialize)]
pub struct TrendResult {
    pub plot_id: Uuid,
    pub kind: IndexKind,
    /// Points that entered the fit
    pub samples: usize,
    /// None when fewer than two points are available
    pub trend: Option<TrendEstimate>,
}

/// Anomaly verdict for one point
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyStatus {
    Normal,
    Anomalous,
    /// Not enough trailing history, or the baseline mean is degenerate
    Unknown,
}

/// Per-point anomaly evaluation
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub status: AnomalyStatus,
    /// Relative deviation from the trailing moving average, when evaluable
    pub deviation: Option<f64>,
}

/// Anomaly evaluation of a whole series
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyResult {
    pub plot_id: Uuid,
    pub kind: IndexKind,
    pub window: usize,
    pub threshold: f64,
    pub points: Vec<AnomalyPoint>,
}

/// Moving-average resample point for display
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SmoothedPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Maintains per-plot index histories and derives trends and anomalies
#[derive(Debug, Default)]
pub struct TimeSeriesAnalyzer {
    config: TimeSeriesConfig,
    store: RwLock<HashMap<SeriesKey, Arc<Mutex<Vec<IndexValue>>>>>,
}

impl TimeSeriesAnalyzer {
    /// Create a new TimeSeriesAnalyzer instance
    pub fn new(config: TimeSeriesConfig) -> Self {
        Self {
            config,
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Append one index value to a series.
    ///
    /// Fails when the timestamp is not strictly after the last stored
    /// point; the series is unchanged on failure. The analyzer never
    /// reorders on the caller's behalf.
    pub fn append(&self, plot_id: Uuid, kind: IndexKind, value: IndexValue) -> EngineResult<()> {
        if value.kind != kind {
            return Err(EngineError::InvalidInput(format!(
                "index kind mismatch: series is {}, value is {}",
                kind, value.kind
            )));
        }

        let series = self.series_handle(plot_id, kind);
        let mut points = series.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(last) = points.last() {
            if value.timestamp <= last.timestamp {
                return Err(EngineError::OutOfOrder {
                    last: last.timestamp,
                    attempted: value.timestamp,
                });
            }
        }

        points.push(value);
        tracing::debug!(
            "Appended {} point for plot {} ({} total)",
            kind,
            plot_id,
            points.len()
        );
        Ok(())
    }

    /// Number of points stored for a series
    pub fn len(&self, plot_id: Uuid, kind: IndexKind) -> usize {
        self.snapshot(plot_id, kind).len()
    }

    /// True when the series has no points yet
    pub fn is_empty(&self, plot_id: Uuid, kind: IndexKind) -> bool {
        self.len(plot_id, kind) == 0
    }

    /// Cloned snapshot of a series, oldest first
    pub fn values(&self, plot_id: Uuid, kind: IndexKind) -> Vec<IndexValue> {
        self.snapshot(plot_id, kind)
    }

    /// Least-squares trend over the trailing window.
    ///
    /// Fewer than two points yield `trend: None`, never an error.
    pub fn trend(&self, plot_id: Uuid, kind: IndexKind, window: TrendWindow) -> TrendResult {
        let points = self.snapshot(plot_id, kind);

        let selected: Vec<&IndexValue> = match window {
            TrendWindow::Default => {
                let skip = points.len().saturating_sub(self.config.trend_window);
                points.iter().skip(skip).collect()
            }
            TrendWindow::Samples(n) => {
                let skip = points.len().saturating_sub(n);
                points.iter().skip(skip).collect()
            }
            TrendWindow::Days(days) => match points.last() {
                Some(last) => {
                    let cutoff = last.timestamp - Duration::days(days);
                    points.iter().filter(|p| p.timestamp >= cutoff).collect()
                }
                None => Vec::new(),
            },
        };

        TrendResult {
            plot_id,
            kind,
            samples: selected.len(),
            trend: self.fit(&selected),
        }
    }

    /// Evaluate every point of a series against its trailing moving average.
    ///
    /// The first window-1 points have no full trailing window and report
    /// `Unknown`; so does any point whose baseline mean is near zero, where
    /// relative deviation is undefined.
    pub fn detect_anomaly(&self, plot_id: Uuid, kind: IndexKind) -> AnomalyResult {
        let points = self.snapshot(plot_id, kind);
        let window = self.config.anomaly_window.max(1);
        let threshold = self.config.anomaly_threshold;

        let evaluated: Vec<AnomalyPoint> = points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                if i + 1 < window {
                    return AnomalyPoint {
                        timestamp: point.timestamp,
                        value: point.value,
                        status: AnomalyStatus::Unknown,
                        deviation: None,
                    };
                }

                let mean = points[i + 1 - window..=i]
                    .iter()
                    .map(|p| p.value)
                    .sum::<f64>()
                    / window as f64;

                if mean.abs() < 1e-6 {
                    return AnomalyPoint {
                        timestamp: point.timestamp,
                        value: point.value,
                        status: AnomalyStatus::Unknown,
                        deviation: None,
                    };
                }

                let deviation = (point.value - mean).abs() / mean.abs();
                let status = if deviation > threshold {
                    AnomalyStatus::Anomalous
                } else {
                    AnomalyStatus::Normal
                };

                if status == AnomalyStatus::Anomalous {
                    tracing::warn!(
                        "Anomalous {} point for plot {}: {:.3} deviates {:.1}% from trailing mean",
                        kind,
                        plot_id,
                        point.value,
                        deviation * 100.0
                    );
                }

                AnomalyPoint {
                    timestamp: point.timestamp,
                    value: point.value,
                    status,
                    deviation: Some(deviation),
                }
            })
            .collect();

        AnomalyResult {
            plot_id,
            kind,
            window,
            threshold,
            points: evaluated,
        }
    }

    /// Trailing moving-average resample for display.
    ///
    /// Pure and stateless; the stored series is not mutated. Early points
    /// average over however much history exists.
    pub fn smooth(&self, plot_id: Uuid, kind: IndexKind, window: usize) -> Vec<SmoothedPoint> {
        let points = self.snapshot(plot_id, kind);
        let window = window.max(1);

        points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let start = (i + 1).saturating_sub(window);
                let mean =
                    points[start..=i].iter().map(|p| p.value).sum::<f64>() / (i + 1 - start) as f64;
                SmoothedPoint {
                    timestamp: point.timestamp,
                    value: mean,
                }
            })
            .collect()
    }

    /// Handle for a series, created empty on first touch
    fn series_handle(&self, plot_id: Uuid, kind: IndexKind) -> Arc<Mutex<Vec<IndexValue>>> {
        let key = SeriesKey { plot_id, kind };

        {
            let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(series) = store.get(&key) {
                return Arc::clone(series);
            }
        }

        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(store.entry(key).or_default())
    }

    fn snapshot(&self, plot_id: Uuid, kind: IndexKind) -> Vec<IndexValue> {
        let key = SeriesKey { plot_id, kind };
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        match store.get(&key) {
            Some(series) => series
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            None => Vec::new(),
        }
    }

    /// Least-squares slope per day and R² over the selected points
    fn fit(&self, points: &[&IndexValue]) -> Option<TrendEstimate> {
        if points.len() < 2 {
            return None;
        }

        let t0 = points[0].timestamp;
        let xs: Vec<f64> = points
            .iter()
            .map(|p| (p.timestamp - t0).num_seconds() as f64 / 86_400.0)
            .collect();
        let ys: Vec<f64> = points.iter().map(|p| p.value).collect();

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (x, y) in xs.iter().zip(ys.iter()) {
            sxx += (x - x_mean) * (x - x_mean);
            sxy += (x - x_mean) * (y - y_mean);
            syy += (y - y_mean) * (y - y_mean);
        }

        // Timestamps are strictly increasing, so sxx is positive
        let slope = sxy / sxx;
        // A flat series fits its own mean perfectly
        let r_squared = if syy < 1e-12 {
            1.0
        } else {
            (sxy * sxy) / (sxx * syy)
        };

        let direction = if slope > self.config.stable_slope_per_day {
            TrendDirection::Improving
        } else if slope < -self.config.stable_slope_per_day {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };

        Some(TrendEstimate {
            slope_per_day: slope,
            r_squared,
            direction,
        })
    }
}
