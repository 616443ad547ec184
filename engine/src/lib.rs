//! Farmsight analysis engine
//!
//! Computation core for satellite-driven crop monitoring: spectral index
//! calculation, crop health classification, per-plot time-series analysis,
//! and sustainability estimation. The engine is synchronous and holds no
//! state beyond the per-plot time-series store; the surrounding application
//! (dashboard, exporters, satellite client) calls in with numeric inputs
//! and renders the results.

pub mod config;
pub mod error;
pub mod services;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use services::{
    HealthClassifier, IndexCalculator, SustainabilityEstimator, TimeSeriesAnalyzer,
};

/// All analysis services wired from one configuration
#[derive(Debug)]
pub struct Engine {
    pub indices: IndexCalculator,
    pub classifier: HealthClassifier,
    pub timeseries: TimeSeriesAnalyzer,
    pub sustainability: SustainabilityEstimator,
}

impl Engine {
    /// Build every service from a loaded configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            indices: IndexCalculator::new(config.index),
            classifier: HealthClassifier::new(config.classification),
            timeseries: TimeSeriesAnalyzer::new(config.timeseries),
            sustainability: SustainabilityEstimator::new(config.sustainability),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
