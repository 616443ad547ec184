//! Analysis services for the Farmsight platform

pub mod classification;
pub mod indices;
pub mod sustainability;
pub mod timeseries;

pub use classification::HealthClassifier;
pub use indices::IndexCalculator;
pub use sustainability::SustainabilityEstimator;
pub use timeseries::TimeSeriesAnalyzer;
