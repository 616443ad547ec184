//! Error handling for the Farmsight analysis engine
//!
//! Every error surfaces at the point of detection; computations are
//! deterministic so nothing is retried inside the engine. The presentation
//! layer decides user-facing messaging.

use chrono::{DateTime, Utc};
use shared::{CropKind, IndexKind, SpectralBand};
use thiserror::Error;

/// Analysis engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required spectral band is absent from the sample. The engine
    /// performs no imputation; callers must supply complete samples.
    #[error("required band {band} ({description}) missing from sample")]
    MissingBand {
        band: SpectralBand,
        description: &'static str,
    },

    /// Neither the crop profile nor the global defaults carry a
    /// classification band for this index.
    #[error("no classification thresholds for {crop} / {kind}")]
    NoThreshold { crop: CropKind, kind: IndexKind },

    /// Time-series append would violate the strict monotonic timestamp
    /// invariant. Callers must not replay or backfill.
    #[error("out-of-order append: {attempted} is not after last stored {last}")]
    OutOfOrder {
        last: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },

    /// Non-physical magnitudes (negative area, mismatched index kind, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration failed to load or parse
    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl EngineError {
    pub(crate) fn missing_band(band: SpectralBand) -> Self {
        EngineError::MissingBand {
            band,
            description: band.description(),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
