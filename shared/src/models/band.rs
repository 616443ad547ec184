//! Spectral band models

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ReflectanceScale;

/// Sentinel-2 spectral bands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpectralBand {
    B01,
    B02,
    B03,
    B04,
    B05,
    B06,
    B07,
    B08,
    B8A,
    B11,
    B12,
}

impl SpectralBand {
    /// Human-readable channel description
    pub fn description(&self) -> &'static str {
        match self {
            SpectralBand::B01 => "Coastal aerosol",
            SpectralBand::B02 => "Blue",
            SpectralBand::B03 => "Green",
            SpectralBand::B04 => "Red",
            SpectralBand::B05 => "Vegetation red edge",
            SpectralBand::B06 => "Vegetation red edge",
            SpectralBand::B07 => "Vegetation red edge",
            SpectralBand::B08 => "NIR",
            SpectralBand::B8A => "Narrow NIR",
            SpectralBand::B11 => "SWIR",
            SpectralBand::B12 => "SWIR",
        }
    }
}

impl std::fmt::Display for SpectralBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectralBand::B01 => write!(f, "B01"),
            SpectralBand::B02 => write!(f, "B02"),
            SpectralBand::B03 => write!(f, "B03"),
            SpectralBand::B04 => write!(f, "B04"),
            SpectralBand::B05 => write!(f, "B05"),
            SpectralBand::B06 => write!(f, "B06"),
            SpectralBand::B07 => write!(f, "B07"),
            SpectralBand::B08 => write!(f, "B08"),
            SpectralBand::B8A => write!(f, "B8A"),
            SpectralBand::B11 => write!(f, "B11"),
            SpectralBand::B12 => write!(f, "B12"),
        }
    }
}

/// Reflectance readings for one pixel or pixel-aggregate at one instant.
///
/// Immutable once captured; the engine reads it, never writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandSample {
    pub timestamp: DateTime<Utc>,
    pub scale: ReflectanceScale,
    pub readings: HashMap<SpectralBand, f64>,
}

impl BandSample {
    pub fn new(
        timestamp: DateTime<Utc>,
        scale: ReflectanceScale,
        readings: HashMap<SpectralBand, f64>,
    ) -> Self {
        Self {
            timestamp,
            scale,
            readings,
        }
    }

    /// Raw reading for a band, if present
    pub fn reading(&self, band: SpectralBand) -> Option<f64> {
        self.readings.get(&band).copied()
    }

    /// Reading normalized to [0, 1] surface reflectance
    pub fn reflectance(&self, band: SpectralBand) -> Option<f64> {
        self.reading(band).map(|v| v / self.scale.divisor())
    }
}
