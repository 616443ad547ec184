//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Scaling convention a band sample was captured in.
///
/// Sentinel-2 L2A products ship reflectance as digital numbers in 0-10000;
/// preprocessed samples may already be surface reflectance in 0-1. The
/// engine normalizes everything to 0-1 before computing indices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReflectanceScale {
    /// Surface reflectance in [0, 1]
    #[default]
    Unit,
    /// Digital numbers in [0, 10000]
    DigitalNumber,
}

impl ReflectanceScale {
    /// Divisor that maps a raw reading onto [0, 1]
    pub fn divisor(&self) -> f64 {
        match self {
            ReflectanceScale::Unit => 1.0,
            ReflectanceScale::DigitalNumber => 10_000.0,
        }
    }

    /// Upper bound a raw reading may take under this convention
    pub fn ceiling(&self) -> f64 {
        match self {
            ReflectanceScale::Unit => 1.0,
            ReflectanceScale::DigitalNumber => 10_000.0,
        }
    }
}

/// Date range for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}
