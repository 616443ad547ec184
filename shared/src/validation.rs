//! Validation utilities for the Farmsight crop monitoring platform
//!
//! Includes Egypt-specific checks for plot locations and farm sizes.

use rust_decimal::Decimal;

use crate::models::{BandSample, HealthThresholds, IndexKind, IndexRange};
use crate::types::GpsCoordinates;

// ============================================================================
// Spectral Data Validations
// ============================================================================

/// Validate a single reflectance reading against its scale convention
pub fn validate_reflectance(value: f64, ceiling: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Reflectance must be a finite number");
    }
    if value < 0.0 {
        return Err("Reflectance cannot be negative");
    }
    if value > ceiling {
        return Err("Reflectance exceeds the ceiling of its scale convention");
    }
    Ok(())
}

/// Validate every reading in a band sample
pub fn validate_band_sample(sample: &BandSample) -> Result<(), &'static str> {
    if sample.readings.is_empty() {
        return Err("Band sample carries no readings");
    }
    let ceiling = sample.scale.ceiling();
    for value in sample.readings.values() {
        validate_reflectance(*value, ceiling)?;
    }
    Ok(())
}

/// Validate a classification band (attention floor below healthy cut)
pub fn validate_thresholds(thresholds: &HealthThresholds) -> Result<(), &'static str> {
    if !thresholds.healthy_min.is_finite() || !thresholds.attention_min.is_finite() {
        return Err("Thresholds must be finite numbers");
    }
    if thresholds.attention_min > thresholds.healthy_min {
        return Err("Attention floor must not exceed the healthy cut");
    }
    Ok(())
}

/// Validate an optimal index range against the index's numeric domain
pub fn validate_index_range(kind: IndexKind, range: &IndexRange) -> Result<(), &'static str> {
    if range.min > range.max {
        return Err("Range minimum exceeds maximum");
    }
    let (lo, hi) = kind.value_range();
    if range.min < lo || range.max > hi {
        return Err("Range exceeds the index value domain");
    }
    Ok(())
}

// ============================================================================
// Farm Validations
// ============================================================================

/// Validate a farm area in feddan (positive, below desert-scale outliers)
pub fn validate_farm_area(area_feddan: Decimal) -> Result<(), &'static str> {
    if area_feddan <= Decimal::ZERO {
        return Err("Farm area must be positive");
    }
    if area_feddan > Decimal::from(100_000) {
        return Err("Farm area exceeds plausible maximum");
    }
    Ok(())
}

// ============================================================================
// Egypt-Specific Validations
// ============================================================================

/// Egypt bounding box: 22.0-32.0 N, 25.0-37.0 E
pub fn is_in_egypt(coords: &GpsCoordinates) -> bool {
    coords.latitude >= Decimal::from(22)
        && coords.latitude <= Decimal::from(32)
        && coords.longitude >= Decimal::from(25)
        && coords.longitude <= Decimal::from(37)
}

/// Validate plot coordinates fall inside Egypt
pub fn validate_egypt_coordinates(coords: &GpsCoordinates) -> Result<(), &'static str> {
    if is_in_egypt(coords) {
        Ok(())
    } else {
        Err("Coordinates are outside Egypt")
    }
}
