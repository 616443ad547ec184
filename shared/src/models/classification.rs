//! Crop health classification models

use serde::{Deserialize, Serialize};

use super::crop::CropKind;
use super::index::IndexKind;

/// Health category for a classified index value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    /// value >= healthy_min
    Healthy,
    /// attention_min <= value < healthy_min
    NeedsAttention,
    /// value < attention_min
    Critical,
}

impl std::fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthCategory::Healthy => write!(f, "Healthy"),
            HealthCategory::NeedsAttention => write!(f, "Needs Attention"),
            HealthCategory::Critical => write!(f, "Critical"),
        }
    }
}

/// Two-tier classification band for one index.
///
/// Invariant: attention_min <= healthy_min.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HealthThresholds {
    pub healthy_min: f64,
    pub attention_min: f64,
}

impl HealthThresholds {
    pub fn new(healthy_min: f64, attention_min: f64) -> Self {
        Self {
            healthy_min,
            attention_min,
        }
    }
}

/// Classification of one index value against a crop profile.
///
/// Derived and recomputed on demand; the IndexValue stays authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub kind: IndexKind,
    pub value: f64,
    pub category: HealthCategory,
    pub crop: CropKind,
}

/// Classify an index value against a threshold band.
///
/// Boundary values belong to the healthier band.
pub fn classify_health(value: f64, thresholds: &HealthThresholds) -> HealthCategory {
    if value >= thresholds.healthy_min {
        HealthCategory::Healthy
    } else if value >= thresholds.attention_min {
        HealthCategory::NeedsAttention
    } else {
        HealthCategory::Critical
    }
}
