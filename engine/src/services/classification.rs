//! Threshold-based crop health classification service

use shared::{
    classify_health, ClassificationResult, CropProfile, HealthCategory, HealthThresholds,
    IndexKind, IndexValue,
};

use crate::config::ClassificationConfig;
use crate::error::{EngineError, EngineResult};

/// Classifies index values against crop-specific or global thresholds
#[derive(Debug, Clone)]
pub struct HealthClassifier {
    config: ClassificationConfig,
}

impl HealthClassifier {
    /// Create a new HealthClassifier instance
    pub fn new(config: ClassificationConfig) -> Self {
        Self { config }
    }

    /// Classify one index value against a crop profile.
    ///
    /// Boundary values belong to the healthier band. The result is derived
    /// and recomputed on demand; the IndexValue stays authoritative.
    pub fn classify(
        &self,
        index: &IndexValue,
        profile: &CropProfile,
    ) -> EngineResult<ClassificationResult> {
        let thresholds = self.resolve_thresholds(profile, index.kind)?;
        let category = classify_health(index.value, &thresholds);

        if category == HealthCategory::Critical {
            tracing::warn!(
                "{} {:.3} classified Critical for {}",
                index.kind,
                index.value,
                profile.crop
            );
        }

        Ok(ClassificationResult {
            kind: index.kind,
            value: index.value,
            category,
            crop: profile.crop.clone(),
        })
    }

    /// Resolve the classification band for a crop/index combination.
    ///
    /// The crop's optimal range supplies the healthy cut (its lower bound);
    /// the attention floor comes from the global default band when one is
    /// configured, otherwise it sits attention_band_width below the cut.
    /// Without a crop range the global band applies as-is; absence of both
    /// is an error.
    pub fn resolve_thresholds(
        &self,
        profile: &CropProfile,
        kind: IndexKind,
    ) -> EngineResult<HealthThresholds> {
        let global = self.config.default_band(kind);

        if let Some(range) = profile.range_for(kind) {
            let attention_min = global
                .map(|band| band.attention_min)
                .unwrap_or(range.min - self.config.attention_band_width)
                // The floor never rises above the crop's own healthy cut
                .min(range.min);
            return Ok(HealthThresholds::new(range.min, attention_min));
        }

        global
            .copied()
            .ok_or_else(|| EngineError::NoThreshold {
                crop: profile.crop.clone(),
                kind,
            })
    }
}
