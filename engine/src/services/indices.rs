//! Spectral index computation service
//!
//! Pure functions mapping band samples to normalized difference indices.
//! Readings are normalized to [0, 1] surface reflectance before any math,
//! so samples in digital numbers (0-10000) and unit reflectance agree.

use shared::{BandSample, IndexKind, IndexValue, SpectralBand};

use crate::config::IndexConfig;
use crate::error::{EngineError, EngineResult};

/// Computes spectral indices from band samples
#[derive(Debug, Clone)]
pub struct IndexCalculator {
    config: IndexConfig,
}

impl IndexCalculator {
    /// Create a new IndexCalculator instance
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Compute one index for one sample.
    ///
    /// A denominator within epsilon of zero yields 0.0 (sensor saturation
    /// or no-data, not a fault). Values outside the index's range are
    /// clamped; both events set the `saturated` flag on the result.
    pub fn compute(&self, kind: IndexKind, sample: &BandSample) -> EngineResult<IndexValue> {
        let (raw, collapsed) = match kind {
            IndexKind::Ndvi => {
                let nir = self.reflectance(sample, SpectralBand::B08)?;
                let red = self.reflectance(sample, SpectralBand::B04)?;
                self.normalized_difference(nir, red)
            }
            IndexKind::Ndwi => {
                let green = self.reflectance(sample, SpectralBand::B03)?;
                let nir = self.reflectance(sample, SpectralBand::B08)?;
                self.normalized_difference(green, nir)
            }
            IndexKind::Savi => {
                let nir = self.reflectance(sample, SpectralBand::B08)?;
                let red = self.reflectance(sample, SpectralBand::B04)?;
                let l = self.config.savi_l;
                let denom = nir + red + l;
                if denom.abs() < self.config.epsilon {
                    (0.0, true)
                } else {
                    (((nir - red) / denom) * (1.0 + l), false)
                }
            }
            IndexKind::Evi => {
                let nir = self.reflectance(sample, SpectralBand::B08)?;
                let red = self.reflectance(sample, SpectralBand::B04)?;
                let blue = self.reflectance(sample, SpectralBand::B02)?;
                let denom =
                    nir + self.config.evi_c1 * red - self.config.evi_c2 * blue + self.config.evi_l;
                if denom.abs() < self.config.epsilon {
                    (0.0, true)
                } else {
                    (self.config.evi_gain * (nir - red) / denom, false)
                }
            }
        };

        let (lo, hi) = kind.value_range();
        let value = raw.clamp(lo, hi);
        let saturated = collapsed || value != raw;

        tracing::debug!("Computed {} = {:.4} (saturated: {})", kind, value, saturated);

        Ok(IndexValue {
            kind,
            value,
            timestamp: sample.timestamp,
            saturated,
        })
    }

    /// Normalized reading for a band, erroring on absence
    fn reflectance(&self, sample: &BandSample, band: SpectralBand) -> EngineResult<f64> {
        sample
            .reflectance(band)
            .ok_or_else(|| EngineError::missing_band(band))
    }

    /// (a - b) / (a + b), guarding the collapsed-denominator case
    fn normalized_difference(&self, a: f64, b: f64) -> (f64, bool) {
        let sum = a + b;
        if sum.abs() < self.config.epsilon {
            (0.0, true)
        } else {
            ((a - b) / sum, false)
        }
    }
}
