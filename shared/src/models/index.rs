//! Spectral index models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::band::SpectralBand;

/// Supported spectral indices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Normalized Difference Vegetation Index
    Ndvi,
    /// Normalized Difference Water Index (McFeeters)
    Ndwi,
    /// Soil Adjusted Vegetation Index
    Savi,
    /// Enhanced Vegetation Index
    Evi,
}

impl IndexKind {
    /// Bands a sample must carry for this index to be computable
    pub fn required_bands(&self) -> &'static [SpectralBand] {
        match self {
            IndexKind::Ndvi => &[SpectralBand::B08, SpectralBand::B04],
            IndexKind::Ndwi => &[SpectralBand::B03, SpectralBand::B08],
            IndexKind::Savi => &[SpectralBand::B08, SpectralBand::B04],
            IndexKind::Evi => &[SpectralBand::B08, SpectralBand::B04, SpectralBand::B02],
        }
    }

    /// Numeric range the index value is clamped to
    pub fn value_range(&self) -> (f64, f64) {
        match self {
            IndexKind::Ndvi | IndexKind::Ndwi | IndexKind::Savi => (-1.0, 1.0),
            IndexKind::Evi => (-1.0, 3.0),
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Ndvi => write!(f, "NDVI"),
            IndexKind::Ndwi => write!(f, "NDWI"),
            IndexKind::Savi => write!(f, "SAVI"),
            IndexKind::Evi => write!(f, "EVI"),
        }
    }
}

/// A computed index value for one sample.
///
/// Never mutated after creation; classification and trend results are
/// derived from it on demand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IndexValue {
    pub kind: IndexKind,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// True when the value was clamped to its range or the denominator
    /// collapsed to (near) zero
    pub saturated: bool,
}
