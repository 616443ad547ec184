//! Crop profile models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::index::IndexKind;

/// Crops grown in the Nile delta and desert reclamation farms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CropKind {
    Wheat,
    Citrus,
    Tomato,
    Corn,
    /// Custom crop with name
    Custom(String),
}

impl std::fmt::Display for CropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropKind::Wheat => write!(f, "Wheat"),
            CropKind::Citrus => write!(f, "Citrus"),
            CropKind::Tomato => write!(f, "Tomato"),
            CropKind::Corn => write!(f, "Corn"),
            CropKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Closed interval an index value should sit in for a thriving crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IndexRange {
    pub min: f64,
    pub max: f64,
}

impl IndexRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Agronomic configuration for one crop.
///
/// Loaded once and read-only for the life of an analysis session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub crop: CropKind,
    /// Optimal index intervals; the lower bound doubles as the healthy
    /// classification cut for that index
    pub optimal_index_ranges: HashMap<IndexKind, IndexRange>,
    /// (min, max) days from planting to harvest
    pub growing_season_days: (u16, u16),
    pub irrigation_interval_days: u16,
    pub fertilizer_schedule: Vec<String>,
    pub pest_risks: Vec<String>,
}

impl CropProfile {
    /// Built-in profile for a known crop, None for custom crops
    pub fn builtin(crop: &CropKind) -> Option<Self> {
        let profile = match crop {
            CropKind::Wheat => Self {
                crop: CropKind::Wheat,
                optimal_index_ranges: HashMap::from([
                    (IndexKind::Ndvi, IndexRange::new(0.5, 0.8)),
                    (IndexKind::Ndwi, IndexRange::new(-0.1, 0.2)),
                ]),
                growing_season_days: (90, 150),
                irrigation_interval_days: 10,
                fertilizer_schedule: vec![
                    "Planting".to_string(),
                    "Tillering".to_string(),
                    "Boot".to_string(),
                    "Grain Fill".to_string(),
                ],
                pest_risks: vec![
                    "Aphids".to_string(),
                    "Hessian Flies".to_string(),
                    "Armyworms".to_string(),
                ],
            },
            CropKind::Citrus => Self {
                crop: CropKind::Citrus,
                optimal_index_ranges: HashMap::from([
                    (IndexKind::Ndvi, IndexRange::new(0.6, 0.75)),
                    (IndexKind::Ndwi, IndexRange::new(0.0, 0.3)),
                ]),
                // Perennial
                growing_season_days: (365, 365),
                irrigation_interval_days: 7,
                fertilizer_schedule: vec![
                    "Spring Growth".to_string(),
                    "Flowering".to_string(),
                    "Fruit Dev".to_string(),
                    "Pre-Harvest".to_string(),
                ],
                pest_risks: vec![
                    "Scale Insects".to_string(),
                    "Whiteflies".to_string(),
                    "Citrus Leaf Miners".to_string(),
                ],
            },
            CropKind::Tomato => Self {
                crop: CropKind::Tomato,
                optimal_index_ranges: HashMap::from([
                    (IndexKind::Ndvi, IndexRange::new(0.55, 0.75)),
                    (IndexKind::Ndwi, IndexRange::new(-0.1, 0.2)),
                ]),
                growing_season_days: (60, 90),
                irrigation_interval_days: 3,
                fertilizer_schedule: vec![
                    "Flowering".to_string(),
                    "Fruit Set".to_string(),
                    "Fruit Dev".to_string(),
                    "Ripening".to_string(),
                ],
                pest_risks: vec![
                    "Whiteflies".to_string(),
                    "Spider Mites".to_string(),
                    "Tomato Hornworms".to_string(),
                    "Fusarium Wilt".to_string(),
                ],
            },
            CropKind::Corn => Self {
                crop: CropKind::Corn,
                optimal_index_ranges: HashMap::from([
                    (IndexKind::Ndvi, IndexRange::new(0.6, 0.85)),
                    (IndexKind::Ndwi, IndexRange::new(-0.05, 0.25)),
                ]),
                growing_season_days: (110, 140),
                irrigation_interval_days: 8,
                fertilizer_schedule: vec![
                    "V4 Stage".to_string(),
                    "V12 Stage".to_string(),
                    "Tasseling".to_string(),
                    "Silking".to_string(),
                ],
                pest_risks: vec![
                    "European Corn Borers".to_string(),
                    "Armyworms".to_string(),
                    "Cutworms".to_string(),
                ],
            },
            CropKind::Custom(_) => return None,
        };
        Some(profile)
    }

    /// Optimal range for an index, if this crop defines one
    pub fn range_for(&self, kind: IndexKind) -> Option<&IndexRange> {
        self.optimal_index_ranges.get(&kind)
    }
}
