//! Configuration management for the Farmsight analysis engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code (the engine works with no files present)
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FARMSIGHT_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{HealthThresholds, IndexKind, IrrigationMethod};

/// Main engine configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    /// Current environment (development, production)
    pub environment: String,

    /// Index computation constants
    pub index: IndexConfig,

    /// Classification threshold defaults
    pub classification: ClassificationConfig,

    /// Time-series analysis windows
    pub timeseries: TimeSeriesConfig,

    /// Sustainability estimation constants
    pub sustainability: SustainabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IndexConfig {
    /// Soil brightness correction factor for SAVI
    pub savi_l: f64,

    /// EVI gain factor
    pub evi_gain: f64,

    /// EVI aerosol coefficient for the red band
    pub evi_c1: f64,

    /// EVI aerosol coefficient for the blue band
    pub evi_c2: f64,

    /// EVI canopy background adjustment
    pub evi_l: f64,

    /// Denominators with magnitude below this are treated as collapsed
    pub epsilon: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            savi_l: 0.5,
            evi_gain: 2.5,
            evi_c1: 6.0,
            evi_c2: 7.5,
            evi_l: 1.0,
            epsilon: 1e-6,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Global default band per index, used when a crop profile carries no
    /// range for it. None removes the fallback for that index.
    pub ndvi: Option<HealthThresholds>,
    pub ndwi: Option<HealthThresholds>,
    pub savi: Option<HealthThresholds>,
    pub evi: Option<HealthThresholds>,

    /// Width of the attention band below a crop's healthy cut when no
    /// global default supplies an attention floor
    pub attention_band_width: f64,
}

impl ClassificationConfig {
    /// Global default band for an index, if configured
    pub fn default_band(&self, kind: IndexKind) -> Option<&HealthThresholds> {
        match kind {
            IndexKind::Ndvi => self.ndvi.as_ref(),
            IndexKind::Ndwi => self.ndwi.as_ref(),
            IndexKind::Savi => self.savi.as_ref(),
            IndexKind::Evi => self.evi.as_ref(),
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            ndvi: Some(HealthThresholds::new(0.6, 0.3)),
            ndwi: Some(HealthThresholds::new(-0.2, -0.4)),
            savi: Some(HealthThresholds::new(0.5, 0.25)),
            evi: Some(HealthThresholds::new(0.4, 0.2)),
            attention_band_width: 0.3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimeSeriesConfig {
    /// Trailing sample count for trend estimation
    pub trend_window: usize,

    /// Moving-average window for anomaly detection
    pub anomaly_window: usize,

    /// Relative deviation from the moving average that flags a point
    pub anomaly_threshold: f64,

    /// Slopes with magnitude below this (per day) count as stable
    pub stable_slope_per_day: f64,
}

impl Default for TimeSeriesConfig {
    fn default() -> Self {
        Self {
            trend_window: 30,
            anomaly_window: 7,
            anomaly_threshold: 0.15,
            stable_slope_per_day: 0.001,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SustainabilityConfig {
    /// Seasonal water delivered per feddan under the baseline practice
    pub baseline_water_use_m3_per_feddan: Decimal,

    /// Practice savings are measured against this method
    pub baseline_irrigation: IrrigationMethod,

    /// Irrigation water price
    pub water_cost_egp_per_m3: Decimal,

    /// CO2 sequestered per feddan per season under full adoption
    pub sequestration_rate_t_per_feddan: Decimal,

    /// Carbon credit price
    pub co2_price_egp_per_tonne: Decimal,
}

impl Default for SustainabilityConfig {
    fn default() -> Self {
        Self {
            baseline_water_use_m3_per_feddan: Decimal::from(4_000),
            baseline_irrigation: IrrigationMethod::Flood,
            water_cost_egp_per_m3: Decimal::new(5, 1),
            sequestration_rate_t_per_feddan: Decimal::new(5, 1),
            co2_price_egp_per_tonne: Decimal::from(25),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            index: IndexConfig::default(),
            classification: ClassificationConfig::default(),
            timeseries: TimeSeriesConfig::default(),
            sustainability: SustainabilityConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var("FARMSIGHT_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            .set_default("environment", environment.clone())?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARMSIGHT_ prefix)
            .add_source(
                Environment::with_prefix("FARMSIGHT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
