//! Tests for engine configuration loading and defaults

use rust_decimal::Decimal;

use farmsight_engine::config::EngineConfig;
use farmsight_engine::Engine;
use shared::{IndexKind, IrrigationMethod};

#[test]
fn defaults_produce_a_working_engine() {
    let config = EngineConfig::default();

    assert_eq!(config.environment, "development");
    assert_eq!(config.index.savi_l, 0.5);
    assert_eq!(config.index.evi_gain, 2.5);
    assert_eq!(config.timeseries.trend_window, 30);
    assert_eq!(config.timeseries.anomaly_window, 7);
    assert_eq!(config.timeseries.anomaly_threshold, 0.15);
    assert_eq!(
        config.sustainability.baseline_irrigation,
        IrrigationMethod::Flood
    );
    assert_eq!(
        config.sustainability.co2_price_egp_per_tonne,
        Decimal::from(25)
    );

    let _ = Engine::new(config);
}

#[test]
fn default_bands_cover_all_indices() {
    let config = EngineConfig::default();

    for kind in [
        IndexKind::Ndvi,
        IndexKind::Ndwi,
        IndexKind::Savi,
        IndexKind::Evi,
    ] {
        assert!(
            config.classification.default_band(kind).is_some(),
            "missing default band for {kind}"
        );
    }

    let ndvi = config.classification.default_band(IndexKind::Ndvi).unwrap();
    assert_eq!(ndvi.healthy_min, 0.6);
    assert_eq!(ndvi.attention_min, 0.3);

    let ndwi = config.classification.default_band(IndexKind::Ndwi).unwrap();
    assert_eq!(ndwi.healthy_min, -0.2);
    assert_eq!(ndwi.attention_min, -0.4);
}

#[test]
fn environment_variables_override_defaults() {
    // Own test binary, so no parallel test observes the variable
    std::env::set_var("FARMSIGHT__TIMESERIES__ANOMALY_WINDOW", "5");
    std::env::set_var("FARMSIGHT__INDEX__SAVI_L", "0.25");

    let config = EngineConfig::load().expect("load with overrides");

    std::env::remove_var("FARMSIGHT__TIMESERIES__ANOMALY_WINDOW");
    std::env::remove_var("FARMSIGHT__INDEX__SAVI_L");

    assert_eq!(config.timeseries.anomaly_window, 5);
    assert_eq!(config.index.savi_l, 0.25);
    // Untouched sections keep their defaults
    assert_eq!(config.timeseries.trend_window, 30);
}
