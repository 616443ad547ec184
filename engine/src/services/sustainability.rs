//! Sustainability and resource-savings estimation service
//!
//! Deterministic pure functions of farm size, irrigation practice, and the
//! trailing classification history. Money and volumes are Decimal; nothing
//! here touches the spectral float math.

use rust_decimal::Decimal;

use shared::{ClassificationResult, FarmPlot, HealthCategory, IrrigationMethod, SustainabilityReport};

use crate::config::SustainabilityConfig;
use crate::error::{EngineError, EngineResult};

/// Derives seasonal water, carbon, and cost savings for a plot
#[derive(Debug, Clone)]
pub struct SustainabilityEstimator {
    config: SustainabilityConfig,
}

impl SustainabilityEstimator {
    /// Create a new SustainabilityEstimator instance
    pub fn new(config: SustainabilityConfig) -> Self {
        Self { config }
    }

    /// Estimate seasonal savings for a farm.
    ///
    /// Water savings compare the practice's efficiency against the
    /// configured baseline and never go negative. The carbon term scales
    /// with the share of Healthy classifications in the supplied history;
    /// an empty history earns no carbon credit.
    pub fn estimate(
        &self,
        area_feddan: Decimal,
        irrigation: IrrigationMethod,
        history: &[ClassificationResult],
    ) -> EngineResult<SustainabilityReport> {
        if area_feddan <= Decimal::ZERO {
            return Err(EngineError::InvalidInput(format!(
                "farm area must be positive, got {} feddan",
                area_feddan
            )));
        }

        let efficiency_gain =
            irrigation.efficiency() - self.config.baseline_irrigation.efficiency();
        let water_savings_m3 = (area_feddan
            * self.config.baseline_water_use_m3_per_feddan
            * efficiency_gain)
            .max(Decimal::ZERO);

        let adoption = adoption_factor(history);
        let carbon_saved_tonnes =
            area_feddan * self.config.sequestration_rate_t_per_feddan * adoption;

        let cost_savings_egp = water_savings_m3 * self.config.water_cost_egp_per_m3
            + carbon_saved_tonnes * self.config.co2_price_egp_per_tonne;

        tracing::debug!(
            "Estimated savings for {} feddan on {}: {} m3 water, {} t CO2",
            area_feddan,
            irrigation,
            water_savings_m3,
            carbon_saved_tonnes
        );

        Ok(SustainabilityReport {
            water_savings_m3,
            carbon_saved_tonnes,
            cost_savings_egp,
        })
    }

    /// Convenience wrapper taking the plot's own area and practice
    pub fn estimate_for_plot(
        &self,
        plot: &FarmPlot,
        history: &[ClassificationResult],
    ) -> EngineResult<SustainabilityReport> {
        self.estimate(plot.area_feddan, plot.irrigation, history)
    }
}

/// Share of the trailing season spent in the Healthy band
fn adoption_factor(history: &[ClassificationResult]) -> Decimal {
    if history.is_empty() {
        return Decimal::ZERO;
    }
    let healthy = history
        .iter()
        .filter(|c| c.category == HealthCategory::Healthy)
        .count();
    Decimal::from(healthy) / Decimal::from(history.len())
}
