//! Sustainability and resource-savings models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Irrigation methods in use on Egyptian farms
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationMethod {
    /// Most efficient
    Drip,
    /// Center pivot
    Pivot,
    /// Traditional
    Flood,
}

impl IrrigationMethod {
    /// Fraction of delivered water that reaches the crop
    pub fn efficiency(&self) -> Decimal {
        match self {
            IrrigationMethod::Drip => Decimal::new(95, 2),
            IrrigationMethod::Pivot => Decimal::new(85, 2),
            IrrigationMethod::Flood => Decimal::new(60, 2),
        }
    }
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrrigationMethod::Drip => write!(f, "Drip"),
            IrrigationMethod::Pivot => write!(f, "Pivot"),
            IrrigationMethod::Flood => write!(f, "Flood"),
        }
    }
}

/// Seasonal resource-savings estimate for one plot.
///
/// A pure function output; recomputed per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SustainabilityReport {
    pub water_savings_m3: Decimal,
    pub carbon_saved_tonnes: Decimal,
    pub cost_savings_egp: Decimal,
}
