//! Farm plot models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

use super::crop::CropKind;
use super::sustainability::IrrigationMethod;

/// A monitored plot within a farm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmPlot {
    pub id: Uuid,
    pub name: String,
    pub coordinates: Option<GpsCoordinates>,
    /// Area in feddan (Egyptian unit: 1 feddan = 4,200 m²)
    pub area_feddan: Decimal,
    pub crop: CropKind,
    pub irrigation: IrrigationMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
