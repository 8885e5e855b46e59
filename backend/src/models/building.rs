//! Building insights returned by the rooftop lookup service.
//!
//! The wire types mirror the service's camelCase JSON and keep every field
//! optional. [`RooftopMetrics`] is the single place where missing values are
//! replaced by zero before anything is derived from them.

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Square feet per square metre, as used on the results page.
pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.764;

/// Position reported for the building centre. Either component may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Subset of the solar potential block the proposal page reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarPotential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_array_area_meters2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sunshine_hours_per_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_array_panels_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_offset_factor_kg_per_mwh: Option<f64>,
}

/// Building record for the closest building to the requested point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInsights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagery_quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solar_potential: Option<SolarPotential>,
}

/// Building insights with every missing field defaulted to zero.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RooftopMetrics {
    pub max_array_area_m2: f64,
    pub max_sunshine_hours_per_year: f64,
    pub center: Coordinates,
}

impl RooftopMetrics {
    /// Usable array area in square feet, rounded to the nearest integer.
    pub fn square_feet(&self) -> i64 {
        round_to_i64(self.max_array_area_m2 * SQUARE_FEET_PER_SQUARE_METER)
    }

    /// Annual sunshine hours, rounded to the nearest integer.
    pub fn sunshine_hours(&self) -> i64 {
        round_to_i64(self.max_sunshine_hours_per_year)
    }
}

impl From<&BuildingInsights> for RooftopMetrics {
    fn from(building: &BuildingInsights) -> Self {
        let potential = building.solar_potential.as_ref();
        let center = building.center.as_ref();
        Self {
            max_array_area_m2: potential
                .and_then(|p| p.max_array_area_meters2)
                .unwrap_or(0.0),
            max_sunshine_hours_per_year: potential
                .and_then(|p| p.max_sunshine_hours_per_year)
                .unwrap_or(0.0),
            center: Coordinates::new(
                center.and_then(|c| c.latitude).unwrap_or(0.0),
                center.and_then(|c| c.longitude).unwrap_or(0.0),
            ),
        }
    }
}

// NaN saturates to 0 under `as`.
fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}
