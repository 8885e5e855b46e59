//! In-memory collaborators for local development and testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{BuildingLookup, ReadinessCheck, SolarResult};
use crate::models::{BuildingInsights, Coordinates, LatLng, SolarPotential};

/// Coordinates are matched after rounding to five decimals (about a metre).
const KEY_SCALE: f64 = 100_000.0;

type CoordinateKey = (i64, i64);

fn key_for(coordinates: Coordinates) -> CoordinateKey {
    (
        (coordinates.latitude * KEY_SCALE).round() as i64,
        (coordinates.longitude * KEY_SCALE).round() as i64,
    )
}

/// Record served by the local backend for any location.
pub fn sample_building() -> BuildingInsights {
    BuildingInsights {
        name: Some("buildings/local-sample".to_string()),
        center: Some(LatLng {
            latitude: Some(37.4449439),
            longitude: Some(-122.1391466),
        }),
        imagery_quality: Some("HIGH".to_string()),
        solar_potential: Some(SolarPotential {
            max_array_area_meters2: Some(1903.5983),
            max_sunshine_hours_per_year: Some(1802.0),
            max_array_panels_count: Some(1163),
            carbon_offset_factor_kg_per_mwh: Some(428.9201),
        }),
    }
}

/// Building lookup backed by a fixed table of records.
///
/// Locations that are not in the table resolve to the default record, or to
/// `None` (unsupported) when no default is set.
#[derive(Default)]
pub struct StaticBuildingLookup {
    buildings: RwLock<HashMap<CoordinateKey, BuildingInsights>>,
    fallback: Option<BuildingInsights>,
    calls: AtomicUsize,
}

impl StaticBuildingLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_building(self, coordinates: Coordinates, building: BuildingInsights) -> Self {
        self.insert(coordinates, building);
        self
    }

    pub fn with_fallback(mut self, building: BuildingInsights) -> Self {
        self.fallback = Some(building);
        self
    }

    pub fn insert(&self, coordinates: Coordinates, building: BuildingInsights) {
        self.buildings.write().insert(key_for(coordinates), building);
    }

    /// Number of lookups served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BuildingLookup for StaticBuildingLookup {
    async fn find_building(
        &self,
        coordinates: Coordinates,
        _api_key: &str,
    ) -> SolarResult<Option<BuildingInsights>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let found = self.buildings.read().get(&key_for(coordinates)).cloned();
        Ok(found.or_else(|| self.fallback.clone()))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Readiness check that resolves immediately.
#[derive(Default)]
pub struct ImmediateReadiness {
    calls: AtomicUsize,
}

impl ImmediateReadiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessCheck for ImmediateReadiness {
    async fn wait_until_ready(&self, _center: Coordinates, _api_key: &str) -> SolarResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
