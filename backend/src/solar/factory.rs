//! Factory wiring the configured solar collaborators.

use std::sync::Arc;

use log::info;

use super::config::{SolarBackend, SolarConfig};
use super::error::SolarResult;
use super::local::{sample_building, ImmediateReadiness, StaticBuildingLookup};
use super::{BuildingLookup, ReadinessCheck};

/// Lookup and readiness implementations chosen together.
pub struct SolarCollaborators {
    pub lookup: Arc<dyn BuildingLookup>,
    pub readiness: Arc<dyn ReadinessCheck>,
}

pub struct SolarClientFactory;

impl SolarClientFactory {
    /// Build the collaborators selected by `config.backend`.
    pub fn create(config: &SolarConfig) -> SolarResult<SolarCollaborators> {
        match config.backend {
            SolarBackend::Google => Self::create_google(config),
            SolarBackend::Local => Ok(Self::create_local()),
        }
    }

    /// In-memory collaborators that answer every location with a sample building.
    pub fn create_local() -> SolarCollaborators {
        info!("Using local solar fixtures");
        SolarCollaborators {
            lookup: Arc::new(StaticBuildingLookup::new().with_fallback(sample_building())),
            readiness: Arc::new(ImmediateReadiness::new()),
        }
    }

    #[cfg(feature = "google-solar")]
    fn create_google(config: &SolarConfig) -> SolarResult<SolarCollaborators> {
        let lookup = super::google::GoogleSolarClient::new(config)?;
        let readiness = super::readiness::ImageryReadinessProbe::new(config)?;
        info!("Using Google Solar API at {}", lookup.endpoint());
        Ok(SolarCollaborators {
            lookup: Arc::new(lookup),
            readiness: Arc::new(readiness),
        })
    }

    #[cfg(not(feature = "google-solar"))]
    fn create_google(_config: &SolarConfig) -> SolarResult<SolarCollaborators> {
        Err(super::error::SolarApiError::configuration(
            "Google Solar backend requires the google-solar feature",
        ))
    }
}
