//! Collaborators that resolve rooftop data for a pair of coordinates.
//!
//! The loader only depends on the two traits defined here:
//!
//! - [`BuildingLookup`]: finds the building closest to a point and returns its
//!   solar potential, or `None` when the location is not covered.
//! - [`ReadinessCheck`]: waits until the aerial imagery for the building centre
//!   can be displayed.
//!
//! Implementations:
//!
//! - `google`: the Google Solar API over HTTP (feature `google-solar`)
//! - `local`: in-memory fixtures for development and tests

pub mod config;
pub mod error;
pub mod factory;
pub mod local;

#[cfg(feature = "google-solar")]
pub mod google;

#[cfg(feature = "google-solar")]
pub mod readiness;

use async_trait::async_trait;

use crate::models::{BuildingInsights, Coordinates};

pub use config::{SolarBackend, SolarConfig};
pub use error::{ErrorContext, SolarApiError, SolarResult};
pub use factory::{SolarClientFactory, SolarCollaborators};
pub use local::{sample_building, ImmediateReadiness, StaticBuildingLookup};

#[cfg(feature = "google-solar")]
pub use google::GoogleSolarClient;

#[cfg(feature = "google-solar")]
pub use readiness::ImageryReadinessProbe;

/// Resolves the building closest to a point.
#[async_trait]
pub trait BuildingLookup: Send + Sync {
    /// `Ok(None)` means the service has no data for this location.
    async fn find_building(
        &self,
        coordinates: Coordinates,
        api_key: &str,
    ) -> SolarResult<Option<BuildingInsights>>;

    /// Short label used in logs and the health endpoint.
    fn name(&self) -> &'static str;
}

/// Confirms that imagery for a building centre is ready to render.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// `api_key` is the tenant key also used for the building lookup.
    async fn wait_until_ready(&self, center: Coordinates, api_key: &str) -> SolarResult<()>;
}
