//! Rooftop data acquisition for the proposal page.
//!
//! On each page mount the loader decides whether to query the building lookup,
//! derives the display metrics from the response and waits for the imagery to
//! be ready. The outcome is a single terminal [`ProposalViewState`].
//!
//! ```text
//!   sunroof disabled ──────────────────────────────► Error(FeatureDisabled)
//!   find_building ── Ok(None) ─────────────────────► Error(UnsupportedLocation)
//!                 ── Err(_) ───────────────────────► Error(LookupFailed)
//!                 ── Ok(Some) ── wait_until_ready ─► Ready { .. }
//!                                        └─ Err(_) ─► Error(LookupFailed)
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::api::{LoadFailure, ProposalViewState};
use crate::format::{format_number, NumberLocale};
use crate::models::{Coordinates, RooftopMetrics, ThemeConfig, UserProfile};
use crate::services::view_state::ViewStateCell;
use crate::solar::{BuildingLookup, ReadinessCheck};

/// The owning view went away before the load finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("proposal load cancelled")]
pub struct LoadCancelled;

pub struct ProposalDataLoader {
    lookup: Arc<dyn BuildingLookup>,
    readiness: Arc<dyn ReadinessCheck>,
    locale: NumberLocale,
    deadline: Option<Duration>,
}

impl ProposalDataLoader {
    pub fn new(lookup: Arc<dyn BuildingLookup>, readiness: Arc<dyn ReadinessCheck>) -> Self {
        Self {
            lookup,
            readiness,
            locale: NumberLocale::default(),
            deadline: None,
        }
    }

    /// Locale used to group digits in the formatted metrics.
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Upper bound on lookup plus readiness. Exceeding it yields `LookupFailed`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    pub fn lookup_name(&self) -> &'static str {
        self.lookup.name()
    }

    /// Resolve the rooftop section for one page mount.
    pub async fn load(&self, user: &UserProfile, theme: &ThemeConfig) -> ProposalViewState {
        if !theme.is_sunroof_enabled {
            debug!("Sunroof disabled for '{}', skipping lookup", theme.company_name);
            return ProposalViewState::Error {
                reason: LoadFailure::FeatureDisabled,
            };
        }

        let coordinates = user.coordinates();
        let sequence = self.lookup_and_derive(coordinates, &theme.google_api_gateway_key);
        let outcome = match self.deadline {
            Some(limit) => match tokio::time::timeout(limit, sequence).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!("Rooftop lookup at {} exceeded {:?}", coordinates, limit);
                    Err(LoadFailure::LookupFailed {
                        detail: format!("no response within {} ms", limit.as_millis()),
                    })
                }
            },
            None => sequence.await,
        };

        match outcome {
            Ok(state) => state,
            Err(reason) => ProposalViewState::Error { reason },
        }
    }

    /// Like [`load`](Self::load), but gives up as soon as `cancel` fires.
    pub async fn load_with_cancel(
        &self,
        user: &UserProfile,
        theme: &ThemeConfig,
        cancel: &CancellationToken,
    ) -> Result<ProposalViewState, LoadCancelled> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Rooftop load at {} cancelled", user.coordinates());
                Err(LoadCancelled)
            }
            state = self.load(user, theme) => Ok(state),
        }
    }

    /// Drive `cell` from `Loading` to its terminal state.
    ///
    /// Nothing is written to the cell once `cancel` has fired.
    pub async fn run(
        &self,
        user: &UserProfile,
        theme: &ThemeConfig,
        cell: &ViewStateCell,
        cancel: &CancellationToken,
    ) -> Result<(), LoadCancelled> {
        let state = self.load_with_cancel(user, theme, cancel).await?;
        if cancel.is_cancelled() {
            return Err(LoadCancelled);
        }
        if let Err(e) = cell.settle(state) {
            warn!("Dropping rooftop result: {}", e);
        }
        Ok(())
    }

    async fn lookup_and_derive(
        &self,
        coordinates: Coordinates,
        api_key: &str,
    ) -> Result<ProposalViewState, LoadFailure> {
        let building = self
            .lookup
            .find_building(coordinates, api_key)
            .await
            .map_err(|e| {
                warn!("Building lookup failed at {}: {}", coordinates, e);
                LoadFailure::LookupFailed {
                    detail: e.to_string(),
                }
            })?;

        let Some(building) = building else {
            info!("No building data at {}", coordinates);
            return Err(LoadFailure::UnsupportedLocation);
        };

        let metrics = RooftopMetrics::from(&building);
        let square_feet = format_number(metrics.square_feet(), self.locale);
        let sunshine_hours = format_number(metrics.sunshine_hours(), self.locale);

        self.readiness
            .wait_until_ready(metrics.center, api_key)
            .await
            .map_err(|e| {
                warn!("Imagery readiness failed at {}: {}", metrics.center, e);
                LoadFailure::LookupFailed {
                    detail: e.to_string(),
                }
            })?;

        info!(
            "Rooftop ready at {}: {} sq ft, {} sunshine hours",
            metrics.center, square_feet, sunshine_hours
        );
        Ok(ProposalViewState::Ready {
            square_feet,
            sunshine_hours,
            center_lat: metrics.center.latitude,
            center_lng: metrics.center.longitude,
        })
    }
}

#[cfg(test)]
#[path = "proposal_loader_tests.rs"]
mod proposal_loader_tests;
