//! Public API surface for the proposal backend.
//!
//! This file holds the view state produced by the loader and its flattened
//! snapshot form. All types derive Serialize/Deserialize for JSON.

use serde::{Deserialize, Serialize};

pub use crate::services::consent::ConsentDialog;
pub use crate::services::presentation::{
    EnvironmentalImpact, FinancingTerms, MonthlyPayment, ProposalSummary, SavingsProjection,
    SystemSize,
};

pub const SKIP_SUNROOF_MESSAGE: &str = "Skip sunroof";
pub const UNSUPPORTED_LOCATION_MESSAGE: &str =
    "Requested location is not supported by Google Sunroof API.";
pub const LOOKUP_FAILED_MESSAGE: &str = "Unable to retrieve rooftop data for this location.";

/// Why a load ended without rooftop metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadFailure {
    /// The tenant has the rooftop lookup turned off.
    FeatureDisabled,
    /// The lookup service has no building for the coordinates.
    UnsupportedLocation,
    /// A collaborator call failed or timed out.
    LookupFailed { detail: String },
}

impl LoadFailure {
    /// User-facing message for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            LoadFailure::FeatureDisabled => SKIP_SUNROOF_MESSAGE,
            LoadFailure::UnsupportedLocation => UNSUPPORTED_LOCATION_MESSAGE,
            LoadFailure::LookupFailed { .. } => LOOKUP_FAILED_MESSAGE,
        }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// State of the rooftop section of a proposal.
///
/// Starts as `Loading` and moves to exactly one of the other variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProposalViewState {
    Loading,
    Error {
        reason: LoadFailure,
    },
    Ready {
        square_feet: String,
        sunshine_hours: String,
        center_lat: f64,
        center_lng: f64,
    },
}

impl ProposalViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProposalViewState::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            ProposalViewState::Error { reason } => Some(reason),
            _ => None,
        }
    }

    /// Flatten into the six-field shape the page reads.
    pub fn snapshot(&self) -> ProposalSnapshot {
        match self {
            ProposalViewState::Loading => ProposalSnapshot {
                loading: true,
                ..Default::default()
            },
            ProposalViewState::Error { reason } => ProposalSnapshot {
                error: Some(reason.message().to_string()),
                ..Default::default()
            },
            ProposalViewState::Ready {
                square_feet,
                sunshine_hours,
                center_lat,
                center_lng,
            } => ProposalSnapshot {
                square_feet: Some(square_feet.clone()),
                sunshine_hours: Some(sunshine_hours.clone()),
                center_lat: Some(*center_lat),
                center_lng: Some(*center_lng),
                ..Default::default()
            },
        }
    }
}

/// Field-by-field view of [`ProposalViewState`].
///
/// None of the other fields are meaningful while `loading` is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub square_feet: Option<String>,
    pub sunshine_hours: Option<String>,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_snapshot() {
        let snapshot = ProposalViewState::Loading.snapshot();
        assert!(snapshot.loading);
        assert!(snapshot.error.is_none());
        assert!(snapshot.square_feet.is_none());
    }

    #[test]
    fn test_error_snapshot() {
        let state = ProposalViewState::Error {
            reason: LoadFailure::FeatureDisabled,
        };
        let snapshot = state.snapshot();
        assert_eq!(
            snapshot,
            ProposalSnapshot {
                loading: false,
                error: Some("Skip sunroof".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_ready_snapshot() {
        let state = ProposalViewState::Ready {
            square_feet: "10,764".to_string(),
            sunshine_hours: "1,802".to_string(),
            center_lat: 37.4,
            center_lng: -122.1,
        };
        let snapshot = state.snapshot();
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.square_feet.as_deref(), Some("10,764"));
        assert_eq!(snapshot.center_lng, Some(-122.1));
    }

    #[test]
    fn test_state_json_shape() {
        let state = ProposalViewState::Error {
            reason: LoadFailure::LookupFailed {
                detail: "timeout".to_string(),
            },
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["reason"]["kind"], "lookup_failed");
        assert_eq!(json["reason"]["detail"], "timeout");

        let snapshot = serde_json::to_value(ProposalViewState::Loading.snapshot()).unwrap();
        assert_eq!(snapshot["loading"], true);
        assert!(snapshot["squareFeet"].is_null());
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            LoadFailure::UnsupportedLocation.to_string(),
            "Requested location is not supported by Google Sunroof API."
        );
        assert_eq!(
            LoadFailure::LookupFailed {
                detail: String::new()
            }
            .message(),
            LOOKUP_FAILED_MESSAGE
        );
    }
}
