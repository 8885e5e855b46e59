//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::api::{ProposalSnapshot, ProposalViewState};
use crate::models::{ThemeConfig, UserProfile};

/// Request body shared by the proposal endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub user: UserProfile,
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Response for session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// Session ID for polling or streaming the result
    pub session_id: String,
    /// Message about the operation
    pub message: String,
}

/// Current state of a background proposal load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub state: ProposalViewState,
    pub snapshot: ProposalSnapshot,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Which building lookup is wired up
    pub solar_backend: String,
    /// Background loads currently tracked
    pub active_sessions: usize,
}
