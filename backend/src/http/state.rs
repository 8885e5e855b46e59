//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use crate::services::{ProposalDataLoader, SessionTracker};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loader shared by every request
    pub loader: Arc<ProposalDataLoader>,
    /// Background loads started through the session endpoints
    pub sessions: SessionTracker,
    /// How long a settled session stays readable before it is dropped
    pub session_retention: Duration,
}

/// Default time a settled session is kept around.
pub const DEFAULT_SESSION_RETENTION: Duration = Duration::from_secs(300);

impl AppState {
    pub fn new(loader: Arc<ProposalDataLoader>) -> Self {
        Self {
            loader,
            sessions: SessionTracker::new(),
            session_retention: DEFAULT_SESSION_RETENTION,
        }
    }

    pub fn with_session_retention(mut self, retention: Duration) -> Self {
        self.session_retention = retention;
        self
    }

    /// Drop expired settled sessions, logging how many went away.
    pub fn prune_sessions(&self) -> usize {
        let pruned = self.sessions.prune_settled(self.session_retention);
        if pruned > 0 {
            log::debug!("Pruned {} settled proposal session(s)", pruned);
        }
        pruned
    }
}
