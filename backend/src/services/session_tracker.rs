//! Session tracking for background proposal loads.
//!
//! Each page mount gets a session holding its view state cell and the token
//! that cancels the in-flight load when the page goes away.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::api::ProposalViewState;
use crate::services::view_state::ViewStateCell;

/// One mounted proposal page.
#[derive(Clone)]
pub struct ProposalSession {
    pub session_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub settled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub cell: ViewStateCell,
    pub cancel: CancellationToken,
}

/// In-memory session registry.
#[derive(Clone)]
pub struct SessionTracker {
    sessions: Arc<RwLock<HashMap<String, ProposalSession>>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new session and return its ID.
    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        let session = ProposalSession {
            session_id: session_id.clone(),
            created_at: chrono::Utc::now(),
            settled_at: None,
            cell: ViewStateCell::new(),
            cancel: CancellationToken::new(),
        };
        self.sessions.write().insert(session_id.clone(), session);
        session_id
    }

    pub fn get(&self, session_id: &str) -> Option<ProposalSession> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Current view state of a session.
    pub fn state(&self, session_id: &str) -> Option<ProposalViewState> {
        self.sessions
            .read()
            .get(session_id)
            .map(|session| session.cell.current())
    }

    /// Record when a session reached its terminal state.
    pub fn mark_settled(&self, session_id: &str) {
        let mut sessions = self.sessions.write();
        if let Some(session) = sessions.get_mut(session_id) {
            if session.settled_at.is_none() {
                session.settled_at = Some(chrono::Utc::now());
            }
        }
    }

    /// Cancel the in-flight load and forget the session.
    ///
    /// Returns `false` if the session does not exist.
    pub fn cancel(&self, session_id: &str) -> bool {
        match self.sessions.write().remove(session_id) {
            Some(session) => {
                session.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Drop sessions that settled at least `retention` ago.
    ///
    /// Sessions still loading are kept. Returns how many were removed.
    pub fn prune_settled(&self, retention: Duration) -> usize {
        let now = chrono::Utc::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| match session.settled_at {
            Some(settled_at) => (now - settled_at)
                .to_std()
                .map(|age| age < retention)
                .unwrap_or(true),
            None => true,
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
