//! Service layer for the proposal page.
//!
//! The loader resolves rooftop data; the remaining modules hold the state
//! containers and display derivations built on top of its result.

pub mod consent;
pub mod presentation;
pub mod proposal_loader;
pub mod view_state;

#[cfg(feature = "http-server")]
pub mod session_tracker;

pub use consent::{ConsentDialog, ConsentError};
pub use presentation::ProposalSummary;
pub use proposal_loader::{LoadCancelled, ProposalDataLoader};
pub use view_state::{StateError, ViewStateCell};

#[cfg(feature = "http-server")]
pub use session_tracker::{ProposalSession, SessionTracker};
