//! Observable holder for a proposal's view state.
//!
//! A cell starts out `Loading` and can be settled exactly once. Consumers
//! subscribe to it and never see anything between those two values.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::ProposalViewState;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("view state already settled")]
    AlreadySettled,
    #[error("cannot settle a view state to loading")]
    NotTerminal,
}

#[derive(Clone)]
pub struct ViewStateCell {
    tx: Arc<watch::Sender<ProposalViewState>>,
}

impl ViewStateCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ProposalViewState::Loading);
        Self { tx: Arc::new(tx) }
    }

    /// Clone of the current state.
    pub fn current(&self) -> ProposalViewState {
        self.tx.borrow().clone()
    }

    pub fn is_settled(&self) -> bool {
        self.tx.borrow().is_terminal()
    }

    /// Move from `Loading` to `state`.
    pub fn settle(&self, state: ProposalViewState) -> Result<(), StateError> {
        if state.is_loading() {
            return Err(StateError::NotTerminal);
        }

        let mut settled = false;
        self.tx.send_if_modified(|current| {
            if current.is_loading() {
                *current = state;
                settled = true;
            }
            settled
        });

        if settled {
            Ok(())
        } else {
            Err(StateError::AlreadySettled)
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProposalViewState> {
        self.tx.subscribe()
    }

    /// Resolve once the cell holds a terminal state.
    pub async fn wait_settled(&self) -> ProposalViewState {
        let mut rx = self.tx.subscribe();
        let settled = match rx.wait_for(ProposalViewState::is_terminal).await {
            Ok(state) => state.clone(),
            // The sender lives as long as `self`, so the channel cannot close here.
            Err(_) => self.current(),
        };
        settled
    }
}

impl Default for ViewStateCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LoadFailure;
    use std::time::Duration;

    fn ready() -> ProposalViewState {
        ProposalViewState::Ready {
            square_feet: "1,000".to_string(),
            sunshine_hours: "1,500".to_string(),
            center_lat: 1.0,
            center_lng: 2.0,
        }
    }

    #[test]
    fn test_new_cell_is_loading() {
        let cell = ViewStateCell::new();
        assert!(cell.current().is_loading());
        assert!(!cell.is_settled());
    }

    #[test]
    fn test_settle_once() {
        let cell = ViewStateCell::new();
        assert_eq!(cell.settle(ready()), Ok(()));
        assert_eq!(
            cell.settle(ProposalViewState::Error {
                reason: LoadFailure::UnsupportedLocation
            }),
            Err(StateError::AlreadySettled)
        );
        assert_eq!(cell.current(), ready());
    }

    #[test]
    fn test_settle_rejects_loading() {
        let cell = ViewStateCell::new();
        assert_eq!(
            cell.settle(ProposalViewState::Loading),
            Err(StateError::NotTerminal)
        );
        assert!(!cell.is_settled());
    }

    #[tokio::test]
    async fn test_subscriber_sees_single_transition() {
        let cell = ViewStateCell::new();
        let mut rx = cell.subscribe();
        assert!(rx.borrow_and_update().is_loading());

        let writer = cell.clone();
        tokio::spawn(async move {
            writer.settle(ready()).unwrap();
            let _ = writer.settle(ProposalViewState::Error {
                reason: LoadFailure::FeatureDisabled,
            });
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ready());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_wait_settled() {
        let cell = ViewStateCell::new();
        let writer = cell.clone();
        let handle = tokio::spawn(async move { writer.wait_settled().await });
        tokio::task::yield_now().await;
        cell.settle(ready()).unwrap();
        assert_eq!(handle.await.unwrap(), ready());
    }

    #[tokio::test]
    async fn test_wait_settled_on_settled_cell_returns_at_once() {
        let cell = ViewStateCell::new();
        let failed = ProposalViewState::Error {
            reason: LoadFailure::UnsupportedLocation,
        };
        cell.settle(failed.clone()).unwrap();
        let settled = tokio::time::timeout(Duration::from_secs(1), cell.wait_settled())
            .await
            .unwrap();
        assert_eq!(settled, failed);
    }
}
