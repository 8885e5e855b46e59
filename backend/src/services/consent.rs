//! The "This is NOT a quote" acknowledgement dialog.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsentError {
    #[error("the dialog cannot be closed until the user acknowledges it is not a quote")]
    NotAcknowledged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentDialog {
    pub open: bool,
    pub acknowledged: bool,
}

impl ConsentDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn set_acknowledged(&mut self, acknowledged: bool) {
        self.acknowledged = acknowledged;
    }

    /// Close the dialog. Only allowed after acknowledgement.
    pub fn try_close(&mut self) -> Result<(), ConsentError> {
        if !self.acknowledged {
            return Err(ConsentError::NotAcknowledged);
        }
        self.open = false;
        Ok(())
    }

    /// Value recorded as `terms_consent` on the lead.
    pub fn terms_consent(&self) -> Option<u8> {
        self.acknowledged.then_some(1)
    }
}
