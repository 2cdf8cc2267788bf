//! Claims domain errors

use core_kernel::SinistroId;
use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Sinistro not found: {0}")]
    NotFound(SinistroId),

    #[error("Completion links are only issued for manager-created sinistros")]
    Forbidden,

    #[error("Completion token has expired")]
    Expired,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Status {0} is not selectable for new transitions")]
    InactiveStatus(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl ClaimError {
    pub fn store(message: impl Into<String>) -> Self {
        ClaimError::Store(message.into())
    }
}
