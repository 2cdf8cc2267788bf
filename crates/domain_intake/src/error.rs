//! Intake domain errors

use thiserror::Error;

use crate::flow::IntakeStep;

/// Errors that can occur during intake
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Cannot advance past {0:?}: step requirements are not met")]
    CannotProceed(IntakeStep),

    #[error("Event {event} is not valid at step {step:?}")]
    UnexpectedEvent {
        step: IntakeStep,
        event: &'static str,
    },

    #[error("Draft is incomplete: {0}")]
    IncompleteDraft(String),

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}
