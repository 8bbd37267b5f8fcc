//! Session-specific error types.

use thiserror::Error;

use super::WorkflowStep;

/// Operations refused by the session aggregate.
///
/// Navigation guards never produce these; see `Transition::Ignored`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation needs generated content and there is none yet.
    #[error("no generated content")]
    NoContent,

    /// The operation is not available at the current step.
    #[error("{operation} is not available at step '{step}'")]
    WrongStep {
        operation: &'static str,
        step: WorkflowStep,
    },
}

impl SessionError {
    pub fn wrong_step(operation: &'static str, step: WorkflowStep) -> Self {
        SessionError::WrongStep { operation, step }
    }
}
