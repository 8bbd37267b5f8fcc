//! Outcomes of step navigation.
//!
//! A blocked transition is a normal UI state (the button is disabled), so it
//! is reported as a value rather than an error.

use serde::{Deserialize, Serialize};

use super::{BriefField, WorkflowStep};

/// Result of asking the session to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Moved { from: WorkflowStep, to: WorkflowStep },
    Ignored(TransitionBlocked),
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }

    pub fn blocked_reason(&self) -> Option<&TransitionBlocked> {
        match self {
            Transition::Moved { .. } => None,
            Transition::Ignored(reason) => Some(reason),
        }
    }
}

/// Why the session stayed where it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionBlocked {
    /// No council member is selected.
    NoCouncilSelected,
    /// Required brief fields are blank.
    MissingFields(Vec<BriefField>),
    /// Generation has not succeeded yet.
    NoGeneratedContent,
    /// Already at the first or last step.
    AtBoundary,
    /// "Edit Offer" is only available from Export.
    NotAtExport,
}
