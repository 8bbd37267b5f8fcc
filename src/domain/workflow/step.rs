//! Workflow steps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Step of the staged generation workflow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Welcome,
    CouncilSelection,
    InputCollection,
    Generation,
    Review,
    Export,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 6] = [
        WorkflowStep::Welcome,
        WorkflowStep::CouncilSelection,
        WorkflowStep::InputCollection,
        WorkflowStep::Generation,
        WorkflowStep::Review,
        WorkflowStep::Export,
    ];

    pub fn first() -> Self {
        WorkflowStep::Welcome
    }

    /// Zero-based position in the flow.
    pub fn index(&self) -> usize {
        match self {
            WorkflowStep::Welcome => 0,
            WorkflowStep::CouncilSelection => 1,
            WorkflowStep::InputCollection => 2,
            WorkflowStep::Generation => 3,
            WorkflowStep::Review => 4,
            WorkflowStep::Export => 5,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowStep::Welcome => "Welcome",
            WorkflowStep::CouncilSelection => "Choose Your Council",
            WorkflowStep::InputCollection => "Campaign Details",
            WorkflowStep::Generation => "Generate",
            WorkflowStep::Review => "Review",
            WorkflowStep::Export => "Export",
        }
    }
}

impl StateMachine for WorkflowStep {
    /// One step forward or back. `Export -> Review` is covered by the
    /// backward edge and is also exposed as "Edit Offer".
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target) || self.previous() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.previous().into_iter().chain(self.next()).collect()
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
