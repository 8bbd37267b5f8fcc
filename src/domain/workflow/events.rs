//! Workflow session domain events.

use serde::{Deserialize, Serialize};

use crate::domain::copy::CopySection;
use crate::domain::council::{CouncilMemberId, SelectionChange};
use crate::domain::foundation::{SessionId, Timestamp};

use super::WorkflowStep;

/// Events recorded by a workflow session for the UI and analytics to drain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkflowEvent {
    /// The session moved between steps.
    StepChanged {
        session_id: SessionId,
        from: WorkflowStep,
        to: WorkflowStep,
        occurred_at: Timestamp,
    },

    /// A council member was added or removed.
    CouncilChanged {
        session_id: SessionId,
        member_id: CouncilMemberId,
        change: SelectionChange,
    },

    /// Every council member was removed at once.
    CouncilCleared { session_id: SessionId, removed: usize },

    /// Generation succeeded and replaced the session's content.
    ContentGenerated {
        session_id: SessionId,
        warning_count: usize,
        occurred_at: Timestamp,
    },

    /// A section was edited by hand.
    SectionEdited {
        session_id: SessionId,
        section: CopySection,
        warning_count: usize,
    },

    /// The guidance subflow finished, either by answering every check or skipping.
    GuidanceFinished { session_id: SessionId, skipped: bool },
}
