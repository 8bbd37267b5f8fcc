//! Guidance check subflow.
//!
//! Four manual confirmations walked in a fixed order before "Next Best
//! Actions" unlock. Each step records whether the user judged the copy
//! valid, but both answers advance: unlocking depends on every check being
//! visited, not on every check passing. A user may instead skip the whole
//! sequence, but only before answering the first check.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::StateMachine;

/// Aspect of the copy a guidance step asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuidanceCheckKind {
    VoiceMatch,
    NicheRelevant,
    ProofValid,
    CtaAligned,
}

/// Position in the guidance sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceStep {
    Voice,
    Niche,
    Proof,
    Cta,
    Complete,
}

impl GuidanceStep {
    /// The check asked at this step; `None` once complete.
    pub fn check_kind(&self) -> Option<GuidanceCheckKind> {
        match self {
            GuidanceStep::Voice => Some(GuidanceCheckKind::VoiceMatch),
            GuidanceStep::Niche => Some(GuidanceCheckKind::NicheRelevant),
            GuidanceStep::Proof => Some(GuidanceCheckKind::ProofValid),
            GuidanceStep::Cta => Some(GuidanceCheckKind::CtaAligned),
            GuidanceStep::Complete => None,
        }
    }

    fn following(&self) -> Option<GuidanceStep> {
        match self {
            GuidanceStep::Voice => Some(GuidanceStep::Niche),
            GuidanceStep::Niche => Some(GuidanceStep::Proof),
            GuidanceStep::Proof => Some(GuidanceStep::Cta),
            GuidanceStep::Cta => Some(GuidanceStep::Complete),
            GuidanceStep::Complete => None,
        }
    }
}

impl StateMachine for GuidanceStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.following() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.following().into_iter().collect()
    }
}

/// Answer to a single guidance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Valid,
    NeedsRevision,
}

impl CheckOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, CheckOutcome::Valid)
    }
}

/// What recording an answer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceProgress {
    Advanced(GuidanceStep),
    Completed,
    /// The subflow already finished or was skipped.
    Ignored,
}

/// State of the guidance subflow for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceCheck {
    step: GuidanceStep,
    checks: BTreeMap<GuidanceCheckKind, bool>,
    skipped: bool,
}

impl GuidanceCheck {
    pub fn new() -> Self {
        Self {
            step: GuidanceStep::Voice,
            checks: BTreeMap::new(),
            skipped: false,
        }
    }

    pub fn step(&self) -> GuidanceStep {
        self.step
    }

    /// Records the answer for the current step and moves to the next one.
    pub fn record(&mut self, outcome: CheckOutcome) -> GuidanceProgress {
        if self.skipped {
            return GuidanceProgress::Ignored;
        }
        let (Some(kind), Some(next)) = (self.step.check_kind(), self.step.following()) else {
            return GuidanceProgress::Ignored;
        };
        let Ok(next) = self.step.transition_to(next) else {
            return GuidanceProgress::Ignored;
        };

        self.checks.insert(kind, outcome.is_valid());
        self.step = next;

        if next == GuidanceStep::Complete {
            GuidanceProgress::Completed
        } else {
            GuidanceProgress::Advanced(next)
        }
    }

    /// Skips the whole sequence. Only honoured before the first answer.
    ///
    /// Returns true if the skip took effect.
    pub fn skip(&mut self) -> bool {
        if self.skipped || self.step != GuidanceStep::Voice || !self.checks.is_empty() {
            return false;
        }
        self.skipped = true;
        true
    }

    pub fn all_checks_complete(&self) -> bool {
        self.step == GuidanceStep::Complete
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// Gate for the "Next Best Actions" capability.
    pub fn next_actions_unlocked(&self) -> bool {
        self.all_checks_complete() || self.skipped
    }

    /// Recorded answer for a check, `true` meaning valid.
    pub fn outcome(&self, kind: GuidanceCheckKind) -> Option<bool> {
        self.checks.get(&kind).copied()
    }

    pub fn checks(&self) -> &BTreeMap<GuidanceCheckKind, bool> {
        &self.checks
    }

    /// Checks answered as needing revision. Informational only.
    pub fn checks_needing_revision(&self) -> Vec<GuidanceCheckKind> {
        self.checks
            .iter()
            .filter(|(_, valid)| !**valid)
            .map(|(kind, _)| *kind)
            .collect()
    }
}

impl Default for GuidanceCheck {
    fn default() -> Self {
        Self::new()
    }
}
