//! WorkflowSession aggregate - one user's pass through the staged flow.
//!
//! The session is owned by a single interaction and never persisted. All
//! mutation goes through the methods below so the guards and the quality
//! warnings stay consistent with the content.

use serde::{Deserialize, Serialize};

use crate::domain::copy::{
    hooks_csv, plain_text, quality_gate, CopySection, ExportArtifact, ExportFormat, HookIdea,
    SectionMap,
};
use crate::domain::council::{CouncilMemberId, CouncilSelection, SelectionChange};
use crate::domain::foundation::{SessionId, StateMachine, Timestamp};
use crate::domain::guidance::{CheckOutcome, GuidanceCheck, GuidanceProgress};

use super::{
    BriefField, CampaignBrief, SessionError, Transition, TransitionBlocked, WorkflowEvent,
    WorkflowStep,
};

const COPY_FILE_STEM: &str = "sales-copy";
const HOOK_FILE_STEM: &str = "hooks";
const SESSION_HOOK_CATEGORY: &str = "generated";

/// Outcome of the download action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardExport {
    Ready(ExportArtifact),
    /// The quality gate has open warnings.
    Blocked { warnings: Vec<String> },
}

/// The aggregate root of a copy-generation session.
#[derive(Debug, Clone)]
pub struct WorkflowSession {
    id: SessionId,
    step: WorkflowStep,
    brief: CampaignBrief,
    council: CouncilSelection,
    content: Option<SectionMap>,
    guidance: GuidanceCheck,
    quality_warnings: Vec<String>,
    created_at: Timestamp,
    domain_events: Vec<WorkflowEvent>,
}

impl WorkflowSession {
    /// Starts a session at `Welcome` with an empty council of the given size.
    pub fn new(council: CouncilSelection) -> Self {
        Self {
            id: SessionId::new(),
            step: WorkflowStep::first(),
            brief: CampaignBrief::default(),
            council,
            content: None,
            guidance: GuidanceCheck::new(),
            quality_warnings: Vec::new(),
            created_at: Timestamp::now(),
            domain_events: Vec::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn brief(&self) -> &CampaignBrief {
        &self.brief
    }

    pub fn council(&self) -> &CouncilSelection {
        &self.council
    }

    pub fn content(&self) -> Option<&SectionMap> {
        self.content.as_ref()
    }

    pub fn guidance(&self) -> &GuidanceCheck {
        &self.guidance
    }

    pub fn quality_warnings(&self) -> &[String] {
        &self.quality_warnings
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Takes accumulated domain events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Guard for leaving the current step forward, `None` when open.
    pub fn forward_guard(&self) -> Option<TransitionBlocked> {
        match self.step {
            WorkflowStep::Export => Some(TransitionBlocked::AtBoundary),
            WorkflowStep::CouncilSelection if self.council.is_empty() => {
                Some(TransitionBlocked::NoCouncilSelected)
            }
            WorkflowStep::InputCollection if !self.brief.is_ready() => Some(
                TransitionBlocked::MissingFields(self.brief.missing_required()),
            ),
            WorkflowStep::Generation if self.content.is_none() => {
                Some(TransitionBlocked::NoGeneratedContent)
            }
            _ => None,
        }
    }

    /// Moves one step forward if the current step's guard allows it.
    pub fn advance(&mut self) -> Transition {
        if let Some(reason) = self.forward_guard() {
            return Transition::Ignored(reason);
        }
        match self.step.next() {
            Some(target) => self.move_to(target),
            None => Transition::Ignored(TransitionBlocked::AtBoundary),
        }
    }

    /// Moves one step back. Backward moves are never guarded.
    pub fn retreat(&mut self) -> Transition {
        match self.step.previous() {
            Some(target) => self.move_to(target),
            None => Transition::Ignored(TransitionBlocked::AtBoundary),
        }
    }

    /// "Edit Offer": jumps from Export back to Review.
    pub fn edit_offer(&mut self) -> Transition {
        if self.step != WorkflowStep::Export {
            return Transition::Ignored(TransitionBlocked::NotAtExport);
        }
        self.move_to(WorkflowStep::Review)
    }

    /// Steps reachable right now, backward first.
    pub fn allowed_transitions(&self) -> Vec<WorkflowStep> {
        let mut steps: Vec<_> = self.step.previous().into_iter().collect();
        if self.forward_guard().is_none() {
            steps.extend(self.step.next());
        }
        steps
    }

    fn move_to(&mut self, target: WorkflowStep) -> Transition {
        let from = self.step;
        let Ok(to) = from.transition_to(target) else {
            return Transition::Ignored(TransitionBlocked::AtBoundary);
        };
        self.step = to;
        if to == WorkflowStep::Export {
            self.refresh_quality_warnings();
        }
        self.record_event(WorkflowEvent::StepChanged {
            session_id: self.id,
            from,
            to,
            occurred_at: Timestamp::now(),
        });
        Transition::Moved { from, to }
    }

    // ───────────────────────────────────────────────────────────────
    // Council and brief
    // ───────────────────────────────────────────────────────────────

    pub fn toggle_council_member(&mut self, member_id: CouncilMemberId) -> SelectionChange {
        let change = self.council.toggle(member_id.clone());
        if !matches!(change, SelectionChange::Ignored(_)) {
            self.record_event(WorkflowEvent::CouncilChanged {
                session_id: self.id,
                member_id,
                change,
            });
        }
        change
    }

    pub fn clear_council(&mut self) {
        let removed = self.council.len();
        if removed == 0 {
            return;
        }
        self.council.clear();
        self.record_event(WorkflowEvent::CouncilCleared {
            session_id: self.id,
            removed,
        });
    }

    pub fn set_field(&mut self, field: BriefField, value: impl Into<String>) {
        self.brief.set(field, value);
    }

    /// Optional context forwarded to the generator. Blank values are dropped.
    pub fn set_brief_notes(
        &mut self,
        business_model: Option<String>,
        competitor_analysis: Option<String>,
    ) {
        self.brief.set_business_model(business_model);
        self.brief.set_competitor_analysis(competitor_analysis);
    }

    // ───────────────────────────────────────────────────────────────
    // Content
    // ───────────────────────────────────────────────────────────────

    /// Stores a successful generation. Replaces prior content wholesale and
    /// restarts the guidance subflow.
    pub fn apply_generated(&mut self, content: SectionMap) -> Result<(), SessionError> {
        if self.step != WorkflowStep::Generation {
            return Err(SessionError::wrong_step("apply_generated", self.step));
        }
        self.content = Some(content);
        self.guidance = GuidanceCheck::new();
        self.refresh_quality_warnings();
        self.record_event(WorkflowEvent::ContentGenerated {
            session_id: self.id,
            warning_count: self.quality_warnings.len(),
            occurred_at: Timestamp::now(),
        });
        Ok(())
    }

    /// Replaces one section's text and re-runs the quality gate.
    pub fn edit_section(
        &mut self,
        section: CopySection,
        text: impl Into<String>,
    ) -> Result<&[String], SessionError> {
        if !matches!(self.step, WorkflowStep::Review | WorkflowStep::Export) {
            return Err(SessionError::wrong_step("edit_section", self.step));
        }
        let content = self.content.as_mut().ok_or(SessionError::NoContent)?;
        content.set(section, text);
        self.refresh_quality_warnings();
        self.record_event(WorkflowEvent::SectionEdited {
            session_id: self.id,
            section,
            warning_count: self.quality_warnings.len(),
        });
        Ok(&self.quality_warnings)
    }

    /// Re-runs the quality gate over the current content.
    pub fn refresh_quality_warnings(&mut self) -> &[String] {
        self.quality_warnings = self
            .content
            .as_ref()
            .map(quality_gate::validate)
            .unwrap_or_default();
        &self.quality_warnings
    }

    // ───────────────────────────────────────────────────────────────
    // Guidance
    // ───────────────────────────────────────────────────────────────

    pub fn record_guidance(&mut self, outcome: CheckOutcome) -> Result<GuidanceProgress, SessionError> {
        self.require_step(WorkflowStep::Export, "record_guidance")?;
        let progress = self.guidance.record(outcome);
        if progress == GuidanceProgress::Completed {
            self.record_event(WorkflowEvent::GuidanceFinished {
                session_id: self.id,
                skipped: false,
            });
        }
        Ok(progress)
    }

    pub fn skip_guidance(&mut self) -> Result<bool, SessionError> {
        self.require_step(WorkflowStep::Export, "skip_guidance")?;
        let skipped = self.guidance.skip();
        if skipped {
            self.record_event(WorkflowEvent::GuidanceFinished {
                session_id: self.id,
                skipped: true,
            });
        }
        Ok(skipped)
    }

    pub fn next_actions_unlocked(&self) -> bool {
        self.guidance.next_actions_unlocked()
    }

    // ───────────────────────────────────────────────────────────────
    // Export
    // ───────────────────────────────────────────────────────────────

    /// Copy/preview text. Never blocked by quality warnings.
    pub fn soft_export(&self) -> Result<ExportArtifact, SessionError> {
        let content = self.content.as_ref().ok_or(SessionError::NoContent)?;
        Ok(ExportArtifact::new(
            ExportFormat::PlainText,
            COPY_FILE_STEM,
            plain_text(content),
        ))
    }

    /// Download. Blocked while the quality gate reports warnings.
    pub fn hard_export(&self) -> Result<HardExport, SessionError> {
        self.require_step(WorkflowStep::Export, "hard_export")?;
        let content = self.content.as_ref().ok_or(SessionError::NoContent)?;
        let warnings = quality_gate::validate(content);
        if !warnings.is_empty() {
            return Ok(HardExport::Blocked { warnings });
        }
        Ok(HardExport::Ready(ExportArtifact::new(
            ExportFormat::PlainText,
            COPY_FILE_STEM,
            plain_text(content),
        )))
    }

    /// The session's hook as a one-row hook CSV.
    pub fn hook_csv(&self) -> Result<ExportArtifact, SessionError> {
        let content = self.content.as_ref().ok_or(SessionError::NoContent)?;
        let hook = HookIdea::new(content.get(CopySection::Hook), SESSION_HOOK_CATEGORY);
        Ok(ExportArtifact::new(
            ExportFormat::HookCsv,
            HOOK_FILE_STEM,
            hooks_csv(&[hook]),
        ))
    }

    fn require_step(&self, step: WorkflowStep, operation: &'static str) -> Result<(), SessionError> {
        if self.step != step {
            return Err(SessionError::wrong_step(operation, self.step));
        }
        Ok(())
    }

    fn record_event(&mut self, event: WorkflowEvent) {
        self.domain_events.push(event);
    }
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new(CouncilSelection::default())
    }
}
