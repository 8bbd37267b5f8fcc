//! WorkflowController - drives one user's session through the staged flow.
//!
//! Composes the session aggregate with the generation engine, the usage
//! tracker and the council catalog. Blocked navigation and over-selection
//! come back as outcome values; only collaborator failures and operations
//! invoked at the wrong step are errors.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::copy::{CopySection, ExportArtifact, SectionMap};
use crate::domain::council::{
    CouncilCatalog, CouncilMemberId, CouncilSelection, SelectionChange, SelectionIgnored,
};
use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::guidance::{CheckOutcome, GuidanceProgress};
use crate::domain::membership::{QuotaStatus, SubscriptionTier, TierLimits};
use crate::domain::workflow::{
    BriefField, HardExport, SessionError, Transition, WorkflowEvent, WorkflowSession, WorkflowStep,
};
use crate::ports::{UsageTracker, UsageTrackerError};

use super::{GenerationEngine, GenerationError};

/// Errors returned by controller operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// The operation is not available at the current step.
    #[error("{operation} is not available at step '{step}'")]
    WrongStep {
        operation: &'static str,
        step: WorkflowStep,
    },

    /// The operation needs generated content and there is none yet.
    #[error("no generated content")]
    NoContent,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("usage tracking failed: {0}")]
    Usage(#[from] UsageTrackerError),

    /// The user's tier does not include the requested export.
    #[error("{feature} is not included in the {tier} tier")]
    NotIncluded {
        feature: &'static str,
        tier: SubscriptionTier,
    },

    #[error("invalid workflow settings: {0}")]
    InvalidSettings(#[from] ValidationError),
}

impl From<SessionError> for WorkflowError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoContent => WorkflowError::NoContent,
            SessionError::WrongStep { operation, step } => {
                WorkflowError::WrongStep { operation, step }
            }
        }
    }
}

/// Orchestrates a single `WorkflowSession`.
pub struct WorkflowController {
    session: WorkflowSession,
    user_id: UserId,
    engine: Arc<GenerationEngine>,
    usage: Arc<dyn UsageTracker>,
    catalog: CouncilCatalog,
}

impl WorkflowController {
    /// Starts a fresh session for `user_id` with room for `max_selections`
    /// council members.
    pub fn new(
        user_id: UserId,
        engine: Arc<GenerationEngine>,
        usage: Arc<dyn UsageTracker>,
        max_selections: usize,
    ) -> Result<Self, WorkflowError> {
        let council = CouncilSelection::new(max_selections)?;
        Ok(Self {
            session: WorkflowSession::new(council),
            user_id,
            engine,
            usage,
            catalog: CouncilCatalog::standard().clone(),
        })
    }

    /// Replaces the built-in persona catalog.
    pub fn with_catalog(mut self, catalog: CouncilCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn session(&self) -> &WorkflowSession {
        &self.session
    }

    pub fn into_session(self) -> WorkflowSession {
        self.session
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn catalog(&self) -> &CouncilCatalog {
        &self.catalog
    }

    pub fn step(&self) -> WorkflowStep {
        self.session.step()
    }

    pub fn is_generating(&self) -> bool {
        self.engine.is_generating()
    }

    pub fn take_events(&mut self) -> Vec<WorkflowEvent> {
        self.session.take_events()
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Advances one step. A failed guard leaves the step unchanged.
    pub fn next(&mut self) -> Transition {
        let transition = self.session.advance();
        self.log_transition("next", &transition);
        transition
    }

    /// Goes back one step.
    pub fn prev(&mut self) -> Transition {
        let transition = self.session.retreat();
        self.log_transition("prev", &transition);
        transition
    }

    /// "Edit Offer": Export back to Review.
    pub fn edit_offer(&mut self) -> Transition {
        let transition = self.session.edit_offer();
        self.log_transition("edit_offer", &transition);
        transition
    }

    /// Steps reachable right now, for enabling navigation buttons.
    pub fn allowed_transitions(&self) -> Vec<WorkflowStep> {
        if self.engine.is_generating() {
            return Vec::new();
        }
        self.session.allowed_transitions()
    }

    fn log_transition(&self, action: &'static str, transition: &Transition) {
        match transition {
            Transition::Moved { from, to } => {
                debug!(session_id = %self.session.id(), action, %from, %to, "step changed")
            }
            Transition::Ignored(reason) => {
                debug!(session_id = %self.session.id(), action, ?reason, "transition blocked")
            }
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Council and brief
    // ───────────────────────────────────────────────────────────────

    /// Toggles a council member. Ids outside the catalog are ignored.
    pub fn toggle_council_member(&mut self, member_id: &CouncilMemberId) -> SelectionChange {
        if !self.catalog.contains(member_id) {
            debug!(member_id = %member_id, "ignoring unknown council member");
            return SelectionChange::Ignored(SelectionIgnored::UnknownMember);
        }
        self.session.toggle_council_member(member_id.clone())
    }

    pub fn clear_council(&mut self) {
        self.session.clear_council();
    }

    pub fn set_field(&mut self, field: BriefField, value: impl Into<String>) {
        self.session.set_field(field, value);
    }

    pub fn set_brief_notes(
        &mut self,
        business_model: Option<String>,
        competitor_analysis: Option<String>,
    ) {
        self.session.set_brief_notes(business_model, competitor_analysis);
    }

    // ───────────────────────────────────────────────────────────────
    // Generation
    // ───────────────────────────────────────────────────────────────

    /// Current quota snapshot for the user.
    pub async fn quota_status(&self) -> Result<QuotaStatus, WorkflowError> {
        let usage = self.usage.current_usage(&self.user_id).await?;
        Ok(usage.quota_status())
    }

    /// Runs generation from the `Generation` step.
    ///
    /// Checks quota first, then calls the engine. On success the content is
    /// stored, one unit of usage is reported and the session moves to
    /// `Review`. On failure the session is left exactly as it was.
    #[tracing::instrument(skip(self), fields(session_id = %self.session.id(), user_id = %self.user_id))]
    pub async fn generate(&mut self) -> Result<&SectionMap, WorkflowError> {
        let step = self.session.step();
        if step != WorkflowStep::Generation {
            return Err(WorkflowError::WrongStep {
                operation: "generate",
                step,
            });
        }

        let quota = self.quota_status().await?;
        if quota.at_limit {
            warn!(tier = %quota.tier, used = quota.used, "generation blocked by quota");
            return Err(GenerationError::QuotaExceeded {
                upgrade_message: quota.upgrade_message(),
            }
            .into());
        }

        let content = match self.engine.generate(&self.session).await {
            Ok(content) => content,
            Err(GenerationError::QuotaExceeded { .. }) => {
                warn!(tier = %quota.tier, "generator reported quota exceeded");
                return Err(GenerationError::QuotaExceeded {
                    upgrade_message: quota.upgrade_message(),
                }
                .into());
            }
            Err(err) => return Err(err.into()),
        };

        self.session.apply_generated(content)?;
        info!(
            warnings = self.session.quality_warnings().len(),
            "copy generated"
        );

        if let Err(err) = self.usage.record_generation(&self.user_id).await {
            warn!(error = %err, "failed to report generation usage");
        }

        self.next();
        self.session.content().ok_or(WorkflowError::NoContent)
    }

    // ───────────────────────────────────────────────────────────────
    // Review
    // ───────────────────────────────────────────────────────────────

    /// Edits one section and returns the refreshed quality warnings.
    pub fn edit_section(
        &mut self,
        section: CopySection,
        text: impl Into<String>,
    ) -> Result<&[String], WorkflowError> {
        let warnings = self.session.edit_section(section, text)?;
        debug!(%section, warnings = warnings.len(), "section edited");
        Ok(warnings)
    }

    pub fn quality_warnings(&self) -> &[String] {
        self.session.quality_warnings()
    }

    // ───────────────────────────────────────────────────────────────
    // Guidance
    // ───────────────────────────────────────────────────────────────

    pub fn record_guidance(&mut self, outcome: CheckOutcome) -> Result<GuidanceProgress, WorkflowError> {
        Ok(self.session.record_guidance(outcome)?)
    }

    pub fn skip_guidance(&mut self) -> Result<bool, WorkflowError> {
        Ok(self.session.skip_guidance()?)
    }

    /// True once the guidance subflow is complete or skipped.
    pub fn next_actions_unlocked(&self) -> bool {
        self.session.next_actions_unlocked()
    }

    // ───────────────────────────────────────────────────────────────
    // Export
    // ───────────────────────────────────────────────────────────────

    /// Copy/preview. Ignores quality warnings.
    pub fn soft_export(&self) -> Result<ExportArtifact, WorkflowError> {
        Ok(self.session.soft_export()?)
    }

    /// Download. Blocked while quality warnings remain.
    pub fn hard_export(&self) -> Result<HardExport, WorkflowError> {
        let export = self.session.hard_export()?;
        if let HardExport::Blocked { warnings } = &export {
            debug!(warnings = warnings.len(), "download blocked by quality gate");
        }
        Ok(export)
    }

    /// The session's hook as CSV, for tiers that include hook export.
    pub async fn export_hooks_csv(&self) -> Result<ExportArtifact, WorkflowError> {
        let usage = self.usage.current_usage(&self.user_id).await?;
        if !TierLimits::for_tier(usage.tier).hook_csv_export {
            return Err(WorkflowError::NotIncluded {
                feature: "hook CSV export",
                tier: usage.tier,
            });
        }
        Ok(self.session.hook_csv()?)
    }
}
