//! Integration tests for the staged generation workflow.
//!
//! Drives complete sessions through the public API:
//! 1. Council selection and brief collection behind their guards
//! 2. Quota-checked, single-flight generation
//! 3. Review edits re-running the quality gate
//! 4. Guidance checks unlocking next actions, then download
//!
//! Uses the mock generator and in-memory usage tracker, so nothing leaves the process.

use std::sync::Arc;
use tokio::sync::Notify;

use council_copy::adapters::{InMemoryUsageTracker, MockCopyGenerator};
use council_copy::application::{GenerationEngine, GenerationError, WorkflowController, WorkflowError};
use council_copy::domain::copy::{CopySection, ExportFormat};
use council_copy::domain::council::{CouncilMemberId, SelectionChange, SelectionIgnored};
use council_copy::domain::foundation::UserId;
use council_copy::domain::guidance::{CheckOutcome, GuidanceProgress};
use council_copy::domain::membership::{Remaining, SubscriptionTier};
use council_copy::domain::workflow::{
    BriefField, HardExport, TransitionBlocked, WorkflowEvent, WorkflowStep,
};
use council_copy::ports::CopyGeneratorError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn user() -> UserId {
    UserId::new("integration-user").unwrap()
}

fn member(id: &str) -> CouncilMemberId {
    CouncilMemberId::new(id).unwrap()
}

fn controller_with(
    generator: MockCopyGenerator,
    usage: Arc<InMemoryUsageTracker>,
) -> WorkflowController {
    let engine = Arc::new(GenerationEngine::new(Arc::new(generator)));
    WorkflowController::new(user(), engine, usage, 3).unwrap()
}

fn fill_brief(controller: &mut WorkflowController) {
    controller.set_field(BriefField::Niche, "home fitness");
    controller.set_field(BriefField::Tone, "energetic");
    controller.set_field(BriefField::TargetAudience, "busy parents");
    controller.set_field(BriefField::PainPoint, "no time to train");
    controller.set_field(BriefField::DesiredOutcome, "fit in 20 minutes a day");
    controller.set_field(BriefField::PricePoint, "$49");
}

// =============================================================================
// Full Session
// =============================================================================

#[tokio::test]
async fn complete_session_from_welcome_to_download() {
    let usage = Arc::new(InMemoryUsageTracker::new(SubscriptionTier::Starter, 30));
    let generator = MockCopyGenerator::new();
    let mut controller = controller_with(generator.clone(), usage.clone());

    // Welcome -> CouncilSelection
    assert!(controller.next().is_moved());

    // Council guard
    assert_eq!(
        controller.next().blocked_reason(),
        Some(&TransitionBlocked::NoCouncilSelected)
    );
    for id in ["hook-smith", "storyteller", "closer"] {
        assert_eq!(controller.toggle_council_member(&member(id)), SelectionChange::Added);
    }
    assert_eq!(
        controller.toggle_council_member(&member("proof-analyst")),
        SelectionChange::Ignored(SelectionIgnored::AtCapacity)
    );
    assert_eq!(controller.session().council().len(), 3);
    assert!(controller.next().is_moved());

    // Brief guard
    assert_eq!(controller.step(), WorkflowStep::InputCollection);
    assert!(!controller.next().is_moved());
    fill_brief(&mut controller);
    assert!(controller.next().is_moved());

    // Generation
    assert_eq!(controller.step(), WorkflowStep::Generation);
    let content = controller.generate().await.unwrap().clone();
    assert!(content.is_complete());
    assert_eq!(controller.step(), WorkflowStep::Review);

    let request = &generator.get_calls()[0];
    assert_eq!(request.industry, "home fitness");
    assert_eq!(request.brand_personality.as_deref(), Some("energetic"));
    assert_eq!(request.price_point.as_deref(), Some("$49"));
    assert_eq!(request.council_selection.len(), 3);

    // Review -> Export
    assert!(controller.next().is_moved());
    assert_eq!(controller.step(), WorkflowStep::Export);
    assert!(controller.quality_warnings().is_empty());

    // Guidance
    assert!(!controller.next_actions_unlocked());
    let outcomes = [
        CheckOutcome::Valid,
        CheckOutcome::NeedsRevision,
        CheckOutcome::Valid,
        CheckOutcome::Valid,
    ];
    let mut last = None;
    for outcome in outcomes {
        last = Some(controller.record_guidance(outcome).unwrap());
    }
    assert_eq!(last, Some(GuidanceProgress::Completed));
    assert!(controller.next_actions_unlocked());

    // Download
    match controller.hard_export().unwrap() {
        HardExport::Ready(artifact) => {
            assert_eq!(artifact.format, ExportFormat::PlainText);
            assert!(artifact.content.starts_with("HOOK:\n"));
            assert!(artifact.content.contains("\n\nCTA:\n"));
        }
        other => panic!("expected download to be ready, got {:?}", other),
    }

    // Quota consumed once
    let quota = controller.quota_status().await.unwrap();
    assert_eq!(quota.used, 1);
    assert_eq!(quota.remaining, Remaining::Finite(24));

    let events = controller.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, WorkflowEvent::GuidanceFinished { skipped: false, .. })));
}

// =============================================================================
// Review and Edit Offer
// =============================================================================

#[tokio::test]
async fn weak_copy_is_fixed_through_edit_offer() {
    let weak = MockCopyGenerator::sample_content()
        .with(CopySection::Hook, "A plain sentence")
        .with(CopySection::Cta, "click here");
    let usage = Arc::new(InMemoryUsageTracker::new(SubscriptionTier::Pro, 30));
    let mut controller = controller_with(MockCopyGenerator::new().with_response(weak), usage);

    controller.next();
    controller.toggle_council_member(&member("closer"));
    controller.next();
    fill_brief(&mut controller);
    controller.next();
    controller.generate().await.unwrap();
    controller.next();

    assert_eq!(
        controller.quality_warnings(),
        &[
            "Hook lacks urgency - missing question or exclamation.".to_string(),
            "Missing scarcity in CTA.".to_string(),
        ]
    );
    assert!(matches!(
        controller.hard_export().unwrap(),
        HardExport::Blocked { .. }
    ));
    assert!(controller.soft_export().is_ok());

    // Export -> Review, fix both sections, back to Export
    assert!(controller.edit_offer().is_moved());
    assert_eq!(controller.step(), WorkflowStep::Review);
    controller
        .edit_section(CopySection::Hook, "Ready to train at home?")
        .unwrap();
    let warnings = controller
        .edit_section(CopySection::Cta, "Claim your spot today")
        .unwrap();
    assert!(warnings.is_empty());
    controller.next();

    assert!(matches!(
        controller.hard_export().unwrap(),
        HardExport::Ready(_)
    ));
}

// =============================================================================
// Failure Paths
// =============================================================================

#[tokio::test]
async fn failure_then_retry_keeps_session_consistent() {
    let usage = Arc::new(InMemoryUsageTracker::new(SubscriptionTier::Starter, 30));
    let generator =
        MockCopyGenerator::new().with_error(CopyGeneratorError::malformed("missing cta"));
    let mut controller = controller_with(generator, usage.clone());

    controller.next();
    controller.toggle_council_member(&member("storyteller"));
    controller.next();
    fill_brief(&mut controller);
    controller.next();

    let err = controller.generate().await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Generation(GenerationError::Failed(CopyGeneratorError::MalformedResponse(_)))
    ));
    assert_eq!(controller.step(), WorkflowStep::Generation);
    assert!(controller.session().content().is_none());
    assert_eq!(usage.used(&user()), 0);

    controller.generate().await.unwrap();
    assert_eq!(controller.step(), WorkflowStep::Review);
    assert_eq!(usage.used(&user()), 1);
}

#[tokio::test]
async fn free_tier_runs_out_and_gets_upgrade_prompt() {
    let usage = Arc::new(InMemoryUsageTracker::new(SubscriptionTier::Free, 30));

    for _ in 0..3 {
        let mut controller = controller_with(MockCopyGenerator::new(), usage.clone());
        controller.next();
        controller.toggle_council_member(&member("closer"));
        controller.next();
        fill_brief(&mut controller);
        controller.next();
        controller.generate().await.unwrap();
    }

    let mut controller = controller_with(MockCopyGenerator::new(), usage.clone());
    controller.next();
    controller.toggle_council_member(&member("closer"));
    controller.next();
    fill_brief(&mut controller);
    controller.next();

    let quota = controller.quota_status().await.unwrap();
    assert!(quota.at_limit);
    assert_eq!(quota.percent, 100.0);

    match controller.generate().await.unwrap_err() {
        WorkflowError::Generation(GenerationError::QuotaExceeded { upgrade_message }) => {
            assert_eq!(
                upgrade_message.as_deref(),
                Some("You've used all 3 generations included in Free. Upgrade to Starter to keep generating.")
            );
        }
        other => panic!("expected quota error, got {:?}", other),
    }
}

#[tokio::test]
async fn shared_engine_rejects_concurrent_generation() {
    let gate = Arc::new(Notify::new());
    let engine = Arc::new(GenerationEngine::new(Arc::new(
        MockCopyGenerator::new().with_gate(gate.clone()),
    )));
    let usage = Arc::new(InMemoryUsageTracker::new(SubscriptionTier::Vault, 30));

    let mut first = WorkflowController::new(user(), engine.clone(), usage.clone(), 3).unwrap();
    let mut second = WorkflowController::new(user(), engine.clone(), usage.clone(), 3).unwrap();
    for controller in [&mut first, &mut second] {
        controller.next();
        controller.toggle_council_member(&member("brand-voice"));
        controller.next();
        fill_brief(controller);
        controller.next();
    }

    let pending = tokio::spawn(async move {
        let result = first.generate().await.map(|c| c.clone());
        (result, first)
    });
    while !engine.is_generating() {
        tokio::task::yield_now().await;
    }
    assert!(second.allowed_transitions().is_empty());

    let err = second.generate().await.unwrap_err();
    assert_eq!(err, WorkflowError::Generation(GenerationError::InProgress));
    assert_eq!(second.step(), WorkflowStep::Generation);

    gate.notify_one();
    let (result, first) = pending.await.unwrap();
    assert!(result.unwrap().is_complete());
    assert_eq!(first.step(), WorkflowStep::Review);

    let quota = first.quota_status().await.unwrap();
    assert_eq!(quota.remaining, Remaining::Unlimited);
}
