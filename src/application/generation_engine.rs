//! GenerationEngine - single-flight wrapper around the copy generator.
//!
//! At most one generation runs per engine. A call made while another is
//! pending is rejected with `GenerationError::InProgress` instead of being
//! queued. The engine never touches the session: callers apply the returned
//! content themselves, so a failed call leaves prior content untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::copy::SectionMap;
use crate::domain::workflow::WorkflowSession;
use crate::ports::{CopyGenerator, CopyGeneratorError, GenerationRequest};

/// Errors surfaced by a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Another generation is still pending.
    #[error("a generation is already in progress")]
    InProgress,

    /// The tier's quota is spent. Carries the upgrade prompt when one exists.
    #[error("generation quota exceeded")]
    QuotaExceeded { upgrade_message: Option<String> },

    /// The collaborator failed. Session state is unchanged and the user
    /// may retry; the inner error is kept for logging.
    #[error("generation failed: {0}")]
    Failed(CopyGeneratorError),
}

impl GenerationError {
    /// Returns true if the user can simply try again.
    ///
    /// Every collaborator failure is retryable from the user's side, even
    /// when a blind transport retry would not help.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::InProgress => true,
            GenerationError::QuotaExceeded { .. } => false,
            GenerationError::Failed(_) => true,
        }
    }
}

impl From<CopyGeneratorError> for GenerationError {
    fn from(err: CopyGeneratorError) -> Self {
        if err.is_quota_exceeded() {
            GenerationError::QuotaExceeded { upgrade_message: None }
        } else {
            GenerationError::Failed(err)
        }
    }
}

/// Clears the in-flight flag when the call finishes, however it finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs generation requests one at a time.
pub struct GenerationEngine {
    generator: Arc<dyn CopyGenerator>,
    timeout: Option<Duration>,
    in_flight: AtomicBool,
}

impl GenerationEngine {
    pub fn new(generator: Arc<dyn CopyGenerator>) -> Self {
        Self {
            generator,
            timeout: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Bounds each call. Without this the engine waits as long as the
    /// collaborator does.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// True while a generation is pending.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Generates copy for the session's brief and council.
    ///
    /// Returns a complete `SectionMap` or an error; never partial content.
    #[tracing::instrument(skip_all, fields(session_id = %session.id()))]
    pub async fn generate(&self, session: &WorkflowSession) -> Result<SectionMap, GenerationError> {
        let _guard = self.try_acquire().ok_or_else(|| {
            tracing::debug!("generation rejected, another call is pending");
            GenerationError::InProgress
        })?;

        let request = GenerationRequest::from_brief(session.brief(), session.council());
        let content = match self.call_generator(request).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(error = %err, retryable = err.is_retryable(), "generation failed");
                return Err(err.into());
            }
        };

        let missing = content.missing();
        if !missing.is_empty() {
            tracing::warn!(?missing, "generator returned incomplete copy");
            return Err(GenerationError::Failed(CopyGeneratorError::malformed(
                format!("incomplete copy, {} section(s) missing", missing.len()),
            )));
        }

        tracing::info!("generation succeeded");
        Ok(content)
    }

    async fn call_generator(
        &self,
        request: GenerationRequest,
    ) -> Result<SectionMap, CopyGeneratorError> {
        match self.timeout {
            None => self.generator.generate(request).await,
            Some(limit) => tokio::time::timeout(limit, self.generator.generate(request))
                .await
                .unwrap_or(Err(CopyGeneratorError::Timeout {
                    timeout_secs: limit.as_secs(),
                })),
        }
    }

    fn try_acquire(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::generation::MockCopyGenerator;
    use crate::domain::copy::CopySection;
    use tokio::sync::Notify;

    fn engine(generator: MockCopyGenerator) -> GenerationEngine {
        GenerationEngine::new(Arc::new(generator))
    }

    async fn wait_until_generating(engine: &GenerationEngine) {
        while !engine.is_generating() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn returns_complete_content() {
        let engine = engine(MockCopyGenerator::new());
        let content = engine.generate(&WorkflowSession::default()).await.unwrap();

        assert!(content.is_complete());
        assert!(!engine.is_generating());
    }

    #[tokio::test]
    async fn second_call_while_pending_is_rejected() {
        let gate = Arc::new(Notify::new());
        let engine = Arc::new(engine(MockCopyGenerator::new().with_gate(gate.clone())));
        let session = WorkflowSession::default();

        let first = tokio::spawn({
            let engine = engine.clone();
            let session = session.clone();
            async move { engine.generate(&session).await }
        });
        wait_until_generating(&engine).await;

        let second = engine.generate(&session).await;
        assert_eq!(second, Err(GenerationError::InProgress));

        gate.notify_one();
        let first = first.await.unwrap();
        assert!(first.unwrap().is_complete());
        assert!(!engine.is_generating());
    }

    #[tokio::test]
    async fn flag_is_released_after_failure() {
        let engine = engine(
            MockCopyGenerator::new().with_error(CopyGeneratorError::unavailable("down")),
        );
        let session = WorkflowSession::default();

        let err = engine.generate(&session).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::Failed(CopyGeneratorError::unavailable("down"))
        );
        assert!(err.is_retryable());
        assert!(engine.generate(&session).await.is_ok());
    }

    #[tokio::test]
    async fn quota_rejection_is_distinct_from_failure() {
        let engine = engine(
            MockCopyGenerator::new().with_error(CopyGeneratorError::quota_exceeded("limit")),
        );

        let err = engine.generate(&WorkflowSession::default()).await.unwrap_err();

        assert_eq!(err, GenerationError::QuotaExceeded { upgrade_message: None });
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn incomplete_copy_is_a_failure() {
        let partial = SectionMap::new().with(CopySection::Hook, "Hi!");
        let engine = engine(MockCopyGenerator::new().with_response(partial));

        let err = engine.generate(&WorkflowSession::default()).await.unwrap_err();

        assert!(matches!(
            err,
            GenerationError::Failed(CopyGeneratorError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn malformed_and_rejected_failures_are_retryable() {
        for failure in [
            CopyGeneratorError::malformed("bad json"),
            CopyGeneratorError::rejected("model overloaded"),
            CopyGeneratorError::AuthenticationFailed,
        ] {
            let engine = engine(MockCopyGenerator::new().with_error(failure.clone()));

            let err = engine.generate(&WorkflowSession::default()).await.unwrap_err();

            assert_eq!(err, GenerationError::Failed(failure));
            assert!(err.is_retryable());
        }
    }

    #[tokio::test]
    async fn incomplete_copy_failure_is_retryable() {
        let partial = SectionMap::new().with(CopySection::Cta, "Buy now");
        let engine = engine(MockCopyGenerator::new().with_response(partial));

        let err = engine.generate(&WorkflowSession::default()).await.unwrap_err();

        assert!(err.is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_maps_to_retryable_failure() {
        let engine = engine(MockCopyGenerator::new().with_delay(Duration::from_secs(120)))
            .with_timeout(Duration::from_secs(5));

        let err = engine.generate(&WorkflowSession::default()).await.unwrap_err();

        assert_eq!(
            err,
            GenerationError::Failed(CopyGeneratorError::Timeout { timeout_secs: 5 })
        );
        assert!(err.is_retryable());
        assert!(!engine.is_generating());
    }
}
