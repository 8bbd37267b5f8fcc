//! Mock Copy Generator for testing.
//!
//! Configurable CopyGenerator that never touches the network.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection
//! - Simulated delays, or a gate the test opens explicitly
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockCopyGenerator::new()
//!     .with_error(CopyGeneratorError::unavailable("down"))
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::sleep;

use crate::domain::copy::{CopySection, SectionMap};
use crate::ports::{CopyGenerator, CopyGeneratorError, GenerationRequest};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(SectionMap),
    Error(CopyGeneratorError),
}

/// Mock copy generator for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct MockCopyGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    delay: Duration,
    gate: Option<Arc<Notify>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockCopyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy that passes every quality rule. Returned when the queue is empty.
    pub fn sample_content() -> SectionMap {
        SectionMap::new()
            .with(CopySection::Hook, "Still losing mornings to chaos?")
            .with(CopySection::Problem, "Every day starts behind schedule.")
            .with(CopySection::Story, "One routine change transformed my week.")
            .with(CopySection::Proof, "1,200 parents reclaimed 5 hours in 30 days.")
            .with(CopySection::Offer, "The Calm Mornings system.")
            .with(CopySection::Cta, "Join today, spots are limited.")
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: SectionMap) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: CopyGeneratorError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Holds every call until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(Self::sample_content()))
    }
}

#[async_trait]
impl CopyGenerator for MockCopyGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<SectionMap, CopyGeneratorError> {
        self.calls.lock().unwrap().push(request);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::copy::quality_gate;
    use crate::domain::council::CouncilSelection;
    use crate::domain::workflow::CampaignBrief;

    fn request() -> GenerationRequest {
        GenerationRequest::from_brief(&CampaignBrief::default(), &CouncilSelection::default())
    }

    #[test]
    fn sample_content_passes_the_gate() {
        let content = MockCopyGenerator::sample_content();
        assert!(content.is_complete());
        assert!(quality_gate::validate(&content).is_empty());
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let first = SectionMap::new().with(CopySection::Hook, "first");
        let generator = MockCopyGenerator::new()
            .with_response(first.clone())
            .with_error(CopyGeneratorError::unavailable("down"));

        assert_eq!(generator.generate(request()).await.unwrap(), first);
        assert_eq!(
            generator.generate(request()).await.unwrap_err(),
            CopyGeneratorError::unavailable("down")
        );
        assert_eq!(
            generator.generate(request()).await.unwrap(),
            MockCopyGenerator::sample_content()
        );
    }

    #[tokio::test]
    async fn tracks_calls() {
        let generator = MockCopyGenerator::new();
        generator.generate(request()).await.unwrap();
        generator.generate(request()).await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.get_calls()[0], request());
    }

    #[tokio::test]
    async fn gate_holds_until_notified() {
        let gate = Arc::new(Notify::new());
        let generator = MockCopyGenerator::new().with_gate(gate.clone());

        let pending = tokio::spawn({
            let generator = generator.clone();
            async move { generator.generate(request()).await }
        });
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        gate.notify_one();
        assert!(pending.await.unwrap().is_ok());
    }
}
