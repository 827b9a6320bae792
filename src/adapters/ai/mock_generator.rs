//! Mock TextGenerator for development and tests.
//!
//! Configurable to return queued responses, simulate latency, or inject
//! errors, so augmenter behavior can be exercised without a real provider.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GenerationRequest, TextGenerator};

/// A queued mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    Success(String),
    Timeout { timeout_secs: u32 },
    Unavailable(String),
}

/// Mock generator returning queued responses in order.
///
/// An empty queue repeats the last configured response; a never-configured
/// generator fails as unavailable.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    last: Arc<Mutex<Option<MockOutcome>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockTextGenerator {
    /// Creates an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockOutcome::Success(content.into()))
    }

    /// Queues a timeout error.
    pub fn with_timeout(self, timeout_secs: u32) -> Self {
        self.push(MockOutcome::Timeout { timeout_secs })
    }

    /// Queues an unavailable error.
    pub fn with_unavailable(self, message: impl Into<String>) -> Self {
        self.push(MockOutcome::Unavailable(message.into()))
    }

    /// Adds simulated latency before each response.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of generate calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(self, outcome: MockOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome.clone());
        *self.last.lock().unwrap() = Some(outcome);
        self
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let outcome = {
            let mut outcomes = self.outcomes.lock().unwrap();
            outcomes
                .pop_front()
                .or_else(|| self.last.lock().unwrap().clone())
        };

        match outcome {
            Some(MockOutcome::Success(content)) => Ok(content),
            Some(MockOutcome::Timeout { timeout_secs }) => {
                Err(GenerationError::Timeout { timeout_secs })
            }
            Some(MockOutcome::Unavailable(message)) => Err(GenerationError::unavailable(message)),
            None => Err(GenerationError::unavailable("no mock response configured")),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let mock = MockTextGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(
            mock.generate(GenerationRequest::new()).await.unwrap(),
            "first"
        );
        assert_eq!(
            mock.generate(GenerationRequest::new()).await.unwrap(),
            "second"
        );
        // Exhausted queue repeats the last response.
        assert_eq!(
            mock.generate(GenerationRequest::new()).await.unwrap(),
            "second"
        );
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn unconfigured_mock_fails_unavailable() {
        let mock = MockTextGenerator::new();
        let err = mock.generate(GenerationRequest::new()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn injected_timeout_surfaces() {
        let mock = MockTextGenerator::new().with_timeout(18);
        let err = mock.generate(GenerationRequest::new()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout { .. }));
    }
}
