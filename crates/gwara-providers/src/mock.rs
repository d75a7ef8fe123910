//! Mock provider for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use gwara_core::error::ProviderError;
use gwara_core::model::{QuestionRequest, RawOptions, RawQuestion};
use gwara_core::traits::QuestionProvider;

enum MockBehavior {
    Questions(Vec<RawQuestion>),
    Fail { status: u16, message: String },
}

/// A question provider that never leaves the process.
///
/// Serves up to `amount` questions from a fixed bank, or always fails.
pub struct MockProvider {
    behavior: MockBehavior,
    /// Artificial latency before answering.
    delay: Option<Duration>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<QuestionRequest>>,
}

impl MockProvider {
    /// Create a mock serving from the given question bank.
    pub fn new(questions: Vec<RawQuestion>) -> Self {
        Self::with_behavior(MockBehavior::Questions(questions))
    }

    /// Create a mock whose every fetch fails with an API error.
    pub fn failing(status: u16, message: &str) -> Self {
        Self::with_behavior(MockBehavior::Fail {
            status,
            message: message.to_string(),
        })
    }

    /// Bank of three short dialect questions.
    pub fn sample() -> Self {
        Self::new(sample_questions())
    }

    /// Delay every answer by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<QuestionRequest> {
        *self
            .last_request
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Three Greater Poland dialect words with the correct meaning under `a`.
pub fn sample_questions() -> Vec<RawQuestion> {
    let question = |word: &str, a: &str, b: &str, c: &str| RawQuestion {
        word: word.to_string(),
        options: RawOptions {
            a: a.to_string(),
            b: b.to_string(),
            c: c.to_string(),
        },
    };
    vec![
        question("pyra", "ziemniak", "gruszka", "kamień"),
        question("szneka z glancem", "drożdżówka z lukrem", "ślimak", "sanki"),
        question("tej", "hej, ty", "herbata", "tamten"),
    ]
}

#[async_trait]
impl QuestionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<RawQuestion>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(*request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::Questions(bank) => Ok(bank
                .iter()
                .take(request.amount as usize)
                .cloned()
                .collect()),
            MockBehavior::Fail { status, message } => Err(ProviderError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
