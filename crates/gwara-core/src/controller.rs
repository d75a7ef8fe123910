//! Quiz session controller.
//!
//! Drives one quiz lifecycle: fetch and randomize questions, take answers,
//! pick the result image, reset. The session lives behind a mutex that is
//! never held across the provider call; the session's loading flag is what
//! keeps a second fetch from starting while one is in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::Instrument;

use crate::error::SessionError;
use crate::model::{OptionKey, QuestionRequest};
use crate::result::{select_result_image, ResultImage};
use crate::session::{AnswerOutcome, SessionState, SessionSummary};
use crate::shuffle::{randomize_questions, RandomSource, ThreadRandom};
use crate::traits::QuestionProvider;

/// How a fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// This many questions were loaded. Zero means the service had none.
    Loaded(usize),
    /// The provider failed; the error was logged and the quiz stays empty.
    Failed,
    /// The session was reset before the questions arrived.
    Discarded,
}

impl FetchOutcome {
    /// Whether the quiz can start.
    pub fn has_questions(self) -> bool {
        matches!(self, FetchOutcome::Loaded(n) if n > 0)
    }
}

/// Owns a session and the collaborators it needs.
pub struct QuizController {
    provider: Arc<dyn QuestionProvider>,
    session: Mutex<SessionState>,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl QuizController {
    /// Controller drawing randomness from the thread generator.
    pub fn new(provider: Arc<dyn QuestionProvider>) -> Self {
        Self::with_random(provider, Box::new(ThreadRandom))
    }

    pub fn with_random(provider: Arc<dyn QuestionProvider>, rng: Box<dyn RandomSource>) -> Self {
        Self {
            provider,
            session: Mutex::new(SessionState::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Request `amount` questions at `level` and install them shuffled.
    ///
    /// Values are passed to the provider unvalidated. Provider failures are
    /// logged and leave the question list empty; the only error returned is
    /// [`SessionError::FetchInProgress`]. Questions that arrive after a
    /// reset are dropped.
    pub async fn fetch_questions(
        &self,
        amount: u32,
        level: u32,
    ) -> Result<FetchOutcome, SessionError> {
        let request = QuestionRequest { amount, level };
        let session_id = {
            let mut session = self.lock_session();
            if let Err(e) = session.begin_fetch(request) {
                tracing::warn!(session = %session.id(), "fetch rejected: {e}");
                return Err(e);
            }
            session.id()
        };

        let span = tracing::info_span!("fetch", session = %session_id, amount, level);
        let result = async {
            tracing::info!(provider = self.provider.name(), "fetching questions");
            self.provider.fetch(&request).await
        }
        .instrument(span)
        .await;

        match result {
            Ok(raws) => {
                let questions = {
                    let mut rng = self.lock_rng();
                    randomize_questions(raws, &mut **rng)
                };
                let count = questions.len();
                if !self.lock_session().finish_fetch(session_id, questions) {
                    return Ok(FetchOutcome::Discarded);
                }
                tracing::info!(session = %session_id, count, "questions loaded");
                Ok(FetchOutcome::Loaded(count))
            }
            Err(e) => {
                tracing::error!(session = %session_id, "error fetching questions: {e}");
                self.lock_session().fail_fetch(session_id);
                Ok(FetchOutcome::Failed)
            }
        }
    }

    /// Record an answer; see [`SessionState::submit_answer`].
    pub fn submit_answer(
        &self,
        index: usize,
        key: OptionKey,
    ) -> Result<AnswerOutcome, SessionError> {
        self.lock_session().submit_answer(index, key)
    }

    /// Throw away the current attempt.
    pub fn reset_session(&self) {
        self.lock_session().reset();
    }

    /// Result image for the current score.
    pub fn result_image(&self) -> ResultImage {
        let (score, total) = {
            let session = self.lock_session();
            (session.score(), session.total())
        };
        let mut rng = self.lock_rng();
        select_result_image(score, total, &mut **rng)
    }

    pub fn summary(&self) -> SessionSummary {
        self.lock_session().summary()
    }

    /// Run `f` against a read-only view of the session.
    pub fn with_session<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.lock_session())
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.lock_session().clone()
    }

    // Every session update is applied under one lock acquisition, so a
    // poisoned lock still guards a consistent state.
    fn lock_session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_rng(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::error::ProviderError;
    use crate::model::{RawOptions, RawQuestion};
    use crate::session::Phase;
    use crate::shuffle::ScriptedRandom;

    fn raw(word: &str, a: &str, b: &str, c: &str) -> RawQuestion {
        RawQuestion {
            word: word.into(),
            options: RawOptions {
                a: a.into(),
                b: b.into(),
                c: c.into(),
            },
        }
    }

    struct StaticProvider {
        questions: Vec<RawQuestion>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl QuestionProvider for StaticProvider {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(
            &self,
            request: &QuestionRequest,
        ) -> Result<Vec<RawQuestion>, ProviderError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self
                .questions
                .iter()
                .take(request.amount as usize)
                .cloned()
                .collect())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl QuestionProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _: &QuestionRequest) -> Result<Vec<RawQuestion>, ProviderError> {
            Err(ProviderError::Network("connection refused".into()))
        }
    }

    /// Blocks every fetch until released.
    struct GatedProvider {
        started: Notify,
        release: Notify,
        calls: AtomicU32,
    }

    impl GatedProvider {
        fn new() -> Self {
            Self {
                started: Notify::new(),
                release: Notify::new(),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl QuestionProvider for GatedProvider {
        fn name(&self) -> &str {
            "gated"
        }

        async fn fetch(&self, _: &QuestionRequest) -> Result<Vec<RawQuestion>, ProviderError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.started.notify_one();
            self.release.notified().await;
            Ok(vec![raw("pyra", "ziemniak", "gruszka", "kamień")])
        }
    }

    fn two_questions() -> Arc<StaticProvider> {
        Arc::new(StaticProvider {
            questions: vec![raw("pyra", "X", "Y", "Z"), raw("rogal", "P", "Q", "R")],
            calls: AtomicU32::new(0),
        })
    }

    #[tokio::test]
    async fn fetch_answer_and_score() {
        let provider = two_questions();
        let controller =
            QuizController::with_random(provider.clone(), Box::new(ScriptedRandom::new(&[0, 0])));

        let outcome = controller.fetch_questions(2, 1).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Loaded(2));
        assert!(outcome.has_questions());
        assert_eq!(provider.calls.load(Ordering::Relaxed), 1);

        let session = controller.snapshot();
        assert_eq!(session.questions()[0].correct_option, "X");
        assert_eq!(session.questions()[1].correct_option, "P");
        // [X,Y,Z] under script [0,0] becomes [Y,Z,X]
        assert_eq!(session.questions()[0].correct_key(), Some(OptionKey::C));

        controller.submit_answer(0, OptionKey::C).unwrap();
        controller.submit_answer(1, OptionKey::C).unwrap();

        let summary = controller.summary();
        assert_eq!(summary.score, 2);
        assert!(summary.completed);
        assert!(!controller.result_image().is_failure());
    }

    #[tokio::test]
    async fn failed_fetch_leaves_empty_quiz() {
        let controller = QuizController::new(Arc::new(FailingProvider));
        let outcome = controller.fetch_questions(3, 2).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(!outcome.has_questions());

        controller.with_session(|s| {
            assert_eq!(s.phase(), Phase::Empty);
            assert!(!s.is_loading());
            assert_eq!(s.amount(), 3);
            assert_eq!(s.level(), 2);
        });
        // a failed fetch does not block the next one
        assert!(controller.fetch_questions(1, 1).await.is_ok());
    }

    #[tokio::test]
    async fn concurrent_fetch_is_rejected() {
        let provider = Arc::new(GatedProvider::new());
        let controller = QuizController::new(provider.clone());

        let first = controller.fetch_questions(1, 1);
        let second = async {
            provider.started.notified().await;
            assert!(controller.with_session(|s| s.is_loading()));
            let rejected = controller.fetch_questions(1, 1).await;
            provider.release.notify_one();
            rejected
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, Ok(FetchOutcome::Loaded(1)));
        assert_eq!(second, Err(SessionError::FetchInProgress));
        assert_eq!(controller.with_session(|s| s.total()), 1);
    }

    #[tokio::test]
    async fn reset_during_fetch_drops_stale_questions() {
        let provider = Arc::new(GatedProvider::new());
        let controller = QuizController::new(provider.clone());

        let first = controller.fetch_questions(3, 2);
        let during = async {
            provider.started.notified().await;
            controller.reset_session();
            let state = controller.with_session(|s| (s.phase(), s.amount(), s.level()));
            let second = controller.fetch_questions(1, 1).await;
            provider.release.notify_one();
            (state, second)
        };
        let (first, (state, second)) = tokio::join!(first, during);

        assert_eq!(state, (Phase::Loading, 1, 1));
        assert_eq!(second, Err(SessionError::FetchInProgress));
        assert_eq!(first, Ok(FetchOutcome::Discarded));
        assert!(!first.unwrap().has_questions());
        assert_eq!(provider.calls.load(Ordering::Relaxed), 1);
        controller.with_session(|s| {
            assert_eq!(s.phase(), Phase::Empty);
            assert_eq!(s.total(), 0);
            assert_eq!(s.amount(), 1);
            assert_eq!(s.level(), 1);
            assert_eq!(s.score(), 0);
            assert!(!s.is_completed());
        });

        // guard is released once the stale fetch has finished
        provider.release.notify_one();
        assert_eq!(
            controller.fetch_questions(1, 1).await,
            Ok(FetchOutcome::Loaded(1))
        );
        assert_eq!(provider.calls.load(Ordering::Relaxed), 2);
        assert_eq!(controller.with_session(|s| s.total()), 1);
    }

    #[tokio::test]
    async fn reset_after_completion() {
        let controller = QuizController::new(two_questions());
        controller.fetch_questions(1, 3).await.unwrap();
        controller.submit_answer(0, OptionKey::A).unwrap();
        assert!(controller.with_session(|s| s.is_completed()));

        controller.reset_session();
        controller.with_session(|s| {
            assert_eq!(s.phase(), Phase::Empty);
            assert_eq!(s.amount(), 1);
            assert_eq!(s.level(), 1);
            assert_eq!(s.score(), 0);
        });
    }

    #[tokio::test]
    async fn low_score_shows_failure_image() {
        let provider = Arc::new(StaticProvider {
            questions: vec![
                raw("a", "1", "2", "3"),
                raw("b", "1", "2", "3"),
                raw("c", "1", "2", "3"),
                raw("d", "1", "2", "3"),
            ],
            calls: AtomicU32::new(0),
        });
        // identity script keeps the correct answer under `a`
        let controller =
            QuizController::with_random(provider, Box::new(ScriptedRandom::new(&[2, 1])));
        controller.fetch_questions(4, 1).await.unwrap();

        controller.submit_answer(0, OptionKey::A).unwrap();
        for index in 1..4 {
            controller.submit_answer(index, OptionKey::B).unwrap();
        }
        assert_eq!(controller.summary().score, 1);
        assert_eq!(controller.result_image(), ResultImage::Blad);
    }

    #[tokio::test]
    async fn empty_result_image_before_any_fetch() {
        let controller = QuizController::new(two_questions());
        assert_eq!(controller.result_image(), ResultImage::Blad);
        assert_eq!(controller.provider_name(), "static");
    }
}
