//! In-memory state of one quiz attempt.
//!
//! All mutation goes through methods so the answer bookkeeping stays
//! consistent: the selected and correct maps share their key set, the
//! first answer to a question is final, `score` counts the correct
//! entries, and `completed` flips once every question has an answer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{OptionKey, Question, QuestionRequest, DEFAULT_AMOUNT, DEFAULT_LEVEL};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No questions loaded; the start form is showing.
    Empty,
    /// A fetch is in flight.
    Loading,
    /// Questions are loaded and some are still unanswered.
    InProgress,
    /// Every question has an answer.
    Completed,
}

/// What happened to a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer was recorded.
    Recorded { correct: bool },
    /// The question already had an answer; nothing changed.
    AlreadyAnswered,
}

/// How an option should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionStatus {
    Unselected,
    Correct,
    Incorrect,
}

/// State of a single quiz attempt.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    amount: u32,
    level: u32,
    questions: Vec<Question>,
    selected_answers: BTreeMap<usize, OptionKey>,
    correct_answers: BTreeMap<usize, bool>,
    score: usize,
    completed: bool,
    loading: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: DEFAULT_AMOUNT,
            level: DEFAULT_LEVEL,
            questions: Vec::new(),
            selected_answers: BTreeMap::new(),
            correct_answers: BTreeMap::new(),
            score: 0,
            completed: false,
            loading: false,
            started_at: None,
            completed_at: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Question count and level as they would be sent to the service.
    pub fn request(&self) -> QuestionRequest {
        QuestionRequest {
            amount: self.amount,
            level: self.level,
        }
    }

    pub fn set_amount(&mut self, amount: u32) {
        self.amount = amount;
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selected_answers(&self) -> &BTreeMap<usize, OptionKey> {
        &self.selected_answers
    }

    pub fn correct_answers(&self) -> &BTreeMap<usize, bool> {
        &self.correct_answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.questions.is_empty() {
            Phase::Empty
        } else if self.completed {
            Phase::Completed
        } else {
            Phase::InProgress
        }
    }

    /// Mark a fetch as in flight and clear the previous attempt.
    ///
    /// Fails with [`SessionError::FetchInProgress`] while another fetch has
    /// not finished; the state is left untouched in that case.
    pub fn begin_fetch(&mut self, request: QuestionRequest) -> Result<(), SessionError> {
        if self.loading {
            return Err(SessionError::FetchInProgress);
        }
        self.loading = true;
        self.amount = request.amount;
        self.level = request.level;
        self.questions.clear();
        self.clear_answers();
        Ok(())
    }

    /// Install questions fetched for session `fetched_for` and leave the
    /// loading state.
    ///
    /// If the session was reset while the fetch was in flight its id no
    /// longer matches; the questions are dropped and `false` is returned.
    pub fn finish_fetch(&mut self, fetched_for: Uuid, questions: Vec<Question>) -> bool {
        self.loading = false;
        if fetched_for != self.id {
            tracing::debug!(
                session = %self.id,
                stale = %fetched_for,
                "dropping questions fetched before reset"
            );
            return false;
        }
        self.started_at = (!questions.is_empty()).then(Utc::now);
        self.questions = questions;
        true
    }

    /// Leave the loading state after a failed fetch for `fetched_for`.
    pub fn fail_fetch(&mut self, fetched_for: Uuid) {
        self.loading = false;
        if fetched_for == self.id {
            self.questions.clear();
        }
    }

    /// Record `key` as the answer to question `index`.
    ///
    /// The first answer to a question is final: later submissions return
    /// [`AnswerOutcome::AlreadyAnswered`] and change nothing.
    pub fn submit_answer(
        &mut self,
        index: usize,
        key: OptionKey,
    ) -> Result<AnswerOutcome, SessionError> {
        let Some(question) = self.questions.get(index) else {
            return Err(SessionError::QuestionOutOfRange {
                index,
                total: self.questions.len(),
            });
        };
        if self.selected_answers.contains_key(&index) {
            return Ok(AnswerOutcome::AlreadyAnswered);
        }

        let correct = question.is_correct(key);
        self.selected_answers.insert(index, key);
        self.correct_answers.insert(index, correct);
        if correct {
            self.score += 1;
        }
        tracing::debug!(session = %self.id, index, %key, correct, "answer recorded");

        if self.selected_answers.len() == self.questions.len() {
            self.completed = true;
            self.completed_at = Some(Utc::now());
            tracing::info!(
                session = %self.id,
                score = self.score,
                total = self.questions.len(),
                "quiz completed"
            );
        }

        Ok(AnswerOutcome::Recorded { correct })
    }

    /// Throw the attempt away and start over with default settings.
    ///
    /// A fetch still in flight keeps the loading flag until it completes,
    /// so no second fetch can start alongside it. Its result is dropped.
    pub fn reset(&mut self) {
        let loading = self.loading;
        *self = Self::default();
        self.loading = loading;
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.selected_answers.contains_key(&index)
    }

    /// First question without an answer, in question order.
    pub fn next_unanswered(&self) -> Option<usize> {
        (0..self.questions.len()).find(|index| !self.is_answered(*index))
    }

    /// Highlight for option `key` of question `index`.
    pub fn option_status(&self, index: usize, key: OptionKey) -> OptionStatus {
        match (
            self.selected_answers.get(&index),
            self.correct_answers.get(&index),
        ) {
            (Some(selected), Some(true)) if *selected == key => OptionStatus::Correct,
            (Some(selected), Some(false)) if *selected == key => OptionStatus::Incorrect,
            _ => OptionStatus::Unselected,
        }
    }

    /// Snapshot of the attempt for display or JSON output.
    pub fn summary(&self) -> SessionSummary {
        let total = self.questions.len();
        let answers = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let chosen = self.selected_answers.get(&index).copied();
                AnswerRow {
                    index,
                    word: question.word.clone(),
                    chosen,
                    chosen_value: chosen.and_then(|k| question.option(k)).map(str::to_string),
                    correct_value: question.correct_option.clone(),
                    correct: self.correct_answers.get(&index).copied(),
                }
            })
            .collect();
        let elapsed_ms = match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds().max(0) as u64),
            _ => None,
        };

        SessionSummary {
            session_id: self.id,
            score: self.score,
            total,
            ratio: if total == 0 {
                0.0
            } else {
                self.score as f64 / total as f64
            },
            completed: self.completed,
            answers,
            started_at: self.started_at,
            completed_at: self.completed_at,
            elapsed_ms,
        }
    }

    fn clear_answers(&mut self) {
        self.selected_answers.clear();
        self.correct_answers.clear();
        self.score = 0;
        self.completed = false;
        self.started_at = None;
        self.completed_at = None;
    }
}

/// One row of a [`SessionSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRow {
    pub index: usize,
    pub word: String,
    pub chosen: Option<OptionKey>,
    pub chosen_value: Option<String>,
    pub correct_value: String,
    pub correct: Option<bool>,
}

/// Snapshot of an attempt's score and answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub score: usize,
    pub total: usize,
    /// `score / total`, 0.0 for an empty quiz.
    pub ratio: f64,
    pub completed: bool,
    pub answers: Vec<AnswerRow>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Time from questions arriving to the last answer.
    pub elapsed_ms: Option<u64>,
}
