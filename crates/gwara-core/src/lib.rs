//! gwara-core: Quiz session logic, randomization, and scoring.
//!
//! This crate defines the question model, the session state with its
//! answer-tracking invariants, the option shuffler, result image selection,
//! and the controller that drives one quiz lifecycle against a
//! [`traits::QuestionProvider`].

pub mod controller;
pub mod error;
pub mod model;
pub mod result;
pub mod session;
pub mod shuffle;
pub mod traits;

pub use controller::{FetchOutcome, QuizController};
pub use error::{ProviderError, SessionError};
pub use model::{OptionKey, Question, QuestionRequest, RawOptions, RawQuestion};
pub use result::{select_result_image, ResultImage};
pub use session::{AnswerOutcome, OptionStatus, Phase, SessionState, SessionSummary};
pub use shuffle::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use traits::QuestionProvider;
