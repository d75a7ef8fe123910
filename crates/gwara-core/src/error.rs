//! Error types for question fetching and session operations.
//!
//! `ProviderError` lives in `gwara-core` so the controller can log and
//! classify fetch failures without knowing which provider produced them.

use thiserror::Error;

/// Errors that can occur while fetching questions from a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The service could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The service answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not a question list.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised by session operations on misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A fetch was requested while another one is still in flight.
    #[error("a question fetch is already in progress")]
    FetchInProgress,

    /// The answer refers to a question the session does not have.
    #[error("question index {index} out of range ({total} questions loaded)")]
    QuestionOutOfRange { index: usize, total: usize },
}
