//! The question provider seam.
//!
//! Implemented by the `gwara-providers` crate (HTTP service, mock).

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::model::{QuestionRequest, RawQuestion};

/// Source of quiz questions.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Human-readable provider name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch up to `request.amount` questions at `request.level`.
    ///
    /// Questions come back in service order with the correct answer under
    /// option `a`.
    async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<RawQuestion>, ProviderError>;
}
