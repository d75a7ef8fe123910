//! HTTP question service provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use gwara_core::error::ProviderError;
use gwara_core::model::{QuestionRequest, RawQuestion};
use gwara_core::traits::QuestionProvider;

/// Public question service of the Greater Poland dialect quiz.
pub const DEFAULT_BASE_URL: &str = "https://frog01-20911.wykr.es/questions/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches questions with `GET {base_url}?questionAmount=N&questionLevel=L`.
pub struct HttpQuestionProvider {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpQuestionProvider {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base.to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QuestionProvider for HttpQuestionProvider {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(amount = request.amount, level = request.level))]
    async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<RawQuestion>, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("questionAmount", request.amount),
                ("questionLevel", request.level),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ProviderError::Network(format!(
                        "question service not reachable at {}",
                        self.base_url
                    ))
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status,
                message: body,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(self.timeout_secs)
            } else {
                ProviderError::Network(e.to_string())
            }
        })?;
        let questions: Vec<RawQuestion> = serde_json::from_str(&body)
            .map_err(|e| {
                ProviderError::MalformedResponse(format!("failed to parse questions: {e}"))
            })?;

        tracing::debug!(count = questions.len(), "question service responded");
        Ok(questions)
    }
}
