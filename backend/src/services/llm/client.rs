//! Gemini HTTP client

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::models::{GenerateContentRequest, GenerateContentResponse, LLMError};
use crate::config::LlmConfig;

/// Plain text completion. The only seam between the generator and the model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError>;
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Holds the API key, so it has no `Debug` impl.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self, LLMError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Build from `GOOGLE_API_KEY`. A missing key is a startup error.
    pub fn from_env(config: &LlmConfig) -> Result<Self, anyhow::Error> {
        Self::from_lookup(config, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(config: &LlmConfig, lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No Google API Key found. Please set the GOOGLE_API_KEY environment variable."
                )
            })?;
        Ok(Self::new(api_key, config)?)
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        let body = GenerateContentRequest::from_prompt(prompt, self.temperature);

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini");
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimited(error_body),
                _ => LLMError::ApiError(format!("HTTP {}: {}", status, error_body)),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ApiError(format!("Invalid Gemini response: {}", e)))?;
        parsed.into_text()
    }
}
