//! Translation relay
//!
//! [`AzureTranslator`] talks to Azure Translator v3 one string at a time.
//! [`TranslationRelay`] fans a reply out to every supported locale and
//! isolates per-locale failures.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::TranslatorConfig;
use crate::models::{SUPPORTED_LANGUAGES, StructuredReply, TranslatedFields, TranslationBundle};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Azure Translator API key or endpoint is not set in the environment variables.")]
    NotConfigured,

    #[error("Azure Translator API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected Azure Translator response: {0}")]
    MalformedResponse(String),

    #[error("Azure Translator request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError>;
}

#[derive(Clone)]
pub struct AzureCredentials {
    pub key: String,
    pub endpoint: String,
}

impl AzureCredentials {
    fn from_env() -> Option<Self> {
        let key = std::env::var("AZURE_TRANSLATOR_KEY").ok().filter(|v| !v.is_empty())?;
        let endpoint = std::env::var("AZURE_TRANSLATOR_ENDPOINT").ok().filter(|v| !v.is_empty())?;
        Some(Self { key, endpoint })
    }
}

enum CredentialSource {
    /// Read `AZURE_TRANSLATOR_KEY` / `AZURE_TRANSLATOR_ENDPOINT` on every call
    Environment,
    Fixed(Option<AzureCredentials>),
}

pub struct AzureTranslator {
    http: reqwest::Client,
    config: TranslatorConfig,
    credentials: CredentialSource,
}

impl AzureTranslator {
    /// Credentials are looked up lazily, so a missing key only fails the
    /// calls that need it.
    pub fn from_env(config: TranslatorConfig) -> Self {
        Self { http: reqwest::Client::new(), config, credentials: CredentialSource::Environment }
    }

    pub fn with_credentials(
        config: TranslatorConfig,
        credentials: Option<AzureCredentials>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credentials: CredentialSource::Fixed(credentials),
        }
    }

    fn credentials(&self) -> Result<AzureCredentials, TranslateError> {
        match &self.credentials {
            CredentialSource::Environment => AzureCredentials::from_env(),
            CredentialSource::Fixed(creds) => creds.clone(),
        }
        .ok_or(TranslateError::NotConfigured)
    }
}

#[derive(Serialize)]
struct TranslateItem<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct TranslateResult {
    #[serde(default)]
    translations: Vec<TranslationText>,
}

#[derive(Deserialize)]
struct TranslationText {
    text: String,
}

#[async_trait]
impl Translator for AzureTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let creds = self.credentials()?;
        let url = format!("{}/translate", creds.endpoint.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .query(&[("api-version", self.config.api_version.as_str()), ("to", target_language)])
            .header("Ocp-Apim-Subscription-Key", &creds.key)
            .header("Ocp-Apim-Subscription-Region", &self.config.region)
            .json(&[TranslateItem { text }])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(TranslateError::Api { status: status.as_u16(), body });
        }

        let results: Vec<TranslateResult> = serde_json::from_str(&body)
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;
        results
            .into_iter()
            .next()
            .and_then(|r| r.translations.into_iter().next())
            .map(|t| t.text)
            .ok_or_else(|| {
                TranslateError::MalformedResponse("no translations returned".to_string())
            })
    }
}

/// Sequential fan-out of reply fields over the supported locales.
#[derive(Clone)]
pub struct TranslationRelay {
    translator: Arc<dyn Translator>,
}

impl TranslationRelay {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translate the three user-facing fields into one locale, stopping at
    /// the first failure.
    pub async fn translate_fields(
        &self,
        translation: &str,
        explanation: &str,
        story: &str,
        target_language: &str,
    ) -> Result<TranslatedFields, TranslateError> {
        Ok(TranslatedFields {
            translation: self.translator.translate(translation, target_language).await?,
            explanation: self.translator.translate(explanation, target_language).await?,
            story: self.translator.translate(story, target_language).await?,
        })
    }

    /// Every supported locale gets an entry; a failing locale holds the
    /// sentinel text and never affects the others.
    pub async fn translate_reply(&self, reply: &StructuredReply) -> TranslationBundle {
        let mut bundle = TranslationBundle::new();

        for lang in SUPPORTED_LANGUAGES {
            let fields = match self
                .translate_fields(reply.translation(), reply.explanation(), reply.story(), lang)
                .await
            {
                Ok(fields) => fields,
                Err(e) => {
                    tracing::error!("Error translating to {}: {}", lang, e);
                    TranslatedFields::failed()
                },
            };
            bundle.insert(lang.to_string(), fields);
        }

        bundle
    }
}
