//! Remote text translation client.
//!
//! Stateless request/response wrapper: one input text in, one translated
//! string out. No retries here — retry policy, if any, belongs to the caller.

use crate::defaults;
use crate::error::{ParleyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Trait for text translation.
///
/// This trait allows swapping implementations (real endpoint vs mock).
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`.
    ///
    /// Returns the translated string, or the original text unchanged when the
    /// response carries no entry for the requested language (identity
    /// fallback — a missing language entry is not an error).
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

/// Single item of the batch request body: `[{"Text": "..."}]`.
#[derive(Debug, Serialize)]
struct TranslateRequestItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

/// Per-input result: holds one translation per requested target language.
#[derive(Debug, Deserialize)]
struct TranslationItem {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
    to: String,
}

/// Picks the translation matching `target` exactly, falling back to the
/// original input when no entry matches.
fn pick_translation(items: Vec<TranslationItem>, target: &str, original: &str) -> String {
    items
        .into_iter()
        .next()
        .map(|item| item.translations)
        .unwrap_or_default()
        .into_iter()
        .find(|t| t.to == target)
        .map(|t| t.text)
        .unwrap_or_else(|| original.to_string())
}

/// Translation client backed by the cognitive translator REST endpoint.
pub struct AzureTranslator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl AzureTranslator {
    /// Creates a client for the default public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: defaults::TRANSLATOR_ENDPOINT.to_string(),
        }
    }

    /// Overrides the endpoint base URL (tests, sovereign-cloud deployments).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait::async_trait]
impl Translator for AzureTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let url = format!(
            "{}/translate?api-version={}&to={}",
            self.endpoint,
            defaults::TRANSLATOR_API_VERSION,
            target_language
        );

        let body = [TranslateRequestItem { text }];
        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ParleyError::Transport {
                message: format!("translation request failed: {e}"),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ParleyError::Auth {
                message: format!("translation endpoint rejected credentials (HTTP {status})"),
            });
        }
        if !status.is_success() {
            return Err(ParleyError::Transport {
                message: format!("translation endpoint returned HTTP {status}"),
            });
        }

        let payload = response.text().await.map_err(|e| ParleyError::Transport {
            message: format!("failed to read translation response: {e}"),
        })?;

        let items: Vec<TranslationItem> =
            serde_json::from_str(&payload).map_err(|e| ParleyError::Parse {
                message: format!("unexpected translation response shape: {e}"),
            })?;

        Ok(pick_translation(items, target_language, text))
    }
}

/// How a mock translation call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Transport,
    Auth,
    Parse,
}

/// Mock translator for testing.
///
/// Returns configured translations, or the input unchanged when no
/// translation is configured (mirroring the identity fallback).
#[derive(Debug, Default)]
pub struct MockTranslator {
    responses: HashMap<String, String>,
    failure: Option<MockFailure>,
    calls: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fixed translation for an input text.
    pub fn with_translation(mut self, text: impl Into<String>, translated: impl Into<String>) -> Self {
        self.responses.insert(text.into(), translated.into());
        self
    }

    /// Makes every call fail with the given kind.
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Returns the inputs translated so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, _target_language: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }
        match self.failure {
            Some(MockFailure::Transport) => Err(ParleyError::Transport {
                message: "mock transport failure".to_string(),
            }),
            Some(MockFailure::Auth) => Err(ParleyError::Auth {
                message: "mock HTTP 401".to_string(),
            }),
            Some(MockFailure::Parse) => Err(ParleyError::Parse {
                message: "mock parse failure".to_string(),
            }),
            None => Ok(self
                .responses
                .get(text)
                .cloned()
                .unwrap_or_else(|| text.to_string())),
        }
    }
}
