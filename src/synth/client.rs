//! Speech synthesis client.
//!
//! Submits text for audio rendering and awaits the outcome. Failures are
//! expressed as a `Canceled` outcome rather than a hard error: a synthesis
//! problem must never terminate the session, only be reported.

use crate::defaults;
use std::sync::Mutex;

/// Why a synthesis request was canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    /// The service or transport failed.
    Error,
    /// Rendering was interrupted before completion.
    Interrupted,
}

/// Detail attached to a canceled synthesis.
///
/// `error_code` and `error_details` are populated only when the reason is
/// [`CancellationReason::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationDetails {
    pub reason: CancellationReason,
    pub error_code: Option<String>,
    pub error_details: Option<String>,
}

impl CancellationDetails {
    /// Cancellation caused by an error, with code and details.
    pub fn error(code: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            reason: CancellationReason::Error,
            error_code: Some(code.into()),
            error_details: Some(details.into()),
        }
    }

    /// Cancellation without an error (interrupted rendering).
    pub fn interrupted() -> Self {
        Self {
            reason: CancellationReason::Interrupted,
            error_code: None,
            error_details: None,
        }
    }
}

/// Outcome of one synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// Audio was rendered to completion.
    Completed,
    /// Rendering was canceled; see the attached details.
    Canceled(CancellationDetails),
}

impl SynthesisOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Trait for speech synthesis.
///
/// This trait allows swapping implementations (real endpoint vs mock).
#[async_trait::async_trait]
pub trait Synthesizer: Send + Sync {
    /// Renders `text` as speech and awaits completion.
    ///
    /// The returned future resolves only once rendering has finished or been
    /// canceled — callers use this as their pacing point.
    async fn speak(&self, text: &str) -> SynthesisOutcome;

    /// The voice identity this synthesizer renders with.
    fn voice(&self) -> &str;
}

/// Synthesis client backed by the regional text-to-speech REST endpoint.
pub struct AzureSynthesizer {
    client: reqwest::Client,
    api_key: String,
    voice: String,
    language: String,
    endpoint: String,
}

impl AzureSynthesizer {
    /// Creates a client for the given region and voice.
    pub fn new(
        api_key: impl Into<String>,
        region: &str,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            voice: voice.into(),
            language: defaults::TARGET_LANGUAGE.to_string(),
            endpoint: defaults::synthesis_endpoint(region),
        }
    }

    /// Sets the `xml:lang` attribute of the generated SSML.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Overrides the endpoint URL (tests, sovereign-cloud deployments).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn ssml(&self, text: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
            self.language,
            escape_xml(&self.voice),
            escape_xml(text)
        )
    }
}

/// Escapes the five XML special characters for SSML text content.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait::async_trait]
impl Synthesizer for AzureSynthesizer {
    async fn speak(&self, text: &str) -> SynthesisOutcome {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", defaults::SYNTHESIS_OUTPUT_FORMAT)
            .body(self.ssml(text))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                return SynthesisOutcome::Canceled(CancellationDetails::error(
                    "transport",
                    format!("synthesis request failed: {e}"),
                ));
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return SynthesisOutcome::Canceled(CancellationDetails::error(
                "auth",
                format!("synthesis endpoint rejected credentials (HTTP {status})"),
            ));
        }
        if !status.is_success() {
            return SynthesisOutcome::Canceled(CancellationDetails::error(
                status.as_str().to_string(),
                format!("synthesis endpoint returned HTTP {status}"),
            ));
        }

        // Draining the audio body is the await point: rendering is complete
        // once the full payload has arrived. Playback is the caller's concern.
        match response.bytes().await {
            Ok(_) => SynthesisOutcome::Completed,
            Err(e) => SynthesisOutcome::Canceled(CancellationDetails::error(
                "transport",
                format!("synthesis stream interrupted: {e}"),
            )),
        }
    }

    fn voice(&self) -> &str {
        &self.voice
    }
}

/// Mock synthesizer for testing.
#[derive(Debug)]
pub struct MockSynthesizer {
    voice: String,
    outcome: SynthesisOutcome,
    spoken: Mutex<Vec<String>>,
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self {
            voice: "mock-voice".to_string(),
            outcome: SynthesisOutcome::Completed,
            spoken: Mutex::new(Vec::new()),
        }
    }
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the outcome every `speak` call returns.
    pub fn with_outcome(mut self, outcome: SynthesisOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Returns the texts spoken so far, in call order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Synthesizer for MockSynthesizer {
    async fn speak(&self, text: &str) -> SynthesisOutcome {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(text.to_string());
        }
        self.outcome.clone()
    }

    fn voice(&self) -> &str {
        &self.voice
    }
}
