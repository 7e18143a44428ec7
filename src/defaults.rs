//! Default configuration constants for parley.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Default recognition (source) language code.
///
/// BCP-47 tag of the language spoken into the microphone. The stock setup
/// interprets Japanese speech into English, so this defaults to Japanese.
pub const SOURCE_LANGUAGE: &str = "ja-JP";

/// Default translation target language code.
///
/// Short language tag as used by the translation endpoint's `to` query
/// parameter (e.g. "en", "de", "fr").
pub const TARGET_LANGUAGE: &str = "en";

/// Default service region for the speech endpoints.
pub const REGION: &str = "japaneast";

/// Default synthesis voice identity.
///
/// Must name a voice available in the configured region. The default reads
/// translated text aloud in US English.
pub const VOICE: &str = "Microsoft Server Speech Text to Speech Voice (en-US, BenjaminRUS)";

/// Default termination phrase.
///
/// When a final transcript contains this substring, the session shuts down
/// gracefully. "終わり" is Japanese for "the end".
pub const TERMINATION_PHRASE: &str = "終わり";

/// Base URL of the text translation endpoint.
pub const TRANSLATOR_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

/// API version sent with every translation request.
pub const TRANSLATOR_API_VERSION: &str = "3.0";

/// Synthesis output format requested from the speech endpoint.
pub const SYNTHESIS_OUTPUT_FORMAT: &str = "riff-16khz-16bit-mono-pcm";

/// Builds the regional speech synthesis endpoint URL.
pub fn synthesis_endpoint(region: &str) -> String {
    format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1")
}
