use crate::defaults;
use crate::error::{ParleyError, Result};
use crate::session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionSettings,
}

/// Credentials and region for the remote speech/translation services
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub speech_key: String,
    pub translator_key: String,
    pub region: String,
}

/// Per-session language and voice settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    pub source_language: String,
    pub target_language: String,
    pub voice: String,
    pub termination_phrase: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            speech_key: String::new(),
            translator_key: String::new(),
            region: defaults::REGION.to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            source_language: defaults::SOURCE_LANGUAGE.to_string(),
            target_language: defaults::TARGET_LANGUAGE.to_string(),
            voice: defaults::VOICE.to_string(),
            termination_phrase: defaults::TERMINATION_PHRASE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - PARLEY_SPEECH_KEY → api.speech_key
    /// - PARLEY_TRANSLATOR_KEY → api.translator_key
    /// - PARLEY_REGION → api.region
    /// - PARLEY_SOURCE_LANGUAGE → session.source_language
    /// - PARLEY_TARGET_LANGUAGE → session.target_language
    /// - PARLEY_VOICE → session.voice
    /// - PARLEY_TERMINATION_PHRASE → session.termination_phrase
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("PARLEY_SPEECH_KEY")
            && !key.is_empty()
        {
            self.api.speech_key = key;
        }

        if let Ok(key) = std::env::var("PARLEY_TRANSLATOR_KEY")
            && !key.is_empty()
        {
            self.api.translator_key = key;
        }

        if let Ok(region) = std::env::var("PARLEY_REGION")
            && !region.is_empty()
        {
            self.api.region = region;
        }

        if let Ok(lang) = std::env::var("PARLEY_SOURCE_LANGUAGE")
            && !lang.is_empty()
        {
            self.session.source_language = lang;
        }

        if let Ok(lang) = std::env::var("PARLEY_TARGET_LANGUAGE")
            && !lang.is_empty()
        {
            self.session.target_language = lang;
        }

        if let Ok(voice) = std::env::var("PARLEY_VOICE")
            && !voice.is_empty()
        {
            self.session.voice = voice;
        }

        if let Ok(phrase) = std::env::var("PARLEY_TERMINATION_PHRASE")
            && !phrase.is_empty()
        {
            self.session.termination_phrase = phrase;
        }

        self
    }

    /// Ensure both API keys are present before a session can start.
    pub fn require_keys(&self) -> Result<()> {
        if self.api.speech_key.is_empty() {
            return Err(ParleyError::ConfigInvalidValue {
                key: "api.speech_key".to_string(),
                message: "must not be empty (set it in config.toml or PARLEY_SPEECH_KEY)"
                    .to_string(),
            });
        }
        if self.api.translator_key.is_empty() {
            return Err(ParleyError::ConfigInvalidValue {
                key: "api.translator_key".to_string(),
                message: "must not be empty (set it in config.toml or PARLEY_TRANSLATOR_KEY)"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Build the session configuration consumed by the pipeline.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            source_language: self.session.source_language.clone(),
            target_language: self.session.target_language.clone(),
            voice: self.session.voice.clone(),
            termination_phrase: self.session.termination_phrase.clone(),
        }
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/parley/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("parley")
            .join("config.toml")
    }
}
