//! parley - Live speech interpreter
//!
//! Continuous recognition → translation → synthesis, one utterance at a time.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod observer;
pub mod recognize;
pub mod session;
pub mod synth;
pub mod translate;

// Core traits (hear → translate → speak)
pub use recognize::{FinalReason, LineStream, RecognitionEvent, RecognitionStream, ScriptedStream};
pub use synth::{
    AzureSynthesizer, CancellationDetails, CancellationReason, MockSynthesizer, SynthesisOutcome,
    Synthesizer,
};
pub use translate::{AzureTranslator, MockTranslator, Translator};

// Session pipeline
pub use session::{SessionConfig, SessionHandle, SessionPipeline, SessionState, StopSignal};

// Observers
pub use observer::{CollectorObserver, LogObserver, ObserverEvent, PipelineObserver};

// Error handling
pub use error::{ParleyError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
