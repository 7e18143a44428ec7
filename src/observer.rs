//! Observer contract for session pipeline notifications.
//!
//! The pipeline never talks to a UI directly; it publishes everything through
//! this trait. A console frontend, a test harness and a GUI all look the same
//! from the pipeline's side.

use crate::synth::CancellationDetails;
use std::sync::Mutex;

/// Consumer of pipeline state and text updates.
///
/// All methods have empty default bodies so an implementation only needs to
/// override the notifications it cares about. Methods are called from the
/// session task; implementations must not block for long.
pub trait PipelineObserver: Send + Sync {
    /// The stream session has started; the user may speak now.
    fn on_prompt(&self) {}

    /// A still-changing interim transcript.
    fn on_partial_text(&self, _text: &str) {}

    /// A conclusively transcribed span of speech.
    fn on_final_text(&self, _text: &str) {}

    /// The translation of the most recent final transcript.
    fn on_translated_text(&self, _text: &str) {}

    /// A final result that could not be recognized as speech.
    fn on_unrecognized(&self) {}

    /// A non-fatal recognition or translation error. The session keeps listening.
    fn on_recognition_error(&self, _code: &str, _details: &str) {}

    /// Synthesis of the translated text was canceled.
    fn on_synthesis_error(&self, _details: &CancellationDetails) {}

    /// The session has fully stopped and released its resources.
    fn on_session_stopped(&self) {}
}

/// Console observer that prints notifications as they arrive.
#[derive(Debug, Default)]
pub struct LogObserver {
    quiet: bool,
}

impl LogObserver {
    /// Creates a new console observer.
    ///
    /// With `quiet` set, only final and translated text are printed.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl PipelineObserver for LogObserver {
    fn on_prompt(&self) {
        if !self.quiet {
            println!("Listening — speak now.");
        }
    }

    fn on_partial_text(&self, text: &str) {
        if !self.quiet {
            println!("… {text}");
        }
    }

    fn on_final_text(&self, text: &str) {
        println!("{text}");
    }

    fn on_translated_text(&self, text: &str) {
        println!("→ {text}");
    }

    fn on_unrecognized(&self) {
        if !self.quiet {
            println!("(could not recognize speech)");
        }
    }

    fn on_recognition_error(&self, code: &str, details: &str) {
        eprintln!("parley: recognition error: code={code}; details={details}");
    }

    fn on_synthesis_error(&self, details: &CancellationDetails) {
        eprintln!("parley: synthesis canceled: reason={:?}", details.reason);
        if let Some(code) = &details.error_code {
            eprintln!("parley: synthesis error code: {code}");
        }
        if let Some(msg) = &details.error_details {
            eprintln!("parley: synthesis error details: {msg}");
        }
    }

    fn on_session_stopped(&self) {
        if !self.quiet {
            println!("Session stopped.");
        }
    }
}

/// A single recorded observer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    Prompt,
    Partial(String),
    Final(String),
    Translated(String),
    Unrecognized,
    RecognitionError { code: String, details: String },
    SynthesisError(CancellationDetails),
    SessionStopped,
}

/// Observer that records every notification, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct CollectorObserver {
    events: Mutex<Vec<ObserverEvent>>,
}

impl CollectorObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all notifications recorded so far.
    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn record(&self, event: ObserverEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl PipelineObserver for CollectorObserver {
    fn on_prompt(&self) {
        self.record(ObserverEvent::Prompt);
    }

    fn on_partial_text(&self, text: &str) {
        self.record(ObserverEvent::Partial(text.to_string()));
    }

    fn on_final_text(&self, text: &str) {
        self.record(ObserverEvent::Final(text.to_string()));
    }

    fn on_translated_text(&self, text: &str) {
        self.record(ObserverEvent::Translated(text.to_string()));
    }

    fn on_unrecognized(&self) {
        self.record(ObserverEvent::Unrecognized);
    }

    fn on_recognition_error(&self, code: &str, details: &str) {
        self.record(ObserverEvent::RecognitionError {
            code: code.to_string(),
            details: details.to_string(),
        });
    }

    fn on_synthesis_error(&self, details: &CancellationDetails) {
        self.record(ObserverEvent::SynthesisError(details.clone()));
    }

    fn on_session_stopped(&self) {
        self.record(ObserverEvent::SessionStopped);
    }
}
