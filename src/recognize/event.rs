//! Recognition event model.

/// Why a final result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalReason {
    /// The span was conclusively transcribed as speech.
    RecognizedSpeech,
    /// The recognizer finished the span but could not match speech.
    NoMatch,
}

/// Event emitted by a recognition stream.
///
/// Events for one session are serialized: `SessionStarted` precedes any
/// `Partial` or `Final`, and `SessionStopped` comes last. Immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// The stream has negotiated a session and is capturing audio.
    SessionStarted,
    /// A still-changing interim transcript.
    Partial { text: String },
    /// A conclusively transcribed span of speech.
    Final { text: String, reason: FinalReason },
    /// A stream-level cancellation. Non-fatal: the stream keeps running.
    Canceled {
        error_code: String,
        error_details: String,
    },
    /// The stream has shut down. No further events follow.
    SessionStopped,
}

impl RecognitionEvent {
    /// Convenience constructor for a recognized final transcript.
    pub fn recognized(text: impl Into<String>) -> Self {
        Self::Final {
            text: text.into(),
            reason: FinalReason::RecognizedSpeech,
        }
    }

    /// Convenience constructor for an unrecognized final result.
    pub fn no_match() -> Self {
        Self::Final {
            text: String::new(),
            reason: FinalReason::NoMatch,
        }
    }

    /// Convenience constructor for an interim transcript.
    pub fn partial(text: impl Into<String>) -> Self {
        Self::Partial { text: text.into() }
    }
}
