//! Session pipeline: the core state machine.
//!
//! Owns one recognition stream, consumes its events one at a time, and for
//! each recognized final transcript runs translate → speak → termination
//! check to completion before touching the next event. All progress and
//! errors are published through the observer; the spoken termination phrase
//! and external shutdown share one idempotent stop signal.

use crate::defaults;
use crate::error::{ParleyError, Result};
use crate::observer::{LogObserver, PipelineObserver};
use crate::recognize::{FinalReason, RecognitionEvent, RecognitionStream};
use crate::session::signal::StopSignal;
use crate::synth::{SynthesisOutcome, Synthesizer};
use crate::translate::Translator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// How long to wait for the stream to confirm shutdown after `stop()`.
const STOP_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Listening,
    Stopping,
    Stopped,
}

/// Configuration captured when a session starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Language spoken into the microphone (BCP-47).
    pub source_language: String,
    /// Short target language tag for translation.
    pub target_language: String,
    /// Voice identity used for synthesis.
    pub voice: String,
    /// Substring of a final transcript that ends the session. Empty disables
    /// the spoken cue.
    pub termination_phrase: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source_language: defaults::SOURCE_LANGUAGE.to_string(),
            target_language: defaults::TARGET_LANGUAGE.to_string(),
            voice: defaults::VOICE.to_string(),
            termination_phrase: defaults::TERMINATION_PHRASE.to_string(),
        }
    }
}

/// The hear → transcribe → translate → speak session controller.
pub struct SessionPipeline {
    config: SessionConfig,
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn Synthesizer>,
    observer: Arc<dyn PipelineObserver>,
}

impl SessionPipeline {
    /// Creates a pipeline with a console observer.
    pub fn new(
        config: SessionConfig,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Self {
        Self {
            config,
            translator,
            synthesizer,
            observer: Arc::new(LogObserver::default()),
        }
    }

    /// Sets a custom observer.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Starts the session.
    ///
    /// Suspends until the stream's session negotiation completes, then spawns
    /// the event loop and returns a handle to control and await the session.
    pub async fn start(self, mut stream: Box<dyn RecognitionStream>) -> Result<SessionHandle> {
        let events = stream.take_events().ok_or_else(|| ParleyError::Stream {
            message: "recognition stream has no event feed".to_string(),
        })?;

        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let signal = StopSignal::new();

        let _ = state_tx.send(SessionState::Starting);
        stream.start().await?;
        let _ = state_tx.send(SessionState::Listening);

        let task = SessionTask {
            config: self.config,
            translator: self.translator,
            synthesizer: self.synthesizer,
            observer: self.observer,
            signal: signal.clone(),
            state_tx,
        };
        let join = tokio::spawn(task.run(stream, events));

        Ok(SessionHandle {
            signal,
            state: state_rx,
            task: join,
        })
    }
}

/// Handle to a running session.
#[derive(Debug)]
pub struct SessionHandle {
    signal: StopSignal,
    state: watch::Receiver<SessionState>,
    task: JoinHandle<Result<()>>,
}

impl SessionHandle {
    /// The session's stop signal, for wiring external shutdown triggers.
    pub fn stop_signal(&self) -> StopSignal {
        self.signal.clone()
    }

    /// Requests shutdown. Returns `true` if this request set the signal.
    pub fn request_stop(&self) -> bool {
        self.signal.trigger()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// A receiver that observes every state change.
    pub fn state_receiver(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Returns true until the session reaches `Stopped`.
    pub fn is_running(&self) -> bool {
        self.state() != SessionState::Stopped
    }

    /// Waits for the session to finish.
    pub async fn wait(self) -> Result<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(ParleyError::Other(format!("session task failed: {e}"))),
        }
    }

    /// Requests shutdown and waits for the session to finish.
    pub async fn stop(self) -> Result<()> {
        self.signal.trigger();
        self.wait().await
    }
}

/// State moved into the spawned session task.
struct SessionTask {
    config: SessionConfig,
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn Synthesizer>,
    observer: Arc<dyn PipelineObserver>,
    signal: StopSignal,
    state_tx: watch::Sender<SessionState>,
}

impl SessionTask {
    async fn run(
        mut self,
        mut stream: Box<dyn RecognitionStream>,
        mut events: mpsc::UnboundedReceiver<RecognitionEvent>,
    ) -> Result<()> {
        // True once the stream has announced its own shutdown; skips the
        // redundant stop() call below.
        let mut stream_stopped = false;
        let signal = self.signal.clone();

        loop {
            tokio::select! {
                // Queued events are handled before an external stop is
                // observed; every handled event is followed by a signal
                // check, so shutdown is never starved.
                biased;
                event = events.recv() => match event {
                    None | Some(RecognitionEvent::SessionStopped) => {
                        stream_stopped = true;
                        break;
                    }
                    Some(event) => {
                        self.handle_event(event).await;
                        if signal.is_triggered() {
                            break;
                        }
                    }
                },
                () = signal.triggered() => break,
            }
        }

        let _ = self.state_tx.send(SessionState::Stopping);

        if !stream_stopped {
            if let Err(e) = stream.stop().await {
                self.observer.on_recognition_error(e.code(), &e.to_string());
            }
            let drain = async {
                while let Some(event) = events.recv().await {
                    if event == RecognitionEvent::SessionStopped {
                        break;
                    }
                }
            };
            // A stream that never confirms must not hang shutdown.
            let _ = tokio::time::timeout(STOP_DRAIN_TIMEOUT, drain).await;
        }

        let SessionTask {
            synthesizer,
            translator,
            observer,
            state_tx,
            ..
        } = self;
        // Scoped acquisition: the clients' held resources go with the task.
        drop(synthesizer);
        drop(translator);
        drop(stream);

        let _ = state_tx.send(SessionState::Stopped);
        observer.on_session_stopped();
        Ok(())
    }

    async fn handle_event(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::SessionStarted => self.observer.on_prompt(),
            RecognitionEvent::Partial { text } => self.observer.on_partial_text(&text),
            RecognitionEvent::Final {
                text,
                reason: FinalReason::RecognizedSpeech,
            } => self.handle_recognized(&text).await,
            RecognitionEvent::Final {
                reason: FinalReason::NoMatch,
                ..
            } => self.observer.on_unrecognized(),
            RecognitionEvent::Canceled {
                error_code,
                error_details,
            } => {
                // Non-fatal: report and keep listening.
                self.observer.on_recognition_error(&error_code, &error_details);
            }
            // Terminal event is handled by the run loop.
            RecognitionEvent::SessionStopped => {}
        }
    }

    /// The per-final sequence: translate → speak → termination check.
    ///
    /// Runs to completion before the next event is taken, preserving
    /// conversational ordering.
    async fn handle_recognized(&mut self, text: &str) {
        self.observer.on_final_text(text);

        match self
            .translator
            .translate(text, &self.config.target_language)
            .await
        {
            Ok(translated) => {
                self.observer.on_translated_text(&translated);
                match self.synthesizer.speak(&translated).await {
                    SynthesisOutcome::Completed => {}
                    SynthesisOutcome::Canceled(details) => {
                        self.observer.on_synthesis_error(&details);
                    }
                }
            }
            Err(e) => {
                // Reported, not escalated: the session keeps listening.
                self.observer.on_recognition_error(e.code(), &e.to_string());
            }
        }

        // The spoken cue is checked regardless of translate/speak outcome.
        if !self.config.termination_phrase.is_empty()
            && text.contains(&self.config.termination_phrase)
        {
            self.signal.trigger();
        }
    }
}
