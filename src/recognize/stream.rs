//! Recognition stream contract and scripted test double.

use crate::error::{ParleyError, Result};
use crate::recognize::event::RecognitionEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// A live, event-emitting recognition session.
///
/// This is the boundary to the external speech SDK. Implementations deliver
/// events through the receiver handed out by [`take_events`], in arrival
/// order: `SessionStarted` first, `SessionStopped` last.
///
/// [`take_events`]: RecognitionStream::take_events
#[async_trait::async_trait]
pub trait RecognitionStream: Send {
    /// Begins continuous recognition.
    ///
    /// May suspend until the first session negotiation completes.
    async fn start(&mut self) -> Result<()>;

    /// Requests graceful shutdown.
    ///
    /// The stream must eventually emit `SessionStopped`.
    async fn stop(&mut self) -> Result<()>;

    /// Takes the event receiver for this stream.
    ///
    /// Returns `None` if the receiver was already taken — a stream feeds
    /// exactly one consumer.
    fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<RecognitionEvent>>;
}

/// Recognition stream that replays a fixed script of events.
///
/// `start()` emits `SessionStarted` followed by the scripted events;
/// `stop()` emits `SessionStopped`. Call counters are shareable so tests can
/// assert lifecycle behavior after the stream has been moved into a pipeline.
pub struct ScriptedStream {
    script: Vec<RecognitionEvent>,
    tx: mpsc::UnboundedSender<RecognitionEvent>,
    rx: Option<mpsc::UnboundedReceiver<RecognitionEvent>>,
    start_calls: Arc<AtomicUsize>,
    stop_calls: Arc<AtomicUsize>,
    fail_start: bool,
}

impl ScriptedStream {
    /// Creates a stream that will replay `script` after `start()`.
    pub fn new(script: Vec<RecognitionEvent>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            script,
            tx,
            rx: Some(rx),
            start_calls: Arc::new(AtomicUsize::new(0)),
            stop_calls: Arc::new(AtomicUsize::new(0)),
            fail_start: false,
        }
    }

    /// Makes `start()` fail, for negotiation-failure tests.
    pub fn with_start_failure(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Shared counter of `start()` calls.
    pub fn start_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.start_calls)
    }

    /// Shared counter of `stop()` calls.
    pub fn stop_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.stop_calls)
    }
}

#[async_trait::async_trait]
impl RecognitionStream for ScriptedStream {
    async fn start(&mut self) -> Result<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start {
            return Err(ParleyError::Stream {
                message: "scripted negotiation failure".to_string(),
            });
        }
        let _ = self.tx.send(RecognitionEvent::SessionStarted);
        for event in self.script.drain(..) {
            let _ = self.tx.send(event);
        }
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(RecognitionEvent::SessionStopped);
        Ok(())
    }

    fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<RecognitionEvent>> {
        self.rx.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognize::event::FinalReason;

    #[tokio::test]
    async fn scripted_stream_replays_events_in_order() {
        let mut stream = ScriptedStream::new(vec![
            RecognitionEvent::partial("こん"),
            RecognitionEvent::recognized("こんにちは"),
        ]);
        let mut events = stream.take_events().unwrap();

        stream.start().await.unwrap();
        stream.stop().await.unwrap();

        assert_eq!(events.recv().await, Some(RecognitionEvent::SessionStarted));
        assert_eq!(events.recv().await, Some(RecognitionEvent::partial("こん")));
        match events.recv().await {
            Some(RecognitionEvent::Final { text, reason }) => {
                assert_eq!(text, "こんにちは");
                assert_eq!(reason, FinalReason::RecognizedSpeech);
            }
            other => panic!("expected final, got {other:?}"),
        }
        assert_eq!(events.recv().await, Some(RecognitionEvent::SessionStopped));
    }

    #[tokio::test]
    async fn events_can_be_taken_only_once() {
        let mut stream = ScriptedStream::new(vec![]);
        assert!(stream.take_events().is_some());
        assert!(stream.take_events().is_none());
    }

    #[tokio::test]
    async fn start_failure_emits_no_events() {
        let mut stream = ScriptedStream::new(vec![RecognitionEvent::recognized("x")])
            .with_start_failure();
        let mut events = stream.take_events().unwrap();

        assert!(stream.start().await.is_err());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn counters_track_lifecycle_calls() {
        let mut stream = ScriptedStream::new(vec![]);
        let starts = stream.start_counter();
        let stops = stream.stop_counter();

        stream.start().await.unwrap();
        stream.stop().await.unwrap();
        stream.stop().await.unwrap();

        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(stops.load(Ordering::SeqCst), 2);
    }
}
