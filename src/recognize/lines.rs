//! Line-oriented recognition stream.
//!
//! Turns any line-delimited text reader into a recognition stream: each
//! non-empty line becomes a final recognized transcript (preceded by one
//! interim event), an empty line becomes an unrecognized result, and end of
//! input stops the session. This drives the pipeline from stdin or a file
//! without a cloud recognizer.

use crate::error::{ParleyError, Result};
use crate::recognize::event::RecognitionEvent;
use crate::recognize::stream::RecognitionStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Recognition stream fed by lines from an async reader.
pub struct LineStream<R> {
    reader: Option<R>,
    tx: mpsc::UnboundedSender<RecognitionEvent>,
    rx: Option<mpsc::UnboundedReceiver<RecognitionEvent>>,
    pump: Option<JoinHandle<()>>,
    stopped: Arc<AtomicBool>,
}

impl<R> LineStream<R>
where
    R: AsyncBufRead + Send + Unpin + 'static,
{
    pub fn new(reader: R) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            reader: Some(reader),
            tx,
            rx: Some(rx),
            pump: None,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait::async_trait]
impl<R> RecognitionStream for LineStream<R>
where
    R: AsyncBufRead + Send + Unpin + 'static,
{
    async fn start(&mut self) -> Result<()> {
        let reader = self.reader.take().ok_or_else(|| ParleyError::Stream {
            message: "line stream already started".to_string(),
        })?;

        let _ = self.tx.send(RecognitionEvent::SessionStarted);

        let tx = self.tx.clone();
        let stopped = Arc::clone(&self.stopped);
        self.pump = Some(tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                if stopped.load(Ordering::SeqCst) {
                    break;
                }
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let text = line.trim().to_string();
                        if text.is_empty() {
                            let _ = tx.send(RecognitionEvent::no_match());
                        } else {
                            let _ = tx.send(RecognitionEvent::partial(text.clone()));
                            let _ = tx.send(RecognitionEvent::recognized(text));
                        }
                    }
                    // EOF or read failure: the input is exhausted
                    Ok(None) | Err(_) => break,
                }
            }
            // First to set the flag emits the terminal event
            if !stopped.swap(true, Ordering::SeqCst) {
                let _ = tx.send(RecognitionEvent::SessionStopped);
            }
        }));

        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            let _ = self.tx.send(RecognitionEvent::SessionStopped);
        }
        if let Some(pump) = self.pump.take() {
            // The pump may be blocked on a read that will never complete
            pump.abort();
        }
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
    use tokio::io::BufReader;

    fn stream_from(input: &'static str) -> LineStream<BufReader<&'static [u8]>> {
        LineStream::new(BufReader::new(input.as_bytes()))
    }

    async fn collect_all(
        mut events: mpsc::UnboundedReceiver<RecognitionEvent>,
    ) -> Vec<RecognitionEvent> {
        let mut collected = Vec::new();
        while let Some(event) = events.recv().await {
            let done = event == RecognitionEvent::SessionStopped;
            collected.push(event);
            if done {
                break;
            }
        }
        collected
    }

    #[tokio::test]
    async fn lines_become_partial_then_final() {
        let mut stream = stream_from("こんにちは\n");
        let events = stream.take_events().unwrap();
        stream.start().await.unwrap();

        let collected = collect_all(events).await;
        assert_eq!(
            collected,
            vec![
                RecognitionEvent::SessionStarted,
                RecognitionEvent::partial("こんにちは"),
                RecognitionEvent::recognized("こんにちは"),
                RecognitionEvent::SessionStopped,
            ]
        );
    }

    #[tokio::test]
    async fn empty_line_is_unrecognized() {
        let mut stream = stream_from("hello\n\nworld\n");
        let events = stream.take_events().unwrap();
        stream.start().await.unwrap();

        let collected = collect_all(events).await;
        let no_match_count = collected
            .iter()
            .filter(|e| matches!(e, RecognitionEvent::Final { reason, .. } if *reason == FinalReason::NoMatch))
            .count();
        assert_eq!(no_match_count, 1);
    }

    #[tokio::test]
    async fn eof_emits_session_stopped_exactly_once() {
        let mut stream = stream_from("one line\n");
        let events = stream.take_events().unwrap();
        stream.start().await.unwrap();

        let collected = collect_all(events).await;
        let stopped_count = collected
            .iter()
            .filter(|e| **e == RecognitionEvent::SessionStopped)
            .count();
        assert_eq!(stopped_count, 1);

        // stop() after EOF must not emit a second terminal event
        stream.stop().await.unwrap();
    }

    #[tokio::test]
    async fn start_twice_is_an_error() {
        let mut stream = stream_from("");
        stream.take_events().unwrap();
        stream.start().await.unwrap();
        assert!(stream.start().await.is_err());
    }

    #[tokio::test]
    async fn stop_before_eof_emits_session_stopped() {
        // A reader that never produces a line: stop() must still terminate
        let mut stream = stream_from("no newline at all");
        let mut events = stream.take_events().unwrap();
        stream.start().await.unwrap();

        assert_eq!(events.recv().await, Some(RecognitionEvent::SessionStarted));
        stream.stop().await.unwrap();

        // Drain until the terminal event; the lone unterminated line may or
        // may not have been flushed before the stop won the race.
        loop {
            match events.recv().await {
                Some(RecognitionEvent::SessionStopped) => break,
                Some(_) => continue,
                None => panic!("channel closed without SessionStopped"),
            }
        }
    }
}
