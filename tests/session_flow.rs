//! End-to-end session tests over the public API: a line-based recognition
//! stream feeding the pipeline with mock translation and synthesis clients.

use parley::{
    CollectorObserver, LineStream, MockSynthesizer, MockTranslator, ObserverEvent, RecognitionEvent,
    ScriptedStream, SessionConfig, SessionPipeline, SessionState,
};
use std::sync::Arc;
use tokio::io::BufReader;

fn config() -> SessionConfig {
    SessionConfig {
        source_language: "ja-JP".to_string(),
        target_language: "en".to_string(),
        voice: "en-US-TestVoice".to_string(),
        termination_phrase: "終わり".to_string(),
    }
}

#[tokio::test]
async fn line_stream_session_translates_each_line_until_phrase() {
    let input: &[u8] = "こんにちは\nお元気ですか\nこれで終わりです\n".as_bytes();
    let stream = LineStream::new(BufReader::new(input));

    let translator = Arc::new(
        MockTranslator::new()
            .with_translation("こんにちは", "Hello")
            .with_translation("お元気ですか", "How are you?")
            .with_translation("これで終わりです", "That is all"),
    );
    let synthesizer = Arc::new(MockSynthesizer::new());
    let observer = Arc::new(CollectorObserver::new());

    let pipeline = SessionPipeline::new(
        config(),
        translator,
        Arc::clone(&synthesizer) as Arc<dyn parley::Synthesizer>,
    )
    .with_observer(Arc::clone(&observer) as Arc<dyn parley::PipelineObserver>);
    let handle = pipeline.start(Box::new(stream)).await.unwrap();
    handle.wait().await.unwrap();

    assert_eq!(
        synthesizer.spoken(),
        vec![
            "Hello".to_string(),
            "How are you?".to_string(),
            "That is all".to_string(),
        ]
    );

    let events = observer.events();
    assert_eq!(events.first(), Some(&ObserverEvent::Prompt));
    assert_eq!(events.last(), Some(&ObserverEvent::SessionStopped));
}

#[tokio::test]
async fn line_stream_session_ends_cleanly_on_eof() {
    // No termination phrase in the input; the stream ends when stdin does.
    let input: &[u8] = "こんにちは\n".as_bytes();
    let stream = LineStream::new(BufReader::new(input));

    let translator = Arc::new(MockTranslator::new().with_translation("こんにちは", "Hello"));
    let synthesizer = Arc::new(MockSynthesizer::new());

    let pipeline = SessionPipeline::new(
        config(),
        translator,
        Arc::clone(&synthesizer) as Arc<dyn parley::Synthesizer>,
    );
    let handle = pipeline.start(Box::new(stream)).await.unwrap();
    handle.wait().await.unwrap();

    assert_eq!(synthesizer.spoken(), vec!["Hello".to_string()]);
}

#[tokio::test]
async fn blank_lines_are_reported_unrecognized_and_skipped() {
    let input: &[u8] = "\n   \nこんにちは\n終わり\n".as_bytes();
    let stream = LineStream::new(BufReader::new(input));

    let translator = Arc::new(MockTranslator::new().with_translation("こんにちは", "Hello"));
    let synthesizer = Arc::new(MockSynthesizer::new());
    let observer = Arc::new(CollectorObserver::new());

    let pipeline = SessionPipeline::new(
        config(),
        Arc::clone(&translator) as Arc<dyn parley::Translator>,
        synthesizer,
    )
    .with_observer(Arc::clone(&observer) as Arc<dyn parley::PipelineObserver>);
    let handle = pipeline.start(Box::new(stream)).await.unwrap();
    handle.wait().await.unwrap();

    let unrecognized = observer
        .events()
        .iter()
        .filter(|e| **e == ObserverEvent::Unrecognized)
        .count();
    assert_eq!(unrecognized, 2);
    assert_eq!(
        translator.calls(),
        vec!["こんにちは".to_string(), "終わり".to_string()]
    );
}

#[tokio::test]
async fn external_shutdown_stops_a_silent_session() {
    // A scripted stream that never produces a final: only the external
    // trigger can end this session.
    let stream = ScriptedStream::new(vec![RecognitionEvent::partial("こん")]);

    let translator = Arc::new(MockTranslator::new());
    let synthesizer = Arc::new(MockSynthesizer::new());

    let pipeline = SessionPipeline::new(
        config(),
        translator,
        Arc::clone(&synthesizer) as Arc<dyn parley::Synthesizer>,
    );
    let handle = pipeline.start(Box::new(stream)).await.unwrap();
    assert_eq!(handle.state(), SessionState::Listening);

    let signal = handle.stop_signal();
    let waiter = tokio::spawn(async move { handle.wait().await });

    signal.trigger();
    waiter.await.unwrap().unwrap();

    assert!(synthesizer.spoken().is_empty());
}

#[tokio::test]
async fn phrase_mid_sentence_still_interprets_that_sentence() {
    let input: &[u8] = "話は終わりですありがとう\n".as_bytes();
    let stream = LineStream::new(BufReader::new(input));

    let translator = Arc::new(
        MockTranslator::new().with_translation("話は終わりですありがとう", "That is all, thanks"),
    );
    let synthesizer = Arc::new(MockSynthesizer::new());
    let observer = Arc::new(CollectorObserver::new());

    let pipeline = SessionPipeline::new(
        config(),
        translator,
        Arc::clone(&synthesizer) as Arc<dyn parley::Synthesizer>,
    )
    .with_observer(Arc::clone(&observer) as Arc<dyn parley::PipelineObserver>);
    let handle = pipeline.start(Box::new(stream)).await.unwrap();
    handle.wait().await.unwrap();

    // The utterance containing the cue is still translated and spoken, and
    // the session then shuts down.
    assert_eq!(synthesizer.spoken(), vec!["That is all, thanks".to_string()]);
    assert_eq!(
        observer.events().last(),
        Some(&ObserverEvent::SessionStopped)
    );
}
