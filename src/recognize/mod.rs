//! Recognition stream contract and event model.
//!
//! The cloud recognizer itself is an external collaborator; this module only
//! defines the shape the pipeline requires — a start/stop lifecycle plus a
//! serialized feed of recognition events — together with two local
//! implementations: a scripted stream for tests and a line-oriented stream
//! that turns any text reader into final transcripts.

pub mod event;
pub mod lines;
pub mod stream;

pub use event::{FinalReason, RecognitionEvent};
pub use lines::LineStream;
pub use stream::{RecognitionStream, ScriptedStream};
