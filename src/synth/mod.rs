//! Speech synthesis clients.

pub mod client;

pub use client::{
    AzureSynthesizer, CancellationDetails, CancellationReason, MockSynthesizer, SynthesisOutcome,
    Synthesizer,
};
