//! Text translation clients.

pub mod client;

pub use client::{AzureTranslator, MockFailure, MockTranslator, Translator};
