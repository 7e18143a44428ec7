//! Session pipeline: the hear → transcribe → translate → speak loop.

pub mod pipeline;
pub mod signal;

pub use pipeline::{SessionConfig, SessionHandle, SessionPipeline, SessionState};
pub use signal::StopSignal;
