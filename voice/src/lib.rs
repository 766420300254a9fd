#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Sensa voice simulator – low-latency Sesotho keyword spotting over
//! simulated audio frames and a constant keyword model bank.

/// Keyword model bank.
#[path = "../model.rs"]
pub mod model;

/// Simulated audio capture and feature extraction.
#[path = "../audio.rs"]
pub mod audio;

/// Keyword matching against the model bank.
#[path = "../detector.rs"]
pub mod detector;

/// Runtime entry orchestrating frame processing tests.
#[path = "../runtime.rs"]
pub mod runtime;

pub use audio::{capture_frame, extract_features, AUDIO_BUFFER_SIZE, FEATURE_DIM};
pub use detector::{KeywordDetector, KeywordMatch};
pub use model::{builtin_models, KeywordModel};
pub use runtime::{
    DetectionReport, FrameReport, RealtimeReport, VoiceRuntime, VoiceRuntimeBuilder,
};
