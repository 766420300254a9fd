#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Sensa biometric simulator – multi-factor authentication (voice + PIN) with
//! context-aware trusted-environment upgrades.

/// User profile reference data.
#[path = "../profile.rs"]
pub mod profile;

/// Simulated credential checks.
#[path = "../checks.rs"]
pub mod checks;

/// Authentication decisions and the two-stage decision rule.
#[path = "../auth.rs"]
pub mod auth;

/// Runtime entry orchestrating sweeps and stress tests.
#[path = "../runtime.rs"]
pub mod runtime;

pub use auth::{AuthDecision, AuthMethod, AuthOutcome, Authenticator};
pub use checks::CheckThresholds;
pub use profile::{builtin_profiles, UserProfile};
pub use runtime::{BiometricRuntime, BiometricRuntimeBuilder, ContextReport, StressReport};
