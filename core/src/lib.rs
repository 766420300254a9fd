#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Sensa core – the context evaluation pipeline shared by the device simulators:
//! scan an environment, score observations against trusted reference data,
//! select a policy, apply it per item with latency accounting.

/// Injectable uniform randomness sources.
#[path = "../random.rs"]
pub mod random;

/// Read-only reference stores.
#[path = "../store.rs"]
pub mod store;

/// Trust tiers and security levels.
#[path = "../levels.rs"]
pub mod levels;

/// Policy records and selection tables.
#[path = "../policy.rs"]
pub mod policy;

/// Scoring strategies.
#[path = "../score.rs"]
pub mod score;

/// Latency budgets and elapsed-time accounting.
#[path = "../latency.rs"]
pub mod latency;

pub use latency::{LatencyBudget, LatencyWarning, Stopwatch};
pub use levels::{SecurityLevel, TrustTier};
pub use policy::{AccessMode, PolicyRecord, PolicyTable};
pub use random::{random_seed, ScriptedUniform, SeededUniform, ThreadUniform, UniformSource};
pub use score::{membership_overlap, normalized_dot, RandomCheck, ScoreError};
pub use store::ReferenceStore;
