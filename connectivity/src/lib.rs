#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Sensa connectivity simulator – context-aware network policy decisions:
//! scan an environment, classify its trust tier from nearby devices, then
//! apply the selected policy to every visible network.

/// Location contexts.
#[path = "../context.rs"]
pub mod context;

/// Network and device scanners.
#[path = "../scanner.rs"]
pub mod scanner;

/// Trust tier evaluation.
#[path = "../evaluator.rs"]
pub mod evaluator;

/// Per-network verdicts.
#[path = "../decisions.rs"]
pub mod decisions;

/// Runtime entry orchestrating environment evaluations.
#[path = "../runtime.rs"]
pub mod runtime;

pub use context::{LocationContext, PowerMode};
pub use decisions::{decide_networks, NetworkDecision, NetworkVerdict};
pub use evaluator::TrustEvaluator;
pub use runtime::{
    BatteryReport, ConnectivityRuntime, ConnectivityRuntimeBuilder, EnvironmentReport,
};
pub use scanner::{scan_networks, DeviceScanner, CELLULAR_FALLBACK};
