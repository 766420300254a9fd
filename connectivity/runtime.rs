use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sensa_core::{
    random_seed, LatencyBudget, LatencyWarning, PolicyRecord, PolicyTable, SeededUniform,
    Stopwatch, TrustTier, UniformSource,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_telemetry::{LogLevel, TelemetryHandle};
use tokio::time::sleep;
use uuid::Uuid;

use crate::{
    context::{LocationContext, PowerMode},
    decisions::{decide_networks, NetworkDecision},
    evaluator::TrustEvaluator,
    scanner::{scan_networks, DeviceScanner},
};

const SCENARIO_PACING: Duration = Duration::from_millis(500);

/// Full pipeline result for one environment evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentReport {
    /// Report id.
    pub id: Uuid,
    /// Evaluated location.
    pub location: LocationContext,
    /// Networks visible in the scan.
    pub networks: Vec<String>,
    /// Devices observed in the scan.
    pub devices: Vec<String>,
    /// Trust classification.
    pub tier: TrustTier,
    /// Policy selected for the classification.
    pub policy: PolicyRecord,
    /// Per-network verdicts.
    pub decisions: Vec<NetworkDecision>,
    /// Wall-clock time for the whole pipeline run.
    pub elapsed: Duration,
    /// Set when the run overran the decision budget.
    pub warning: Option<LatencyWarning>,
    /// Report timestamp.
    pub decided_at: DateTime<Utc>,
}

/// Scan statistics for one power mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryReport {
    /// Power mode profiled.
    pub mode: PowerMode,
    /// Networks found by the final scan pass.
    pub networks_found: usize,
    /// Devices found by the final scan pass.
    pub devices_found: usize,
    /// Wall-clock time across all passes.
    pub scan_elapsed: Duration,
    /// Estimated battery impact in percent.
    pub battery_impact_percent: usize,
}

/// Runtime orchestrating the connectivity simulator.
pub struct ConnectivityRuntime {
    evaluator: TrustEvaluator,
    policies: PolicyTable,
    budget: LatencyBudget,
    source: Mutex<Box<dyn UniformSource + Send>>,
    telemetry: Option<TelemetryHandle>,
}

impl ConnectivityRuntime {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> ConnectivityRuntimeBuilder {
        ConnectivityRuntimeBuilder::default()
    }

    /// The configured policy table.
    #[must_use]
    pub const fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// Runs the full pipeline for one location: scan, classify, select a
    /// policy, and decide every visible network, with latency accounting.
    pub fn evaluate_environment(&self, location: LocationContext) -> EnvironmentReport {
        let watch = Stopwatch::start();
        let networks = scan_networks(location);
        let devices = {
            let mut source = self.source.lock();
            DeviceScanner::scan(location, source.as_mut())
        };
        let tier = self.evaluator.evaluate(&devices, location);
        let policy = *self.policies.select(tier);
        let decisions = decide_networks(&networks, &policy);
        let elapsed = watch.elapsed();
        let report = EnvironmentReport {
            id: Uuid::new_v4(),
            location,
            networks,
            devices,
            tier,
            policy,
            decisions,
            elapsed,
            warning: self.budget.check(elapsed),
            decided_at: Utc::now(),
        };
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(
                LogLevel::Info,
                "environment.evaluated",
                json!({
                    "location": location.label(),
                    "tier": tier.label(),
                    "elapsed_us": elapsed.as_micros(),
                }),
            );
            tel.event(
                "connectivity.report",
                json!({
                    "location": location.label(),
                    "tier": tier.label(),
                    "networks": report.networks.len(),
                }),
            );
        }
        report
    }

    /// Evaluates every demo scenario with cosmetic pacing between runs.
    pub async fn run_scenarios(&self) -> Result<Vec<EnvironmentReport>> {
        let mut reports = Vec::new();
        for location in LocationContext::scenarios() {
            reports.push(self.evaluate_environment(location));
            sleep(SCENARIO_PACING).await;
        }
        Ok(reports)
    }

    /// Profiles scan cost across the power modes.
    #[must_use]
    pub fn battery_profile(&self) -> Vec<BatteryReport> {
        PowerMode::all()
            .into_iter()
            .map(|mode| {
                let watch = Stopwatch::start();
                let mut networks = Vec::new();
                let mut devices = Vec::new();
                for _ in 0..mode.scan_intensity() {
                    networks = scan_networks(LocationContext::RuralArea);
                    let mut source = self.source.lock();
                    devices = DeviceScanner::scan(LocationContext::RuralArea, source.as_mut());
                }
                BatteryReport {
                    mode,
                    networks_found: networks.len(),
                    devices_found: devices.len(),
                    scan_elapsed: watch.elapsed(),
                    battery_impact_percent: mode.battery_impact_percent(),
                }
            })
            .collect()
    }

    /// Static workload characteristics shown by the demo menu.
    #[must_use]
    pub const fn workload_profile() -> [&'static str; 6] {
        [
            "Lightweight conditional logic",
            "Rule-based decision making",
            "Environment scanning and evaluation",
            "Low computational requirements",
            "Fast response times (<5ms decisions)",
            "Battery-efficient operations",
        ]
    }
}

/// Builder for [`ConnectivityRuntime`].
pub struct ConnectivityRuntimeBuilder {
    evaluator: TrustEvaluator,
    policies: PolicyTable,
    source: Option<Box<dyn UniformSource + Send>>,
    telemetry: Option<TelemetryHandle>,
}

impl ConnectivityRuntimeBuilder {
    /// Overrides the trust evaluator.
    #[must_use]
    pub fn evaluator(mut self, evaluator: TrustEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Overrides the policy table.
    #[must_use]
    pub fn policies(mut self, policies: PolicyTable) -> Self {
        self.policies = policies;
        self
    }

    /// Seeds the randomness source for reproducible runs.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.source = Some(Box::new(SeededUniform::new(seed)));
        self
    }

    /// Injects an explicit randomness source (tests).
    #[must_use]
    pub fn source(mut self, source: Box<dyn UniformSource + Send>) -> Self {
        self.source = Some(source);
        self
    }

    /// Attaches telemetry.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetryHandle) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Builds the runtime.
    #[must_use]
    pub fn build(self) -> ConnectivityRuntime {
        let source = self
            .source
            .unwrap_or_else(|| Box::new(SeededUniform::new(random_seed())));
        ConnectivityRuntime {
            evaluator: self.evaluator,
            policies: self.policies,
            budget: LatencyBudget::connectivity_decision(),
            source: Mutex::new(source),
            telemetry: self.telemetry,
        }
    }
}

impl Default for ConnectivityRuntimeBuilder {
    fn default() -> Self {
        Self {
            evaluator: TrustEvaluator::standard(),
            policies: PolicyTable::standard(),
            source: None,
            telemetry: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decisions::NetworkVerdict;
    use crate::scanner::CELLULAR_FALLBACK;
    use sensa_core::{ScriptedUniform, SecurityLevel};
    use shared_telemetry::DecisionTrail;
    use tempfile::tempdir;

    #[test]
    fn home_with_full_scan_reaches_home_trusted() {
        // High draws keep car_system in the scan alongside home_wifi.
        let runtime = ConnectivityRuntime::builder()
            .source(Box::new(ScriptedUniform::new(vec![0.9])))
            .build();
        let report = runtime.evaluate_environment(LocationContext::Home);
        assert_eq!(report.tier, TrustTier::HomeTrusted);
        assert_eq!(report.policy.security_level, SecurityLevel::Low);
        assert!(report
            .decisions
            .iter()
            .all(|d| d.verdict == NetworkVerdict::Full));
    }

    #[test]
    fn rural_quiet_scan_is_emergency_with_fallback_only() {
        let runtime = ConnectivityRuntime::builder()
            .source(Box::new(ScriptedUniform::new(vec![0.0])))
            .build();
        let report = runtime.evaluate_environment(LocationContext::RuralArea);
        assert_eq!(report.tier, TrustTier::Emergency);
        let allowed: Vec<_> = report
            .decisions
            .iter()
            .filter(|d| d.verdict.allows_connection())
            .collect();
        assert_eq!(allowed.len(), 1);
        assert_eq!(allowed[0].network, CELLULAR_FALLBACK);
        assert_eq!(allowed[0].verdict, NetworkVerdict::Emergency);
    }

    #[test]
    fn battery_profile_covers_all_modes() {
        let runtime = ConnectivityRuntime::builder().seed(3).build();
        let reports = runtime.battery_profile();
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].battery_impact_percent, 40);
        // Active modes profile the cellular-only rural scan.
        assert_eq!(reports[0].networks_found, 3);
        assert!(reports[0].devices_found <= 2);
        // Ultra-save performs no passes and finds nothing.
        assert_eq!(reports[3].networks_found, 0);
        assert_eq!(reports[3].devices_found, 0);
    }

    #[tokio::test]
    async fn scenario_sweep_emits_telemetry_per_location() {
        let dir = tempdir().unwrap();
        let trail = DecisionTrail::new(16);
        let telemetry = TelemetryHandle::builder("connectivity")
            .log_path(dir.path().join("connectivity.log.jsonl"))
            .trail(trail.clone())
            .build()
            .unwrap();
        let runtime = ConnectivityRuntime::builder()
            .seed(5)
            .telemetry(telemetry)
            .build();
        let reports = runtime.run_scenarios().await.unwrap();
        assert_eq!(reports.len(), 6);
        assert_eq!(trail.len(), 6);
    }
}
