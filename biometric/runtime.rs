use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;
use sensa_core::{random_seed, ReferenceStore, SeededUniform, Stopwatch, UniformSource};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared_telemetry::{LogLevel, TelemetryHandle};
use tokio::time::sleep;

use crate::{
    auth::{AuthDecision, Authenticator},
    checks::CheckThresholds,
    profile::{builtin_profiles, UserProfile},
};

const STRESS_PACING: Duration = Duration::from_millis(100);

/// Decision produced while sweeping a named environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextReport {
    /// Environment label.
    pub environment: String,
    /// Devices observed in that environment.
    pub devices: Vec<String>,
    /// Authentication decision taken in context.
    pub decision: AuthDecision,
}

/// Aggregate result of the stress test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressReport {
    /// Attempts executed.
    pub attempts: usize,
    /// Attempts that passed the quick check.
    pub successes: usize,
    /// Total wall-clock time including pacing.
    pub total_elapsed: Duration,
    /// Average time per attempt.
    pub average: Duration,
}

/// Runtime orchestrating the biometric authentication simulator.
pub struct BiometricRuntime {
    profiles: ReferenceStore<UserProfile>,
    authenticator: Authenticator,
    source: Mutex<Box<dyn UniformSource + Send>>,
    telemetry: Option<TelemetryHandle>,
}

impl BiometricRuntime {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> BiometricRuntimeBuilder {
        BiometricRuntimeBuilder::default()
    }

    /// The enrolled profile store.
    #[must_use]
    pub const fn profiles(&self) -> &ReferenceStore<UserProfile> {
        &self.profiles
    }

    /// Fixed nearby-device scan used by the authentication sweep.
    #[must_use]
    pub fn scan_nearby() -> Vec<String> {
        ["home_bt", "unknown_device", "office_wifi", "car_bt"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Authenticates a single identity against the current scan.
    pub fn authenticate(&self, user_id: &str, nearby: &[String]) -> AuthDecision {
        let mut source = self.source.lock();
        let decision =
            self.authenticator
                .authenticate(user_id, &self.profiles, nearby, source.as_mut());
        if let Some(tel) = &self.telemetry {
            tel.event(
                "auth.decision",
                json!({
                    "user": decision.user_id,
                    "granted": decision.granted(),
                    "elapsed_ms": decision.elapsed.as_millis(),
                }),
            );
        }
        decision
    }

    /// Authenticates every enrolled identity plus a missing one; the
    /// unknown-user decision does not stop the batch.
    pub fn authentication_sweep(&self) -> Vec<AuthDecision> {
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(
                LogLevel::Info,
                "auth.sweep.start",
                json!({ "profiles": self.profiles.len() }),
            );
        }
        let nearby = Self::scan_nearby();
        ["thabo", "matseliso", "ntate_john", "unknown_user"]
            .into_iter()
            .map(|user| self.authenticate(user, &nearby))
            .collect()
    }

    /// Re-authenticates `thabo` across the four demo environments, each with
    /// its own simulated device scan.
    #[must_use]
    pub fn context_sweep(&self) -> Vec<ContextReport> {
        let environments: [(&str, &[&str]); 4] = [
            ("Home", &["home_bt", "car_bt", "tv_system"]),
            ("Office", &["office_wifi", "printer_bt"]),
            ("Public", &["public_wifi", "unknown_device1"]),
            ("Unknown", &["strange_device", "unknown_network"]),
        ];
        environments
            .into_iter()
            .map(|(environment, devices)| {
                let devices: Vec<String> = devices.iter().map(|d| (*d).to_string()).collect();
                let decision = self.authenticate("thabo", &devices);
                ContextReport {
                    environment: environment.to_string(),
                    devices,
                    decision,
                }
            })
            .collect()
    }

    /// Repeated quick checks with cosmetic pacing between attempts.
    pub async fn stress_test(&self, attempts: usize) -> Result<StressReport> {
        let quick = self.authenticator.thresholds().quick_check();
        let watch = Stopwatch::start();
        let mut successes = 0;
        for _ in 0..attempts {
            let passed = {
                let mut source = self.source.lock();
                quick.passes(source.as_mut())
            };
            if passed {
                successes += 1;
            }
            sleep(STRESS_PACING).await;
        }
        let total_elapsed = watch.elapsed();
        let average = total_elapsed
            .checked_div(u32::try_from(attempts.max(1))?)
            .unwrap_or_default();
        let report = StressReport {
            attempts,
            successes,
            total_elapsed,
            average,
        };
        if let Some(tel) = &self.telemetry {
            let _ = tel.log(
                LogLevel::Info,
                "auth.stress.completed",
                json!({ "attempts": attempts, "successes": successes }),
            );
            tel.event(
                "auth.stress",
                json!({ "attempts": attempts, "successes": successes }),
            );
        }
        Ok(report)
    }

    /// Static workload characteristics shown by the demo menu.
    #[must_use]
    pub const fn workload_profile() -> [&'static str; 5] {
        [
            "Multi-factor authentication (voice + PIN)",
            "Context-aware security policies",
            "Moderate latency tolerance (1-2 seconds)",
            "Random memory access patterns",
            "Decision logic intensive",
        ]
    }
}

/// Builder for [`BiometricRuntime`].
pub struct BiometricRuntimeBuilder {
    thresholds: CheckThresholds,
    source: Option<Box<dyn UniformSource + Send>>,
    telemetry: Option<TelemetryHandle>,
}

impl BiometricRuntimeBuilder {
    /// Overrides the simulated check thresholds.
    #[must_use]
    pub fn thresholds(mut self, thresholds: CheckThresholds) -> Self {
        self.thresholds = thresholds;
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

    /// Builds the runtime with the builtin profile store.
    #[must_use]
    pub fn build(self) -> BiometricRuntime {
        let source = self
            .source
            .unwrap_or_else(|| Box::new(SeededUniform::new(random_seed())));
        BiometricRuntime {
            profiles: builtin_profiles(),
            authenticator: Authenticator::new(self.thresholds),
            source: Mutex::new(source),
            telemetry: self.telemetry,
        }
    }
}

impl Default for BiometricRuntimeBuilder {
    fn default() -> Self {
        Self {
            thresholds: CheckThresholds::default(),
            source: None,
            telemetry: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthOutcome;
    use sensa_core::ScriptedUniform;
    use shared_telemetry::DecisionTrail;

    #[test]
    fn sweep_includes_unknown_user_and_continues() {
        let runtime = BiometricRuntime::builder()
            .source(Box::new(ScriptedUniform::new(vec![0.95])))
            .build();
        let decisions = runtime.authentication_sweep();
        assert_eq!(decisions.len(), 4);
        assert_eq!(decisions[3].outcome, AuthOutcome::UnknownUser);
        // The three enrolled users were still evaluated after queueing.
        assert!(decisions[..3].iter().all(AuthDecision::granted));
    }

    #[test]
    fn context_sweep_tags_only_trusted_environments() {
        let runtime = BiometricRuntime::builder()
            .source(Box::new(ScriptedUniform::new(vec![0.95])))
            .build();
        let reports = runtime.context_sweep();
        assert_eq!(reports.len(), 4);
        assert_eq!(
            reports[0].decision.context_note(),
            " (Trusted Environment)"
        );
        assert_eq!(reports[2].decision.context_note(), "");
        assert_eq!(reports[3].decision.context_note(), "");
    }

    #[tokio::test]
    async fn stress_test_counts_scripted_passes() {
        let trail = DecisionTrail::new(8);
        let telemetry = TelemetryHandle::builder("biometric")
            .trail(trail.clone())
            .build()
            .unwrap();
        // Quick check threshold 0.4: three passes, two failures.
        let runtime = BiometricRuntime::builder()
            .source(Box::new(ScriptedUniform::new(vec![
                0.9, 0.1, 0.8, 0.2, 0.7,
            ])))
            .telemetry(telemetry)
            .build();
        let report = runtime.stress_test(5).await.unwrap();
        assert_eq!(report.attempts, 5);
        assert_eq!(report.successes, 3);
        assert!(report.total_elapsed >= Duration::from_millis(500));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn seeded_runtimes_agree() {
        let a = BiometricRuntime::builder().seed(11).build();
        let b = BiometricRuntime::builder().seed(11).build();
        let nearby = BiometricRuntime::scan_nearby();
        let da = a.authenticate("thabo", &nearby);
        let db = b.authenticate("thabo", &nearby);
        assert_eq!(da.outcome, db.outcome);
    }
}
