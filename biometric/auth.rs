use std::time::Duration;

use chrono::{DateTime, Utc};
use sensa_core::{LatencyBudget, LatencyWarning, ReferenceStore, Stopwatch, UniformSource};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    checks::{pin_matches, trusted_environment, voice_matches, CheckThresholds},
    profile::UserProfile,
};

/// Credential that decided the authentication attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Primary voice-print check.
    Voice,
    /// Fallback PIN verification.
    Pin,
}

impl AuthMethod {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Voice => "Voice",
            Self::Pin => "PIN",
        }
    }
}

/// Outcome of one authentication attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AuthOutcome {
    /// Access granted.
    Granted {
        /// Credential that succeeded.
        method: AuthMethod,
        /// True when trusted devices were in range, upgrading the
        /// justification reported with the decision.
        trusted_environment: bool,
    },
    /// All applicable credentials failed.
    Denied {
        /// Last credential attempted.
        method: AuthMethod,
    },
    /// The identity key is not in the reference store.
    UnknownUser,
}

/// Final per-user verdict plus latency metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthDecision {
    /// Decision id.
    pub id: Uuid,
    /// Identity key that was evaluated.
    pub user_id: String,
    /// Verdict.
    pub outcome: AuthOutcome,
    /// Wall-clock time for the whole attempt.
    pub elapsed: Duration,
    /// Set when the attempt overran the latency budget.
    pub warning: Option<LatencyWarning>,
    /// Decision timestamp.
    pub decided_at: DateTime<Utc>,
}

impl AuthDecision {
    /// True when access was granted.
    #[must_use]
    pub const fn granted(&self) -> bool {
        matches!(self.outcome, AuthOutcome::Granted { .. })
    }

    /// Justification tag rendered next to the verdict, empty when none.
    #[must_use]
    pub const fn context_note(&self) -> &'static str {
        match self.outcome {
            AuthOutcome::Granted {
                trusted_environment: true,
                ..
            } => " (Trusted Environment)",
            _ => "",
        }
    }
}

/// Two-stage multi-factor decision rule.
///
/// A voice pass combined with a trusted environment upgrades the reported
/// justification; a voice pass alone is sufficient without the upgrade; a
/// voice failure falls through to the PIN check.
#[derive(Debug, Clone, Copy)]
pub struct Authenticator {
    thresholds: CheckThresholds,
    budget: LatencyBudget,
}

impl Authenticator {
    /// Creates an authenticator with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: CheckThresholds) -> Self {
        Self {
            thresholds,
            budget: LatencyBudget::authentication(),
        }
    }

    /// Configured thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> CheckThresholds {
        self.thresholds
    }

    /// Evaluates one identity against the reference store and the current
    /// device scan. An unknown identity yields a decision, not an error.
    pub fn authenticate(
        &self,
        user_id: &str,
        profiles: &ReferenceStore<UserProfile>,
        nearby: &[String],
        source: &mut dyn UniformSource,
    ) -> AuthDecision {
        let watch = Stopwatch::start();
        let outcome = profiles.lookup(user_id).map_or(AuthOutcome::UnknownUser, |profile| {
            self.decide(profile, nearby, source)
        });
        let elapsed = watch.elapsed();
        AuthDecision {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            outcome,
            elapsed,
            warning: self.budget.check(elapsed),
            decided_at: Utc::now(),
        }
    }

    fn decide(
        &self,
        profile: &UserProfile,
        nearby: &[String],
        source: &mut dyn UniformSource,
    ) -> AuthOutcome {
        let voice_ok = voice_matches(self.thresholds, source);
        if voice_ok {
            return AuthOutcome::Granted {
                method: AuthMethod::Voice,
                trusted_environment: trusted_environment(profile, nearby),
            };
        }
        if pin_matches(self.thresholds, source) {
            AuthOutcome::Granted {
                method: AuthMethod::Pin,
                trusted_environment: false,
            }
        } else {
            AuthOutcome::Denied {
                method: AuthMethod::Pin,
            }
        }
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(CheckThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::builtin_profiles;
    use sensa_core::ScriptedUniform;

    fn nearby_home() -> Vec<String> {
        vec!["home_bt".into(), "car_bt".into(), "tv_system".into()]
    }

    #[test]
    fn voice_pass_in_trusted_environment_carries_tag() {
        let profiles = builtin_profiles();
        let mut source = ScriptedUniform::new(vec![0.95]);
        let decision = Authenticator::default().authenticate(
            "thabo",
            &profiles,
            &nearby_home(),
            &mut source,
        );
        assert_eq!(
            decision.outcome,
            AuthOutcome::Granted {
                method: AuthMethod::Voice,
                trusted_environment: true,
            }
        );
        assert_eq!(decision.context_note(), " (Trusted Environment)");
        assert!(decision.granted());
    }

    #[test]
    fn voice_pass_without_trusted_devices_has_no_tag() {
        let profiles = builtin_profiles();
        let mut source = ScriptedUniform::new(vec![0.95]);
        let nearby = vec!["public_wifi".into()];
        let decision =
            Authenticator::default().authenticate("thabo", &profiles, &nearby, &mut source);
        assert_eq!(
            decision.outcome,
            AuthOutcome::Granted {
                method: AuthMethod::Voice,
                trusted_environment: false,
            }
        );
        assert_eq!(decision.context_note(), "");
    }

    #[test]
    fn voice_failure_falls_through_to_pin() {
        let profiles = builtin_profiles();
        // Voice draw 0.1 fails (<= 0.3), PIN draw 0.9 passes (> 0.2).
        let mut source = ScriptedUniform::new(vec![0.1, 0.9]);
        let decision = Authenticator::default().authenticate(
            "matseliso",
            &profiles,
            &nearby_home(),
            &mut source,
        );
        assert_eq!(
            decision.outcome,
            AuthOutcome::Granted {
                method: AuthMethod::Pin,
                trusted_environment: false,
            }
        );
    }

    #[test]
    fn both_checks_failing_denies_via_pin() {
        let profiles = builtin_profiles();
        let mut source = ScriptedUniform::new(vec![0.1, 0.1]);
        let decision = Authenticator::default().authenticate(
            "ntate_john",
            &profiles,
            &nearby_home(),
            &mut source,
        );
        assert_eq!(
            decision.outcome,
            AuthOutcome::Denied {
                method: AuthMethod::Pin,
            }
        );
        assert!(!decision.granted());
    }

    #[test]
    fn unknown_identity_is_a_decision_not_an_error() {
        let profiles = builtin_profiles();
        let mut source = ScriptedUniform::new(vec![0.95]);
        let decision = Authenticator::default().authenticate(
            "unknown_user",
            &profiles,
            &nearby_home(),
            &mut source,
        );
        assert_eq!(decision.outcome, AuthOutcome::UnknownUser);
        assert!(decision.warning.is_none());
    }
}
