use sensa_core::{membership_overlap, RandomCheck, UniformSource};
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// Per-operation failure thresholds for the simulated credential checks.
///
/// The values are simulation constants with no real-world accuracy target;
/// they stay configurable rather than tuned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CheckThresholds {
    /// Primary voice-print check (pass rate `1 - voice`).
    pub voice: f32,
    /// Fallback PIN check.
    pub pin: f32,
    /// Simplified check used by the stress test.
    pub quick: f32,
}

impl Default for CheckThresholds {
    fn default() -> Self {
        Self {
            voice: 0.3,
            pin: 0.2,
            quick: 0.4,
        }
    }
}

impl CheckThresholds {
    /// The primary voice check.
    #[must_use]
    pub const fn voice_check(self) -> RandomCheck {
        RandomCheck::new(self.voice)
    }

    /// The fallback PIN check.
    #[must_use]
    pub const fn pin_check(self) -> RandomCheck {
        RandomCheck::new(self.pin)
    }

    /// The stress-test check.
    #[must_use]
    pub const fn quick_check(self) -> RandomCheck {
        RandomCheck::new(self.quick)
    }
}

/// True when at least one of the user's trusted devices is in range.
#[must_use]
pub fn trusted_environment(profile: &UserProfile, nearby: &[String]) -> bool {
    membership_overlap(nearby, &profile.trusted_devices) >= 1
}

/// Runs the simulated voice-print comparison.
pub fn voice_matches(
    thresholds: CheckThresholds,
    source: &mut dyn UniformSource,
) -> bool {
    thresholds.voice_check().passes(source)
}

/// Runs the simulated PIN verification.
pub fn pin_matches(thresholds: CheckThresholds, source: &mut dyn UniformSource) -> bool {
    thresholds.pin_check().passes(source)
}
