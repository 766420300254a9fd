use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::UniformSource;

/// Errors raised while configuring scoring parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    /// Random-check thresholds must lie in `[0, 1)`.
    #[error("threshold {0} outside [0, 1)")]
    ThresholdOutOfRange(f32),
}

/// Counts observed identifiers present in the trusted set.
///
/// Each observed item is counted at most once, regardless of duplicates in
/// the trusted list.
#[must_use]
pub fn membership_overlap<S: AsRef<str>, T: AsRef<str>>(observed: &[S], trusted: &[T]) -> usize {
    observed
        .iter()
        .filter(|item| {
            trusted
                .iter()
                .any(|candidate| candidate.as_ref() == item.as_ref())
        })
        .count()
}

/// Simulated unreliable sensor: passes iff a uniform draw exceeds the
/// threshold, so the pass probability is `1 - threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomCheck {
    /// Per-operation failure threshold in `[0, 1)`.
    pub threshold: f32,
}

impl RandomCheck {
    /// Creates a check with the given threshold.
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Creates a check after validating the threshold range.
    pub fn try_new(threshold: f32) -> Result<Self, ScoreError> {
        if (0.0..1.0).contains(&threshold) {
            Ok(Self { threshold })
        } else {
            Err(ScoreError::ThresholdOutOfRange(threshold))
        }
    }

    /// Draws once from the source and decides pass/fail.
    pub fn passes(self, source: &mut dyn UniformSource) -> bool {
        source.next_f32() > self.threshold
    }
}

/// Absolute normalized dot product between two feature vectors.
///
/// Normalizes by the shorter length; either slice being empty yields 0.0 so
/// the divisor is never zero.
#[must_use]
pub fn normalized_dot(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    #[allow(clippy::cast_precision_loss)]
    let divisor = len as f32;
    dot.abs() / divisor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedUniform, SeededUniform};

    #[test]
    fn overlap_counts_matches_once() {
        let observed = ["home_bt", "car_bt", "tv_system"];
        let trusted = ["home_bt", "car_bt"];
        assert_eq!(membership_overlap(&observed, &trusted), 2);
    }

    #[test]
    fn overlap_of_disjoint_sets_is_zero() {
        let observed = ["strange_device", "unknown_network"];
        let trusted = ["home_bt", "car_bt"];
        assert_eq!(membership_overlap(&observed, &trusted), 0);
        let empty: [&str; 0] = [];
        assert_eq!(membership_overlap(&empty, &trusted), 0);
        assert_eq!(membership_overlap(&observed, &empty), 0);
    }

    #[test]
    fn random_check_follows_threshold() {
        let check = RandomCheck::new(0.3);
        let mut passing = ScriptedUniform::new(vec![0.31]);
        let mut failing = ScriptedUniform::new(vec![0.29]);
        assert!(check.passes(&mut passing));
        assert!(!check.passes(&mut failing));
    }

    #[test]
    fn random_check_pass_rate_tracks_threshold() {
        let check = RandomCheck::new(0.4);
        let mut source = SeededUniform::new(99);
        let trials = 2000;
        let passes = (0..trials).filter(|_| check.passes(&mut source)).count();
        #[allow(clippy::cast_precision_loss)]
        let rate = passes as f32 / trials as f32;
        assert!((rate - 0.6).abs() < 0.03, "pass rate {rate} off target");
    }

    #[test]
    fn identical_unit_vectors_score_one() {
        let unit = vec![1.0_f32; 64];
        assert!((normalized_dot(&unit, &unit) - 1.0).abs() < 1e-6);
        let v = vec![0.2_f32; 256];
        assert!((normalized_dot(&v, &v) - 0.04).abs() < 1e-5);
    }

    #[test]
    fn threshold_validation_rejects_out_of_range() {
        assert!(RandomCheck::try_new(0.4).is_ok());
        assert_eq!(
            RandomCheck::try_new(1.2),
            Err(ScoreError::ThresholdOutOfRange(1.2))
        );
        assert!(RandomCheck::try_new(-0.1).is_err());
    }

    #[test]
    fn zero_or_empty_vectors_never_divide_by_zero() {
        let zeros = vec![0.0_f32; 256];
        let model = vec![0.3_f32; 256];
        assert!(normalized_dot(&zeros, &model).abs() < f32::EPSILON);
        assert!(normalized_dot(&[], &model).abs() < f32::EPSILON);
        assert!(normalized_dot(&model, &[]).abs() < f32::EPSILON);
    }
}
