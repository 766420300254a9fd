use sensa_core::normalized_dot;
use serde::{Deserialize, Serialize};

use crate::model::{builtin_models, KeywordModel};

/// Best-scoring keyword for one feature vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordMatch {
    /// Matched keyword.
    pub keyword: String,
    /// Normalized similarity score.
    pub confidence: f32,
}

/// Matches extracted features against the keyword model bank.
#[derive(Debug, Clone)]
pub struct KeywordDetector {
    models: Vec<KeywordModel>,
    threshold: f32,
}

impl KeywordDetector {
    /// Creates a detector over an explicit model bank.
    #[must_use]
    pub const fn new(models: Vec<KeywordModel>, threshold: f32) -> Self {
        Self { models, threshold }
    }

    /// Detector over the builtin models with the standard 0.85 threshold.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(builtin_models(), 0.85)
    }

    /// Response threshold in use.
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Enrolled models.
    #[must_use]
    pub fn models(&self) -> &[KeywordModel] {
        &self.models
    }

    /// Best similarity across the bank; `None` when the bank is empty or no
    /// model clears the threshold.
    #[must_use]
    pub fn best_match(&self, features: &[f32]) -> Option<KeywordMatch> {
        self.models
            .iter()
            .map(|model| KeywordMatch {
                keyword: model.keyword.clone(),
                confidence: normalized_dot(features, &model.features),
            })
            .filter(|candidate| candidate.confidence > self.threshold)
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    /// True when any model clears the threshold.
    #[must_use]
    pub fn detect(&self, features: &[f32]) -> bool {
        self.best_match(features).is_some()
    }
}

impl Default for KeywordDetector {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::FEATURE_DIM;

    #[test]
    fn strong_aligned_features_are_detected() {
        let detector = KeywordDetector::standard();
        // Against the Thusa model (0.3 constant), a constant 4.0 vector
        // scores |256 * 1.2| / 256 = 1.2, above the 0.85 threshold.
        let features = vec![4.0_f32; FEATURE_DIM];
        let matched = detector.best_match(&features).unwrap();
        assert_eq!(matched.keyword, "Thusa");
        assert!(matched.confidence > 0.85);
    }

    #[test]
    fn weak_features_are_not_detected() {
        let detector = KeywordDetector::standard();
        let features = vec![0.1_f32; FEATURE_DIM];
        assert!(!detector.detect(&features));
    }

    #[test]
    fn zero_features_score_zero_without_fault() {
        let detector = KeywordDetector::standard();
        let features = vec![0.0_f32; FEATURE_DIM];
        assert!(detector.best_match(&features).is_none());
        assert!(!detector.detect(&[]));
    }

    #[test]
    fn empty_bank_never_matches() {
        let detector = KeywordDetector::new(Vec::new(), 0.85);
        let features = vec![4.0_f32; FEATURE_DIM];
        assert!(!detector.detect(&features));
    }

    #[test]
    fn best_match_prefers_highest_confidence() {
        let detector = KeywordDetector::standard();
        let features = vec![4.0_f32; FEATURE_DIM];
        // Feta scores 0.4, Romela 0.8, Thusa 1.2: only Thusa clears 0.85.
        let matched = detector.best_match(&features).unwrap();
        assert!((matched.confidence - 1.2).abs() < 1e-4);
    }
}
