use serde::{Deserialize, Serialize};

use crate::audio::FEATURE_DIM;

/// Reference feature vector for one enrolled keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordModel {
    /// The keyword this model recognizes.
    pub keyword: String,
    /// Stored feature vector.
    pub features: Vec<f32>,
}

impl KeywordModel {
    /// Creates a model.
    #[must_use]
    pub fn new(keyword: impl Into<String>, features: Vec<f32>) -> Self {
        Self {
            keyword: keyword.into(),
            features,
        }
    }
}

/// The builtin Sesotho command models: Feta (call), Romela (send),
/// Thusa (help). Each is a constant vector scaled by its position.
#[must_use]
pub fn builtin_models() -> Vec<KeywordModel> {
    ["Feta", "Romela", "Thusa"]
        .into_iter()
        .enumerate()
        .map(|(idx, keyword)| {
            #[allow(clippy::cast_precision_loss)]
            let level = 0.1 * (idx + 1) as f32;
            KeywordModel::new(keyword, vec![level; FEATURE_DIM])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_holds_three_scaled_models() {
        let models = builtin_models();
        assert_eq!(models.len(), 3);
        assert_eq!(models[0].keyword, "Feta");
        assert_eq!(models[2].keyword, "Thusa");
        assert_eq!(models[1].features.len(), FEATURE_DIM);
        assert!((models[1].features[0] - 0.2).abs() < 1e-6);
        assert!((models[2].features[0] - 0.3).abs() < 1e-6);
    }
}
