use serde::{Deserialize, Serialize};

/// Trust classification produced by scoring an environment scan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    /// Home context with multiple trusted devices in range.
    HomeTrusted,
    /// Known context with at least one trusted device in range.
    PublicTrusted,
    /// No trusted devices in range.
    Untrusted,
    /// Designated fallback context with no connectivity to spare.
    Emergency,
}

impl TrustTier {
    /// Wire label matching the policy rule keys used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HomeTrusted => "home_trusted",
            Self::PublicTrusted => "public_trusted",
            Self::Untrusted => "untrusted",
            Self::Emergency => "emergency",
        }
    }
}

/// Security level attached to a policy record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityLevel {
    /// Trusted surroundings, everything allowed.
    Low,
    /// Partially trusted, secured items only.
    Medium,
    /// Untrusted, fallback connectivity only.
    High,
    /// Emergency posture, minimal fallback only.
    Critical,
}

impl SecurityLevel {
    /// Display label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_wire_strings() {
        assert_eq!(TrustTier::HomeTrusted.label(), "home_trusted");
        assert_eq!(TrustTier::Emergency.label(), "emergency");
        assert_eq!(SecurityLevel::Low.label(), "LOW");
        assert_eq!(SecurityLevel::Critical.label(), "CRITICAL");
    }

    #[test]
    fn tiers_serialize_as_snake_case() {
        let json = serde_json::to_string(&TrustTier::PublicTrusted).unwrap();
        assert_eq!(json, "\"public_trusted\"");
    }
}
