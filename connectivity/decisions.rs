use sensa_core::{PolicyRecord, SecurityLevel};
use serde::{Deserialize, Serialize};

use crate::scanner::CELLULAR_FALLBACK;

/// Per-network verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkVerdict {
    /// Full access.
    Full,
    /// Limited access, secured network.
    Limited,
    /// Flagged for avoidance, unsecured network.
    Avoid,
    /// Restricted to the cellular fallback.
    Restricted,
    /// Blocked outright.
    Blocked,
    /// Emergency-only fallback access.
    Emergency,
}

impl NetworkVerdict {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Limited => "LIMITED",
            Self::Avoid => "AVOID",
            Self::Restricted => "RESTRICTED",
            Self::Blocked => "BLOCKED",
            Self::Emergency => "EMERGENCY",
        }
    }

    /// Status glyph rendered next to the label.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Full | Self::Limited | Self::Restricted => "✅",
            Self::Avoid => "➖",
            Self::Blocked => "❌",
            Self::Emergency => "🆘",
        }
    }

    /// True when the network may be used at all.
    #[must_use]
    pub const fn allows_connection(self) -> bool {
        !matches!(self, Self::Avoid | Self::Blocked)
    }
}

/// Verdict for a single scanned network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkDecision {
    /// Network identifier.
    pub network: String,
    /// Verdict applied.
    pub verdict: NetworkVerdict,
    /// Short justification.
    pub reason: String,
}

/// Applies the selected policy to every scanned network.
///
/// Rule table keyed by security level: low allows everything; medium allows
/// only names matching the secured patterns; high blocks everything except
/// the cellular fallback; critical allows the fallback as emergency-only.
#[must_use]
pub fn decide_networks(networks: &[String], policy: &PolicyRecord) -> Vec<NetworkDecision> {
    networks
        .iter()
        .map(|network| {
            let (verdict, reason) = match policy.security_level {
                SecurityLevel::Low => (NetworkVerdict::Full, "trusted"),
                SecurityLevel::Medium => {
                    if network.contains("Secure") || network.contains("Office") {
                        (NetworkVerdict::Limited, "secured")
                    } else {
                        (NetworkVerdict::Avoid, "unsecured")
                    }
                }
                SecurityLevel::High => {
                    if network == CELLULAR_FALLBACK {
                        (NetworkVerdict::Restricted, "cellular")
                    } else {
                        (NetworkVerdict::Blocked, "untrusted")
                    }
                }
                SecurityLevel::Critical => {
                    if network == CELLULAR_FALLBACK {
                        (NetworkVerdict::Emergency, "minimal")
                    } else {
                        (NetworkVerdict::Blocked, "untrusted")
                    }
                }
            };
            NetworkDecision {
                network: network.clone(),
                verdict,
                reason: reason.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensa_core::{PolicyTable, TrustTier};

    fn networks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn low_security_allows_everything() {
        let table = PolicyTable::standard();
        let nets = networks(&["Home_WiFi_5G", "Neighbor_WiFi", CELLULAR_FALLBACK]);
        let decisions = decide_networks(&nets, table.select(TrustTier::HomeTrusted));
        assert!(decisions
            .iter()
            .all(|d| d.verdict == NetworkVerdict::Full));
    }

    #[test]
    fn medium_security_gates_on_secured_names() {
        let table = PolicyTable::standard();
        let nets = networks(&["Office_Secure", "Cafe_Free_WiFi", "Office_Guest"]);
        let decisions = decide_networks(&nets, table.select(TrustTier::PublicTrusted));
        assert_eq!(decisions[0].verdict, NetworkVerdict::Limited);
        assert_eq!(decisions[1].verdict, NetworkVerdict::Avoid);
        assert_eq!(decisions[2].verdict, NetworkVerdict::Limited);
    }

    #[test]
    fn high_security_blocks_all_but_cellular_fallback() {
        let table = PolicyTable::standard();
        let nets = networks(&["Mall_Free", "Store_WiFi", CELLULAR_FALLBACK]);
        let decisions = decide_networks(&nets, table.select(TrustTier::Untrusted));
        assert_eq!(decisions[0].verdict, NetworkVerdict::Blocked);
        assert_eq!(decisions[1].verdict, NetworkVerdict::Blocked);
        assert_eq!(decisions[2].verdict, NetworkVerdict::Restricted);
        assert!(decisions[2].verdict.allows_connection());
    }

    #[test]
    fn critical_security_leaves_emergency_fallback_only() {
        let table = PolicyTable::standard();
        let nets = networks(&["Cellular_4G", CELLULAR_FALLBACK]);
        let decisions = decide_networks(&nets, table.select(TrustTier::Emergency));
        assert_eq!(decisions[0].verdict, NetworkVerdict::Blocked);
        assert_eq!(decisions[1].verdict, NetworkVerdict::Emergency);
        assert_eq!(decisions[1].verdict.glyph(), "🆘");
    }
}
