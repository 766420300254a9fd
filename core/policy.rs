use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::levels::{SecurityLevel, TrustTier};

/// Connection/access mode granted by a policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessMode {
    /// Unrestricted access.
    FullAccess,
    /// Secured items only.
    LimitedAccess,
    /// Fallback connectivity only.
    Restricted,
    /// Minimal emergency fallback only.
    EmergencyOnly,
}

impl AccessMode {
    /// Display label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullAccess => "FULL_ACCESS",
            Self::LimitedAccess => "LIMITED_ACCESS",
            Self::Restricted => "RESTRICTED",
            Self::EmergencyOnly => "EMERGENCY_ONLY",
        }
    }
}

/// Decision parameters applied to all items of one pipeline run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyRecord {
    /// Security posture.
    pub security_level: SecurityLevel,
    /// Whether a secondary credential (PIN) is required.
    pub require_secondary: bool,
    /// Data budget in megabytes.
    pub data_limit_mb: u32,
    /// Connection/access mode.
    pub access_mode: AccessMode,
}

/// Read-only mapping from trust tier to policy record.
///
/// Selection is total: a tier missing from a hand-built table falls back to
/// the most restrictive record instead of failing.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    records: IndexMap<TrustTier, PolicyRecord>,
    fallback: PolicyRecord,
}

impl PolicyTable {
    /// Builds a table from `(tier, record)` pairs.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = (TrustTier, PolicyRecord)>) -> Self {
        Self {
            records: records.into_iter().collect(),
            fallback: Self::emergency_record(),
        }
    }

    /// The standard four-tier policy table.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_records([
            (
                TrustTier::HomeTrusted,
                PolicyRecord {
                    security_level: SecurityLevel::Low,
                    require_secondary: false,
                    data_limit_mb: 1000,
                    access_mode: AccessMode::FullAccess,
                },
            ),
            (
                TrustTier::PublicTrusted,
                PolicyRecord {
                    security_level: SecurityLevel::Medium,
                    require_secondary: true,
                    data_limit_mb: 500,
                    access_mode: AccessMode::LimitedAccess,
                },
            ),
            (
                TrustTier::Untrusted,
                PolicyRecord {
                    security_level: SecurityLevel::High,
                    require_secondary: true,
                    data_limit_mb: 100,
                    access_mode: AccessMode::Restricted,
                },
            ),
            (TrustTier::Emergency, Self::emergency_record()),
        ])
    }

    /// Selects the policy for a classification.
    #[must_use]
    pub fn select(&self, tier: TrustTier) -> &PolicyRecord {
        self.records.get(&tier).unwrap_or(&self.fallback)
    }

    /// Number of tiers configured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no tiers are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    const fn emergency_record() -> PolicyRecord {
        PolicyRecord {
            security_level: SecurityLevel::Critical,
            require_secondary: true,
            data_limit_mb: 50,
            access_mode: AccessMode::EmergencyOnly,
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_all_tiers() {
        let table = PolicyTable::standard();
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.select(TrustTier::HomeTrusted).security_level,
            SecurityLevel::Low
        );
        assert_eq!(table.select(TrustTier::HomeTrusted).data_limit_mb, 1000);
        assert!(!table.select(TrustTier::HomeTrusted).require_secondary);
        assert_eq!(
            table.select(TrustTier::Emergency).access_mode,
            AccessMode::EmergencyOnly
        );
    }

    #[test]
    fn sparse_table_falls_back_to_most_restrictive() {
        let table = PolicyTable::from_records([]);
        let record = table.select(TrustTier::HomeTrusted);
        assert_eq!(record.security_level, SecurityLevel::Critical);
        assert_eq!(record.data_limit_mb, 50);
    }
}
