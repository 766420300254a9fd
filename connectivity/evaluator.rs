use sensa_core::{membership_overlap, TrustTier};

use crate::context::LocationContext;

/// Classifies an environment scan against the trusted device list.
#[derive(Debug, Clone)]
pub struct TrustEvaluator {
    trusted_devices: Vec<String>,
}

impl TrustEvaluator {
    /// Creates an evaluator over an explicit trusted device list.
    #[must_use]
    pub const fn new(trusted_devices: Vec<String>) -> Self {
        Self { trusted_devices }
    }

    /// The builtin trusted device list.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            ["home_wifi", "office_bt", "car_system", "personal_tablet"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        )
    }

    /// Trusted device identifiers.
    #[must_use]
    pub fn trusted_devices(&self) -> &[String] {
        &self.trusted_devices
    }

    /// Classifies the scan: two trusted devices at home earn the highest
    /// tier, one anywhere known earns the medium tier, the rural fallback
    /// context overrides to emergency, everything else is untrusted.
    #[must_use]
    pub fn evaluate(&self, devices: &[String], location: LocationContext) -> TrustTier {
        let overlap = membership_overlap(devices, &self.trusted_devices);
        if location == LocationContext::Home && overlap >= 2 {
            TrustTier::HomeTrusted
        } else if location == LocationContext::Office && overlap >= 1 {
            TrustTier::PublicTrusted
        } else if overlap >= 1 {
            TrustTier::PublicTrusted
        } else if location == LocationContext::RuralArea {
            TrustTier::Emergency
        } else {
            TrustTier::Untrusted
        }
    }
}

impl Default for TrustEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}
