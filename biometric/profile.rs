use sensa_core::ReferenceStore;
use serde::{Deserialize, Serialize};

/// Trusted reference data for one enrolled user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Hash of the enrolled voice print.
    pub voice_print_hash: String,
    /// Secondary credential.
    pub pin: String,
    /// Device identifiers that mark a trusted environment.
    pub trusted_devices: Vec<String>,
}

impl UserProfile {
    /// Creates a profile.
    #[must_use]
    pub fn new(
        voice_print_hash: impl Into<String>,
        pin: impl Into<String>,
        trusted_devices: Vec<String>,
    ) -> Self {
        Self {
            voice_print_hash: voice_print_hash.into(),
            pin: pin.into(),
            trusted_devices,
        }
    }
}

/// The builtin three-user demo database.
#[must_use]
pub fn builtin_profiles() -> ReferenceStore<UserProfile> {
    ReferenceStore::from_entries([
        (
            "thabo".to_string(),
            UserProfile::new(
                "voice_hash_1234",
                "5678",
                vec!["home_bt".into(), "car_bt".into()],
            ),
        ),
        (
            "matseliso".to_string(),
            UserProfile::new("voice_hash_5678", "1234", vec!["office_wifi".into()]),
        ),
        (
            "ntate_john".to_string(),
            UserProfile::new(
                "voice_hash_9012",
                "4321",
                vec!["home_bt".into(), "personal_device".into()],
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_holds_three_profiles() {
        let store = builtin_profiles();
        assert_eq!(store.len(), 3);
        let thabo = store.lookup("thabo").unwrap();
        assert_eq!(thabo.pin, "5678");
        assert_eq!(thabo.trusted_devices, vec!["home_bt", "car_bt"]);
        assert!(store.lookup("unknown_user").is_none());
    }
}
