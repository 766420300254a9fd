use sensa_core::UniformSource;

use crate::context::LocationContext;

/// Fallback network appended to every scan.
pub const CELLULAR_FALLBACK: &str = "Cellular_Data";

/// Returns the networks visible at a location.
///
/// Deterministic in shape: each location yields its fixed list, always
/// terminated by the cellular fallback. Unlisted contexts resolve to the
/// rural (cellular-only) set rather than failing.
#[must_use]
pub fn scan_networks(location: LocationContext) -> Vec<String> {
    let base: &[&str] = match location {
        LocationContext::Home => &["Home_WiFi_5G", "Home_WiFi_2G", "Neighbor_WiFi"],
        LocationContext::Office => &["Office_Secure", "Office_Guest", "Conference_Room"],
        LocationContext::PublicCafe => &["Cafe_Free_WiFi", "Cafe_Premium", "Public_Hotspot"],
        LocationContext::ShoppingMall => &["Mall_Free", "Store_WiFi", "FoodCourt_Network"],
        LocationContext::Airport => &["Airport_Free", "Airport_Premium", "Airline_Lounge"],
        LocationContext::RuralArea => &["Cellular_4G", "Cellular_3G"],
    };
    let mut networks: Vec<String> = base.iter().map(|n| (*n).to_string()).collect();
    networks.push(CELLULAR_FALLBACK.to_string());
    networks
}

/// Scans nearby devices: location-anchored trusted devices plus randomly
/// jittered unknowns drawn from the injected source.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceScanner;

impl DeviceScanner {
    /// Each jitter gate draws independently in 0..=3.
    fn draw(source: &mut dyn UniformSource) -> u8 {
        // next_f32 is in [0, 1), so the cast lands in 0..=3.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = (source.next_f32() * 4.0) as u8;
        value.min(3)
    }

    /// Performs one device scan for the location.
    pub fn scan(location: LocationContext, source: &mut dyn UniformSource) -> Vec<String> {
        let mut devices: Vec<String> = Vec::new();
        match location {
            LocationContext::Home => {
                devices.push("home_wifi".into());
                devices.push("smart_tv".into());
                if Self::draw(source) > 1 {
                    devices.push("car_system".into());
                }
            }
            LocationContext::Office => {
                devices.push("office_bt".into());
                if Self::draw(source) > 1 {
                    devices.push("printer_01".into());
                }
            }
            _ => {}
        }
        if Self::draw(source) > 0 {
            devices.push("unknown_device_1".into());
        }
        if Self::draw(source) > 1 {
            devices.push("strange_bt_device".into());
        }
        devices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensa_core::ScriptedUniform;

    #[test]
    fn every_scan_ends_with_cellular_fallback() {
        for location in LocationContext::scenarios() {
            let networks = scan_networks(location);
            assert_eq!(networks.last().map(String::as_str), Some(CELLULAR_FALLBACK));
            assert!(networks.len() >= 3);
        }
    }

    #[test]
    fn home_scan_anchors_trusted_devices() {
        // Draws of 0.9 map to 3, passing every jitter gate.
        let mut source = ScriptedUniform::new(vec![0.9]);
        let devices = DeviceScanner::scan(LocationContext::Home, &mut source);
        assert_eq!(
            devices,
            vec!["home_wifi", "smart_tv", "car_system", "unknown_device_1", "strange_bt_device"]
        );
    }

    #[test]
    fn quiet_scan_in_unanchored_location_is_empty() {
        // Draws of 0.0 map to 0, failing every jitter gate.
        let mut source = ScriptedUniform::new(vec![0.0]);
        let devices = DeviceScanner::scan(LocationContext::Airport, &mut source);
        assert!(devices.is_empty());
    }
}
