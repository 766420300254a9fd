use serde::{Deserialize, Serialize};

/// Environment the device currently sits in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationContext {
    /// Private home environment.
    Home,
    /// Corporate office.
    Office,
    /// Public cafe.
    PublicCafe,
    /// Shopping mall.
    ShoppingMall,
    /// Airport terminal.
    Airport,
    /// Rural area with cellular coverage only.
    RuralArea,
}

impl LocationContext {
    /// All demo scenarios in sweep order.
    #[must_use]
    pub const fn scenarios() -> [Self; 6] {
        [
            Self::Home,
            Self::Office,
            Self::PublicCafe,
            Self::ShoppingMall,
            Self::Airport,
            Self::RuralArea,
        ]
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Office => "Office",
            Self::PublicCafe => "Public Cafe",
            Self::ShoppingMall => "Shopping Mall",
            Self::Airport => "Airport",
            Self::RuralArea => "Rural Area",
        }
    }
}

/// Scanning power mode for the battery profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerMode {
    /// Aggressive scanning.
    HighPower,
    /// Default scanning.
    Balanced,
    /// Reduced scanning.
    LowPower,
    /// Scanning suspended.
    UltraSave,
}

impl PowerMode {
    /// All modes in profile order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::HighPower,
            Self::Balanced,
            Self::LowPower,
            Self::UltraSave,
        ]
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighPower => "HIGH_POWER",
            Self::Balanced => "BALANCED",
            Self::LowPower => "LOW_POWER",
            Self::UltraSave => "ULTRA_SAVE",
        }
    }

    /// Number of scan passes performed in this mode.
    #[must_use]
    pub const fn scan_intensity(self) -> usize {
        match self {
            Self::HighPower => 4,
            Self::Balanced => 2,
            Self::LowPower => 1,
            Self::UltraSave => 0,
        }
    }

    /// Rough battery impact estimate in percent.
    #[must_use]
    pub const fn battery_impact_percent(self) -> usize {
        self.scan_intensity() * 10
    }
}
