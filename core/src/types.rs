use serde::{Deserialize, Serialize};
use strum::Display;

/// Whether the battery is currently supplying the vehicle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum BatteryStatus {
    On,
    #[default]
    Off,
}

impl From<bool> for BatteryStatus {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
pub enum HealthBand {
    Poor,
    Moderate,
    Good,
}

impl HealthBand {
    pub const GOOD_ABOVE: f64 = 70.0;
    pub const MODERATE_ABOVE: f64 = 30.0;

    pub fn from_health(health: f64) -> Self {
        if health > Self::GOOD_ABOVE {
            Self::Good
        } else if health > Self::MODERATE_ABOVE {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

/// Usage figures for a single health prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub cycles: u32,
    pub temperature: i32,
    pub soc: i32,
    pub kms: i32,
    pub months_old: u32,
}

impl PredictionInput {
    pub(crate) fn features(&self) -> [f64; 4] {
        [
            self.cycles.into(),
            self.temperature.into(),
            self.soc.into(),
            self.kms.into(),
        ]
    }

    /// Health points lost purely to calendar age, ten per year.
    pub fn age_effect(&self) -> f64 {
        f64::from(self.months_old) / 12.0 * 10.0
    }
}
