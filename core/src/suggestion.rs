use crate::types::HealthBand;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Suggestion {
    #[strum(to_string = "Battery health is good. Keep it well-maintained for a longer lifespan.")]
    HealthGood,

    #[strum(
        to_string = "Battery health is moderate. Follow operational suggestions to improve battery life."
    )]
    HealthModerate,
    #[strum(to_string = "Avoid extreme temperatures for better battery health.")]
    AvoidExtremeTemperatures,
    #[strum(to_string = "Consider reducing average daily kilometers for improved battery life.")]
    ReduceDailyKilometers,

    #[strum(to_string = "Battery health is poor. Take immediate action to prevent battery damage.")]
    HealthPoor,
    #[strum(to_string = "Urgent: Extreme temperatures may damage the battery. Take precautions.")]
    UrgentExtremeTemperatures,
    #[strum(to_string = "Limiting daily kilometers will help preserve battery life.")]
    LimitDailyKilometers,
}

/// Conditions that determine which suggestions apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub health: f64,
    pub temperature: f64,
    /// Most recent average daily distance, if any usage has been recorded.
    pub latest_kms: Option<f64>,
}

impl Conditions {
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let kms_above = |limit: f64| self.latest_kms.is_some_and(|kms| kms > limit);

        let mut suggestions = Vec::new();

        match HealthBand::from_health(self.health) {
            HealthBand::Good => suggestions.push(Suggestion::HealthGood),
            HealthBand::Moderate => {
                suggestions.push(Suggestion::HealthModerate);
                if self.temperature > 35.0 {
                    suggestions.push(Suggestion::AvoidExtremeTemperatures);
                }
                if kms_above(50.0) {
                    suggestions.push(Suggestion::ReduceDailyKilometers);
                }
            }
            HealthBand::Poor => {
                suggestions.push(Suggestion::HealthPoor);
                if self.temperature > 40.0 {
                    suggestions.push(Suggestion::UrgentExtremeTemperatures);
                }
                if kms_above(30.0) {
                    suggestions.push(Suggestion::LimitDailyKilometers);
                }
            }
        }

        suggestions
    }
}
