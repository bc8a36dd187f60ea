use crate::{
    battery::Battery,
    error::{Error, Result},
    suggestion::Suggestion,
    types::BatteryStatus,
};
use std::fmt;
use strum::{Display, EnumIter};

/// Outcome of an ignition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EngineChange {
    #[strum(to_string = "Engine started successfully.")]
    Started,
    #[strum(to_string = "Engine is already running.")]
    AlreadyRunning,
    #[strum(to_string = "Engine stopped successfully.")]
    Stopped,
    #[strum(to_string = "Engine is already off.")]
    AlreadyOff,
}

/// General advice offered alongside the computed suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ImprovementTip {
    #[strum(to_string = "Reducing daily kilometers can extend your battery life.")]
    ReduceDailyKilometers,
    #[strum(to_string = "Avoiding extreme temperatures is crucial for preserving battery health.")]
    AvoidExtremeTemperatures,
    #[strum(to_string = "Charging your battery regularly helps maintain optimal health.")]
    ChargeRegularly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementEstimate {
    Acceptable,
    ReplaceIn { months: i64 },
}

impl ReplacementEstimate {
    /// Health below which replacement is recommended.
    pub const THRESHOLD: f64 = 20.0;

    pub fn new(health: f64, cycles: u32) -> Self {
        if health < Self::THRESHOLD {
            let months_old = f64::from(cycles) / 100.0;
            let months = (months_old + (Self::THRESHOLD - health) * 1.2).trunc() as i64;
            Self::ReplaceIn { months }
        } else {
            Self::Acceptable
        }
    }
}

impl fmt::Display for ReplacementEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acceptable => write!(
                f,
                "Battery health is within an acceptable range (between 20% and 100%)."
            ),
            Self::ReplaceIn { months } => write!(
                f,
                "Based on the current battery health, consider replacing the battery in approximately {months} months."
            ),
        }
    }
}

/// A two-wheeler's ignition switch and the battery it draws on.
#[derive(Debug, Default)]
pub struct IgnitionSystem {
    battery: Battery,
    engine_running: bool,
}

impl IgnitionSystem {
    pub fn new(battery: Battery) -> Self {
        Self {
            battery,
            engine_running: false,
        }
    }

    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    pub fn battery_mut(&mut self) -> &mut Battery {
        &mut self.battery
    }

    pub fn engine_running(&self) -> bool {
        self.engine_running
    }

    pub fn start_engine(&mut self) -> EngineChange {
        if self.engine_running {
            EngineChange::AlreadyRunning
        } else {
            self.engine_running = true;
            self.battery.set_status(BatteryStatus::On);
            log::info!("Engine started");
            EngineChange::Started
        }
    }

    pub fn stop_engine(&mut self) -> EngineChange {
        if !self.engine_running {
            EngineChange::AlreadyOff
        } else {
            self.engine_running = false;
            self.battery.set_status(BatteryStatus::Off);
            log::info!("Engine stopped");
            EngineChange::Stopped
        }
    }

    /// Suggestions for the most recently recorded operating temperature.
    pub fn suggest_operational_changes(&mut self) -> Result<&[Suggestion]> {
        let temperature = self
            .battery
            .history()
            .ok_or(Error::EmptyHistory)?
            .latest_temperature();

        Ok(self.battery.generate_suggestions(temperature))
    }

    pub fn estimate_battery_replacement(&self) -> ReplacementEstimate {
        ReplacementEstimate::new(self.battery.health(), self.battery.cycles())
    }

    pub fn battery_status_message(&self) -> String {
        format!(
            "Battery is {} due to the engine{} running.",
            self.battery.status(),
            if self.engine_running {
                " is still"
            } else {
                " has been"
            }
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    fn system() -> IgnitionSystem {
        let mut system = IgnitionSystem::default();
        system
            .battery_mut()
            .collect_data(
                &[100.0, 200.0, 300.0, 400.0, 500.0],
                &[90.0, 85.0, 75.0, 70.0, 65.0],
                &[25.0, 30.0, 22.0, 28.0, 20.0],
                &[80.0, 75.0, 85.0, 78.0, 80.0],
                &[15.0, 20.0, 25.0, 18.0, 22.0],
            )
            .unwrap();
        system
    }

    #[test]
    fn start_stop() {
        let mut system = IgnitionSystem::default();
        assert!(!system.engine_running());

        assert_eq!(system.stop_engine(), EngineChange::AlreadyOff);

        assert_eq!(system.start_engine(), EngineChange::Started);
        assert!(system.engine_running());
        assert_eq!(system.battery().status(), BatteryStatus::On);

        assert_eq!(system.start_engine(), EngineChange::AlreadyRunning);

        assert_eq!(system.stop_engine(), EngineChange::Stopped);
        assert!(!system.engine_running());
        assert_eq!(system.battery().status(), BatteryStatus::Off);
    }

    #[test]
    fn engine_messages() {
        assert_eq!(
            EngineChange::Started.to_string(),
            "Engine started successfully."
        );
        assert_eq!(
            EngineChange::AlreadyOff.to_string(),
            "Engine is already off."
        );
    }

    #[test]
    fn status_message() {
        let mut system = IgnitionSystem::default();
        assert_eq!(
            system.battery_status_message(),
            "Battery is Off due to the engine has been running."
        );

        system.start_engine();
        assert_eq!(
            system.battery_status_message(),
            "Battery is On due to the engine is still running."
        );
    }

    #[test]
    fn suggestions_without_history() {
        let mut system = IgnitionSystem::default();
        assert_eq!(
            system.suggest_operational_changes(),
            Err(Error::EmptyHistory)
        );
    }

    #[test]
    fn suggestions_use_latest_temperature() {
        let mut system = system();
        assert_eq!(
            system.suggest_operational_changes().unwrap(),
            &[Suggestion::HealthGood]
        );
    }

    #[test]
    fn replacement_acceptable() {
        let system = IgnitionSystem::default();
        assert_eq!(
            system.estimate_battery_replacement(),
            ReplacementEstimate::Acceptable
        );
        assert_eq!(
            system.estimate_battery_replacement().to_string(),
            "Battery health is within an acceptable range (between 20% and 100%)."
        );
    }

    #[test]
    fn replacement_due() {
        let mut system = IgnitionSystem::default();
        system.battery_mut().set_health(10.0);
        system.battery_mut().set_cycles(250);

        // 2.5 months + 10 * 1.2
        let estimate = system.estimate_battery_replacement();
        assert_eq!(estimate, ReplacementEstimate::ReplaceIn { months: 14 });
        assert_eq!(
            estimate.to_string(),
            "Based on the current battery health, consider replacing the battery in approximately 14 months."
        );
    }

    #[test]
    fn replacement_boundary() {
        assert_eq!(
            ReplacementEstimate::new(20.0, 1000),
            ReplacementEstimate::Acceptable
        );
        assert_eq!(
            ReplacementEstimate::new(19.5, 0),
            ReplacementEstimate::ReplaceIn { months: 0 }
        );
    }

    #[test]
    fn three_tips() {
        assert_eq!(ImprovementTip::iter().count(), 3);
    }
}
