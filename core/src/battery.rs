use crate::{
    error::{Error, Result},
    history::UsageHistory,
    model::LifePredictionModel,
    suggestion::{Conditions, Suggestion},
    types::{BatteryStatus, HealthBand, PredictionInput},
};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Percentage points of charge gained per hour at 0 °C.
pub const CHARGE_RATE_PER_HOUR: f64 = 5.0;

/// Charge lost per discharge step at 0 °C (10 % per hour over a five second step).
pub const DISCHARGE_STEP: f64 = (5.0 / 3600.0) * 10.0;

/// Ambient temperature at which charging and discharging stop entirely.
const TEMPERATURE_CUTOFF: f64 = 50.0;

/// Scales charge and discharge rates down as the ambient temperature rises.
///
/// Goes negative above the cutoff, so callers clamp the state of charge at
/// both ends.
fn temperature_factor(ambient_temperature: f64) -> f64 {
    1.0 - ambient_temperature / TEMPERATURE_CUTOFF
}

#[derive(Debug)]
pub struct Battery {
    health: f64,
    state_of_charge: f64,
    capacity_kwh: f64,
    cycles: u32,
    status: BatteryStatus,
    last_charge_time: Option<DateTime<Utc>>,
    history: Option<UsageHistory>,
    model: LifePredictionModel,
    suggestions: Vec<Suggestion>,
}

impl Default for Battery {
    fn default() -> Self {
        Self::new(90.0, 80.0, 5.0, LifePredictionModel::default())
    }
}

impl Battery {
    pub fn new(
        health: f64,
        state_of_charge: f64,
        capacity_kwh: f64,
        model: LifePredictionModel,
    ) -> Self {
        Self {
            health: health.clamp(0.0, 100.0),
            state_of_charge: state_of_charge.clamp(0.0, 100.0),
            capacity_kwh,
            cycles: 0,
            status: BatteryStatus::Off,
            last_charge_time: None,
            history: None,
            model,
            suggestions: Vec::new(),
        }
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn band(&self) -> HealthBand {
        HealthBand::from_health(self.health)
    }

    pub fn state_of_charge(&self) -> f64 {
        self.state_of_charge
    }

    pub fn capacity_kwh(&self) -> f64 {
        self.capacity_kwh
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn status(&self) -> BatteryStatus {
        self.status
    }

    pub fn set_status(&mut self, status: BatteryStatus) {
        log::debug!("Battery status {} -> {}", self.status, status);
        self.status = status;
    }

    pub fn last_charge_time(&self) -> Option<DateTime<Utc>> {
        self.last_charge_time
    }

    pub fn history(&self) -> Option<&UsageHistory> {
        self.history.as_ref()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn collect_data(
        &mut self,
        cycles: &[f64],
        health_scores: &[f64],
        temperatures: &[f64],
        soc_values: &[f64],
        kms_values: &[f64],
    ) -> Result<()> {
        self.history = Some(UsageHistory::collect(
            cycles,
            health_scores,
            temperatures,
            soc_values,
            kms_values,
        )?);
        Ok(())
    }

    pub fn train_life_prediction_model(&mut self) -> Result<()> {
        let history = self.history.as_ref().ok_or(Error::EmptyHistory)?;
        self.model.train(history)
    }

    pub fn predict_battery_health(&self, input: &PredictionInput) -> Result<i64> {
        self.model.predict(input)
    }

    /// Adds the charge accumulated since the previous call while the battery is on.
    ///
    /// The first call after switching on only starts the clock.
    pub fn charge_battery(&mut self, ambient_temperature: f64, now: DateTime<Utc>) {
        if self.status != BatteryStatus::On {
            return;
        }

        if let Some(last) = self.last_charge_time {
            let hours = (now - last).num_milliseconds() as f64 / 3_600_000.0;
            let increase =
                hours * CHARGE_RATE_PER_HOUR * temperature_factor(ambient_temperature);
            self.state_of_charge = (self.state_of_charge + increase).clamp(0.0, 100.0);
            log::trace!(
                "Charged {increase:.4} over {hours:.4} h, SoC now {:.2}",
                self.state_of_charge
            );
        }

        self.last_charge_time = Some(now);
    }

    pub fn discharge_battery(&mut self, ambient_temperature: f64) {
        if self.status != BatteryStatus::On {
            return;
        }

        let amount = DISCHARGE_STEP * temperature_factor(ambient_temperature);
        self.state_of_charge = (self.state_of_charge - amount).clamp(0.0, 100.0);
        log::trace!(
            "Discharged {amount:.4}, SoC now {:.2}",
            self.state_of_charge
        );
    }

    /// Runs one degradation step and returns the resulting health.
    pub fn check_battery_health<R: Rng>(
        &mut self,
        temperature: f64,
        rng: &mut R,
    ) -> Result<f64> {
        let history = self.history.as_ref().ok_or(Error::EmptyHistory)?;

        let degradation_factor = ((history.latest_cycles() / 500.0)
            * (temperature / 30.0)
            * (history.latest_soc() / 80.0))
            .max(1.0);
        let degradation_range: f64 = rng.gen_range(0.95..=1.05);
        let step = f64::from(rng.gen_range(2u8..=8));

        let loss = step * degradation_factor * degradation_range;
        self.health = (self.health - loss).clamp(0.0, 100.0);
        self.cycles += 1;

        self.set_status((self.band() == HealthBand::Good).into());
        self.generate_suggestions(temperature);

        log::debug!(
            "Health check at {temperature} degrees lost {loss:.2}, health now {:.2}",
            self.health
        );

        Ok(self.health)
    }

    pub fn generate_suggestions(&mut self, temperature: f64) -> &[Suggestion] {
        self.suggestions = Conditions {
            health: self.health,
            temperature,
            latest_kms: self.history.as_ref().map(UsageHistory::latest_kms),
        }
        .suggestions();

        &self.suggestions
    }

    #[cfg(test)]
    pub(crate) fn set_health(&mut self, health: f64) {
        self.health = health;
    }

    #[cfg(test)]
    pub(crate) fn set_cycles(&mut self, cycles: u32) {
        self.cycles = cycles;
    }
}
