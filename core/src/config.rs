use crate::{
    battery::Battery,
    error::{Error, Result},
    ignition::IgnitionSystem,
    model::{LifePredictionModel, DEFAULT_TREES},
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub model: ModelConfig,
    pub battery: BatteryConfig,
    pub history: HistoryConfig,
    pub simulation: RandomnessConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub trees: usize,
    /// Fixed seed for reproducible forests.
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            trees: DEFAULT_TREES,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    pub initial_health: f64,
    pub initial_state_of_charge: f64,
    pub capacity_kwh: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            initial_health: 90.0,
            initial_state_of_charge: 80.0,
            capacity_kwh: 5.0,
        }
    }
}

/// Usage samples the model is trained on at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub cycles: Vec<f64>,
    pub health_scores: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub soc_values: Vec<f64>,
    pub kms_values: Vec<f64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            cycles: vec![100.0, 200.0, 300.0, 400.0, 500.0],
            health_scores: vec![90.0, 85.0, 75.0, 70.0, 65.0],
            temperatures: vec![25.0, 30.0, 22.0, 28.0, 20.0],
            soc_values: vec![80.0, 75.0, 85.0, 78.0, 80.0],
            kms_values: vec![15.0, 20.0, 25.0, 18.0, 22.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomnessConfig {
    /// Seed for health check jitter, entropy is used when absent.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.model.trees == 0 {
            return Err(Error::Config("model.trees must be at least 1".into()));
        }
        if self.battery.capacity_kwh <= 0.0 {
            return Err(Error::Config("battery.capacity_kwh must be positive".into()));
        }
        if !(0.0..=100.0).contains(&self.battery.initial_health) {
            return Err(Error::Config(
                "battery.initial_health must be between 0 and 100".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.battery.initial_state_of_charge) {
            return Err(Error::Config(
                "battery.initial_state_of_charge must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }

    /// An ignition system with the seed history collected and the model trained.
    pub fn build_system(&self) -> Result<IgnitionSystem> {
        let model = LifePredictionModel::new(self.model.trees, self.model.seed);
        let mut battery = Battery::new(
            self.battery.initial_health,
            self.battery.initial_state_of_charge,
            self.battery.capacity_kwh,
            model,
        );

        let h = &self.history;
        battery.collect_data(
            &h.cycles,
            &h.health_scores,
            &h.temperatures,
            &h.soc_values,
            &h.kms_values,
        )?;
        battery.train_life_prediction_model()?;

        log::info!(
            "Trained life prediction model on {} samples",
            h.cycles.len()
        );

        Ok(IgnitionSystem::new(battery))
    }

    pub fn rng(&self) -> StdRng {
        match self.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
