use crate::{
    error::{Error, Result},
    history::UsageHistory,
    types::PredictionInput,
};
use smartcore::{
    ensemble::random_forest_regressor::{RandomForestRegressor, RandomForestRegressorParameters},
    linalg::basic::matrix::DenseMatrix,
};
use std::fmt;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Number of input features: cycles, temperature, state of charge, kilometres.
const FEATURES: usize = 4;

pub const DEFAULT_TREES: usize = 100;

/// Random forest regression of battery health against usage.
pub struct LifePredictionModel {
    trees: usize,
    seed: Option<u64>,
    forest: Option<Forest>,
}

impl Default for LifePredictionModel {
    fn default() -> Self {
        Self::new(DEFAULT_TREES, None)
    }
}

impl fmt::Debug for LifePredictionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifePredictionModel")
            .field("trees", &self.trees)
            .field("seed", &self.seed)
            .field("trained", &self.is_trained())
            .finish()
    }
}

impl LifePredictionModel {
    /// A `seed` of `None` draws a fresh seed for every fit.
    pub fn new(trees: usize, seed: Option<u64>) -> Self {
        Self {
            trees,
            seed,
            forest: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.forest.is_some()
    }

    /// Fits a new forest, replacing any previous one.
    pub fn train(&mut self, history: &UsageHistory) -> Result<()> {
        let x = DenseMatrix::from_2d_vec(&history.feature_rows());
        let y = history.targets().to_vec();

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.trees)
            .with_m(FEATURES)
            .with_seed(self.seed.unwrap_or_else(rand::random));

        let forest = Forest::fit(&x, &y, params).map_err(|e| Error::Model(e.to_string()))?;
        log::debug!(
            "Trained {} trees on {} samples",
            self.trees,
            history.len()
        );

        self.forest = Some(forest);
        Ok(())
    }

    /// Predicted health less the age penalty, truncated toward zero.
    ///
    /// The result is not clamped and may fall outside 0..=100.
    pub fn predict(&self, input: &PredictionInput) -> Result<i64> {
        let forest = self.forest.as_ref().ok_or(Error::ModelNotTrained)?;

        let x = DenseMatrix::from_2d_vec(&vec![input.features().to_vec()]);
        let raw = forest
            .predict(&x)
            .map_err(|e| Error::Model(e.to_string()))?
            .first()
            .copied()
            .ok_or_else(|| Error::Model("empty prediction".into()))?;

        let health = raw - input.age_effect();
        log::trace!("Raw prediction {raw}, age adjusted {health}");

        Ok(health.trunc() as i64)
    }
}
