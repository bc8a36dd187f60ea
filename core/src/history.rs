use crate::error::{Error, Result};

/// Recorded usage of a battery, one entry per sample across five parallel series.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageHistory {
    cycles: Vec<f64>,
    health_scores: Vec<f64>,
    temperatures: Vec<f64>,
    soc_values: Vec<f64>,
    kms_values: Vec<f64>,
}

impl UsageHistory {
    /// Builds a history from parallel series, all of which must be as long as `cycles`.
    pub fn collect(
        cycles: &[f64],
        health_scores: &[f64],
        temperatures: &[f64],
        soc_values: &[f64],
        kms_values: &[f64],
    ) -> Result<Self> {
        let expected = cycles.len();

        for (field, series) in [
            ("health_scores", health_scores),
            ("temperatures", temperatures),
            ("soc_values", soc_values),
            ("kms_values", kms_values),
        ] {
            if series.len() != expected {
                return Err(Error::MismatchedLengths {
                    field,
                    expected,
                    actual: series.len(),
                });
            }
        }

        if expected == 0 {
            return Err(Error::EmptyHistory);
        }

        log::debug!("Collected {expected} usage samples");

        Ok(Self {
            cycles: cycles.to_vec(),
            health_scores: health_scores.to_vec(),
            temperatures: temperatures.to_vec(),
            soc_values: soc_values.to_vec(),
            kms_values: kms_values.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Feature rows in model order: cycles, temperature, state of charge, kilometres.
    pub fn feature_rows(&self) -> Vec<Vec<f64>> {
        (0..self.len())
            .map(|i| {
                vec![
                    self.cycles[i],
                    self.temperatures[i],
                    self.soc_values[i],
                    self.kms_values[i],
                ]
            })
            .collect()
    }

    pub fn targets(&self) -> &[f64] {
        &self.health_scores
    }

    // Construction guarantees every series has at least one element.

    pub fn latest_cycles(&self) -> f64 {
        self.cycles[self.len() - 1]
    }

    pub fn latest_temperature(&self) -> f64 {
        self.temperatures[self.len() - 1]
    }

    pub fn latest_soc(&self) -> f64 {
        self.soc_values[self.len() - 1]
    }

    pub fn latest_kms(&self) -> f64 {
        self.kms_values[self.len() - 1]
    }
}
