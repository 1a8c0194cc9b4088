//! CLiMF learner: configuration, validation and the `fit` entry point.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::interactions::Interactions;
use super::model::CLiMFModel;
use super::trainer::{TrainOutcome, Trainer};
use crate::error::{ClimfError, Result};
use crate::traits::Learner;

/// Hyperparameters of a CLiMF training run.
///
/// Every field has a default, so a partial JSON document is a valid config.
///
/// # Examples
///
/// ```
/// use aprender_climf::recommend::ClimfConfig;
///
/// let config = ClimfConfig::from_json_str(r#"{"K": 8, "steps": 20}"#).unwrap();
/// assert_eq!(config.n_factors, 8);
/// assert_eq!(config.steps, 20);
/// assert!((config.alpha - 0.005).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimfConfig {
    /// Latent dimensionality K (>= 1).
    #[serde(alias = "K", alias = "k")]
    pub n_factors: usize,
    /// Number of SGD epochs (>= 1).
    pub steps: usize,
    /// Learning rate (>= 0; 0 trains nothing and logs a warning).
    pub alpha: f32,
    /// L2 regularization strength (>= 0).
    pub beta: f32,
    /// Per-epoch timing and MRR diagnostics through `log::info!`.
    pub verbose: bool,
    /// Seed for initialization and diagnostic sampling.
    pub random_state: Option<u64>,
}

impl Default for ClimfConfig {
    fn default() -> Self {
        Self {
            n_factors: 2,
            steps: 100,
            alpha: 0.005,
            beta: 0.02,
            verbose: false,
            random_state: None,
        }
    }
}

impl ClimfConfig {
    /// Checks every hyperparameter against its constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ClimfError::InvalidHyperparameter`] naming the first
    /// violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.n_factors < 1 {
            return Err(ClimfError::invalid_hyperparameter(
                "n_factors",
                self.n_factors,
                ">= 1",
            ));
        }
        if self.steps < 1 {
            return Err(ClimfError::invalid_hyperparameter("steps", self.steps, ">= 1"));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ClimfError::invalid_hyperparameter(
                "alpha",
                self.alpha,
                "finite and >= 0",
            ));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(ClimfError::invalid_hyperparameter(
                "beta",
                self.beta,
                "finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or invalid values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Collaborative Less-is-More Filtering.
///
/// Matrix factorization for binary relevance data when only a few items are
/// recommended to each user. Training maximizes a smooth lower bound of the
/// Mean Reciprocal Rank with stochastic gradient ascent.
///
/// # Examples
///
/// ```
/// use aprender_climf::prelude::*;
///
/// let data = Interactions::new(vec![(0, 1), (0, 2), (1, 0), (2, 3)], (3, 4)).unwrap();
///
/// let learner = CLiMF::new()
///     .with_n_factors(2)
///     .with_steps(50)
///     .with_alpha(0.01)
///     .with_beta(0.01)
///     .with_random_state(42);
/// let model = learner.fit(&data).expect("valid data and config");
///
/// let top2 = model.predict(&[0], Some(2));
/// assert_eq!(top2[0].len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CLiMF {
    config: ClimfConfig,
}

impl CLiMF {
    /// Creates a learner with default hyperparameters
    /// (K=2, steps=100, alpha=0.005, beta=0.02).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a learner from a config, failing fast on invalid values.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid.
    pub fn from_config(config: ClimfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Set latent dimensionality K.
    #[must_use]
    pub fn with_n_factors(mut self, n_factors: usize) -> Self {
        self.config.n_factors = n_factors;
        self
    }

    /// Set number of epochs.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.config.steps = steps;
        self
    }

    /// Set learning rate.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Set regularization strength.
    #[must_use]
    pub fn with_beta(mut self, beta: f32) -> Self {
        self.config.beta = beta;
        self
    }

    /// Enable per-epoch diagnostics.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.config.random_state = Some(seed);
        self
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &ClimfConfig {
        &self.config
    }

    /// Algorithm name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        CLiMFModel::NAME
    }

    /// Trains on `data` with an RNG seeded from `random_state`
    /// (or from entropy when unset).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `data` is empty.
    pub fn fit(&self, data: &Interactions) -> Result<CLiMFModel> {
        let mut rng = match self.config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.fit_with_rng(data, &mut rng)
    }

    /// Trains on `data` drawing all randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `data` is empty.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        data: &Interactions,
        rng: &mut R,
    ) -> Result<CLiMFModel> {
        let TrainOutcome { factors, .. } = self.train(data, rng)?;
        Ok(CLiMFModel::new(factors, data.order()))
    }

    /// Runs the trainer and returns factors together with per-epoch stats.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `data` is empty.
    pub fn train<R: Rng + ?Sized>(&self, data: &Interactions, rng: &mut R) -> Result<TrainOutcome> {
        Trainer::new(self.config)?.train(data, rng)
    }
}

impl Learner for CLiMF {
    type Model = CLiMFModel;

    fn fit(&self, data: &Interactions) -> Result<CLiMFModel> {
        CLiMF::fit(self, data)
    }

    fn name(&self) -> &'static str {
        CLiMF::name(self)
    }
}

#[cfg(test)]
#[path = "climf_tests.rs"]
mod tests;
