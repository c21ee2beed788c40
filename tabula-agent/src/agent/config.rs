//! Configuration of [`TabularAgent`](super::TabularAgent).
use crate::{DiscretizerConfig, EpsilonGreedy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Update rule of a [`TabularAgent`](super::TabularAgent).
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum Algorithm {
    /// Off-policy TD control, bootstrapping on `max_a' Q(s', a')`.
    QLearning,

    /// On-policy TD control, bootstrapping on `Q(s', a')` of the action taken next.
    Sarsa,

    /// First-visit Monte Carlo control, updating at the end of each episode.
    MonteCarlo,
}

/// Configuration of [`TabularAgent`](super::TabularAgent).
///
/// The configuration is immutable once the agent is built.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TabularAgentConfig {
    /// Update rule.
    pub algorithm: Algorithm,

    /// Discretization of observations.
    pub discretizer: DiscretizerConfig,

    /// Learning rate of the TD rules. Not used by Monte Carlo.
    pub alpha: f64,

    /// Discount factor.
    pub gamma: f64,

    /// Exploration schedule.
    pub explorer: EpsilonGreedy,

    /// Seed of the random number generator used for exploration.
    pub seed: u64,
}

impl Default for TabularAgentConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::QLearning,
            discretizer: DiscretizerConfig::default(),
            alpha: 0.15,
            gamma: 0.98,
            explorer: EpsilonGreedy::default(),
            seed: 42,
        }
    }
}

impl TabularAgentConfig {
    /// Sets the update rule.
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Sets the discretization.
    pub fn discretizer(mut self, v: DiscretizerConfig) -> Self {
        self.discretizer = v;
        self
    }

    /// Sets the learning rate.
    pub fn alpha(mut self, v: f64) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the exploration schedule.
    pub fn explorer(mut self, v: EpsilonGreedy) -> Self {
        self.explorer = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`TabularAgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TabularAgentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
