//! Configuration of the planners.
use super::{policy_iteration, value_iteration, Plan};
use crate::{DiscreteState, EmpiricalModel};
use anyhow::Result;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Planning algorithm.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum PlannerMethod {
    /// [`value_iteration`].
    ValueIteration,

    /// [`policy_iteration`].
    PolicyIteration,
}

/// Configuration of a planner run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PlannerConfig {
    /// Planning algorithm.
    pub method: PlannerMethod,

    /// Discount factor.
    pub gamma: f64,

    /// Sweep budget of value iteration.
    pub max_sweeps: usize,

    /// Value iteration stops when the largest change of a sweep is below this value.
    pub tolerance: f64,

    /// Evaluation sweeps per iteration of policy iteration.
    pub eval_sweeps: usize,

    /// Iteration budget of policy iteration.
    pub max_outer_iters: usize,

    /// Seed of the random initial policy of policy iteration.
    pub seed: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            method: PlannerMethod::ValueIteration,
            gamma: 0.98,
            max_sweeps: 300,
            tolerance: 1e-4,
            eval_sweeps: 60,
            max_outer_iters: 100,
            seed: 42,
        }
    }
}

impl PlannerConfig {
    /// Sets the planning algorithm.
    pub fn method(mut self, v: PlannerMethod) -> Self {
        self.method = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the sweep budget of value iteration.
    pub fn max_sweeps(mut self, v: usize) -> Self {
        self.max_sweeps = v;
        self
    }

    /// Sets the tolerance of value iteration.
    pub fn tolerance(mut self, v: f64) -> Self {
        self.tolerance = v;
        self
    }

    /// Sets the number of evaluation sweeps of policy iteration.
    pub fn eval_sweeps(mut self, v: usize) -> Self {
        self.eval_sweeps = v;
        self
    }

    /// Sets the iteration budget of policy iteration.
    pub fn max_outer_iters(mut self, v: usize) -> Self {
        self.max_outer_iters = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Runs the configured planner on `states`.
    pub fn solve(&self, states: &[DiscreteState], model: &EmpiricalModel) -> Plan {
        match self.method {
            PlannerMethod::ValueIteration => {
                value_iteration(states, model, self.gamma, self.max_sweeps, self.tolerance)
            }
            PlannerMethod::PolicyIteration => {
                let mut rng = SmallRng::seed_from_u64(self.seed);
                policy_iteration(
                    states,
                    model,
                    self.gamma,
                    self.eval_sweeps,
                    self.max_outer_iters,
                    &mut rng,
                )
            }
        }
    }

    /// Constructs [`PlannerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PlannerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
