//! Epsilon-greedy exploration with multiplicative decay.
use crate::{Action, N_ACTIONS};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy explorer.
///
/// With probability `eps` a uniformly random action is taken, otherwise the
/// greedy one. [`EpsilonGreedy::decay`] multiplies `eps` by `eps_decay`,
/// flooring at `eps_min`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Current exploration rate.
    pub eps: f64,

    /// Floor of the exploration rate.
    pub eps_min: f64,

    /// Multiplicative decay applied per episode.
    pub eps_decay: f64,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            eps: 1.0,
            eps_min: 0.01,
            eps_decay: 0.99985,
        }
    }
}

impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer with the default schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial exploration rate.
    pub fn eps(mut self, v: f64) -> Self {
        self.eps = v;
        self
    }

    /// Set the floor of the exploration rate.
    pub fn eps_min(mut self, v: f64) -> Self {
        self.eps_min = v;
        self
    }

    /// Set the multiplicative decay.
    pub fn eps_decay(mut self, v: f64) -> Self {
        self.eps_decay = v;
        self
    }

    /// Takes a random action with probability `eps`, otherwise calls `greedy`.
    pub fn action<R, F>(&self, rng: &mut R, greedy: F) -> Action
    where
        R: Rng,
        F: FnOnce() -> Action,
    {
        if rng.gen::<f64>() < self.eps {
            Action::from_index(rng.gen_range(0..N_ACTIONS))
        } else {
            greedy()
        }
    }

    /// `eps ← max(eps_min, eps * eps_decay)`.
    pub fn decay(&mut self) {
        self.eps = self.eps_min.max(self.eps * self.eps_decay);
    }
}
