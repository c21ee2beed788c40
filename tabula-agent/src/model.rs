//! Empirical MDP estimated from recorded transitions.
use crate::{
    discretizer::{check, pack},
    Action, DiscreteState, Discretizer, N_ACTIONS, OBS_DIM,
};
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tabula_core::TabulaError;

/// A transition on the discretized grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transition {
    /// State on which the action was taken.
    pub state: DiscreteState,

    /// Action taken.
    pub action: Action,

    /// State after the action.
    pub next_state: DiscreteState,

    /// Reward.
    pub reward: f64,

    /// Whether the episode ended with this transition.
    pub done: bool,
}

/// Statistics of a single `(s, a)` pair in an [`EmpiricalModel`].
#[derive(Clone, Debug, PartialEq)]
pub struct ModelEntry {
    /// Successor distribution `P(s' | s, a)` in packed order of `s'`. Probabilities sum to one.
    pub successors: Vec<(DiscreteState, f64)>,

    /// Mean reward.
    pub reward: f64,

    /// Fraction of samples which ended the episode.
    pub terminal_probability: f64,

    /// Number of samples.
    pub n_samples: u64,
}

#[derive(Default)]
struct Counts {
    next: BTreeMap<DiscreteState, u64>,
    rewards: Vec<f64>,
    dones: Vec<f64>,
}

/// Accumulates transitions into an [`EmpiricalModel`].
pub struct ModelBuilder {
    bins: [usize; OBS_DIM],
    counts: BTreeMap<usize, Counts>,
    states: BTreeSet<DiscreteState>,
}

impl ModelBuilder {
    /// Creates an empty builder on the grid of the discretizer.
    pub fn new(discretizer: &Discretizer) -> Self {
        Self {
            bins: discretizer.bins(),
            counts: BTreeMap::new(),
            states: BTreeSet::new(),
        }
    }

    /// Creates a builder with all the given transitions added.
    ///
    /// Fails on the first transition with a cell outside the grid, see [`ModelBuilder::add`].
    pub fn from_transitions<'a>(
        discretizer: &Discretizer,
        transitions: impl IntoIterator<Item = &'a Transition>,
    ) -> Result<Self, TabulaError> {
        let mut builder = Self::new(discretizer);
        for t in transitions {
            builder.add(t.state, t.action, t.next_state, t.reward, t.done)?;
        }
        Ok(builder)
    }

    /// Adds a sample of `(s, a)`.
    ///
    /// Fails with [`TabulaError::CellOutOfRange`] if `s` or `s2` does not lie
    /// on the grid of the builder, e.g., when made by another [`Discretizer`].
    /// Nothing is recorded in that case.
    pub fn add(
        &mut self,
        s: DiscreteState,
        a: Action,
        s2: DiscreteState,
        r: f64,
        done: bool,
    ) -> Result<(), TabulaError> {
        check(&self.bins, &s)?;
        check(&self.bins, &s2)?;

        let key = pack(&self.bins, &s) * N_ACTIONS + a.index();
        let counts = self.counts.entry(key).or_default();
        *counts.next.entry(s2).or_insert(0) += 1;
        counts.rewards.push(r);
        counts.dones.push(if done { 1.0 } else { 0.0 });

        self.states.insert(s);
        self.states.insert(s2);
        Ok(())
    }

    /// Normalizes the accumulated counts.
    pub fn build(self) -> EmpiricalModel {
        let entries: BTreeMap<usize, ModelEntry> = self
            .counts
            .into_iter()
            .map(|(key, counts)| {
                let n = counts.rewards.len() as f64;
                let successors = counts
                    .next
                    .into_iter()
                    .map(|(s2, c)| (s2, c as f64 / n))
                    .collect();
                let entry = ModelEntry {
                    successors,
                    reward: counts.rewards.iter().sum::<f64>() / n,
                    terminal_probability: counts.dones.iter().sum::<f64>() / n,
                    n_samples: counts.rewards.len() as u64,
                };
                (key, entry)
            })
            .collect();
        let states: Vec<DiscreteState> = self.states.into_iter().collect();

        info!(
            "Built empirical model with {} states and {} state-action entries",
            states.len(),
            entries.len()
        );

        EmpiricalModel {
            bins: self.bins,
            entries,
            states,
        }
    }
}

/// Transition, reward and terminal statistics of the observed `(s, a)` pairs.
///
/// Pairs never observed have no entry. Lookups on them return zero rewards,
/// zero terminal probability and no successors.
#[derive(Clone, Debug)]
pub struct EmpiricalModel {
    bins: [usize; OBS_DIM],
    entries: BTreeMap<usize, ModelEntry>,
    states: Vec<DiscreteState>,
}

impl EmpiricalModel {
    /// Entry of `(s, a)`, `None` if the pair was never observed.
    ///
    /// Cells outside the grid of the model have no entry.
    pub fn entry(&self, s: &DiscreteState, a: Action) -> Option<&ModelEntry> {
        check(&self.bins, s).ok()?;
        self.entries.get(&(pack(&self.bins, s) * N_ACTIONS + a.index()))
    }

    /// Mean reward of `(s, a)`.
    pub fn reward(&self, s: &DiscreteState, a: Action) -> f64 {
        self.entry(s, a).map_or(0.0, |e| e.reward)
    }

    /// Empirical terminal probability of `(s, a)`.
    pub fn terminal_probability(&self, s: &DiscreteState, a: Action) -> f64 {
        self.entry(s, a).map_or(0.0, |e| e.terminal_probability)
    }

    /// Successor distribution of `(s, a)`.
    pub fn successors(&self, s: &DiscreteState, a: Action) -> &[(DiscreteState, f64)] {
        self.entry(s, a)
            .map(|e| e.successors.as_slice())
            .unwrap_or(&[])
    }

    /// States appearing in the transitions, as origin or successor, in packed order.
    pub fn states(&self) -> &[DiscreteState] {
        &self.states
    }

    /// Number of `(s, a)` entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no transition was added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
