//! Outputs of the planners.
use crate::{Action, DiscreteState};
use serde::Serialize;
use std::collections::BTreeMap;

/// State values `V(s)`, zero for states without an entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValueFunction(BTreeMap<DiscreteState, f64>);

impl ValueFunction {
    /// Returns `V(s)`.
    pub fn get(&self, s: &DiscreteState) -> f64 {
        self.0.get(s).copied().unwrap_or(0.0)
    }

    /// Sets `V(s)`.
    pub fn insert(&mut self, s: DiscreteState, v: f64) {
        self.0.insert(s, v);
    }

    /// Iterates over the entries in packed order of states.
    pub fn iter(&self) -> impl Iterator<Item = (&DiscreteState, &f64)> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is no entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DiscreteState, f64)> for ValueFunction {
    fn from_iter<I: IntoIterator<Item = (DiscreteState, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Deterministic policy over grid cells.
///
/// Lookups on states without an entry return the default action.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Policy {
    actions: BTreeMap<DiscreteState, Action>,
    default_action: Action,
}

impl Policy {
    /// Creates an empty policy with the given default action.
    pub fn new(default_action: Action) -> Self {
        Self {
            actions: BTreeMap::new(),
            default_action,
        }
    }

    /// Action on `s`.
    pub fn get(&self, s: &DiscreteState) -> Action {
        self.actions.get(s).copied().unwrap_or(self.default_action)
    }

    /// Sets the action on `s`.
    pub fn insert(&mut self, s: DiscreteState, a: Action) {
        self.actions.insert(s, a);
    }

    /// Action on states without an entry.
    pub fn default_action(&self) -> Action {
        self.default_action
    }

    /// Iterates over the entries in packed order of states.
    pub fn iter(&self) -> impl Iterator<Item = (&DiscreteState, &Action)> {
        self.actions.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if there is no entry.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// How a planner stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// The stopping criterion was met after the given number of iterations.
    Converged {
        /// Sweeps of value iteration, or improvement steps of policy iteration.
        iterations: usize,
    },

    /// The iteration budget ran out before the stopping criterion was met.
    BudgetExhausted {
        /// Iterations performed, equal to the budget.
        iterations: usize,
    },
}

impl Convergence {
    /// Returns `true` if the stopping criterion was met.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Number of iterations performed.
    pub fn iterations(&self) -> usize {
        match self {
            Self::Converged { iterations } | Self::BudgetExhausted { iterations } => *iterations,
        }
    }
}

/// Result of a planner.
#[derive(Clone, Debug)]
pub struct Plan {
    /// State values.
    pub values: ValueFunction,

    /// Greedy policy with respect to [`Plan::values`].
    pub policy: Policy,

    /// How the planner stopped.
    pub convergence: Convergence,

    /// Largest absolute value change in the last sweep.
    pub delta: f64,
}
