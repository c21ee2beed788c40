//! One-step lookahead compiled over an indexed state list.
use super::{tables::Policy, ValueFunction, TERMINAL_THRESHOLD};
use crate::{q_table::argmax, Action, DiscreteState, EmpiricalModel, N_ACTIONS};
use std::collections::HashMap;

/// Data of an observed `(s, a)` pair, with successors resolved to state indices.
#[derive(Debug)]
struct Branch {
    reward: f64,
    bootstrap: bool,
    successors: Vec<(usize, f64)>,
}

impl Branch {
    #[inline]
    fn value(&self, v: &[f64], gamma: f64) -> f64 {
        if self.bootstrap {
            let ev: f64 = self.successors.iter().map(|&(j, p)| p * v[j]).sum();
            self.reward + gamma * ev
        } else {
            self.reward
        }
    }
}

pub(super) struct Backup {
    states: Vec<DiscreteState>,
    branches: Vec<[Option<Branch>; N_ACTIONS]>,
}

impl Backup {
    /// Duplicate states are planned once, at their first position.
    pub fn new(states: &[DiscreteState], model: &EmpiricalModel) -> Self {
        let mut index = HashMap::with_capacity(states.len());
        let mut unique = Vec::with_capacity(states.len());
        for s in states {
            if !index.contains_key(s) {
                index.insert(*s, unique.len());
                unique.push(*s);
            }
        }

        let branches = unique
            .iter()
            .map(|s| {
                Action::ALL.map(|a| {
                    model.entry(s, a).map(|e| Branch {
                        reward: e.reward,
                        bootstrap: e.terminal_probability < TERMINAL_THRESHOLD,
                        successors: e
                            .successors
                            .iter()
                            .filter_map(|(s2, p)| index.get(s2).map(|&j| (j, *p)))
                            .collect(),
                    })
                })
            })
            .collect();

        Self {
            states: unique,
            branches,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> &[DiscreteState] {
        &self.states
    }

    /// `Q(s_i, a)`, `None` if the pair has no data.
    pub fn q(&self, i: usize, a: Action, v: &[f64], gamma: f64) -> Option<f64> {
        self.branches[i][a.index()]
            .as_ref()
            .map(|b| b.value(v, gamma))
    }

    /// The maximizing action and its value over the actions with data, the
    /// lowest index on ties. `None` if no action of `s_i` has data.
    pub fn best(&self, i: usize, v: &[f64], gamma: f64) -> Option<(Action, f64)> {
        let mut row = [f64::NEG_INFINITY; N_ACTIONS];
        let mut any = false;
        for a in Action::ALL {
            if let Some(q) = self.q(i, a, v, gamma) {
                row[a.index()] = q;
                any = true;
            }
        }
        if any {
            let a = argmax(&row);
            Some((a, row[a.index()]))
        } else {
            None
        }
    }

    /// Greedy policy under `v`. States without data get the default action.
    pub fn greedy_actions(&self, v: &[f64], gamma: f64) -> Vec<Action> {
        (0..self.len())
            .map(|i| self.best(i, v, gamma).map_or(Action::default(), |(a, _)| a))
            .collect()
    }

    pub fn to_values(&self, v: &[f64]) -> ValueFunction {
        self.states.iter().copied().zip(v.iter().copied()).collect()
    }

    pub fn to_policy(&self, actions: &[Action]) -> Policy {
        let mut policy = Policy::new(Action::default());
        for (s, a) in self.states.iter().zip(actions.iter()) {
            policy.insert(*s, *a);
        }
        policy
    }
}
