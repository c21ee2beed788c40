//! Returns bookkeeping of first-visit Monte Carlo control.
use crate::{Action, ActionValueTable, DiscreteState};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Returns {
    sum: f64,
    count: u64,
}

/// The running return sums and counts, persisting across episodes, and the
/// buffer of the current episode.
#[derive(Debug, Clone, Default)]
pub(super) struct FirstVisitReturns {
    returns: HashMap<(DiscreteState, Action), Returns>,
    episode: Vec<(DiscreteState, Action, f64)>,
}

impl FirstVisitReturns {
    pub fn push(&mut self, s: DiscreteState, a: Action, r: f64) {
        self.episode.push((s, a, r));
    }

    pub fn episode_len(&self) -> usize {
        self.episode.len()
    }

    pub fn count(&self, s: &DiscreteState, a: Action) -> u64 {
        self.returns.get(&(*s, a)).map_or(0, |r| r.count)
    }

    /// Credits the episode's returns to `q` and clears the buffer.
    ///
    /// The episode is scanned backward with `G ← r + γ G`. A pair is credited
    /// only when first met in this scan, i.e., at its last occurrence in the
    /// episode, and `Q(s, a)` becomes the sample mean of its credited returns.
    pub fn consolidate(&mut self, q: &mut ActionValueTable, gamma: f64) {
        let mut g = 0f64;
        let mut visited = HashSet::with_capacity(self.episode.len());

        for &(s, a, r) in self.episode.iter().rev() {
            g = r + gamma * g;
            if visited.insert((s, a)) {
                let e = self.returns.entry((s, a)).or_default();
                e.sum += g;
                e.count += 1;
                q.set(&s, a, e.sum / e.count as f64);
            }
        }

        self.episode.clear();
    }
}
