//! Dense action-value table.
use crate::{
    discretizer::{check, pack},
    Action, DiscreteState, N_ACTIONS, OBS_DIM,
};

/// Action values `Q(s, a)` of every cell of the grid, initialized to zero.
///
/// Entries are stored densely, with the row of a cell at its packed index.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValueTable {
    bins: [usize; OBS_DIM],
    values: Vec<f64>,
}

impl ActionValueTable {
    /// Creates a table of zeros for the grid with the given bin counts.
    pub fn new(bins: [usize; OBS_DIM]) -> Self {
        let n_states: usize = bins.iter().product();
        Self {
            bins,
            values: vec![0.0; n_states * N_ACTIONS],
        }
    }

    /// Cells must lie on the grid of the table. Checked in debug builds.
    #[inline]
    fn offset(&self, s: &DiscreteState) -> usize {
        debug_assert!(
            check(&self.bins, s).is_ok(),
            "cell {:?} is outside the grid {:?}",
            s,
            self.bins
        );
        pack(&self.bins, s) * N_ACTIONS
    }

    /// Returns `Q(s, a)`.
    pub fn get(&self, s: &DiscreteState, a: Action) -> f64 {
        self.values[self.offset(s) + a.index()]
    }

    /// Sets `Q(s, a)`.
    pub fn set(&mut self, s: &DiscreteState, a: Action, v: f64) {
        let ix = self.offset(s) + a.index();
        self.values[ix] = v;
    }

    /// Action values of `s` in action index order.
    pub fn row(&self, s: &DiscreteState) -> &[f64] {
        let o = self.offset(s);
        &self.values[o..o + N_ACTIONS]
    }

    /// Returns `max_a Q(s, a)`.
    pub fn max(&self, s: &DiscreteState) -> f64 {
        self.row(s).iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Returns the action maximizing `Q(s, ·)`, the lowest index on ties.
    pub fn greedy(&self, s: &DiscreteState) -> Action {
        argmax(self.row(s))
    }

    /// Moves `Q(s, a)` toward `target` by the fraction `alpha`.
    ///
    /// Returns the TD error `target - Q(s, a)` before the update.
    pub fn update_toward(&mut self, s: &DiscreteState, a: Action, target: f64, alpha: f64) -> f64 {
        let ix = self.offset(s) + a.index();
        let td_err = target - self.values[ix];
        self.values[ix] += alpha * td_err;
        td_err
    }

    /// Number of entries, cells times actions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Index of the first maximum.
pub(crate) fn argmax(row: &[f64]) -> Action {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = i;
        }
    }
    Action::from_index(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Discretizer, DiscretizerConfig};

    #[test]
    fn test_greedy_ties_to_lowest_index() {
        let d = Discretizer::default();
        let s = d.cell([1, 2, 3]).unwrap();
        let mut q = ActionValueTable::new(d.bins());
        assert_eq!(q.greedy(&s), Action::Noop);

        q.set(&s, Action::Jump, 0.5);
        assert_eq!(q.greedy(&s), Action::Jump);
        assert_eq!(q.max(&s), 0.5);

        q.set(&s, Action::Noop, 0.5);
        assert_eq!(q.greedy(&s), Action::Noop);
    }

    #[test]
    fn test_rows_do_not_alias() {
        let d = Discretizer::default();
        let s1 = d.cell([0, 0, 1]).unwrap();
        let s2 = d.cell([0, 1, 0]).unwrap();
        let mut q = ActionValueTable::new(d.bins());
        q.set(&s1, Action::Jump, 1.0);

        assert_eq!(q.len(), 8 * 8 * 8 * 2);
        assert_eq!(q.row(&s1), &[0.0, 1.0]);
        assert_eq!(q.row(&s2), &[0.0, 0.0]);
    }

    #[test]
    fn test_update_moves_toward_target() {
        let d = Discretizer::default();
        let s = d.cell([3, 3, 3]).unwrap();
        let mut q = ActionValueTable::new(d.bins());
        q.set(&s, Action::Noop, 1.0);

        for &alpha in [0.0, 0.1, 0.5, 0.99, 1.0].iter() {
            let mut q = q.clone();
            let before = q.get(&s, Action::Noop);
            let target = 3.0;
            let td_err = q.update_toward(&s, Action::Noop, target, alpha);
            let after = q.get(&s, Action::Noop);

            assert_eq!(td_err, 2.0);
            assert!(before <= after && after <= target);
            if alpha > 0.0 && alpha < 1.0 {
                assert!(before < after && after < target);
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside the grid")]
    fn test_cell_of_another_grid_panics() {
        let small = Discretizer::new(&DiscretizerConfig::default().bins([2, 2, 2])).unwrap();
        let q = ActionValueTable::new(small.bins());
        // Packs inside the small table, at the row of another cell.
        let foreign = Discretizer::default().cell([0, 0, 3]).unwrap();
        q.get(&foreign, Action::Noop);
    }
}
