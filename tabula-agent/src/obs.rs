//! Observation and action of the environment.
use serde::{Deserialize, Serialize};
use tabula_core::{Act, Info, Obs};

/// Number of observation dimensions.
pub const OBS_DIM: usize = 3;

/// Number of actions.
pub const N_ACTIONS: usize = 2;

/// Continuous observation `(velocity, horizontal distance, vertical distance)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation(pub [f64; OBS_DIM]);

impl Obs for Observation {}

impl From<[f64; OBS_DIM]> for Observation {
    fn from(v: [f64; OBS_DIM]) -> Self {
        Self(v)
    }
}

/// Binary action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Action {
    /// Do nothing.
    #[default]
    Noop = 0,

    /// Jump.
    Jump = 1,
}

impl Action {
    /// All actions in index order.
    pub const ALL: [Action; N_ACTIONS] = [Action::Noop, Action::Jump];

    /// Index of the action, `0` for [`Action::Noop`] and `1` for [`Action::Jump`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Action of the given index. Any nonzero index is a jump.
    #[inline]
    pub fn from_index(ix: usize) -> Self {
        if ix == 0 {
            Action::Noop
        } else {
            Action::Jump
        }
    }
}

impl Act for Action {}

/// Step information of a game keeping a score, e.g., passed obstacles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameInfo {
    /// Score of the episode so far.
    pub score: i64,
}

impl Info for GameInfo {
    fn score(&self) -> Option<i64> {
        Some(self.score)
    }
}
