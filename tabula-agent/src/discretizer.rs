//! Discretization of continuous observations into grid cells.
use crate::{Observation, OBS_DIM};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};
use tabula_core::TabulaError;

/// Upper clip of the normalized ratio, keeping `floor(ratio * bins) < bins`.
const RATIO_MAX: f64 = 0.999;

/// A cell of the discretization grid, one coordinate per observation dimension.
///
/// Values of this type are created only by a [`Discretizer`], either from an
/// observation with [`Discretizer::discretize`] or from coordinates with the
/// bounds-checked [`Discretizer::cell`]. Every coordinate is smaller than the
/// bin count of its dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DiscreteState([usize; OBS_DIM]);

impl DiscreteState {
    /// Coordinates of the cell.
    pub fn coords(&self) -> [usize; OBS_DIM] {
        self.0
    }
}

/// Configuration of [`Discretizer`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DiscretizerConfig {
    /// Number of bins of each dimension.
    pub bins: [usize; OBS_DIM],

    /// Lower bound of each dimension.
    pub low: [f64; OBS_DIM],

    /// Upper bound of each dimension.
    pub high: [f64; OBS_DIM],
}

impl Default for DiscretizerConfig {
    fn default() -> Self {
        Self {
            bins: [8, 8, 8],
            low: [-1.5, 0.0, -1.5],
            high: [1.5, 3.0, 1.5],
        }
    }
}

impl DiscretizerConfig {
    /// Sets the number of bins of each dimension.
    pub fn bins(mut self, v: [usize; OBS_DIM]) -> Self {
        self.bins = v;
        self
    }

    /// Sets the lower bounds.
    pub fn low(mut self, v: [f64; OBS_DIM]) -> Self {
        self.low = v;
        self
    }

    /// Sets the upper bounds.
    pub fn high(mut self, v: [f64; OBS_DIM]) -> Self {
        self.high = v;
        self
    }

    /// Constructs [`DiscretizerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DiscretizerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Maps observations to cells of a regular grid.
///
/// Each component is clipped into `[low, high]`, normalized to a ratio, clipped
/// again to `[0, 0.999]` and scaled by the bin count, so that an observation on
/// the upper bound falls into the last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Discretizer {
    bins: [usize; OBS_DIM],
    low: [f64; OBS_DIM],
    high: [f64; OBS_DIM],
}

impl Discretizer {
    /// Constructs a discretizer.
    ///
    /// Fails if a bin count is zero or a lower bound is not below its upper bound.
    pub fn new(config: &DiscretizerConfig) -> Result<Self, TabulaError> {
        for i in 0..OBS_DIM {
            if config.bins[i] == 0 {
                return Err(TabulaError::InvalidConfig(format!(
                    "bin count of dimension {} is zero",
                    i
                )));
            }
            if config.low[i].partial_cmp(&config.high[i]) != Some(Ordering::Less) {
                return Err(TabulaError::InvalidConfig(format!(
                    "range [{}, {}] of dimension {} is empty",
                    config.low[i], config.high[i], i
                )));
            }
        }

        Ok(Self {
            bins: config.bins,
            low: config.low,
            high: config.high,
        })
    }

    /// Returns the cell containing the observation.
    ///
    /// Out-of-range components are clipped; NaN is treated as the lower bound.
    pub fn discretize(&self, obs: &Observation) -> DiscreteState {
        let mut coords = [0usize; OBS_DIM];
        for (i, c) in coords.iter_mut().enumerate() {
            let (lo, hi) = (self.low[i], self.high[i]);
            let x = obs.0[i];
            let clipped = if x.is_nan() { lo } else { x.clamp(lo, hi) };
            let ratio = ((clipped - lo) / (hi - lo)).clamp(0.0, RATIO_MAX);
            *c = (ratio * self.bins[i] as f64) as usize;
        }
        DiscreteState(coords)
    }

    /// Returns the cell of the given coordinates.
    pub fn cell(&self, coords: [usize; OBS_DIM]) -> Result<DiscreteState, TabulaError> {
        let s = DiscreteState(coords);
        check(&self.bins, &s)?;
        Ok(s)
    }

    /// Number of bins of each dimension.
    pub fn bins(&self) -> [usize; OBS_DIM] {
        self.bins
    }

    /// Number of cells of the grid.
    pub fn n_states(&self) -> usize {
        self.bins.iter().product()
    }

    /// Packs a cell into an integer in `0..n_states()`.
    pub fn pack(&self, s: &DiscreteState) -> usize {
        pack(&self.bins, s)
    }

    /// Inverse of [`Discretizer::pack`].
    ///
    /// Indices beyond the grid wrap around on the first dimension.
    pub fn unpack(&self, mut ix: usize) -> DiscreteState {
        let mut coords = [0usize; OBS_DIM];
        for i in (0..OBS_DIM).rev() {
            coords[i] = ix % self.bins[i];
            ix /= self.bins[i];
        }
        DiscreteState(coords)
    }
}

impl Default for Discretizer {
    fn default() -> Self {
        let config = DiscretizerConfig::default();
        Self {
            bins: config.bins,
            low: config.low,
            high: config.high,
        }
    }
}

/// Fails on the first coordinate of `s` not below the bin count of its dimension.
pub(crate) fn check(bins: &[usize; OBS_DIM], s: &DiscreteState) -> Result<(), TabulaError> {
    for (dim, (&coord, &bins)) in s.0.iter().zip(bins.iter()).enumerate() {
        if coord >= bins {
            return Err(TabulaError::CellOutOfRange { dim, coord, bins });
        }
    }
    Ok(())
}

/// Mixed-radix packing of a cell over the bin counts.
#[inline]
pub(crate) fn pack(bins: &[usize; OBS_DIM], s: &DiscreteState) -> usize {
    s.0.iter()
        .zip(bins.iter())
        .fold(0, |acc, (&c, &b)| acc * b + c)
}
