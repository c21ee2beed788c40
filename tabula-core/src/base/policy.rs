//! Actor.
use super::Env;
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Something that chooses actions on an environment.
///
/// An actor is a mapping from an observation to an action.
/// The mapping can be either of deterministic or stochastic.
/// Learning agents, as well as fixed policies produced by planners, implement
/// this trait, so that the same evaluation code applies to both.
pub trait Actor<E: Env> {
    /// Chooses an action given an observation.
    fn act(&mut self, obs: &E::Obs) -> E::Act;

    /// Probability of taking a uniformly random action in [`Actor::act`].
    ///
    /// Fixed policies are always greedy and keep the default of zero.
    fn epsilon(&self) -> f64 {
        0.0
    }
}

/// A configurable object.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Self::build(config)
    }
}
