//! Agent.
use super::{Actor, Env, Step};

/// Represents a learning actor on an environment.
///
/// Every learning algorithm is driven through the same [`Agent::observe`]
/// operation, so that a single interaction loop, see [`Trainer`], serves all of
/// them.
///
/// [`Trainer`]: crate::Trainer
pub trait Agent<E: Env>: Actor<E> {
    /// Observes the transition `(obs, step.act, step.obs, step.reward, done)`.
    ///
    /// `obs` is the observation on which `step.act` was taken.
    ///
    /// An on-policy learner has to commit to the action it takes next before
    /// updating. In that case the action is returned, and the caller must take it
    /// on `step.obs` instead of calling [`Actor::act`] again. Otherwise `None` is
    /// returned.
    fn observe(&mut self, obs: &E::Obs, step: &Step<E>) -> Option<E::Act>;

    /// Decays the exploration rate. Called once after each completed episode.
    fn decay(&mut self);

    /// Overrides the exploration rate, e.g., zero for greedy evaluation.
    fn set_epsilon(&mut self, eps: f64);
}
