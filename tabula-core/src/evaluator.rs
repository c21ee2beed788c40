//! Evaluate [`Actor`].
use crate::{record::Record, Actor, Env};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Actor`].
pub trait Evaluator<E: Env> {
    /// Evaluate [`Actor`].
    ///
    /// The caller of this method needs to handle the internal state of `actor`,
    /// like its exploration rate.
    fn evaluate<A>(&mut self, actor: &mut A) -> Result<Record>
    where
        A: Actor<E>;
}
