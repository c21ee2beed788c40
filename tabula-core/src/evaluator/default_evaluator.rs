//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and reports the mean and the standard deviation of the episode scores.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue},
    Actor, Env, Info,
};
use anyhow::Result;
use log::info;

/// A default implementation of the [`Evaluator`] trait.
///
/// The score of an episode is the score reported by the environment in the
/// info of the last step, see [`Info::score`]. Environments without a score
/// are scored with the undiscounted episode return.
///
/// The record returned by [`DefaultEvaluator::evaluate`] contains:
///
/// * `score_mean` - Mean of the episode scores
/// * `score_std` - Population standard deviation of the episode scores
/// * `return_mean` - Mean of the undiscounted episode returns
/// * `scores` - The episode scores
///
/// # Examples
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<MyEnv>::new(&config, 42, 100)?;
/// let record = evaluator.evaluate(&mut policy_agent)?;
/// println!("Mean score: {}", record.get_scalar("score_mean")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// Cap on the number of steps of an episode.
    max_steps: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<A>(&mut self, actor: &mut A) -> Result<Record>
    where
        A: Actor<E>,
    {
        let mut scores = Vec::with_capacity(self.n_episodes);
        let mut r_total = 0f64;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_episode = 0f64;
            let mut score = None;

            for _ in 0..self.max_steps {
                let act = actor.act(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_episode += step.reward;
                score = step.info.score();
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            scores.push(score.map(|s| s as f64).unwrap_or(r_episode));
            r_total += r_episode;
        }

        let (mean, std) = mean_std(&scores);
        info!(
            "Evaluated {} episodes: score {:.2} ± {:.2}",
            self.n_episodes, mean, std
        );

        Ok(Record::from_slice(&[
            ("score_mean", RecordValue::Scalar(mean as f32)),
            ("score_std", RecordValue::Scalar(std as f32)),
            (
                "return_mean",
                RecordValue::Scalar((r_total / self.n_episodes.max(1) as f64) as f32),
            ),
            (
                "scores",
                RecordValue::Array1(scores.iter().map(|&s| s as f32).collect()),
            ),
        ]))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self::from_env(E::build(config, seed)?, n_episodes))
    }

    /// Constructs a new [`DefaultEvaluator`] on an already built environment.
    pub fn from_env(env: E, n_episodes: usize) -> Self {
        Self {
            n_episodes,
            max_steps: 3000,
            env,
        }
    }

    /// Sets the cap on the number of steps of an episode.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = v;
        self
    }
}

/// Mean and population standard deviation, both zero for an empty slice.
fn mean_std(xs: &[f64]) -> (f64, f64) {
    if xs.is_empty() {
        return (0.0, 0.0);
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
