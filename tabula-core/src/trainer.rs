//! Train [`Agent`].
mod config;
use crate::{
    record::{Record, RecordValue::Scalar, Recorder},
    Agent, Env, Info,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::info;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the episodic training loop.
///
/// # Training loop
///
/// For each of `n_episodes` episodes:
///
/// 1. Reset [`Env`] and obtain `o_0`.
/// 2. Take the action `a_t`. It is the action committed by the agent in the
///    previous call of [`Agent::observe`], if any, otherwise
///    [`Actor::act`](crate::Actor::act) on `o_t`.
/// 3. Step the environment, getting `o_t+1`, `r_t` and the termination flags.
///    When the step cap `max_steps` is reached, the step is marked truncated.
/// 4. Call [`Agent::observe`] with `o_t` and the step.
/// 5. Repeat from 2 until the episode is terminated or truncated.
/// 6. Call [`Agent::decay`] and write a record with keys `episode`, `score`,
///    `return`, `steps` and `eps` to the recorder.
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|Env::Obs|A
///     B -->|"Step&lt;E: Env&gt;"|C[Agent::observe]
///     C -->|"Option&lt;Env::Act&gt;"|A
/// ```
pub struct Trainer<E: Env> {
    /// Configuration of the environment for training.
    env_config_train: E::Config,

    /// The number of training episodes.
    n_episodes: usize,

    /// Cap on the number of steps of an episode.
    max_steps: Option<usize>,

    /// Interval of logging in episodes.
    log_interval: usize,

    /// Random seed of the training environment.
    seed: i64,
}

/// Summary of a single episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// Score reported by the environment, or the return if it reports none.
    pub score: f64,

    /// Undiscounted sum of rewards.
    pub ret: f64,

    /// Number of environment steps.
    pub steps: usize,
}

impl<E: Env> Trainer<E> {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig, env_config_train: E::Config) -> Self {
        Self {
            env_config_train,
            n_episodes: config.n_episodes,
            max_steps: config.max_steps,
            log_interval: config.log_interval.max(1),
            seed: config.seed,
        }
    }

    /// Runs a single training episode on `env`.
    pub fn train_episode<A>(&self, env: &mut E, agent: &mut A) -> Result<EpisodeSummary>
    where
        A: Agent<E>,
    {
        let mut obs = env.reset()?;
        let mut pending: Option<E::Act> = None;
        let mut ret = 0f64;
        let mut steps = 0;
        let mut score = None;

        loop {
            let act = match pending.take() {
                Some(act) => act,
                None => agent.act(&obs),
            };
            let (mut step, _) = env.step(&act);
            steps += 1;
            if matches!(self.max_steps, Some(cap) if steps >= cap) && !step.is_done() {
                step.is_truncated = true;
            }

            ret += step.reward;
            score = step.info.score();
            pending = agent.observe(&obs, &step);

            if step.is_done() {
                break;
            }
            obs = step.obs;
        }

        Ok(EpisodeSummary {
            score: score.map(|s| s as f64).unwrap_or(ret),
            ret,
            steps,
        })
    }

    /// Train the agent.
    ///
    /// Returns the scores of the episodes.
    pub fn train<A, R>(&mut self, agent: &mut A, recorder: &mut R) -> Result<Vec<f64>>
    where
        A: Agent<E>,
        R: Recorder,
    {
        let mut env = E::build(&self.env_config_train, self.seed)?;
        let mut scores = Vec::with_capacity(self.n_episodes);
        let mut best_avg = f64::MIN;

        for episode in 1..=self.n_episodes {
            let summary = self.train_episode(&mut env, agent)?;
            agent.decay();
            scores.push(summary.score);

            recorder.write(Record::from_slice(&[
                ("episode", Scalar(episode as f32)),
                ("score", Scalar(summary.score as f32)),
                ("return", Scalar(summary.ret as f32)),
                ("steps", Scalar(summary.steps as f32)),
                ("eps", Scalar(agent.epsilon() as f32)),
            ]));

            if episode % self.log_interval == 0 {
                let recent = &scores[scores.len() - self.log_interval..];
                let avg = recent.iter().sum::<f64>() / recent.len() as f64;
                let max_recent = recent.iter().cloned().fold(f64::MIN, f64::max);
                best_avg = best_avg.max(avg);
                info!(
                    "Ep {:5}/{} | avg: {:5.2} | max: {:2.0} | best_avg: {:5.2} | eps: {:.4}",
                    episode,
                    self.n_episodes,
                    avg,
                    max_recent,
                    best_avg,
                    agent.epsilon()
                );
            }
        }

        Ok(scores)
    }
}
