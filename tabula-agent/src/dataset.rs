//! Recording transitions on the grid.
use crate::{Action, Discretizer, Observation, Transition};
use anyhow::Result;
use log::info;
use tabula_core::{Actor, Env};

const LOG_INTERVAL: usize = 500;

/// Runs `n_episodes` episodes of `actor` on `env` and records every step as a
/// [`Transition`] between the cells of `discretizer`.
///
/// Episodes are cut after `max_steps` steps. The last transition of a cut
/// episode is recorded as not done.
pub fn collect_dataset<E, A>(
    env: &mut E,
    actor: &mut A,
    discretizer: &Discretizer,
    n_episodes: usize,
    max_steps: usize,
) -> Result<Vec<Transition>>
where
    E: Env<Obs = Observation, Act = Action>,
    A: Actor<E>,
{
    let mut transitions = Vec::new();

    for episode in 1..=n_episodes {
        let mut obs = env.reset()?;

        for _ in 0..max_steps {
            let a = actor.act(&obs);
            let (step, _) = env.step(&a);
            transitions.push(Transition {
                state: discretizer.discretize(&obs),
                action: a,
                next_state: discretizer.discretize(&step.obs),
                reward: step.reward,
                done: step.is_terminated,
            });
            if step.is_done() {
                break;
            }
            obs = step.obs;
        }

        if episode % LOG_INTERVAL == 0 {
            info!(
                "Collected {} episodes, {} transitions",
                episode,
                transitions.len()
            );
        }
    }

    Ok(transitions)
}
