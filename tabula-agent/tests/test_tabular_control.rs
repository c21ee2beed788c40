mod common;

use anyhow::Result;
use common::{discretizer_config, init_logger, Corridor, CorridorConfig, LENGTH};
use tabula_agent::{Algorithm, EpsilonGreedy, TabularAgent, TabularAgentConfig};
use tabula_core::{
    record::{BufferedRecorder, NullRecorder},
    Actor, Agent, Configurable, DefaultEvaluator, Env, Evaluator, Trainer, TrainerConfig,
};

const N_EPISODES: usize = 300;
const N_EPISODES_PER_EVAL: usize = 5;
const ALPHA: f64 = 0.5;
const GAMMA: f64 = 0.9;

fn create_agent(algorithm: Algorithm) -> Result<TabularAgent<Corridor>> {
    let config = TabularAgentConfig::default()
        .algorithm(algorithm)
        .discretizer(discretizer_config())
        .alpha(ALPHA)
        .gamma(GAMMA)
        .explorer(EpsilonGreedy::new().eps(1.0).eps_min(0.05).eps_decay(0.98))
        .seed(7);
    TabularAgent::build(config)
}

fn train_and_evaluate(algorithm: Algorithm) -> Result<f32> {
    init_logger();
    let mut agent = create_agent(algorithm)?;
    let mut trainer = Trainer::<Corridor>::build(
        TrainerConfig::default()
            .n_episodes(N_EPISODES)
            .max_steps(100)
            .log_interval(100),
        CorridorConfig::default(),
    );
    let scores = trainer.train(&mut agent, &mut NullRecorder::new())?;
    assert_eq!(scores.len(), N_EPISODES);

    agent.set_epsilon(0.0);
    let mut evaluator =
        DefaultEvaluator::<Corridor>::new(&CorridorConfig::default(), 0, N_EPISODES_PER_EVAL)?;
    let record = evaluator.evaluate(&mut agent)?;
    Ok(record.get_scalar("score_mean")?)
}

#[test]
fn test_q_learning_solves_corridor() -> Result<()> {
    assert_eq!(train_and_evaluate(Algorithm::QLearning)?, LENGTH as f32);
    Ok(())
}

#[test]
fn test_sarsa_solves_corridor() -> Result<()> {
    assert_eq!(train_and_evaluate(Algorithm::Sarsa)?, LENGTH as f32);
    Ok(())
}

#[test]
fn test_monte_carlo_solves_corridor() -> Result<()> {
    assert_eq!(train_and_evaluate(Algorithm::MonteCarlo)?, LENGTH as f32);
    Ok(())
}

#[test]
fn test_monte_carlo_buffer_is_flushed_at_episode_end() -> Result<()> {
    let mut agent = create_agent(Algorithm::MonteCarlo)?;
    let trainer = Trainer::<Corridor>::build(TrainerConfig::default(), CorridorConfig::default());
    let mut env = Corridor::build(&CorridorConfig::default(), 0)?;
    let summary = trainer.train_episode(&mut env, &mut agent)?;
    assert!(summary.steps >= 1);
    assert_eq!(agent.n_buffered(), 0);
    Ok(())
}

#[test]
fn test_epsilon_is_recorded_and_decays() -> Result<()> {
    let mut agent = create_agent(Algorithm::QLearning)?;
    let mut trainer = Trainer::<Corridor>::build(
        TrainerConfig::default().n_episodes(50),
        CorridorConfig::default(),
    );
    let mut recorder = BufferedRecorder::new();
    trainer.train(&mut agent, &mut recorder)?;

    let eps = recorder.scalars("eps");
    assert_eq!(eps.len(), 50);
    assert!(eps.windows(2).all(|w| w[1] <= w[0]));
    assert!(eps.iter().all(|&e| e >= 0.05));
    assert!((Actor::<Corridor>::epsilon(&agent) - 0.98f64.powi(50)).abs() < 1e-9);
    Ok(())
}
