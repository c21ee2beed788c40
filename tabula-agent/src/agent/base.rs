//! Tabular agent.
use super::{config::TabularAgentConfig, mc::FirstVisitReturns, Algorithm};
use crate::{Action, ActionValueTable, DiscreteState, Discretizer, EpsilonGreedy, Observation};
use anyhow::Result;
use log::info;
use rand::{rngs::SmallRng, SeedableRng};
use std::marker::PhantomData;
use tabula_core::{Actor, Agent, Configurable, Env, Step};

/// Tabular control agent.
///
/// The agent keeps an [`ActionValueTable`] over the cells of its
/// [`Discretizer`] and acts epsilon-greedily on it. How the table is updated
/// is fixed at construction by [`Algorithm`]:
///
/// * [`Algorithm::QLearning`]: `Q(s,a) += α (r + γ max_a' Q(s',a') - Q(s,a))`,
/// * [`Algorithm::Sarsa`]: `Q(s,a) += α (r + γ Q(s',a') - Q(s,a))`, where `a'`
///   is the action the agent takes next,
/// * [`Algorithm::MonteCarlo`]: transitions are buffered and, when the episode
///   ends, each visited pair is credited with its return.
///
/// The bootstrap term is dropped on terminal transitions.
pub struct TabularAgent<E> {
    algorithm: Algorithm,
    discretizer: Discretizer,
    q: ActionValueTable,
    explorer: EpsilonGreedy,
    alpha: f64,
    gamma: f64,
    mc: FirstVisitReturns,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E> TabularAgent<E> {
    /// Discretizes `obs` and picks an action epsilon-greedily.
    pub fn select(&mut self, obs: &Observation) -> Action {
        let s = self.discretizer.discretize(obs);
        self.select_on(&s)
    }

    fn select_on(&mut self, s: &DiscreteState) -> Action {
        let q = &self.q;
        self.explorer.action(&mut self.rng, || q.greedy(s))
    }

    /// Q-learning update on the transition `(obs, a, r, next_obs, done)`.
    pub fn learn(&mut self, obs: &Observation, a: Action, r: f64, next_obs: &Observation, done: bool) {
        let s = self.discretizer.discretize(obs);
        let s2 = self.discretizer.discretize(next_obs);
        let q_next = if done { 0.0 } else { self.q.max(&s2) };
        self.q.update_toward(&s, a, r + self.gamma * q_next, self.alpha);
    }

    /// SARSA update on the transition `(obs, a, r, next_obs, a2, done)`.
    ///
    /// `a2` is the action to be taken on `next_obs`, ignored when `done`.
    pub fn learn_sarsa(
        &mut self,
        obs: &Observation,
        a: Action,
        r: f64,
        next_obs: &Observation,
        a2: Action,
        done: bool,
    ) {
        let s = self.discretizer.discretize(obs);
        let s2 = self.discretizer.discretize(next_obs);
        let q_next = if done { 0.0 } else { self.q.get(&s2, a2) };
        self.q.update_toward(&s, a, r + self.gamma * q_next, self.alpha);
    }

    /// Buffers `(obs, a, r)` for the Monte Carlo update.
    pub fn store(&mut self, obs: &Observation, a: Action, r: f64) {
        let s = self.discretizer.discretize(obs);
        self.mc.push(s, a, r);
    }

    /// Credits the returns of the buffered episode and clears the buffer.
    ///
    /// Does nothing if no transition has been stored.
    pub fn learn_episode(&mut self) {
        if self.mc.episode_len() == 0 {
            return;
        }
        self.mc.consolidate(&mut self.q, self.gamma);
    }

    /// Number of Monte Carlo returns credited to `(s, a)` so far.
    pub fn n_returns(&self, s: &DiscreteState, a: Action) -> u64 {
        self.mc.count(s, a)
    }

    /// Number of transitions buffered for the current episode.
    pub fn n_buffered(&self) -> usize {
        self.mc.episode_len()
    }

    /// The action-value table.
    pub fn q_table(&self) -> &ActionValueTable {
        &self.q
    }

    /// The discretizer.
    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    /// The update rule.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl<E> Configurable for TabularAgent<E> {
    type Config = TabularAgentConfig;

    fn build(config: Self::Config) -> Result<Self> {
        let discretizer = Discretizer::new(&config.discretizer)?;
        let q = ActionValueTable::new(discretizer.bins());
        info!(
            "Build {:?} agent on {} cells",
            config.algorithm,
            discretizer.n_states()
        );

        Ok(Self {
            algorithm: config.algorithm,
            discretizer,
            q,
            explorer: config.explorer,
            alpha: config.alpha,
            gamma: config.gamma,
            mc: FirstVisitReturns::default(),
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        })
    }
}

impl<E> Actor<E> for TabularAgent<E>
where
    E: Env<Obs = Observation, Act = Action>,
{
    fn act(&mut self, obs: &Observation) -> Action {
        self.select(obs)
    }

    fn epsilon(&self) -> f64 {
        self.explorer.eps
    }
}

impl<E> Agent<E> for TabularAgent<E>
where
    E: Env<Obs = Observation, Act = Action>,
{
    fn observe(&mut self, obs: &Observation, step: &Step<E>) -> Option<Action> {
        let (a, r, next_obs) = (step.act, step.reward, &step.obs);

        match self.algorithm {
            Algorithm::QLearning => {
                self.learn(obs, a, r, next_obs, step.is_terminated);
                None
            }
            Algorithm::Sarsa => {
                if step.is_terminated {
                    self.learn_sarsa(obs, a, r, next_obs, a, true);
                    None
                } else {
                    let a2 = self.select(next_obs);
                    self.learn_sarsa(obs, a, r, next_obs, a2, false);
                    Some(a2)
                }
            }
            Algorithm::MonteCarlo => {
                self.store(obs, a, r);
                if step.is_done() {
                    self.learn_episode();
                }
                None
            }
        }
    }

    fn decay(&mut self) {
        self.explorer.decay();
    }

    fn set_epsilon(&mut self, eps: f64) {
        self.explorer.eps = eps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiscretizerConfig, GameInfo};
    use tabula_core::record::Record;
    use tempdir::TempDir;

    struct Dummy;

    impl Env for Dummy {
        type Config = ();
        type Obs = Observation;
        type Act = Action;
        type Info = GameInfo;

        fn build(_config: &(), _seed: i64) -> Result<Self> {
            Ok(Self)
        }

        fn step(&mut self, _a: &Action) -> (Step<Self>, Record) {
            unimplemented!()
        }

        fn reset(&mut self) -> Result<Observation> {
            Ok(Observation([0.0; 3]))
        }
    }

    fn agent(algorithm: Algorithm) -> TabularAgent<Dummy> {
        let config = TabularAgentConfig::default()
            .algorithm(algorithm)
            .alpha(0.5)
            .gamma(0.9)
            .discretizer(
                DiscretizerConfig::default()
                    .bins([4, 1, 1])
                    .low([0.0, 0.0, 0.0])
                    .high([4.0, 1.0, 1.0]),
            )
            .explorer(EpsilonGreedy::new().eps(0.0).eps_min(0.0));
        TabularAgent::build(config).unwrap()
    }

    fn obs(x: f64) -> Observation {
        Observation([x, 0.5, 0.5])
    }

    #[test]
    fn test_q_learning_bootstraps_on_max() {
        let mut agent = agent(Algorithm::QLearning);
        let s1 = agent.discretizer().discretize(&obs(1.5));
        let s2 = agent.discretizer().discretize(&obs(2.5));
        agent.q.set(&s2, Action::Jump, 2.0);

        agent.learn(&obs(1.5), Action::Noop, 1.0, &obs(2.5), false);
        assert!((agent.q_table().get(&s1, Action::Noop) - 0.5 * (1.0 + 0.9 * 2.0)).abs() < 1e-12);

        agent.learn(&obs(1.5), Action::Jump, 1.0, &obs(2.5), true);
        assert!((agent.q_table().get(&s1, Action::Jump) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sarsa_bootstraps_on_next_action() {
        let mut agent = agent(Algorithm::Sarsa);
        let s1 = agent.discretizer().discretize(&obs(1.5));
        let s2 = agent.discretizer().discretize(&obs(2.5));
        agent.q.set(&s2, Action::Jump, 2.0);

        agent.learn_sarsa(&obs(1.5), Action::Noop, 1.0, &obs(2.5), Action::Noop, false);
        assert!((agent.q_table().get(&s1, Action::Noop) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_monte_carlo_credits_last_occurrence_once() {
        let mut agent = agent(Algorithm::MonteCarlo);
        let s = agent.discretizer().discretize(&obs(0.5));

        // Same pair visited three times, rewards 1, 1, 1 with gamma 0.9.
        for _ in 0..3 {
            agent.store(&obs(0.5), Action::Noop, 1.0);
        }
        assert_eq!(agent.n_buffered(), 3);
        agent.learn_episode();

        assert_eq!(agent.n_buffered(), 0);
        assert_eq!(agent.n_returns(&s, Action::Noop), 1);
        assert!((agent.q_table().get(&s, Action::Noop) - 1.0).abs() < 1e-12);

        // An empty episode changes nothing.
        agent.learn_episode();
        assert_eq!(agent.n_returns(&s, Action::Noop), 1);
    }

    #[test]
    fn test_monte_carlo_averages_across_episodes() {
        let mut agent = agent(Algorithm::MonteCarlo);
        let s = agent.discretizer().discretize(&obs(0.5));

        agent.store(&obs(0.5), Action::Jump, 2.0);
        agent.learn_episode();
        agent.store(&obs(0.5), Action::Jump, 4.0);
        agent.learn_episode();

        assert_eq!(agent.n_returns(&s, Action::Jump), 2);
        assert!((agent.q_table().get(&s, Action::Jump) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_agent_follows_table() {
        let mut agent = agent(Algorithm::QLearning);
        let s = agent.discretizer().discretize(&obs(3.5));
        assert_eq!(agent.select(&obs(3.5)), Action::Noop);
        agent.q.set(&s, Action::Jump, 0.1);
        assert_eq!(agent.select(&obs(3.5)), Action::Jump);
        assert_eq!(Actor::<Dummy>::epsilon(&agent), 0.0);
    }

    #[test]
    fn test_build_from_yaml_file() -> Result<()> {
        let config = TabularAgentConfig::default()
            .algorithm(Algorithm::MonteCarlo)
            .gamma(0.5)
            .discretizer(DiscretizerConfig::default().bins([3, 4, 5]))
            .explorer(EpsilonGreedy::new().eps(0.25));
        let dir = TempDir::new("tabular_agent")?;
        let path = dir.path().join("agent.yaml");
        config.save(&path)?;

        let agent = TabularAgent::<Dummy>::build_from_path(&path)?;
        assert_eq!(agent.algorithm(), Algorithm::MonteCarlo);
        assert_eq!(agent.discretizer().n_states(), 60);
        assert_eq!(agent.q_table().len(), 120);
        assert_eq!(Actor::<Dummy>::epsilon(&agent), 0.25);
        Ok(())
    }
}
