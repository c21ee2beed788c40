//! Fixed policy as an actor.
use crate::{Action, Discretizer, Observation, Policy};
use std::marker::PhantomData;
use tabula_core::{Actor, Env};

/// Acts with a [`Policy`] on the cells of a [`Discretizer`].
///
/// States without an entry in the policy get its default action. The agent
/// never explores.
pub struct PolicyAgent<E> {
    policy: Policy,
    discretizer: Discretizer,
    phantom: PhantomData<E>,
}

impl<E> PolicyAgent<E> {
    /// Wraps `policy`. Observations are mapped to cells by `discretizer`.
    pub fn new(policy: Policy, discretizer: Discretizer) -> Self {
        Self {
            policy,
            discretizer,
            phantom: PhantomData,
        }
    }

    /// The wrapped policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

impl<E> Actor<E> for PolicyAgent<E>
where
    E: Env<Obs = Observation, Act = Action>,
{
    fn act(&mut self, obs: &Observation) -> Action {
        let s = self.discretizer.discretize(obs);
        self.policy.get(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameInfo;
    use anyhow::Result;
    use tabula_core::{record::Record, Step};

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

    #[test]
    fn test_unseen_cell_gets_default_action() {
        let d = Discretizer::default();
        let seen = Observation([0.0, 1.5, 0.0]);
        let unseen = Observation([-1.5, 0.0, 1.5]);

        let mut policy = Policy::new(Action::Jump);
        policy.insert(d.discretize(&seen), Action::Noop);
        let mut agent = PolicyAgent::<Dummy>::new(policy, d);

        assert_eq!(agent.act(&seen), Action::Noop);
        assert_eq!(agent.act(&unseen), Action::Jump);
        assert_eq!(agent.epsilon(), 0.0);
        assert_eq!(agent.policy().len(), 1);
    }
}
