//! Value iteration.
use super::{backup::Backup, Convergence, Plan};
use crate::{DiscreteState, EmpiricalModel};
use log::{debug, info};

const LOG_INTERVAL: usize = 50;

/// Solves `model` on `states` with value iteration.
///
/// Starting from `V = 0`, each sweep sets `V(s)` to the best one-step lookahead
/// of `s` in place. States without observed actions keep their value. Stops
/// when the largest change of a sweep is below `tolerance` or after
/// `max_sweeps` sweeps. The returned policy is greedy with respect to the
/// final values, ties going to the lowest action index.
pub fn value_iteration(
    states: &[DiscreteState],
    model: &EmpiricalModel,
    gamma: f64,
    max_sweeps: usize,
    tolerance: f64,
) -> Plan {
    let backup = Backup::new(states, model);
    let mut v = vec![0f64; backup.len()];
    let mut delta = 0f64;
    let mut convergence = Convergence::BudgetExhausted {
        iterations: max_sweeps,
    };

    for sweep in 1..=max_sweeps {
        delta = 0.0;
        for i in 0..backup.len() {
            if let Some((_, best)) = backup.best(i, &v, gamma) {
                delta = delta.max((best - v[i]).abs());
                v[i] = best;
            }
        }

        if sweep % LOG_INTERVAL == 0 {
            debug!("Value iteration sweep {}, delta = {:e}", sweep, delta);
        }

        if delta < tolerance {
            info!(
                "Value iteration converged after {} sweeps, delta = {:e}",
                sweep, delta
            );
            convergence = Convergence::Converged { iterations: sweep };
            break;
        }
    }

    let actions = backup.greedy_actions(&v, gamma);

    Plan {
        values: backup.to_values(&v),
        policy: backup.to_policy(&actions),
        convergence,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Discretizer, DiscretizerConfig, ModelBuilder};

    fn discretizer() -> Discretizer {
        Discretizer::new(&DiscretizerConfig::default().bins([2, 1, 1])).unwrap()
    }

    fn self_loop(r: f64) -> (DiscreteState, EmpiricalModel) {
        let d = discretizer();
        let s = d.cell([0, 0, 0]).unwrap();
        let mut builder = ModelBuilder::new(&d);
        builder.add(s, Action::Noop, s, r, false).unwrap();
        (s, builder.build())
    }

    #[test]
    fn test_self_loop_converges_monotonically() {
        let (s, model) = self_loop(1.0);
        let gamma = 0.9;

        let mut prev = 0.0;
        for max_sweeps in 1..30 {
            let plan = value_iteration(&[s], &model, gamma, max_sweeps, 0.0);
            let v = plan.values.get(&s);
            assert!(v > prev);
            prev = v;
        }

        let plan = value_iteration(&[s], &model, gamma, 1000, 1e-10);
        assert!(plan.convergence.is_converged());
        assert!(plan.delta < 1e-10);
        assert!((plan.values.get(&s) - 1.0 / (1.0 - gamma)).abs() < 1e-8);
        assert_eq!(plan.policy.get(&s), Action::Noop);
    }

    #[test]
    fn test_budget_exhaustion_is_reported() {
        let (s, model) = self_loop(1.0);
        let plan = value_iteration(&[s], &model, 0.9, 3, 1e-6);
        assert_eq!(
            plan.convergence,
            Convergence::BudgetExhausted { iterations: 3 }
        );
        assert!(plan.delta > 0.0);
        assert!((plan.values.get(&s) - (1.0 + 0.9 + 0.81)).abs() < 1e-12);
    }

    #[test]
    fn test_two_state_model_prefers_rewarding_action() {
        let d = discretizer();
        let s0 = d.cell([0, 0, 0]).unwrap();
        let s1 = d.cell([1, 0, 0]).unwrap();
        let mut builder = ModelBuilder::new(&d);
        builder.add(s0, Action::Jump, s1, 1.0, false).unwrap();
        builder.add(s0, Action::Noop, s0, 0.0, true).unwrap();
        builder.add(s1, Action::Noop, s1, 0.0, false).unwrap();
        let model = builder.build();

        let plan = value_iteration(model.states(), &model, 0.9, 300, 1e-4);
        assert!(plan.convergence.is_converged());
        assert_eq!(plan.policy.get(&s0), Action::Jump);
        assert!((plan.values.get(&s0) - 1.0).abs() < 1e-6);
        assert_eq!(plan.values.get(&s1), 0.0);
    }

    #[test]
    fn test_terminal_gate_drops_bootstrap() {
        let d = discretizer();
        let s0 = d.cell([0, 0, 0]).unwrap();
        let s1 = d.cell([1, 0, 0]).unwrap();
        let mut builder = ModelBuilder::new(&d);
        // Terminal in half of the samples: gated out.
        builder.add(s0, Action::Noop, s1, 0.0, true).unwrap();
        builder.add(s0, Action::Noop, s1, 0.0, false).unwrap();
        builder.add(s1, Action::Noop, s1, 1.0, false).unwrap();
        let model = builder.build();

        let plan = value_iteration(model.states(), &model, 0.5, 200, 1e-9);
        assert_eq!(plan.values.get(&s0), 0.0);
        assert!((plan.values.get(&s1) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_successors_outside_state_list_are_zero() {
        let d = discretizer();
        let s0 = d.cell([0, 0, 0]).unwrap();
        let s1 = d.cell([1, 0, 0]).unwrap();
        let mut builder = ModelBuilder::new(&d);
        builder.add(s0, Action::Noop, s1, 1.0, false).unwrap();
        builder.add(s1, Action::Noop, s1, 1.0, false).unwrap();
        let model = builder.build();

        let plan = value_iteration(&[s0], &model, 0.9, 100, 1e-9);
        assert_eq!(plan.values.get(&s0), 1.0);
        assert_eq!(plan.values.len(), 1);
    }
}
