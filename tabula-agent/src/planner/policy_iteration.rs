//! Policy iteration.
use super::{backup::Backup, Convergence, Plan, Policy, ValueFunction};
use crate::{Action, DiscreteState, EmpiricalModel, N_ACTIONS};
use log::{debug, info};
use rand::Rng;

/// Runs `sweeps` in-place evaluation sweeps of the fixed `actions` and
/// returns the largest value change of the last sweep.
fn evaluate(
    backup: &Backup,
    model: &EmpiricalModel,
    actions: &[Action],
    v: &mut [f64],
    gamma: f64,
    sweeps: usize,
) -> f64 {
    let mut delta = 0f64;
    for _ in 0..sweeps {
        delta = 0.0;
        for (i, &a) in actions.iter().enumerate() {
            let new = backup
                .q(i, a, v, gamma)
                .unwrap_or_else(|| model.reward(&backup.states()[i], a));
            delta = delta.max((new - v[i]).abs());
            v[i] = new;
        }
    }
    delta
}

/// Evaluates `policy` on `states` with `sweeps` in-place sweeps from `V = 0`.
pub fn evaluate_policy(
    states: &[DiscreteState],
    model: &EmpiricalModel,
    policy: &Policy,
    gamma: f64,
    sweeps: usize,
) -> ValueFunction {
    let backup = Backup::new(states, model);
    let actions: Vec<Action> = backup.states().iter().map(|s| policy.get(s)).collect();
    let mut v = vec![0f64; backup.len()];
    evaluate(&backup, model, &actions, &mut v, gamma, sweeps);
    backup.to_values(&v)
}

/// Solves `model` on `states` with policy iteration from a random policy.
///
/// The initial action of each state is drawn uniformly with `rng`.
/// See [`policy_iteration_from`].
pub fn policy_iteration<R: Rng>(
    states: &[DiscreteState],
    model: &EmpiricalModel,
    gamma: f64,
    eval_sweeps: usize,
    max_outer_iters: usize,
    rng: &mut R,
) -> Plan {
    let mut initial = Policy::new(Action::default());
    for s in states {
        initial.insert(*s, Action::from_index(rng.gen_range(0..N_ACTIONS)));
    }
    policy_iteration_from(states, model, gamma, eval_sweeps, max_outer_iters, &initial)
}

/// Solves `model` on `states` with policy iteration from `initial`.
///
/// Each iteration evaluates the current policy with `eval_sweeps` in-place
/// sweeps, then makes it greedy with respect to the values. An action without
/// data on a state is evaluated at its mean reward with no bootstrap, and
/// states without any data get the default action on improvement. Stops when
/// an improvement step changes no action or after `max_outer_iters` iterations.
pub fn policy_iteration_from(
    states: &[DiscreteState],
    model: &EmpiricalModel,
    gamma: f64,
    eval_sweeps: usize,
    max_outer_iters: usize,
    initial: &Policy,
) -> Plan {
    let backup = Backup::new(states, model);
    let mut actions: Vec<Action> = backup.states().iter().map(|s| initial.get(s)).collect();
    let mut v = vec![0f64; backup.len()];
    let mut delta = 0f64;
    let mut convergence = Convergence::BudgetExhausted {
        iterations: max_outer_iters,
    };

    for iter in 1..=max_outer_iters {
        delta = evaluate(&backup, model, &actions, &mut v, gamma, eval_sweeps);

        let improved = backup.greedy_actions(&v, gamma);
        let n_changed = improved
            .iter()
            .zip(actions.iter())
            .filter(|(a, b)| a != b)
            .count();
        actions = improved;
        debug!(
            "Policy iteration {}, {} actions changed, delta = {:e}",
            iter, n_changed, delta
        );

        if n_changed == 0 {
            info!("Policy iteration converged after {} iterations", iter);
            convergence = Convergence::Converged { iterations: iter };
            break;
        }
    }

    Plan {
        values: backup.to_values(&v),
        policy: backup.to_policy(&actions),
        convergence,
        delta,
    }
}
