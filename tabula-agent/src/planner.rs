//! Planners solving an [`EmpiricalModel`](crate::EmpiricalModel).
//!
//! Both planners back up a state with the one-step lookahead
//!
//! ```text
//! Q(s, a) = r(s, a) + γ Σ_s' P(s' | s, a) V(s')
//! ```
//!
//! over the actions observed on `s`. The bootstrap term is kept only when the
//! empirical terminal probability of `(s, a)` is below `0.5`. Successors outside
//! the planned state list have zero value. Values are updated in place during
//! a sweep.
mod backup;
mod config;
mod policy_iteration;
mod tables;
mod value_iteration;

pub use config::{PlannerConfig, PlannerMethod};
pub use policy_iteration::{evaluate_policy, policy_iteration, policy_iteration_from};
pub use tables::{Convergence, Plan, Policy, ValueFunction};
pub use value_iteration::value_iteration;

/// Threshold of the terminal probability at and above which the bootstrap term is dropped.
pub const TERMINAL_THRESHOLD: f64 = 0.5;
