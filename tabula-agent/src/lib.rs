#![warn(missing_docs)]
//! Tabular control agents and planners on an empirical MDP.
//!
//! Two routes lead to a controller for an environment with the continuous
//! [`Observation`] and the binary [`Action`]:
//!
//! * Online, a [`TabularAgent`] learns an [`ActionValueTable`] by interacting
//!   with the environment, with one of the update rules in [`Algorithm`].
//! * Offline, an [`EmpiricalModel`] is estimated from recorded [`Transition`]s
//!   and solved with [`value_iteration`] or [`policy_iteration`]. The resulting
//!   [`Policy`] is wrapped in a [`PolicyAgent`].
//!
//! Both [`TabularAgent`] and [`PolicyAgent`] implement
//! [`Actor`](tabula_core::Actor), so they are evaluated the same way.
mod agent;
mod dataset;
mod discretizer;
mod explorer;
mod model;
mod obs;
pub mod planner;
mod policy_agent;
mod q_table;

pub use agent::{Algorithm, TabularAgent, TabularAgentConfig};
pub use dataset::collect_dataset;
pub use discretizer::{DiscreteState, Discretizer, DiscretizerConfig};
pub use explorer::EpsilonGreedy;
pub use model::{EmpiricalModel, ModelBuilder, ModelEntry, Transition};
pub use obs::{Action, GameInfo, Observation, N_ACTIONS, OBS_DIM};
pub use planner::{
    policy_iteration, policy_iteration_from, value_iteration, Convergence, Plan, PlannerConfig,
    PlannerMethod, Policy, ValueFunction,
};
pub use policy_agent::PolicyAgent;
pub use q_table::ActionValueTable;
