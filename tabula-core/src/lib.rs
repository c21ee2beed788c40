#![warn(missing_docs)]
//! Core abstractions for tabular reinforcement learning.
//!
//! This crate defines the interfaces shared by every learner and planner in the
//! workspace: environments ([`Env`]), actors ([`Actor`]) and learning agents
//! ([`Agent`]), together with the episode [`Trainer`], the [`Evaluator`] and the
//! [`record`] system used for reporting metrics.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Actor, Agent, Configurable, Env, Info, Obs, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{EpisodeSummary, Trainer, TrainerConfig};

pub use error::TabulaError;
