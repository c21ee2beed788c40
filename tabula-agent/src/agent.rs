//! Tabular control agents.
mod base;
mod config;
mod mc;
pub use base::TabularAgent;
pub use config::{Algorithm, TabularAgentConfig};
