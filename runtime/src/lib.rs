//! Scenario Runtime - The Reactive Dispatch Engine
//!
//! This crate animates the models declared with `scenario-core`:
//! - `Runner`: dispatches messages, tracks the session position, applies
//!   jumps and drains automatic steps
//! - `RunnerHandle`: shareable runner for publish-to wiring
//! - `RunnerError`: everything dispatch can report
//!
//! The engine is synchronous and single-positioned: one runner, one place
//! in the model at a time.

pub mod config;
pub mod error;
mod resolve;
pub mod runner;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use runner::{Runner, RunnerHandle};

pub mod prelude {
    pub use crate::config::RunnerConfig;
    pub use crate::error::RunnerError;
    pub use crate::runner::{Runner, RunnerHandle};
    pub use scenario_core::prelude::*;
}
