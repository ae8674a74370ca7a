//! Command-line runner for PackIt
//!
//! This crate provides:
//! - Request file loading
//! - Parallel batch execution with result reports
//! - Built-in acceptance scenarios
//! - Log setup for the `pack-runner` binary

pub mod logging;
mod parser;
mod result;
mod runner;
pub mod scenario;

pub use parser::{ParseError, RequestParser};
pub use result::{BatchResult, RunRecord};
pub use runner::{BatchRunner, RunnerConfig};
pub use scenario::{Expectation, Scenario, ScenarioOutcome};
