//! Solver traits, configuration and run budgets.

use crate::geometry::{Boundary, Geometry};
use crate::result::{PackingResult, StopReason};
use crate::Result;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common configuration for solvers.
///
/// The default imposes no budget, so a run over identical input always
/// produces identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,

    /// Maximum number of instance placement attempts (0 = unlimited).
    pub max_iterations: u64,

    /// Report contiguous runs along x as a single configuration.
    pub group_adjacent: bool,
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Enables grouping of adjacent instances in the report.
    pub fn with_group_adjacent(mut self, enabled: bool) -> Self {
        self.group_adjacent = enabled;
        self
    }

    /// Returns true if neither a time nor an iteration budget is set.
    pub fn is_unbounded(&self) -> bool {
        self.time_limit_ms == 0 && self.max_iterations == 0
    }
}

/// Shared cancellation flag for an in-flight solve.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Creates a handle in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clears a previous cancellation request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Tracks time, iteration and cancellation limits for one run.
#[derive(Debug)]
pub struct Budget {
    start: Instant,
    time_limit: Option<Duration>,
    max_iterations: Option<u64>,
    cancel: CancelHandle,
}

impl Budget {
    /// Starts the clock for a run under `config`.
    pub fn start(config: &Config, cancel: CancelHandle) -> Self {
        Self {
            start: Instant::now(),
            time_limit: (config.time_limit_ms > 0)
                .then(|| Duration::from_millis(config.time_limit_ms)),
            max_iterations: (config.max_iterations > 0).then_some(config.max_iterations),
            cancel,
        }
    }

    /// Returns why the run must stop before attempt number `iterations + 1`.
    pub fn exhausted(&self, iterations: u64) -> Option<StopReason> {
        if self.cancel.is_cancelled() {
            return Some(StopReason::Cancelled);
        }
        if self.max_iterations.is_some_and(|max| iterations >= max) {
            return Some(StopReason::IterationLimit);
        }
        if self
            .time_limit
            .is_some_and(|limit| self.start.elapsed() >= limit)
        {
            return Some(StopReason::TimeLimit);
        }
        None
    }

    /// Milliseconds since the run started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Progress callback for long-running operations.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during solving.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressInfo {
    /// Instances attempted so far, including oversize rejections.
    pub attempted: usize,
    /// Total requested instances.
    pub total: usize,
    /// Instances placed so far.
    pub placed: usize,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the solver is still running.
    pub running: bool,
}

/// Trait for packing solvers.
pub trait Solver {
    /// The package type this solver handles.
    type Geometry: Geometry;
    /// The container type this solver handles.
    type Boundary: Boundary;

    /// Solves the packing problem.
    fn solve(
        &self,
        geometries: &[Self::Geometry],
        boundary: &Self::Boundary,
    ) -> Result<PackingResult>;

    /// Solves with a progress callback.
    fn solve_with_progress(
        &self,
        geometries: &[Self::Geometry],
        boundary: &Self::Boundary,
        callback: ProgressCallback,
    ) -> Result<PackingResult>;

    /// Cancels an ongoing solve operation.
    fn cancel(&self);
}
