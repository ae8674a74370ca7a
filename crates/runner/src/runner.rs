//! Parallel request execution.

use crate::parser::RequestParser;
use crate::result::{BatchResult, RunRecord};
use packit_ffi::{ConfigRequest, OptimizeRequest};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Overrides applied to every request before it runs.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Replaces `config.timeLimitMs`.
    pub time_limit_ms: Option<u64>,
    /// Replaces `config.maxIterations`.
    pub max_iterations: Option<u64>,
    /// Forces `config.groupAdjacent` on.
    pub group_adjacent: bool,
}

impl RunnerConfig {
    /// Creates a configuration that leaves requests untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit override.
    pub fn with_time_limit(mut self, ms: Option<u64>) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the iteration budget override.
    pub fn with_max_iterations(mut self, iterations: Option<u64>) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Forces grouping of adjacent instances.
    pub fn with_group_adjacent(mut self, enabled: bool) -> Self {
        self.group_adjacent = enabled;
        self
    }

    /// Applies the overrides to a request.
    pub fn apply(&self, mut request: OptimizeRequest) -> OptimizeRequest {
        let config = request.config.get_or_insert_with(ConfigRequest::default);
        if let Some(ms) = self.time_limit_ms {
            config.time_limit_ms = Some(ms);
        }
        if let Some(iterations) = self.max_iterations {
            config.max_iterations = Some(iterations);
        }
        if self.group_adjacent {
            config.group_adjacent = Some(true);
        }
        request
    }
}

/// Solves requests, one engine run per request.
pub struct BatchRunner {
    config: RunnerConfig,
    parser: RequestParser,
}

impl BatchRunner {
    /// Creates a runner with the given overrides.
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            parser: RequestParser::new(),
        }
    }

    /// Solves one parsed request.
    pub fn run_request(&self, name: &str, request: OptimizeRequest) -> RunRecord {
        let request = self.config.apply(request);
        let start = Instant::now();
        let response = packit_ffi::optimize(request);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "{}: success={} utilization={:.2}% in {} ms",
            name,
            response.success,
            response.total_volume_used_percentage,
            elapsed_ms
        );
        RunRecord::from_response(name, response, elapsed_ms)
    }

    /// Loads and solves one request file.
    pub fn run_file(&self, path: &Path) -> RunRecord {
        let name = request_name(path);
        match self.parser.parse_file(path) {
            Ok(request) => self.run_request(&name, request),
            Err(e) => {
                log::warn!("{}: {}", path.display(), e);
                RunRecord::failed(name, e.to_string())
            }
        }
    }

    /// Solves request files in parallel. Records keep input order.
    pub fn run_files(&self, paths: &[PathBuf]) -> BatchResult {
        let runs: Vec<RunRecord> = paths.par_iter().map(|p| self.run_file(p)).collect();
        BatchResult { runs }
    }
}

fn request_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
