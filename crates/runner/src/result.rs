//! Run records and batch reports.

use packit_core::StopReason;
use packit_ffi::OptimizeResponse;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Outcome of solving one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    /// Request name (file stem or scenario name).
    pub name: String,
    /// Whether the engine produced a result.
    pub success: bool,
    /// Error message if the request failed.
    pub error: Option<String>,
    /// Instances placed.
    pub placed: usize,
    /// Instances left unplaced.
    pub unpacked: usize,
    /// Container volume used, percent.
    pub utilization_percent: f64,
    /// Why the search ended.
    pub stop_reason: Option<StopReason>,
    /// Wall-clock time for the run.
    pub elapsed_ms: u64,
    /// Full contract response.
    pub response: OptimizeResponse,
}

impl RunRecord {
    /// Summarizes a response.
    pub fn from_response(name: impl Into<String>, response: OptimizeResponse, elapsed_ms: u64) -> Self {
        Self {
            name: name.into(),
            success: response.success,
            error: response.error.as_ref().map(|e| e.message.clone()),
            placed: response
                .packing_configurations
                .iter()
                .map(|c| c.quantity)
                .sum(),
            unpacked: response.unpacked_counts.iter().map(|c| c.count).sum(),
            utilization_percent: response.total_volume_used_percentage,
            stop_reason: response.stop_reason,
            elapsed_ms,
            response,
        }
    }

    /// Records a request that could not be loaded.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            name: name.into(),
            success: false,
            error: Some(message.clone()),
            placed: 0,
            unpacked: 0,
            utilization_percent: 0.0,
            stop_reason: None,
            elapsed_ms: 0,
            response: OptimizeResponse::failure(packit_ffi::ErrorResponse::invalid_json(message)),
        }
    }
}

/// Collected records of a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    /// One record per request, in input order.
    pub runs: Vec<RunRecord>,
}

impl BatchResult {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn add_run(&mut self, run: RunRecord) {
        self.runs.push(run);
    }

    /// Number of failed requests.
    pub fn failure_count(&self) -> usize {
        self.runs.iter().filter(|r| !r.success).count()
    }

    /// Mean utilization over successful runs.
    pub fn average_utilization(&self) -> f64 {
        let ok: Vec<f64> = self
            .runs
            .iter()
            .filter(|r| r.success)
            .map(|r| r.utilization_percent)
            .collect();
        if ok.is_empty() {
            0.0
        } else {
            ok.iter().sum::<f64>() / ok.len() as f64
        }
    }

    /// Prints a table of runs to stdout.
    pub fn print_summary(&self) {
        println!(
            "{:<28} {:>8} {:>8} {:>9} {:>15} {:>8}",
            "Request", "Placed", "Unpacked", "Util %", "Stop", "Time ms"
        );
        println!("{:-<82}", "");
        for run in &self.runs {
            if run.success {
                let stop = run
                    .stop_reason
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                println!(
                    "{:<28} {:>8} {:>8} {:>9.2} {:>15} {:>8}",
                    run.name, run.placed, run.unpacked, run.utilization_percent, stop, run.elapsed_ms
                );
            } else {
                println!(
                    "{:<28} FAILED: {}",
                    run.name,
                    run.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        println!("{:-<82}", "");
        println!(
            "{} requests, {} failed, average utilization {:.2}%",
            self.runs.len(),
            self.failure_count(),
            self.average_utilization()
        );
    }

    /// Writes the batch as pretty JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
