//! Built-in acceptance scenarios.
//!
//! Each scenario is a request plus the outcome the engine must produce for
//! it. `pack-runner scenarios` runs them all and fails if any diverges.

use packit_core::StopReason;
use packit_ffi::{
    ConfigRequest, DimensionsRequest, ErrorKindResponse, OptimizeRequest, OptimizeResponse,
    PackageRequest,
};

/// What a scenario must produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// A successful result.
    Packed {
        /// Instances placed.
        placed: usize,
        /// `(package type, unplaced count)` for every short type.
        unpacked: Vec<(usize, usize)>,
        /// Expected utilization, percent.
        utilization: f64,
        /// Expected stop reason.
        stop_reason: StopReason,
    },
    /// Rejection as invalid input naming a package index.
    InvalidInput {
        /// Offending package index.
        package_index: Option<usize>,
    },
}

/// A named request with its expected outcome.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Short identifier.
    pub name: &'static str,
    /// Request to run.
    pub request: OptimizeRequest,
    /// Required outcome.
    pub expect: Expectation,
}

/// Result of checking one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Scenario identifier.
    pub name: &'static str,
    /// Mismatches found, empty on success.
    pub failures: Vec<String>,
}

impl ScenarioOutcome {
    /// Returns true if the scenario met every expectation.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Scenario {
    /// Runs the scenario and compares the response with the expectation.
    pub fn check(&self) -> ScenarioOutcome {
        let response = packit_ffi::optimize(self.request.clone());
        ScenarioOutcome {
            name: self.name,
            failures: compare(&self.expect, &response),
        }
    }
}

fn compare(expect: &Expectation, response: &OptimizeResponse) -> Vec<String> {
    let mut failures = Vec::new();

    match expect {
        Expectation::Packed {
            placed,
            unpacked,
            utilization,
            stop_reason,
        } => {
            if let Some(error) = &response.error {
                failures.push(format!("unexpected error: {}", error.message));
                return failures;
            }

            let actual_placed: usize = response
                .packing_configurations
                .iter()
                .map(|c| c.quantity)
                .sum();
            if actual_placed != *placed {
                failures.push(format!("placed {actual_placed}, expected {placed}"));
            }

            let actual_unpacked: Vec<(usize, usize)> = response
                .unpacked_counts
                .iter()
                .map(|c| (c.package_type, c.count))
                .collect();
            if &actual_unpacked != unpacked {
                failures.push(format!(
                    "unpacked {actual_unpacked:?}, expected {unpacked:?}"
                ));
            }

            if (response.total_volume_used_percentage - utilization).abs() > 0.005 {
                failures.push(format!(
                    "utilization {:.2}%, expected {:.2}%",
                    response.total_volume_used_percentage, utilization
                ));
            }

            if response.stop_reason != Some(*stop_reason) {
                failures.push(format!(
                    "stop reason {:?}, expected {stop_reason}",
                    response.stop_reason
                ));
            }
        }
        Expectation::InvalidInput { package_index } => match &response.error {
            Some(error) if error.kind == ErrorKindResponse::InvalidInput => {
                if error.package_index != *package_index {
                    failures.push(format!(
                        "error names package {:?}, expected {package_index:?}",
                        error.package_index
                    ));
                }
            }
            Some(error) => failures.push(format!("unexpected error kind {:?}", error.kind)),
            None => failures.push("request was accepted, expected rejection".to_string()),
        },
    }

    failures
}

fn request(
    container: [f64; 3],
    packages: &[([f64; 3], f64)],
    allow_rotation: bool,
    config: Option<ConfigRequest>,
) -> OptimizeRequest {
    OptimizeRequest {
        version: None,
        container_dimensions: DimensionsRequest {
            length: container[0],
            width: container[1],
            height: container[2],
        },
        packages: packages
            .iter()
            .map(|&([length, width, height], quantity)| PackageRequest {
                length,
                width,
                height,
                quantity,
            })
            .collect(),
        allow_rotation,
        config,
    }
}

/// The acceptance scenarios.
pub fn builtin() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "eight-cubes",
            request: request([100.0; 3], &[([50.0; 3], 10.0)], true, None),
            expect: Expectation::Packed {
                placed: 8,
                unpacked: vec![(0, 2)],
                utilization: 100.0,
                stop_reason: StopReason::Completed,
            },
        },
        Scenario {
            name: "oversize-package",
            request: request([10.0; 3], &[([20.0; 3], 1.0)], true, None),
            expect: Expectation::Packed {
                placed: 0,
                unpacked: vec![(0, 1)],
                utilization: 0.0,
                stop_reason: StopReason::Completed,
            },
        },
        Scenario {
            name: "exact-fit",
            request: request([30.0, 20.0, 10.0], &[([30.0, 20.0, 10.0], 2.0)], true, None),
            expect: Expectation::Packed {
                placed: 1,
                unpacked: vec![(0, 1)],
                utilization: 100.0,
                stop_reason: StopReason::Completed,
            },
        },
        Scenario {
            name: "zero-quantity",
            request: request(
                [100.0; 3],
                &[([10.0; 3], 1.0), ([10.0; 3], 0.0)],
                true,
                None,
            ),
            expect: Expectation::InvalidInput {
                package_index: Some(1),
            },
        },
        Scenario {
            name: "rotation-required",
            request: request([100.0, 20.0, 20.0], &[([10.0, 10.0, 90.0], 2.0)], true, None),
            expect: Expectation::Packed {
                placed: 2,
                unpacked: vec![],
                utilization: 45.0,
                stop_reason: StopReason::Completed,
            },
        },
        Scenario {
            name: "rotation-forbidden",
            request: request([100.0, 20.0, 20.0], &[([10.0, 10.0, 90.0], 2.0)], false, None),
            expect: Expectation::Packed {
                placed: 0,
                unpacked: vec![(0, 2)],
                utilization: 0.0,
                stop_reason: StopReason::Completed,
            },
        },
        Scenario {
            name: "iteration-budget",
            request: request(
                [100.0; 3],
                &[([50.0; 3], 10.0)],
                true,
                Some(ConfigRequest {
                    max_iterations: Some(3),
                    ..Default::default()
                }),
            ),
            expect: Expectation::Packed {
                placed: 3,
                unpacked: vec![(0, 7)],
                utilization: 37.5,
                stop_reason: StopReason::IterationLimit,
            },
        },
    ]
}

/// Runs every built-in scenario.
pub fn run_all() -> Vec<ScenarioOutcome> {
    builtin().iter().map(Scenario::check).collect()
}
