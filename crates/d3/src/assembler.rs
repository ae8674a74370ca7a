//! Turns a validated layout into a [`PackingResult`].
//!
//! The assembler owns everything the caller reads besides the raw
//! placements: reporting groups, per-type shortfalls and the diagnostic
//! notes. Notes are built from counted facts only, so identical runs
//! produce identical text.

use crate::boundary::Container;
use crate::geometry::PackageType;
use crate::scorer::{self, UtilizationScore};
use packit_core::geometry::Geometry;
use packit_core::{
    Config, PackingConfiguration, PackingResult, Placement, Shortfall, StopReason, GEOM_EPSILON,
};

/// Everything the placement loop knows when it stops.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Committed placements in commit order.
    pub placements: Vec<Placement>,
    /// Per-type tallies, indexed by type, covering every type.
    pub tallies: Vec<Shortfall>,
    /// Why the loop ended.
    pub stop_reason: StopReason,
    /// Instance placement attempts performed.
    pub iterations: u64,
}

/// Builds the final result for a layout that already passed validation.
pub fn assemble(
    packages: &[PackageType],
    container: &Container,
    outcome: RunOutcome,
    config: &Config,
) -> PackingResult {
    let score = scorer::score(packages, container, &outcome.placements);

    let configurations = if config.group_adjacent {
        group_runs(packages, &outcome.placements)
    } else {
        outcome
            .placements
            .iter()
            .map(PackingConfiguration::from_placement)
            .collect()
    };

    let shortfalls: Vec<Shortfall> = outcome
        .tallies
        .into_iter()
        .filter(|s| s.unpacked() > 0)
        .collect();

    let notes = build_notes(
        packages,
        &score,
        &shortfalls,
        outcome.stop_reason,
        config,
    );

    PackingResult {
        placements: outcome.placements,
        configurations,
        used_volume: score.used_volume,
        used_volume_percent: score.used_volume_percent,
        packed: score.packed,
        shortfalls,
        notes,
        stop_reason: outcome.stop_reason,
        iterations: outcome.iterations,
    }
}

/// Collapses consecutive placements into runs along x.
///
/// A placement joins the current run when it has the same type and
/// orientation, the same y and z, and starts where the previous instance
/// ends along x.
pub fn group_runs(packages: &[PackageType], placements: &[Placement]) -> Vec<PackingConfiguration> {
    let mut groups: Vec<PackingConfiguration> = Vec::new();
    let mut run_end = 0.0;

    for placement in placements {
        let extents = packages
            .get(placement.package_type)
            .map(|p| placement.extents(p.dimensions()));

        if let (Some(last), Some(ex)) = (groups.last_mut(), extents) {
            let joins = last.package_type == placement.package_type
                && last.orientation == placement.orientation
                && (last.position.y - placement.y()).abs() < GEOM_EPSILON
                && (last.position.z - placement.z()).abs() < GEOM_EPSILON
                && (run_end - placement.x()).abs() < GEOM_EPSILON;
            if joins {
                last.quantity += 1;
                run_end = placement.x() + ex.x;
                continue;
            }
        }

        groups.push(PackingConfiguration::from_placement(placement));
        run_end = placement.x() + extents.map_or(0.0, |e| e.x);
    }

    groups
}

/// Writes the diagnostic summary.
pub fn build_notes(
    packages: &[PackageType],
    score: &UtilizationScore,
    shortfalls: &[Shortfall],
    stop_reason: StopReason,
    config: &Config,
) -> String {
    let requested: usize = packages.iter().map(Geometry::quantity).sum();
    let packed: usize = score.packed.iter().sum();

    let mut sentences = vec![
        format!(
            "Container volume utilization: {:.2}%.",
            score.used_volume_percent
        ),
        format!(
            "Packed {packed} of {requested} instances across {}.",
            plural(packages.len(), "package type")
        ),
    ];

    for s in shortfalls {
        let Some(package) = packages.get(s.package_type) else {
            continue;
        };

        if s.oversize > 0 {
            sentences.push(format!(
                "All {} instances of type {} could not be placed: {}x{}x{} cm exceeds the container in every allowed orientation.",
                s.oversize,
                s.package_type,
                package.length(),
                package.width(),
                package.height()
            ));
        }

        if s.no_fit > 0 {
            let free = score.free_volume();
            let need = package.measure() * s.no_fit as f64;
            let cause = if free < need {
                format!(
                    "remaining free volume ({free:.2} cm³) is smaller than their combined volume ({need:.2} cm³)"
                )
            } else {
                "remaining free volume too fragmented for their footprint".to_string()
            };
            sentences.push(format!(
                "{} of {} instances of type {} could not be placed: {cause}.",
                s.no_fit, s.requested, s.package_type
            ));
        }

        if s.not_attempted > 0 {
            sentences.push(format!(
                "{} of {} instances of type {} were not attempted before the search stopped.",
                s.not_attempted, s.requested, s.package_type
            ));
        }
    }

    match stop_reason {
        StopReason::Completed => {}
        StopReason::TimeLimit => sentences.push(format!(
            "Search stopped early: time budget of {} ms exceeded.",
            config.time_limit_ms
        )),
        StopReason::IterationLimit => sentences.push(format!(
            "Search stopped early: iteration budget of {} placement attempts exhausted.",
            config.max_iterations
        )),
        StopReason::Cancelled => {
            sentences.push("Search stopped early: the caller cancelled the run.".to_string())
        }
    }

    if shortfalls.is_empty() {
        sentences.push("All requested instances were placed.".to_string());
    }

    sentences.join(" ")
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
