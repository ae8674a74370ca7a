//! Extreme-point container loading solver.

use crate::assembler::{self, RunOutcome};
use crate::boundary::Container;
use crate::extreme_point::ExtremePointSet;
use crate::geometry::PackageType;
use crate::validator;
use nalgebra::Vector3;
use packit_core::geometry::{Boundary, Geometry, Orientation};
use packit_core::solver::{Budget, CancelHandle, Config, ProgressCallback, ProgressInfo, Solver};
use packit_core::{Aabb3D, InputError, PackingResult, Placement, Result, Shortfall, StopReason};

/// Greedy extreme-point packer for a single container.
///
/// Package types are loaded largest first. Every instance goes to the first
/// frontier point, in `(z, y, x)` order, where one of its allowed
/// orientations fits. Placements are never revisited.
pub struct Packer3D {
    config: Config,
    cancelled: CancelHandle,
}

impl Packer3D {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancelled: CancelHandle::new(),
        }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a handle that cancels runs of this packer from another thread.
    ///
    /// A cancelled handle stays cancelled until [`CancelHandle::reset`].
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancelled.clone()
    }

    fn pack(
        &self,
        packages: &[PackageType],
        container: &Container,
        progress: Option<&ProgressCallback>,
    ) -> Result<PackingResult> {
        container.validate()?;
        if packages.is_empty() {
            return Err(InputError::NoPackages.into());
        }
        for (index, package) in packages.iter().enumerate() {
            package.validate(index)?;
        }

        let budget = Budget::start(&self.config, self.cancelled.clone());
        let extents = container.extents();
        let total: usize = packages.iter().map(Geometry::quantity).sum();

        let mut tallies: Vec<Shortfall> = packages
            .iter()
            .enumerate()
            .map(|(package_type, p)| Shortfall {
                package_type,
                requested: p.quantity(),
                ..Default::default()
            })
            .collect();

        let mut frontier = ExtremePointSet::new(extents);
        let mut accepted: Vec<Aabb3D> = Vec::with_capacity(total);
        let mut placements: Vec<Placement> = Vec::with_capacity(total);
        let mut iterations = 0u64;
        let mut attempted = 0usize;
        let mut stop_reason = StopReason::Completed;

        let report = |attempted: usize, placed: usize, running: bool| {
            if let Some(callback) = progress {
                callback(ProgressInfo {
                    attempted,
                    total,
                    placed,
                    elapsed_ms: budget.elapsed_ms(),
                    running,
                });
            }
        };

        'types: for package_type in priority_order(packages) {
            let package = &packages[package_type];

            // Oversize types are classified even after a stop.
            if !package.fits_within(&extents) {
                log::warn!(
                    "package type {} ({}x{}x{}) exceeds the container in every allowed orientation",
                    package_type,
                    package.length(),
                    package.width(),
                    package.height()
                );
                tallies[package_type].oversize = package.quantity();
                attempted += package.quantity();
                report(attempted, placements.len(), true);
                continue;
            }

            if !stop_reason.is_complete() {
                continue;
            }
            if let Some(reason) = budget.exhausted(iterations) {
                stop_reason = reason;
                continue;
            }

            let orientations = package.allowed_orientations();

            for _ in 0..package.quantity() {
                if let Some(reason) = budget.exhausted(iterations) {
                    stop_reason = reason;
                    continue 'types;
                }
                iterations += 1;
                attempted += 1;

                match find_position(package, &orientations, &frontier, &extents, &accepted) {
                    Some((position, orientation, aabb)) => {
                        let tally = &mut tallies[package_type];
                        log::trace!(
                            "type {} instance {} at ({}, {}, {}) orientation {:?}",
                            package_type,
                            tally.packed,
                            position.x,
                            position.y,
                            position.z,
                            orientation.axes()
                        );
                        placements.push(Placement::new(
                            package_type,
                            tally.packed,
                            orientation,
                            position,
                        ));
                        tally.packed += 1;
                        accepted.push(aabb);
                        frontier.commit(&aabb, &accepted);
                    }
                    None => {
                        log::trace!("type {} instance found no feasible position", package_type);
                        tallies[package_type].no_fit += 1;
                    }
                }

                report(attempted, placements.len(), true);
            }
        }

        for tally in &mut tallies {
            tally.not_attempted = tally.requested - tally.packed - tally.oversize - tally.no_fit;
        }

        if !stop_reason.is_complete() {
            log::warn!(
                "search stopped early ({}) after {} placement attempts",
                stop_reason,
                iterations
            );
        }

        validator::validate_layout(packages, container, &placements)?;

        let result = assembler::assemble(
            packages,
            container,
            RunOutcome {
                placements,
                tallies,
                stop_reason,
                iterations,
            },
            &self.config,
        );

        log::debug!(
            "packed {} of {} instances, {:.2}% utilization, {} frontier points left",
            result.placed_count(),
            total,
            result.used_volume_percent,
            frontier.len()
        );
        report(attempted, result.placed_count(), false);

        Ok(result)
    }
}

/// Type indices by descending unit volume, ties by ascending index.
fn priority_order(packages: &[PackageType]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..packages.len()).collect();
    order.sort_by(|&a, &b| {
        packages[b]
            .measure()
            .total_cmp(&packages[a].measure())
            .then(a.cmp(&b))
    });
    order
}

/// First admissible (point, orientation) pair in frontier order.
fn find_position(
    package: &PackageType,
    orientations: &[Orientation],
    frontier: &ExtremePointSet,
    container: &Vector3<f64>,
    accepted: &[Aabb3D],
) -> Option<(Vector3<f64>, Orientation, Aabb3D)> {
    frontier.iter().find_map(|ep| {
        orientations.iter().find_map(|&orientation| {
            let aabb = Aabb3D::from_corner(ep.position, package.dimensions_for(orientation));
            validator::admits(&aabb, container, accepted).then_some((ep.position, orientation, aabb))
        })
    })
}

impl Solver for Packer3D {
    type Geometry = PackageType;
    type Boundary = Container;

    fn solve(
        &self,
        geometries: &[Self::Geometry],
        boundary: &Self::Boundary,
    ) -> Result<PackingResult> {
        self.pack(geometries, boundary, None)
    }

    fn solve_with_progress(
        &self,
        geometries: &[Self::Geometry],
        boundary: &Self::Boundary,
        callback: ProgressCallback,
    ) -> Result<PackingResult> {
        self.pack(geometries, boundary, Some(&callback))
    }

    fn cancel(&self) {
        self.cancelled.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packit_core::Error;
    use std::sync::{Arc, Mutex};

    fn cubes() -> Vec<PackageType> {
        vec![PackageType::new(50.0, 50.0, 50.0).with_quantity(10)]
    }

    #[test]
    fn test_cubes_fill_container() {
        let container = Container::new(100.0, 100.0, 100.0);
        let result = Packer3D::default_config()
            .solve(&cubes(), &container)
            .unwrap();

        assert_eq!(result.placed_count(), 8);
        assert_eq!(result.used_volume_percent, 100.0);
        assert_eq!(result.unpacked_indices(), vec![0]);
        assert_eq!(result.shortfalls[0].no_fit, 2);
        assert_eq!(result.stop_reason, StopReason::Completed);
        assert_eq!(result.iterations, 10);

        let corners: Vec<_> = result.placements.iter().map(|p| p.position).collect();
        assert_eq!(corners[0], Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(corners[1], Vector3::new(50.0, 0.0, 0.0));
        assert_eq!(corners[7], Vector3::new(50.0, 50.0, 50.0));
    }

    #[test]
    fn test_oversize_package_is_not_searched() {
        let packages = vec![PackageType::new(20.0, 20.0, 20.0)];
        let container = Container::new(10.0, 10.0, 10.0);
        let result = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap();

        assert!(result.placements.is_empty());
        assert_eq!(result.used_volume_percent, 0.0);
        assert_eq!(result.shortfalls[0].oversize, 1);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_exact_fit_leaves_one_unpacked() {
        let packages = vec![PackageType::new(30.0, 20.0, 10.0).with_quantity(2)];
        let container = Container::new(30.0, 20.0, 10.0);
        let result = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap();

        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.unpacked_count(), 1);
        assert_eq!(result.used_volume_percent, 100.0);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let packages = vec![
            PackageType::new(10.0, 10.0, 10.0),
            PackageType::new(10.0, 10.0, 10.0).with_quantity(0),
        ];
        let container = Container::new(100.0, 100.0, 100.0);
        let err = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.package_index(), Some(1));
    }

    #[test]
    fn test_empty_package_list_is_rejected() {
        let container = Container::new(100.0, 100.0, 100.0);
        let err = Packer3D::default_config()
            .solve(&[], &container)
            .unwrap_err();
        assert_eq!(err, Error::InvalidInput(InputError::NoPackages));
    }

    #[test]
    fn test_rotation_makes_long_package_fit() {
        let packages = vec![PackageType::new(10.0, 10.0, 90.0)];
        let container = Container::new(100.0, 20.0, 20.0);

        let result = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap();
        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.placements[0].orientation.axes(), [2, 0, 1]);

        let fixed = vec![packages[0].clone().with_rotation(false)];
        let result = Packer3D::default_config()
            .solve(&fixed, &container)
            .unwrap();
        assert_eq!(result.placed_count(), 0);
        assert_eq!(result.shortfalls[0].oversize, 1);
    }

    #[test]
    fn test_larger_types_load_first() {
        let packages = vec![
            PackageType::new(10.0, 10.0, 10.0).with_quantity(5),
            PackageType::new(30.0, 20.0, 10.0),
        ];
        let container = Container::new(30.0, 20.0, 20.0);
        let result = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap();

        assert_eq!(result.placements[0].package_type, 1);
        assert_eq!(result.placements[0].position, Vector3::zeros());
        assert_eq!(result.placed_count(), 6);
        assert_eq!(result.packed, vec![5, 1]);
        assert_eq!(result.used_volume_percent, 91.67);
        assert!(result.all_placed());
    }

    #[test]
    fn test_iteration_budget() {
        let container = Container::new(100.0, 100.0, 100.0);
        let packer = Packer3D::new(Config::new().with_max_iterations(3));
        let result = packer.solve(&cubes(), &container).unwrap();

        assert_eq!(result.placed_count(), 3);
        assert_eq!(result.shortfalls[0].not_attempted, 7);
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert!(result.notes.contains("iteration budget of 3"));
    }

    #[test]
    fn test_cancel_before_solve() {
        let container = Container::new(100.0, 100.0, 100.0);
        let packer = Packer3D::default_config();
        packer.cancel();

        let result = packer.solve(&cubes(), &container).unwrap();
        assert!(result.placements.is_empty());
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.shortfalls[0].not_attempted, 10);

        packer.cancel_handle().reset();
        let result = packer.solve(&cubes(), &container).unwrap();
        assert_eq!(result.placed_count(), 8);
    }

    #[test]
    fn test_oversize_type_after_budget_stop() {
        let packages = vec![
            PackageType::new(50.0, 50.0, 50.0).with_quantity(10),
            PackageType::new(200.0, 1.0, 1.0).with_quantity(2),
            PackageType::new(1.0, 1.0, 1.0),
        ];
        let container = Container::new(100.0, 100.0, 100.0);
        let packer = Packer3D::new(Config::new().with_max_iterations(10));
        let result = packer.solve(&packages, &container).unwrap();

        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert_eq!(result.iterations, 10);
        assert_eq!(result.packed, vec![8, 0, 0]);
        assert_eq!(result.shortfalls[0].no_fit, 2);
        assert_eq!(result.shortfalls[1].oversize, 2);
        assert_eq!(result.shortfalls[1].not_attempted, 0);
        assert_eq!(result.shortfalls[2].not_attempted, 1);
    }

    #[test]
    fn test_tiny_extents_are_rejected() {
        let packages = vec![PackageType::new(1e-10, 1e-10, 1e-10).with_quantity(5)];
        let container = Container::new(1.0, 1.0, 1.0);
        let err = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(err.package_index(), Some(0));
    }

    #[test]
    fn test_small_extents_do_not_stack() {
        let packages = vec![PackageType::new(1e-8, 1e-8, 1e-8).with_quantity(5)];
        let container = Container::new(1.0, 1.0, 1.0);
        let result = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap();

        assert_eq!(result.placed_count(), 5);
        let mut xs: Vec<f64> = result.placements.iter().map(|p| p.position.x).collect();
        xs.dedup();
        assert_eq!(xs.len(), 5);
    }

    #[test]
    fn test_cancel_during_solve() {
        let container = Container::new(100.0, 100.0, 100.0);
        let packer = Packer3D::default_config();
        let handle = packer.cancel_handle();

        let result = packer
            .solve_with_progress(
                &cubes(),
                &container,
                Box::new(move |info| {
                    if info.running && info.attempted == 3 {
                        handle.cancel();
                    }
                }),
            )
            .unwrap();

        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert!(result.placed_count() <= 3);
        assert_eq!(result.iterations, 3);
        let tally = &result.shortfalls[0];
        assert_eq!(
            tally.packed + tally.oversize + tally.no_fit + tally.not_attempted,
            tally.requested
        );
        assert_eq!(tally.not_attempted, 7);
        assert!(result.notes.contains("the caller cancelled the run"));
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let container = Container::new(100.0, 100.0, 100.0);
        let packer = Packer3D::default_config();
        let handle = packer.cancel_handle();
        std::thread::spawn(move || handle.cancel()).join().unwrap();

        let result = packer.solve(&cubes(), &container).unwrap();
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert!(result.placements.is_empty());
    }

    #[test]
    fn test_time_limit_during_solve() {
        let container = Container::new(100.0, 100.0, 100.0);
        let packer = Packer3D::new(Config::new().with_time_limit(1));

        let result = packer
            .solve_with_progress(
                &cubes(),
                &container,
                Box::new(|info| {
                    if info.running && info.attempted == 2 {
                        std::thread::sleep(std::time::Duration::from_millis(5));
                    }
                }),
            )
            .unwrap();

        assert_eq!(result.stop_reason, StopReason::TimeLimit);
        assert!(result.placed_count() <= 2);
        let tally = &result.shortfalls[0];
        assert_eq!(
            tally.packed + tally.oversize + tally.no_fit + tally.not_attempted,
            tally.requested
        );
        assert!(tally.not_attempted >= 8);
        assert!(result.notes.contains("time budget of 1 ms exceeded"));
    }

    #[test]
    fn test_progress_reports_every_attempt() {
        let container = Container::new(100.0, 100.0, 100.0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        Packer3D::default_config()
            .solve_with_progress(
                &cubes(),
                &container,
                Box::new(move |info| sink.lock().unwrap().push(info)),
            )
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 11);
        assert!(seen[..10].iter().all(|info| info.running));
        let last = seen.last().unwrap();
        assert!(!last.running);
        assert_eq!((last.attempted, last.total, last.placed), (10, 10, 8));
    }

    #[test]
    fn test_grouped_configurations() {
        let container = Container::new(100.0, 100.0, 100.0);
        let packer = Packer3D::new(Config::new().with_group_adjacent(true));
        let result = packer.solve(&cubes(), &container).unwrap();

        assert_eq!(result.configurations.len(), 4);
        assert!(result.configurations.iter().all(|c| c.quantity == 2));
    }

    #[test]
    fn test_deterministic() {
        let packages = vec![
            PackageType::new(12.0, 7.0, 5.0).with_quantity(20),
            PackageType::new(9.0, 9.0, 3.0).with_quantity(15),
            PackageType::new(25.0, 4.0, 4.0).with_quantity(6),
        ];
        let container = Container::new(40.0, 30.0, 20.0);
        let packer = Packer3D::default_config();

        let first = packer.solve(&packages, &container).unwrap();
        let second = packer.solve(&packages, &container).unwrap();
        assert_eq!(first, second);
    }
}
