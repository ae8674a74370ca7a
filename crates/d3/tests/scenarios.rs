//! Layout properties checked over a spread of deterministic inputs.

use approx::assert_relative_eq;
use packit_core::geometry::{Boundary, Geometry};
use packit_core::Orientation;
use packit_d3::{Container, PackageType, Packer3D, PackingResult, Solver, StopReason};

fn workloads() -> Vec<(Container, Vec<PackageType>)> {
    vec![
        (
            Container::new(100.0, 100.0, 100.0),
            vec![PackageType::new(50.0, 50.0, 50.0).with_quantity(10)],
        ),
        (
            Container::new(120.0, 80.0, 60.0),
            vec![
                PackageType::new(40.0, 30.0, 20.0).with_quantity(12),
                PackageType::new(25.0, 25.0, 25.0).with_quantity(8),
                PackageType::new(60.0, 10.0, 10.0).with_quantity(10),
                PackageType::new(7.5, 7.5, 7.5).with_quantity(30),
            ],
        ),
        (
            Container::new(59.3, 41.7, 33.1),
            vec![
                PackageType::new(13.1, 9.7, 4.3).with_quantity(40),
                PackageType::new(21.9, 3.3, 17.0).with_quantity(9),
                PackageType::new(70.0, 1.0, 1.0).with_quantity(2),
            ],
        ),
        (
            Container::new(240.0, 120.0, 110.0),
            (0..8)
                .map(|i| {
                    let i = i as f64;
                    PackageType::new(20.0 + 3.0 * i, 15.0 + i, 10.0 + 2.0 * i)
                        .with_quantity(12)
                        .with_rotation(i as usize % 2 == 0)
                })
                .collect(),
        ),
    ]
}

fn check_layout(container: &Container, packages: &[PackageType], result: &PackingResult) {
    let boxes: Vec<_> = result
        .placements
        .iter()
        .map(|p| p.aabb(packages[p.package_type].dimensions()))
        .collect();

    for b in &boxes {
        assert!(container.contains(b), "box {b:?} leaves the container");
    }

    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            assert!(a.intersection_volume(b) < 1e-6, "{a:?} overlaps {b:?}");
        }
    }

    for (index, package) in packages.iter().enumerate() {
        let placed = result.packed[index];
        let unpacked = result
            .unpacked_counts()
            .get(&index)
            .copied()
            .unwrap_or(0);
        assert_eq!(placed + unpacked, package.quantity(), "type {index}");
    }

    let used: f64 = result
        .placements
        .iter()
        .map(|p| packages[p.package_type].measure())
        .sum();
    assert_relative_eq!(result.used_volume, used, epsilon = 1e-6);
    assert_relative_eq!(
        result.used_volume_percent,
        (100.0 * used / container.measure()).clamp(0.0, 100.0),
        epsilon = 0.005 + 1e-9
    );
}

#[test]
fn layouts_respect_containment_and_overlap() {
    for (container, packages) in workloads() {
        let result = Packer3D::default_config()
            .solve(&packages, &container)
            .unwrap();
        check_layout(&container, &packages, &result);
        assert_eq!(result.stop_reason, StopReason::Completed);
    }
}

#[test]
fn fixed_orientation_types_stay_unrotated() {
    for (container, packages) in workloads() {
        let fixed: Vec<_> = packages
            .iter()
            .cloned()
            .map(|p| p.with_rotation(false))
            .collect();
        let result = Packer3D::default_config()
            .solve(&fixed, &container)
            .unwrap();
        check_layout(&container, &fixed, &result);
        assert!(result
            .placements
            .iter()
            .all(|p| p.orientation == Orientation::IDENTITY));
    }
}

#[test]
fn mixed_rotation_flags_are_honoured() {
    let (container, packages) = workloads().remove(3);
    let result = Packer3D::default_config()
        .solve(&packages, &container)
        .unwrap();
    for p in &result.placements {
        if p.package_type % 2 == 1 {
            assert!(p.orientation.is_identity());
        }
    }
}

#[test]
fn grouped_configurations_expand_to_placements() {
    for (container, packages) in workloads() {
        let packer = Packer3D::new(packit_d3::Config::new().with_group_adjacent(true));
        let result = packer.solve(&packages, &container).unwrap();

        let expanded: Vec<_> = result
            .configurations
            .iter()
            .flat_map(|c| c.instances(packages[c.package_type].dimensions()))
            .collect();
        assert_eq!(expanded.len(), result.placements.len());

        for (boxed, placement) in expanded.iter().zip(&result.placements) {
            let direct = placement.aabb(packages[placement.package_type].dimensions());
            for axis in 0..3 {
                assert_relative_eq!(boxed.min[axis], direct.min[axis], epsilon = 1e-6);
                assert_relative_eq!(boxed.max[axis], direct.max[axis], epsilon = 1e-6);
            }
        }
    }
}

#[test]
fn oversize_types_never_reach_the_search() {
    let container = Container::new(59.3, 41.7, 33.1);
    let packages = vec![
        PackageType::new(70.0, 1.0, 1.0)
            .with_quantity(2)
            .with_rotation(false),
        PackageType::new(10.0, 10.0, 10.0).with_quantity(3),
    ];
    let result = Packer3D::default_config()
        .solve(&packages, &container)
        .unwrap();

    assert_eq!(result.iterations, 3);
    assert_eq!(result.shortfalls.len(), 1);
    assert_eq!(result.shortfalls[0].package_type, 0);
    assert_eq!(result.shortfalls[0].oversize, 2);
    assert!(result.notes.contains("70x1x1 cm exceeds the container"));
}

#[test]
fn repeated_runs_are_identical() {
    for (container, packages) in workloads() {
        let packer = Packer3D::default_config();
        let a = packer.solve(&packages, &container).unwrap();
        let b = packer.solve(&packages, &container).unwrap();
        assert_eq!(a, b);
    }
}
