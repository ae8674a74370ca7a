//! Placement representation for positioned package instances.

use crate::aabb::Aabb3D;
use crate::geometry::Orientation;
use nalgebra::Vector3;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The position and orientation of one physical package instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Index of the package type in the input sequence.
    pub package_type: usize,

    /// Instance ordinal (0-based) within the package type.
    pub instance: usize,

    /// Axis permutation applied to the package dimensions.
    pub orientation: Orientation,

    /// Minimum corner in container coordinates.
    pub position: Vector3<f64>,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(
        package_type: usize,
        instance: usize,
        orientation: Orientation,
        position: Vector3<f64>,
    ) -> Self {
        Self {
            package_type,
            instance,
            orientation,
            position,
        }
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Returns the oriented extents for the given unrotated dimensions.
    pub fn extents(&self, dims: &Vector3<f64>) -> Vector3<f64> {
        self.orientation.apply(dims)
    }

    /// Returns the occupied box for the given unrotated dimensions.
    pub fn aabb(&self, dims: &Vector3<f64>) -> Aabb3D {
        Aabb3D::from_corner(self.position, self.extents(dims))
    }
}

/// Placement statistics for a set of placements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Number of placements in a rotated orientation.
    pub rotated_count: usize,
    /// Distribution of orientations used.
    pub orientation_distribution: BTreeMap<Orientation, usize>,
    /// Placements per package type.
    pub type_distribution: BTreeMap<usize, usize>,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut stats = Self {
            count: placements.len(),
            ..Default::default()
        };

        for p in placements {
            if !p.orientation.is_identity() {
                stats.rotated_count += 1;
            }

            *stats
                .orientation_distribution
                .entry(p.orientation)
                .or_insert(0) += 1;

            *stats.type_distribution.entry(p.package_type).or_insert(0) += 1;
        }

        stats
    }

    /// Returns how many instances of a package type were placed.
    pub fn placed_of(&self, package_type: usize) -> usize {
        self.type_distribution
            .get(&package_type)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_aabb() {
        let o = Orientation::new([2, 1, 0]).unwrap();
        let p = Placement::new(0, 0, o, Vector3::new(5.0, 0.0, 0.0));
        let b = p.aabb(&Vector3::new(10.0, 20.0, 30.0));
        assert_eq!(b.min, Vector3::new(5.0, 0.0, 0.0));
        assert_eq!(b.max, Vector3::new(35.0, 20.0, 10.0));
        assert_eq!(p.x(), 5.0);
    }

    #[test]
    fn test_placement_stats() {
        let rotated = Orientation::new([1, 0, 2]).unwrap();
        let placements = vec![
            Placement::new(0, 0, Orientation::IDENTITY, Vector3::zeros()),
            Placement::new(0, 1, rotated, Vector3::new(10.0, 0.0, 0.0)),
            Placement::new(2, 0, Orientation::IDENTITY, Vector3::new(0.0, 10.0, 0.0)),
        ];

        let stats = PlacementStats::from_placements(&placements);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.rotated_count, 1);
        assert_eq!(
            stats.orientation_distribution.get(&Orientation::IDENTITY),
            Some(&2)
        );
        assert_eq!(stats.placed_of(0), 2);
        assert_eq!(stats.placed_of(1), 0);
        assert_eq!(stats.placed_of(2), 1);
    }
}
