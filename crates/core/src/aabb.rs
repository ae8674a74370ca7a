//! Axis-aligned bounding boxes in container coordinates.

use crate::geometry::GEOM_EPSILON;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb3D {
    /// Minimum corner.
    pub min: Vector3<f64>,
    /// Maximum corner.
    pub max: Vector3<f64>,
}

impl Aabb3D {
    /// Creates a new AABB from min/max corners.
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from its minimum corner and extents.
    pub fn from_corner(position: Vector3<f64>, extents: Vector3<f64>) -> Self {
        Self {
            min: position,
            max: position + extents,
        }
    }

    /// Returns the extents along x, y, z.
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Returns the volume of the AABB.
    pub fn volume(&self) -> f64 {
        let e = self.extents();
        e.x * e.y * e.z
    }

    /// Checks if the interiors of two boxes intersect.
    ///
    /// Boxes that only share a face, edge or corner do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|i| {
            self.min[i] < other.max[i] - GEOM_EPSILON && other.min[i] < self.max[i] - GEOM_EPSILON
        })
    }

    /// Returns the volume shared by the interiors of two boxes.
    pub fn intersection_volume(&self, other: &Self) -> f64 {
        (0..3)
            .map(|i| (self.max[i].min(other.max[i]) - self.min[i].max(other.min[i])).max(0.0))
            .product()
    }

    /// Checks if the box lies inside `[0, extents]` on every axis.
    pub fn is_within(&self, extents: &Vector3<f64>) -> bool {
        (0..3).all(|i| self.min[i] >= -GEOM_EPSILON && self.max[i] <= extents[i] + GEOM_EPSILON)
    }

    /// Checks if a point lies in the half-open box `[min, max)`.
    ///
    /// A box anchored at such a point would always overlap this one.
    pub fn covers_anchor(&self, point: &Vector3<f64>) -> bool {
        (0..3).all(|i| {
            point[i] > self.min[i] - GEOM_EPSILON && point[i] < self.max[i] - GEOM_EPSILON
        })
    }
}
