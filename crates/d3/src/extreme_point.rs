//! Extreme Point frontier for 3D container loading.
//!
//! Extreme points are candidate anchors for the minimum corner of the next
//! box. The frontier starts with the container origin. Each committed box
//! contributes the three points at its far corners along x, y and z, and
//! removes every point it makes unusable.
//!
//! Points are visited in ascending `(z, y, x)` order: floor first, then
//! depth, then left to right.
//!
//! # References
//!
//! - Crainic, T. G., Perboli, G., & Tadei, R. (2008). Extreme point-based heuristics
//!   for three-dimensional bin packing.

use nalgebra::Vector3;
use packit_core::{Aabb3D, GEOM_EPSILON};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A candidate anchor position.
#[derive(Debug, Clone, Copy)]
pub struct ExtremePoint {
    /// Position (x, y, z).
    pub position: Vector3<f64>,
}

impl ExtremePoint {
    /// Creates a new extreme point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
        }
    }

    fn near(&self, other: &ExtremePoint) -> bool {
        (self.position - other.position).amax() < GEOM_EPSILON
    }
}

impl PartialEq for ExtremePoint {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExtremePoint {}

impl PartialOrd for ExtremePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExtremePoint {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower z, then lower y, then lower x
        self.position
            .z
            .total_cmp(&other.position.z)
            .then_with(|| self.position.y.total_cmp(&other.position.y))
            .then_with(|| self.position.x.total_cmp(&other.position.x))
    }
}

/// Ordered set of extreme points for one container.
#[derive(Debug, Clone)]
pub struct ExtremePointSet {
    /// Points ordered by (z, y, x).
    points: BTreeSet<ExtremePoint>,
    /// Container extents.
    container: Vector3<f64>,
}

impl ExtremePointSet {
    /// Creates a frontier seeded with the container origin.
    pub fn new(container: Vector3<f64>) -> Self {
        let mut points = BTreeSet::new();
        points.insert(ExtremePoint::new(0.0, 0.0, 0.0));
        Self { points, container }
    }

    /// Returns the number of extreme points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the points in (z, y, x) order.
    pub fn iter(&self) -> impl Iterator<Item = &ExtremePoint> {
        self.points.iter()
    }

    /// Updates the frontier after `placed` was committed.
    ///
    /// `accepted` holds every committed box, including `placed`.
    pub fn commit(&mut self, placed: &Aabb3D, accepted: &[Aabb3D]) {
        self.points.retain(|ep| !placed.covers_anchor(&ep.position));

        let min = placed.min;
        let max = placed.max;
        let generated = [
            ExtremePoint::new(max.x, min.y, min.z),
            ExtremePoint::new(min.x, max.y, min.z),
            ExtremePoint::new(min.x, min.y, max.z),
        ];

        for ep in generated {
            self.add_if_valid(ep, accepted);
        }
    }

    /// Adds an EP unless it is unusable or already present.
    fn add_if_valid(&mut self, ep: ExtremePoint, accepted: &[Aabb3D]) {
        // On or beyond a container wall
        if (0..3).any(|i| ep.position[i] >= self.container[i] - GEOM_EPSILON) {
            return;
        }

        if accepted.iter().any(|b| b.covers_anchor(&ep.position)) {
            return;
        }

        if self.points.iter().any(|existing| existing.near(&ep)) {
            return;
        }

        self.points.insert(ep);
    }
}
