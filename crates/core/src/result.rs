//! Packing result representation.

use crate::aabb::Aabb3D;
use crate::geometry::Orientation;
use crate::placement::{Placement, PlacementStats};
use nalgebra::Vector3;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why the placement loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum StopReason {
    /// Every requested instance was attempted.
    #[default]
    Completed,
    /// The time budget ran out.
    TimeLimit,
    /// The iteration budget ran out.
    IterationLimit,
    /// The caller cancelled the run.
    Cancelled,
}

impl StopReason {
    /// Returns true if the run attempted every instance.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Completed => "completed",
            Self::TimeLimit => "timeLimit",
            Self::IterationLimit => "iterationLimit",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A reporting group of placed instances.
///
/// A group of quantity `n` covers `n` instances of the same package type and
/// orientation laid contiguously along the container x axis: instance `k`
/// has its minimum corner at `position + (k * ex, 0, 0)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingConfiguration {
    /// Index of the package type in the input sequence.
    pub package_type: usize,
    /// Number of instances in the group.
    pub quantity: usize,
    /// Orientation shared by every instance.
    pub orientation: Orientation,
    /// Minimum corner of the first instance.
    pub position: Vector3<f64>,
}

impl PackingConfiguration {
    /// Creates a single-instance configuration from a placement.
    pub fn from_placement(placement: &Placement) -> Self {
        Self {
            package_type: placement.package_type,
            quantity: 1,
            orientation: placement.orientation,
            position: placement.position,
        }
    }

    /// Reconstructs the box of every instance in the group.
    pub fn instances(&self, dims: &Vector3<f64>) -> Vec<Aabb3D> {
        let extents = self.orientation.apply(dims);
        (0..self.quantity)
            .map(|k| {
                let offset = Vector3::new(k as f64 * extents.x, 0.0, 0.0);
                Aabb3D::from_corner(self.position + offset, extents)
            })
            .collect()
    }
}

/// Unplaced instances of one package type, split by cause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shortfall {
    /// Index of the package type in the input sequence.
    pub package_type: usize,
    /// Requested quantity.
    pub requested: usize,
    /// Instances placed.
    pub packed: usize,
    /// Instances rejected because the type fits in no allowed orientation.
    pub oversize: usize,
    /// Instances for which the search found no feasible position.
    pub no_fit: usize,
    /// Instances skipped after a budget stop or cancellation.
    pub not_attempted: usize,
}

impl Shortfall {
    /// Returns the number of unplaced instances.
    pub fn unpacked(&self) -> usize {
        self.oversize + self.no_fit + self.not_attempted
    }
}

/// Result of a packing run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingResult {
    /// One placement per packed instance, in commit order.
    pub placements: Vec<Placement>,

    /// Reporting groups covering exactly the placements.
    pub configurations: Vec<PackingConfiguration>,

    /// Total volume of packed instances.
    pub used_volume: f64,

    /// Percentage of container volume used (0-100, two decimals).
    pub used_volume_percent: f64,

    /// Packed instance count per package type, indexed by type.
    pub packed: Vec<usize>,

    /// Types with a positive shortfall, ascending by type index.
    pub shortfalls: Vec<Shortfall>,

    /// Deterministic diagnostic summary.
    pub notes: String,

    /// Why the placement loop ended.
    pub stop_reason: StopReason,

    /// Instance placement attempts performed.
    pub iterations: u64,
}

impl PackingResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every requested instance was placed.
    pub fn all_placed(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// Returns the number of placed instances.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced instances across all types.
    pub fn unpacked_count(&self) -> usize {
        self.shortfalls.iter().map(Shortfall::unpacked).sum()
    }

    /// Returns the indices of types with a nonzero shortfall.
    pub fn unpacked_indices(&self) -> Vec<usize> {
        self.shortfalls.iter().map(|s| s.package_type).collect()
    }

    /// Returns shortfall counts keyed by type index.
    pub fn unpacked_counts(&self) -> BTreeMap<usize, usize> {
        self.shortfalls
            .iter()
            .map(|s| (s.package_type, s.unpacked()))
            .collect()
    }

    /// Returns true if the run attempted every instance.
    pub fn completed_normally(&self) -> bool {
        self.stop_reason.is_complete()
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        PlacementStats::from_placements(&self.placements)
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.2}%", self.used_volume_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_new() {
        let result = PackingResult::new();
        assert!(result.placements.is_empty());
        assert_eq!(result.used_volume_percent, 0.0);
        assert!(result.all_placed());
        assert!(result.completed_normally());
    }

    #[test]
    fn test_shortfall_accounting() {
        let mut result = PackingResult::new();
        result.shortfalls.push(Shortfall {
            package_type: 1,
            requested: 10,
            packed: 6,
            oversize: 0,
            no_fit: 3,
            not_attempted: 1,
        });
        result.shortfalls.push(Shortfall {
            package_type: 4,
            requested: 2,
            packed: 0,
            oversize: 2,
            ..Default::default()
        });

        assert!(!result.all_placed());
        assert_eq!(result.unpacked_count(), 6);
        assert_eq!(result.unpacked_indices(), vec![1, 4]);
        assert_eq!(result.unpacked_counts().get(&1), Some(&4));
    }

    #[test]
    fn test_configuration_instances_run_along_x() {
        let config = PackingConfiguration {
            package_type: 0,
            quantity: 3,
            orientation: Orientation::new([1, 0, 2]).unwrap(),
            position: Vector3::new(0.0, 5.0, 0.0),
        };
        let boxes = config.instances(&Vector3::new(10.0, 20.0, 30.0));
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0].min, Vector3::new(0.0, 5.0, 0.0));
        assert_eq!(boxes[2].min, Vector3::new(40.0, 5.0, 0.0));
        assert_eq!(boxes[2].max, Vector3::new(60.0, 15.0, 30.0));
    }

    #[test]
    fn test_partial_result_accounting() {
        let mut result = PackingResult::new();
        result.placements.push(Placement::new(
            0,
            0,
            Orientation::IDENTITY,
            Vector3::zeros(),
        ));
        result.used_volume_percent = 72.3;
        result.stop_reason = StopReason::TimeLimit;
        result.shortfalls.push(Shortfall {
            package_type: 0,
            requested: 3,
            packed: 1,
            not_attempted: 2,
            ..Default::default()
        });

        assert_eq!(result.placed_count() + result.unpacked_count(), 3);
        assert_eq!(result.placed_count(), 1);
        assert!(!result.stop_reason.is_complete());
        assert_eq!(result.utilization_percent(), "72.30%");
    }
}
