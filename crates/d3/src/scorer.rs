//! Volume utilization of a layout.

use crate::boundary::Container;
use crate::geometry::PackageType;
use packit_core::geometry::{Boundary, Geometry};
use packit_core::{Placement, PlacementStats};

/// Volume accounting for one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationScore {
    /// Total volume of placed instances.
    pub used_volume: f64,
    /// Container volume.
    pub container_volume: f64,
    /// `100 * used / container`, clamped to 0..=100 and rounded to two decimals.
    pub used_volume_percent: f64,
    /// Placed count per package type, indexed by type.
    pub packed: Vec<usize>,
}

impl UtilizationScore {
    /// Container volume not occupied by any placement.
    pub fn free_volume(&self) -> f64 {
        (self.container_volume - self.used_volume).max(0.0)
    }
}

/// Scores a validated layout.
pub fn score(
    packages: &[PackageType],
    container: &Container,
    placements: &[Placement],
) -> UtilizationScore {
    let stats = PlacementStats::from_placements(placements);
    let packed: Vec<usize> = (0..packages.len()).map(|i| stats.placed_of(i)).collect();

    let used_volume: f64 = packages
        .iter()
        .zip(&packed)
        .map(|(package, &count)| package.measure() * count as f64)
        .sum();
    let container_volume = container.measure();

    // Per-axis ratios stay finite where the raw volume products would not.
    let extents = container.extents();
    let used_fraction: f64 = packages
        .iter()
        .zip(&packed)
        .map(|(package, &count)| {
            let dims = package.dimensions();
            (0..3).map(|i| dims[i] / extents[i]).product::<f64>() * count as f64
        })
        .sum();

    UtilizationScore {
        used_volume,
        container_volume,
        used_volume_percent: percent(used_fraction),
        packed,
    }
}

fn percent(fraction: f64) -> f64 {
    if !fraction.is_finite() {
        return 0.0;
    }
    let raw = (100.0 * fraction).clamp(0.0, 100.0);
    (raw * 100.0).round() / 100.0
}
