//! Feasibility checks for candidate boxes and finished layouts.
//!
//! [`admits`] is the per-candidate gate the packer consults before it
//! commits a box. [`validate_layout`] re-derives every box from the package
//! dimensions and orientation and re-checks the whole layout before a result
//! leaves the engine.

use crate::boundary::Container;
use crate::geometry::PackageType;
use nalgebra::Vector3;
use packit_core::geometry::{Boundary, Geometry};
use packit_core::{Aabb3D, ConsistencyFault, Placement, Result, GEOM_EPSILON};

/// Returns true if `candidate` lies inside the container and overlaps no
/// accepted box.
pub fn admits(candidate: &Aabb3D, container: &Vector3<f64>, accepted: &[Aabb3D]) -> bool {
    candidate.is_within(container) && !accepted.iter().any(|b| b.overlaps(candidate))
}

/// Re-checks a complete layout.
///
/// Fails with the first violated invariant, in this order: unknown package
/// type, disallowed orientation, containment, pairwise overlap, per-type
/// quantity.
pub fn validate_layout(
    packages: &[PackageType],
    container: &Container,
    placements: &[Placement],
) -> Result<()> {
    let extents = container.extents();
    let mut boxes = Vec::with_capacity(placements.len());
    let mut placed = vec![0usize; packages.len()];

    for (index, placement) in placements.iter().enumerate() {
        let package_type = placement.package_type;
        let package = packages
            .get(package_type)
            .ok_or(ConsistencyFault::UnknownPackageType {
                placement: index,
                package_type,
            })?;

        if !package.permits(placement.orientation) {
            return Err(ConsistencyFault::OrientationNotAllowed {
                placement: index,
                package_type,
                orientation: placement.orientation.axes(),
            }
            .into());
        }

        let aabb = placement.aabb(package.dimensions());
        if !aabb.is_within(&extents) {
            return Err(ConsistencyFault::OutOfBounds {
                placement: index,
                package_type,
            }
            .into());
        }

        placed[package_type] += 1;
        boxes.push((index, aabb));
    }

    check_overlaps(&mut boxes)?;

    for (package_type, (package, &count)) in packages.iter().zip(&placed).enumerate() {
        if count > package.quantity() {
            return Err(ConsistencyFault::QuantityExceeded {
                package_type,
                requested: package.quantity(),
                placed: count,
            }
            .into());
        }
    }

    Ok(())
}

/// Sweep-and-prune over boxes sorted by minimum x.
fn check_overlaps(boxes: &mut [(usize, Aabb3D)]) -> Result<()> {
    boxes.sort_by(|a, b| a.1.min.x.total_cmp(&b.1.min.x).then(a.0.cmp(&b.0)));

    for (i, (index_a, a)) in boxes.iter().enumerate() {
        for (index_b, b) in &boxes[i + 1..] {
            // Every later box starts at or past this one's far x face
            if b.min.x >= a.max.x - GEOM_EPSILON {
                break;
            }
            if a.overlaps(b) {
                return Err(ConsistencyFault::Overlap {
                    first: (*index_a).min(*index_b),
                    second: (*index_a).max(*index_b),
                    volume: a.intersection_volume(b),
                }
                .into());
            }
        }
    }

    Ok(())
}
