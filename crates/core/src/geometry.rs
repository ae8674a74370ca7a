//! Core geometry traits and types.

use crate::aabb::Aabb3D;
use crate::error::InputError;
use crate::Result;
use nalgebra::Vector3;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute tolerance for geometric comparisons, in centimeters.
pub const GEOM_EPSILON: f64 = 1e-9;

/// A package or container axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Length, container x.
    Length = 0,
    /// Width, container y.
    Width = 1,
    /// Height, container z.
    Height = 2,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::Length, Axis::Width, Axis::Height];

    /// Returns the axis index (0, 1 or 2).
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Width => "width",
            Self::Height => "height",
        };
        f.write_str(name)
    }
}

/// An axis-aligned orientation of a box.
///
/// Entry `i` names the package axis laid along container axis `i`, so
/// `[2, 0, 1]` puts the package height along the container length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "[usize; 3]", into = "[usize; 3]")
)]
pub struct Orientation([usize; 3]);

impl Orientation {
    /// The unrotated orientation.
    pub const IDENTITY: Orientation = Orientation([0, 1, 2]);

    const FIXED: [Orientation; 1] = [Orientation([0, 1, 2])];

    /// All six orientations in canonical order.
    pub const ALL: [Orientation; 6] = [
        Orientation([0, 1, 2]),
        Orientation([0, 2, 1]),
        Orientation([1, 0, 2]),
        Orientation([1, 2, 0]),
        Orientation([2, 0, 1]),
        Orientation([2, 1, 0]),
    ];

    /// Creates an orientation, rejecting anything that is not a permutation.
    pub fn new(axes: [usize; 3]) -> Result<Self> {
        let mut seen = [false; 3];
        for &axis in &axes {
            if axis > 2 || seen[axis] {
                return Err(InputError::MalformedOrientation(axes).into());
            }
            seen[axis] = true;
        }
        Ok(Self(axes))
    }

    /// Returns the orientations legal under the given rotation policy.
    pub fn allowed(allow_rotation: bool) -> &'static [Orientation] {
        if allow_rotation {
            &Self::ALL
        } else {
            &Self::FIXED
        }
    }

    /// Returns the raw axis permutation.
    pub fn axes(&self) -> [usize; 3] {
        self.0
    }

    /// Returns true for the unrotated orientation.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps package dimensions onto container axes.
    pub fn apply(&self, dims: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(dims[self.0[0]], dims[self.0[1]], dims[self.0[2]])
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<[usize; 3]> for Orientation {
    type Error = InputError;

    fn try_from(axes: [usize; 3]) -> std::result::Result<Self, Self::Error> {
        Self::new(axes).map_err(|_| InputError::MalformedOrientation(axes))
    }
}

impl From<Orientation> for [usize; 3] {
    fn from(o: Orientation) -> Self {
        o.0
    }
}

/// Trait for package types that can be packed.
pub trait Geometry: Clone + Send + Sync {
    /// Returns the number of instances to place.
    fn quantity(&self) -> usize;

    /// Returns the unit volume.
    fn measure(&self) -> f64;

    /// Returns the unrotated dimensions.
    fn dimensions(&self) -> &Vector3<f64>;

    /// Returns the orientations this geometry may be placed in.
    fn allowed_orientations(&self) -> Vec<Orientation>;

    /// Validates the geometry at position `index` of the input sequence.
    fn validate(&self, index: usize) -> Result<()>;
}

/// Trait for containers that hold geometries.
pub trait Boundary: Clone + Send + Sync {
    /// Returns the container volume.
    fn measure(&self) -> f64;

    /// Returns the inner extents along x, y, z.
    fn extents(&self) -> Vector3<f64>;

    /// Validates the boundary.
    fn validate(&self) -> Result<()>;

    /// Checks if a box lies fully inside the boundary.
    fn contains(&self, aabb: &Aabb3D) -> bool {
        aabb.is_within(&self.extents())
    }
}
