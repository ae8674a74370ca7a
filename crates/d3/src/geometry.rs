//! Package type definitions.

use nalgebra::Vector3;
use packit_core::geometry::{Axis, Geometry, Orientation, GEOM_EPSILON};
use packit_core::{InputError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation constraint for 3D placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationConstraint {
    /// Any of the 6 axis-aligned orientations.
    #[default]
    Any,
    /// Fixed orientation (no rotation allowed).
    Fixed,
}

impl OrientationConstraint {
    /// Maps a global rotation flag onto a constraint.
    pub fn from_rotation(allow_rotation: bool) -> Self {
        if allow_rotation {
            Self::Any
        } else {
            Self::Fixed
        }
    }
}

/// A rectangular package type with a requested quantity.
///
/// Package types carry no identifier of their own; their position in the
/// input sequence identifies them in every output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackageType {
    /// Dimensions (length, width, height).
    dimensions: Vector3<f64>,

    /// Number of instances to place.
    quantity: usize,

    /// Orientation constraint.
    orientation: OrientationConstraint,
}

impl PackageType {
    /// Creates a package type with quantity 1 and rotation allowed.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            dimensions: Vector3::new(length, width, height),
            quantity: 1,
            orientation: OrientationConstraint::default(),
        }
    }

    /// Sets the quantity to place.
    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    /// Sets the orientation constraint.
    pub fn with_orientation(mut self, constraint: OrientationConstraint) -> Self {
        self.orientation = constraint;
        self
    }

    /// Allows or forbids rotation.
    pub fn with_rotation(self, allow_rotation: bool) -> Self {
        self.with_orientation(OrientationConstraint::from_rotation(allow_rotation))
    }

    /// Returns the length.
    pub fn length(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns true if `orientation` is legal for this type.
    pub fn permits(&self, orientation: Orientation) -> bool {
        match self.orientation {
            OrientationConstraint::Any => true,
            OrientationConstraint::Fixed => orientation.is_identity(),
        }
    }

    /// Returns the extents of this type in the given orientation.
    pub fn dimensions_for(&self, orientation: Orientation) -> Vector3<f64> {
        orientation.apply(&self.dimensions)
    }

    /// Returns true if some allowed orientation fits inside `extents`.
    pub fn fits_within(&self, extents: &Vector3<f64>) -> bool {
        self.allowed_orientations().iter().any(|&o| {
            let dims = self.dimensions_for(o);
            (0..3).all(|i| dims[i] <= extents[i] + GEOM_EPSILON)
        })
    }
}

impl Geometry for PackageType {
    fn quantity(&self) -> usize {
        self.quantity
    }

    fn measure(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the allowed orientations in canonical order.
    ///
    /// An orientation whose extents repeat those of an earlier one is
    /// skipped, so a cube yields only the identity.
    fn allowed_orientations(&self) -> Vec<Orientation> {
        let candidates = Orientation::allowed(self.orientation == OrientationConstraint::Any);
        let mut distinct: Vec<(Orientation, Vector3<f64>)> = Vec::with_capacity(candidates.len());
        for &o in candidates {
            let dims = self.dimensions_for(o);
            if !distinct.iter().any(|(_, seen)| *seen == dims) {
                distinct.push((o, dims));
            }
        }
        distinct.into_iter().map(|(o, _)| o).collect()
    }

    fn validate(&self, index: usize) -> Result<()> {
        for axis in Axis::ALL {
            let value = self.dimensions[axis.index()];
            if !(value.is_finite() && value > GEOM_EPSILON) {
                return Err(InputError::PackageDimension { index, axis, value }.into());
            }
        }

        let volume = self.measure();
        if !volume.is_finite() {
            return Err(InputError::PackageVolume { index, value: volume }.into());
        }

        if self.quantity == 0 {
            return Err(InputError::InvalidQuantity { index, value: 0.0 }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use packit_core::Error;

    #[test]
    fn test_package_volume() {
        let pkg = PackageType::new(10.0, 20.0, 30.0);
        assert_relative_eq!(pkg.measure(), 6000.0, epsilon = 0.001);
        assert_eq!(pkg.quantity(), 1);
    }

    #[test]
    fn test_orientations() {
        let pkg = PackageType::new(10.0, 20.0, 30.0);
        assert_eq!(pkg.allowed_orientations(), Orientation::ALL.to_vec());

        let fixed = pkg.clone().with_rotation(false);
        assert_eq!(fixed.allowed_orientations(), vec![Orientation::IDENTITY]);
        assert!(!fixed.permits(Orientation::ALL[3]));
        assert!(pkg.permits(Orientation::ALL[3]));
    }

    #[test]
    fn test_duplicate_extents_collapse() {
        let cube = PackageType::new(50.0, 50.0, 50.0);
        assert_eq!(cube.allowed_orientations(), vec![Orientation::IDENTITY]);

        // Two equal sides leave three distinct extents.
        let square_base = PackageType::new(10.0, 10.0, 40.0);
        let orientations = square_base.allowed_orientations();
        assert_eq!(orientations.len(), 3);
        assert_eq!(orientations[0], Orientation::IDENTITY);
    }

    #[test]
    fn test_fits_within() {
        let extents = Vector3::new(100.0, 20.0, 20.0);
        let long = PackageType::new(10.0, 10.0, 90.0);
        assert!(long.fits_within(&extents));
        assert!(!long.clone().with_rotation(false).fits_within(&extents));
        assert!(!PackageType::new(120.0, 1.0, 1.0).fits_within(&extents));
    }

    #[test]
    fn test_validation() {
        assert!(PackageType::new(10.0, 20.0, 30.0).validate(0).is_ok());

        let err = PackageType::new(-10.0, 20.0, 30.0).validate(4).unwrap_err();
        assert_eq!(err.package_index(), Some(4));

        // Extents at the tolerance would never register as overlapping.
        let err = PackageType::new(1e-10, 1.0, 1.0).validate(0).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput(InputError::PackageDimension {
                index: 0,
                axis: Axis::Length,
                value: 1e-10
            })
        );

        let err = PackageType::new(1e150, 1e150, 1e150).validate(2).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput(InputError::PackageVolume {
                index: 2,
                value: f64::INFINITY
            })
        );

        let err = PackageType::new(10.0, 20.0, 30.0)
            .with_quantity(0)
            .validate(1)
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput(InputError::InvalidQuantity {
                index: 1,
                value: 0.0
            })
        );
    }
}
