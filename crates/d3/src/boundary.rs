//! Container definition.

use nalgebra::Vector3;
use packit_core::geometry::{Axis, Boundary, GEOM_EPSILON};
use packit_core::{InputError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular container, dimensions in centimeters.
///
/// Length runs along x, width along y and height along z.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Dimensions (length, width, height).
    dimensions: Vector3<f64>,
}

impl Container {
    /// Creates a new container with the given dimensions.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            dimensions: Vector3::new(length, width, height),
        }
    }

    /// Returns the dimensions (length, width, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
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
}

impl Boundary for Container {
    fn measure(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    fn extents(&self) -> Vector3<f64> {
        self.dimensions
    }

    fn validate(&self) -> Result<()> {
        for axis in Axis::ALL {
            let value = self.dimensions[axis.index()];
            if !(value.is_finite() && value > GEOM_EPSILON) {
                return Err(InputError::ContainerDimension { axis, value }.into());
            }
        }

        let volume = self.measure();
        if !volume.is_finite() {
            return Err(InputError::ContainerVolume { value: volume }.into());
        }
        Ok(())
    }
}
