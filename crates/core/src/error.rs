//! Error types for PackIt.
//!
//! Two failure families exist and callers must be able to tell them apart:
//! [`Error::InvalidInput`] means the request was rejected before any
//! placement attempt, [`Error::InternalConsistency`] means the engine built a
//! layout that failed its own feasibility re-check.
//!
//! A package that does not fit is not an error. Neither is a budget stop or
//! a cancellation; both are reported through the packing result.

use crate::geometry::Axis;
use thiserror::Error;

/// Result type alias for PackIt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a packing run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The caller supplied input that violates the input contract.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The accepted layout violates containment, non-overlap or accounting.
    #[error("Internal consistency fault: {0}")]
    InternalConsistency(#[from] ConsistencyFault),

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, see [`InputError`].
    InvalidInput,
    /// Engine defect, see [`ConsistencyFault`].
    InternalConsistency,
    /// Encoding or decoding failure.
    Serialization,
}

impl Error {
    /// Returns the coarse error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InternalConsistency(_) => ErrorKind::InternalConsistency,
            #[cfg(feature = "serde")]
            Self::SerializationError(_) => ErrorKind::Serialization,
        }
    }

    /// Returns true if the error was caused by caller input.
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    /// Returns the package type index the error refers to, if any.
    pub fn package_index(&self) -> Option<usize> {
        match self {
            Self::InvalidInput(e) => e.package_index(),
            Self::InternalConsistency(f) => f.package_index(),
            #[cfg(feature = "serde")]
            Self::SerializationError(_) => None,
        }
    }
}

/// Input contract violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A container dimension is not finite or not above [`GEOM_EPSILON`](crate::geometry::GEOM_EPSILON).
    #[error("container {axis} must be a finite number above 1e-9, got {value}")]
    ContainerDimension {
        /// Offending axis.
        axis: Axis,
        /// Supplied value.
        value: f64,
    },

    /// A package dimension is not finite or not above [`GEOM_EPSILON`](crate::geometry::GEOM_EPSILON).
    #[error("package type {index}: {axis} must be a finite number above 1e-9, got {value}")]
    PackageDimension {
        /// Package type index.
        index: usize,
        /// Offending axis.
        axis: Axis,
        /// Supplied value.
        value: f64,
    },

    /// The container volume does not fit in an `f64`.
    #[error("container volume overflows, got {value}")]
    ContainerVolume {
        /// Computed volume.
        value: f64,
    },

    /// A package volume does not fit in an `f64`.
    #[error("package type {index}: volume overflows, got {value}")]
    PackageVolume {
        /// Package type index.
        index: usize,
        /// Computed volume.
        value: f64,
    },

    /// A package quantity is not a positive integer.
    #[error("package type {index}: quantity must be a positive integer, got {value}")]
    InvalidQuantity {
        /// Package type index.
        index: usize,
        /// Supplied value.
        value: f64,
    },

    /// The package list is empty.
    #[error("at least one package type is required")]
    NoPackages,

    /// An orientation is not a permutation of `[0, 1, 2]`.
    #[error("orientation {0:?} is not a permutation of [0, 1, 2]")]
    MalformedOrientation([usize; 3]),
}

impl InputError {
    /// Returns the package type index this error refers to, if any.
    pub fn package_index(&self) -> Option<usize> {
        match self {
            Self::PackageDimension { index, .. }
            | Self::PackageVolume { index, .. }
            | Self::InvalidQuantity { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the dotted path of the offending input field.
    pub fn field(&self) -> String {
        match self {
            Self::ContainerDimension { axis, .. } => format!("containerDimensions.{axis}"),
            Self::PackageDimension { index, axis, .. } => format!("packages[{index}].{axis}"),
            Self::ContainerVolume { .. } => "containerDimensions".to_string(),
            Self::PackageVolume { index, .. } => format!("packages[{index}]"),
            Self::InvalidQuantity { index, .. } => format!("packages[{index}].quantity"),
            Self::NoPackages => "packages".to_string(),
            Self::MalformedOrientation(_) => "orientation".to_string(),
        }
    }
}

/// Invariant violations found when re-checking an accepted layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyFault {
    /// A placement references a package type that does not exist.
    #[error("placement {placement} references unknown package type {package_type}")]
    UnknownPackageType {
        /// Index of the placement in commit order.
        placement: usize,
        /// Referenced package type.
        package_type: usize,
    },

    /// A placement uses an orientation its package type does not allow.
    #[error("placement {placement} uses orientation {orientation:?}, not allowed for package type {package_type}")]
    OrientationNotAllowed {
        /// Index of the placement in commit order.
        placement: usize,
        /// Package type of the placement.
        package_type: usize,
        /// Offending orientation.
        orientation: [usize; 3],
    },

    /// A placement extends outside the container.
    #[error("placement {placement} (package type {package_type}) extends outside the container")]
    OutOfBounds {
        /// Index of the placement in commit order.
        placement: usize,
        /// Package type of the placement.
        package_type: usize,
    },

    /// Two placements share interior volume.
    #[error("placements {first} and {second} overlap by {volume} cm3")]
    Overlap {
        /// Lower placement index.
        first: usize,
        /// Higher placement index.
        second: usize,
        /// Interior intersection volume.
        volume: f64,
    },

    /// More instances were placed than requested.
    #[error("package type {package_type}: placed {placed} instances, only {requested} requested")]
    QuantityExceeded {
        /// Package type.
        package_type: usize,
        /// Requested quantity.
        requested: usize,
        /// Placed count.
        placed: usize,
    },
}

impl ConsistencyFault {
    /// Returns the package type index this fault refers to, if any.
    pub fn package_index(&self) -> Option<usize> {
        match self {
            Self::UnknownPackageType { package_type, .. }
            | Self::OrientationNotAllowed { package_type, .. }
            | Self::OutOfBounds { package_type, .. }
            | Self::QuantityExceeded { package_type, .. } => Some(*package_type),
            Self::Overlap { .. } => None,
        }
    }
}
