//! # PackIt 3D
//!
//! Extreme-point container loading for the PackIt engine.
//!
//! This crate provides the container and package types, the placement
//! engine, and the feasibility, scoring and assembly stages that turn a
//! layout into a [`PackingResult`].
//!
//! ```rust
//! use packit_d3::{Container, PackageType, Packer3D, Solver};
//!
//! let container = Container::new(100.0, 100.0, 100.0);
//! let packages = vec![PackageType::new(50.0, 50.0, 50.0).with_quantity(10)];
//!
//! let result = Packer3D::default_config().solve(&packages, &container).unwrap();
//! assert_eq!(result.placed_count(), 8);
//! assert_eq!(result.used_volume_percent, 100.0);
//! ```

pub mod assembler;
pub mod boundary;
pub mod extreme_point;
pub mod geometry;
pub mod packer;
pub mod scorer;
pub mod validator;

// Re-exports
pub use boundary::Container;
pub use geometry::{OrientationConstraint, PackageType};
pub use packer::Packer3D;
pub use scorer::UtilizationScore;
pub use packit_core::{
    CancelHandle, Config, Error, PackingConfiguration, PackingResult, Placement, Result,
    Shortfall, Solver, StopReason,
};
