//! # PackIt
//!
//! Deterministic 3D container loading.
//!
//! Given a rectangular container and a list of rectangular package types,
//! PackIt places as many instances as it can with an extreme-point greedy
//! heuristic and reports exact positions, orientations and every instance
//! it could not place.
//!
//! ## Quick Start
//!
//! ```rust
//! use packit::d3::{Container, PackageType, Packer3D};
//! use packit::{Config, Solver};
//!
//! let container = Container::new(30.0, 20.0, 10.0);
//! let packages = vec![PackageType::new(30.0, 20.0, 10.0).with_quantity(2)];
//!
//! let packer = Packer3D::new(Config::default());
//! let result = packer.solve(&packages, &container)?;
//!
//! assert_eq!(result.placed_count(), 1);
//! assert_eq!(result.unpacked_indices(), vec![0]);
//! # Ok::<(), packit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support
//! - `ffi`: JSON contract and C ABI

/// Core traits and abstractions.
pub use packit_core as core;

/// 3D container loading.
pub use packit_d3 as d3;

/// JSON contract and C ABI.
#[cfg(feature = "ffi")]
pub use packit_ffi as ffi;

// Re-export commonly used types at root level
pub use packit_core::{Config, Error, PackingResult, Placement, Result, Solver, StopReason};
