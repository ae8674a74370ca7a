//! # PackIt Core
//!
//! Core types and abstractions for the PackIt container loading engine.
//!
//! This crate provides the foundational types shared by the 3D placement
//! engine and its JSON/C front ends.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Orientation`], [`Axis`], [`Aabb3D`] and the
//!   [`Geometry`] / [`Boundary`] traits
//! - **Placement**: [`Placement`], [`PlacementStats`]
//! - **Result**: [`PackingResult`], [`Shortfall`], [`StopReason`]
//! - **Solver**: [`Solver`] trait, [`Config`], [`Budget`], [`CancelHandle`]
//! - **Errors**: [`Error`] with [`InputError`] and [`ConsistencyFault`]
//!
//! ## Configuration
//!
//! ```rust
//! use packit_core::Config;
//!
//! let config = Config::new()
//!     .with_time_limit(2_000)
//!     .with_max_iterations(10_000)
//!     .with_group_adjacent(true);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod aabb;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use aabb::Aabb3D;
pub use error::{ConsistencyFault, Error, ErrorKind, InputError, Result};
pub use geometry::{Axis, Boundary, Geometry, Orientation, GEOM_EPSILON};
pub use placement::{Placement, PlacementStats};
pub use result::{PackingConfiguration, PackingResult, Shortfall, StopReason};
pub use solver::{Budget, CancelHandle, Config, ProgressCallback, ProgressInfo, Solver};
