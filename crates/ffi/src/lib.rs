//! # PackIt FFI
//!
//! C FFI and JSON interface for the PackIt container loading engine.
//!
//! This crate exposes the JSON request/response contract to Rust callers
//! through [`optimize_json`] and to other languages through a C ABI
//! (`packit_optimize`, `packit_free_string`, `packit_version`).

mod api;
mod types;

pub use api::*;
pub use types::*;
