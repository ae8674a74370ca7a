//! C FFI API functions.

use crate::types::*;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use packit_core::solver::{Config, Solver};
use packit_core::{InputError, Result};
use packit_d3::{Container, PackageType, Packer3D};

/// Error codes.
pub const PACKIT_OK: i32 = 0;
pub const PACKIT_ERR_NULL_PTR: i32 = -1;
pub const PACKIT_ERR_INVALID_JSON: i32 = -2;
pub const PACKIT_ERR_INVALID_INPUT: i32 = -3;
pub const PACKIT_ERR_INTERNAL: i32 = -4;
pub const PACKIT_ERR_UNKNOWN: i32 = -99;

/// Optimizes a container load from a JSON request.
///
/// The response JSON is written to `result_ptr` for every return code
/// except `PACKIT_ERR_NULL_PTR` and `PACKIT_ERR_UNKNOWN`.
///
/// # Safety
/// - `request_json` must be a valid null-terminated string
/// - `result_ptr` must be a valid pointer to a `*mut c_char`
/// - The caller must free the result string using `packit_free_string`
#[no_mangle]
pub unsafe extern "C" fn packit_optimize(
    request_json: *const c_char,
    result_ptr: *mut *mut c_char,
) -> i32 {
    if request_json.is_null() || result_ptr.is_null() {
        return PACKIT_ERR_NULL_PTR;
    }

    let response = match CStr::from_ptr(request_json).to_str() {
        Ok(json_str) => optimize_json(json_str),
        Err(e) => OptimizeResponse::failure(ErrorResponse::invalid_json(format!(
            "Invalid UTF-8: {}",
            e
        ))),
    };

    let response_json = match serde_json::to_string(&response) {
        Ok(s) => s,
        Err(_) => return PACKIT_ERR_UNKNOWN,
    };

    match CString::new(response_json) {
        Ok(cstr) => {
            *result_ptr = cstr.into_raw();
            status_code(&response)
        }
        Err(_) => PACKIT_ERR_UNKNOWN,
    }
}

/// Frees a string allocated by PackIt.
///
/// # Safety
/// - `ptr` must have been allocated by a PackIt function
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn packit_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Returns the API version from Cargo.toml.
///
/// # Safety
/// - The returned string is statically allocated and must not be freed
#[no_mangle]
pub extern "C" fn packit_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

/// Maps a response onto its C return code.
pub fn status_code(response: &OptimizeResponse) -> i32 {
    match response.error.as_ref().map(|e| e.kind) {
        None => PACKIT_OK,
        Some(ErrorKindResponse::InvalidJson) => PACKIT_ERR_INVALID_JSON,
        Some(ErrorKindResponse::InvalidInput) => PACKIT_ERR_INVALID_INPUT,
        Some(ErrorKindResponse::InternalConsistency) => PACKIT_ERR_INTERNAL,
        Some(ErrorKindResponse::Serialization) => PACKIT_ERR_UNKNOWN,
    }
}

/// Parses a JSON request and runs it.
pub fn optimize_json(json_str: &str) -> OptimizeResponse {
    match serde_json::from_str::<OptimizeRequest>(json_str) {
        Ok(request) => optimize(request),
        Err(e) => OptimizeResponse::failure(ErrorResponse::invalid_json(format!(
            "Invalid JSON: {}",
            e
        ))),
    }
}

/// Runs a parsed request.
pub fn optimize(request: OptimizeRequest) -> OptimizeResponse {
    if let Some(version) = request.version.as_deref() {
        if version != API_VERSION {
            log::debug!(
                "request built against API {}, serving {}",
                version,
                API_VERSION
            );
        }
    }

    let config = build_config(request.config.clone());
    let outcome = build_problem(&request).and_then(|(container, packages)| {
        log::debug!(
            "optimizing {} package types in {}x{}x{} container",
            packages.len(),
            container.length(),
            container.width(),
            container.height()
        );
        Packer3D::new(config).solve(&packages, &container)
    });

    match outcome {
        Ok(result) => result.into(),
        Err(e) => {
            log::debug!("optimize failed: {}", e);
            OptimizeResponse::failure(ErrorResponse::from(&e))
        }
    }
}

/// Maps the optional JSON config onto solver configuration.
pub fn build_config(request: Option<ConfigRequest>) -> Config {
    let mut config = Config::default();

    if let Some(req) = request {
        if let Some(time_limit) = req.time_limit_ms {
            config.time_limit_ms = time_limit;
        }
        if let Some(iterations) = req.max_iterations {
            config.max_iterations = iterations;
        }
        if let Some(group) = req.group_adjacent {
            config.group_adjacent = group;
        }
    }

    config
}

/// Converts the wire request into engine input.
fn build_problem(request: &OptimizeRequest) -> Result<(Container, Vec<PackageType>)> {
    let dims = request.container_dimensions;
    let container = Container::new(dims.length, dims.width, dims.height);

    let packages = request
        .packages
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let quantity = parse_quantity(index, p.quantity)?;
            Ok(PackageType::new(p.length, p.width, p.height)
                .with_quantity(quantity)
                .with_rotation(request.allow_rotation))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((container, packages))
}

/// Accepts only positive whole numbers.
fn parse_quantity(index: usize, value: f64) -> Result<usize> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(InputError::InvalidQuantity { index, value }.into())
    }
}
