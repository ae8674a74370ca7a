//! JSON contract types.
//!
//! Field names are camelCase on the wire. Package types are identified by
//! their position in `packages`.

use packit_core::{ErrorKind, PackingResult, StopReason};
use serde::{Deserialize, Serialize};

/// API version from Cargo.toml.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request for one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// API version the caller was built against.
    #[serde(default)]
    pub version: Option<String>,

    /// Container dimensions in centimeters.
    pub container_dimensions: DimensionsRequest,

    /// Package types, in priority-neutral input order.
    pub packages: Vec<PackageRequest>,

    /// Whether packages may be rotated.
    pub allow_rotation: bool,

    /// Run budgets and reporting options.
    #[serde(default)]
    pub config: Option<ConfigRequest>,
}

/// Length, width and height of a box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DimensionsRequest {
    /// Extent along x.
    pub length: f64,
    /// Extent along y.
    pub width: f64,
    /// Extent along z.
    pub height: f64,
}

/// One package type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackageRequest {
    /// Extent along the package's own first axis.
    pub length: f64,
    /// Extent along the package's own second axis.
    pub width: f64,
    /// Extent along the package's own third axis.
    pub height: f64,
    /// Number of instances. Must be a positive integer.
    pub quantity: f64,
}

/// Configuration request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRequest {
    /// Time limit in milliseconds (0 = unlimited).
    pub time_limit_ms: Option<u64>,

    /// Instance placement attempts (0 = unlimited).
    pub max_iterations: Option<u64>,

    /// Report runs of adjacent instances as one configuration.
    pub group_adjacent: Option<bool>,
}

/// Response for optimize operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    /// API version.
    pub version: String,

    /// Whether the operation succeeded.
    pub success: bool,

    /// Error details if failed.
    pub error: Option<ErrorResponse>,

    /// Placement groups.
    #[serde(default)]
    pub packing_configurations: Vec<ConfigurationResponse>,

    /// Percentage of container volume used (0-100).
    pub total_volume_used_percentage: f64,

    /// Indices of package types with unplaced instances.
    #[serde(default)]
    pub unpacked_packages: Vec<usize>,

    /// Unplaced instance counts per package type.
    #[serde(default)]
    pub unpacked_counts: Vec<UnpackedCountResponse>,

    /// Diagnostic summary.
    #[serde(default)]
    pub packing_notes: String,

    /// Why the search ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

impl OptimizeResponse {
    /// Creates a failed response.
    pub fn failure(error: ErrorResponse) -> Self {
        Self {
            version: API_VERSION.to_string(),
            success: false,
            error: Some(error),
            packing_configurations: Vec::new(),
            total_volume_used_percentage: 0.0,
            unpacked_packages: Vec::new(),
            unpacked_counts: Vec::new(),
            packing_notes: String::new(),
            stop_reason: None,
        }
    }
}

impl From<PackingResult> for OptimizeResponse {
    fn from(result: PackingResult) -> Self {
        Self {
            version: API_VERSION.to_string(),
            success: true,
            error: None,
            unpacked_packages: result.unpacked_indices(),
            unpacked_counts: result
                .shortfalls
                .iter()
                .map(|s| UnpackedCountResponse {
                    package_type: s.package_type,
                    count: s.unpacked(),
                })
                .collect(),
            packing_configurations: result
                .configurations
                .into_iter()
                .map(|c| ConfigurationResponse {
                    package_type: c.package_type,
                    quantity: c.quantity,
                    orientation: c.orientation.axes(),
                    position: [c.position.x, c.position.y, c.position.z],
                })
                .collect(),
            total_volume_used_percentage: result.used_volume_percent,
            packing_notes: result.notes,
            stop_reason: Some(result.stop_reason),
        }
    }
}

/// One placement group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationResponse {
    /// Index into the request's `packages`.
    pub package_type: usize,

    /// Instances in the group, laid contiguously along x.
    pub quantity: usize,

    /// Package axis along each container axis.
    pub orientation: [usize; 3],

    /// Minimum corner [x, y, z] of the first instance.
    pub position: [f64; 3],
}

/// Shortfall of one package type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpackedCountResponse {
    /// Index into the request's `packages`.
    pub package_type: usize,

    /// Unplaced instances.
    pub count: usize,
}

/// Error category on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKindResponse {
    /// The request was not valid JSON for this contract.
    InvalidJson,
    /// The request violated an input constraint.
    InvalidInput,
    /// The engine produced a layout that failed re-validation.
    InternalConsistency,
    /// Serializing the response failed.
    Serialization,
}

impl From<ErrorKind> for ErrorKindResponse {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidInput => Self::InvalidInput,
            ErrorKind::InternalConsistency => Self::InternalConsistency,
            ErrorKind::Serialization => Self::Serialization,
        }
    }
}

/// Error details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error category.
    pub kind: ErrorKindResponse,

    /// Diagnostic message.
    pub message: String,

    /// Offending package index, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_index: Option<usize>,

    /// Offending request field, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    /// Describes a request that could not be parsed.
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKindResponse::InvalidJson,
            message: message.into(),
            package_index: None,
            field: None,
        }
    }
}

impl From<&packit_core::Error> for ErrorResponse {
    fn from(err: &packit_core::Error) -> Self {
        let field = match err {
            packit_core::Error::InvalidInput(input) => Some(input.field()),
            _ => None,
        };
        Self {
            kind: err.kind().into(),
            message: err.to_string(),
            package_index: err.package_index(),
            field,
        }
    }
}
