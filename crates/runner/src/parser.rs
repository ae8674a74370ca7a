//! Request file loading.

use packit_ffi::OptimizeRequest;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading request files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Loader for optimize requests stored as JSON.
#[derive(Debug, Default)]
pub struct RequestParser;

impl RequestParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a request from a JSON file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<OptimizeRequest, ParseError> {
        let content = fs::read_to_string(path)?;
        self.parse_json(&content)
    }

    /// Parses a request from a JSON string.
    pub fn parse_json(&self, json: &str) -> Result<OptimizeRequest, ParseError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let request = RequestParser::new()
            .parse_json(
                r#"{
                    "containerDimensions": {"length": 10, "width": 10, "height": 10},
                    "packages": [{"length": 5, "width": 5, "height": 5, "quantity": 8}],
                    "allowRotation": true
                }"#,
            )
            .unwrap();
        assert_eq!(request.packages.len(), 1);
        assert!(request.config.is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = RequestParser::new()
            .parse_file("/nonexistent/request.json")
            .unwrap_err();
        assert!(matches!(err, ParseError::IoError(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = RequestParser::new().parse_json("{").unwrap_err();
        assert!(matches!(err, ParseError::JsonError(_)));
    }
}
