//! Error types for the frustum camera
//!
//! This module defines the error types used throughout the crate:
//! projection validation, parameter validation, and operations that
//! do not apply to the current camera mode.

use std::fmt;

/// Result type for camera operations
pub type Result<T> = std::result::Result<T, Error>;

/// Camera errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Projection parameters rejected (fov, aspect ratio, near/far)
    InvalidProjection(String),

    /// Any other out-of-range or non-finite parameter
    InvalidParameter(String),

    /// Operation not supported by the camera's current mode
    UnsupportedOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidProjection(msg) => write!(f, "Invalid projection: {}", msg),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
