//! Error types for the Foundry engines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Foundry workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FoundryError {
    /// Upstream model call failed (transport, HTTP, or empty response)
    #[error("Model call failed: {0}")]
    Model(String),

    /// Model response did not match the expected structured shape
    #[error("Malformed model response: {message}")]
    MalformedResponse { message: String },

    /// Caller violated an operation precondition
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// A parameter was outside its valid domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "JPEG", etc.
        message: String,
    },

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FoundryError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Model error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }

    /// Creates a MalformedResponse error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Creates a Precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates an InvalidParameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Image error
    pub fn image(message: impl Into<String>) -> Self {
        Self::Image(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Model error
    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }

    /// Check if this is a MalformedResponse error
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Check if this is a Precondition error
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Check if this is an InvalidParameter error
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FoundryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FoundryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for FoundryError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("template rendering failed: {err}"))
    }
}

/// A type alias for `Result<T, FoundryError>`.
pub type Result<T> = std::result::Result<T, FoundryError>;
