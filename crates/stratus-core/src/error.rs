//! Provider-style error type and wire envelope.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for emulated control-plane operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Closed set of provider error codes the emulation can produce.
///
/// Each variant maps to exactly one error code and HTTP status; the
/// `Display` impl is the wire `Message`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Aggregated structural validation failure (one or more violations).
    #[error("{0}")]
    Validation(String),

    /// A referenced ECS cluster or service does not exist.
    #[error("Cluster not found.")]
    ClusterNotFound,

    /// The request named an operation the emulation does not implement.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Fault inside the emulated backend itself.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Provider error code for the wire envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "ValidationException",
            ApiError::ClusterNotFound => "ClusterNotFoundException",
            ApiError::UnknownOperation(_) => "UnknownOperationException",
            ApiError::Internal(_) => "InternalFailure",
        }
    }

    /// HTTP status code for the wire envelope.
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::Internal(_) => 500,
            _ => 400,
        }
    }

    /// Render this error as the provider's structured response body.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.to_string(),
            },
            response_metadata: ResponseMetadata {
                http_status_code: self.http_status(),
            },
        }
    }
}

/// Provider wire envelope for failed requests.
///
/// ```text
/// { "Error": { "Code": ..., "Message": ... },
///   "ResponseMetadata": { "HTTPStatusCode": ... } }
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    #[serde(rename = "Error")]
    pub error: ErrorBody,
    #[serde(rename = "ResponseMetadata")]
    pub response_metadata: ResponseMetadata,
}

/// The `Error` member of the envelope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// The `ResponseMetadata` member of the envelope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResponseMetadata {
    #[serde(rename = "HTTPStatusCode")]
    pub http_status_code: u16,
}
