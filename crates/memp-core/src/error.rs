//! Unified application error types for MEMP Shore.
//!
//! Every crate maps its internal failures into [`AppError`] so that the
//! report pipeline reports a stable machine-readable kind plus a
//! human-readable message at the HTTP boundary.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Request parameters failed validation (bad date range, missing vessel id).
    Validation,
    /// The requested resource was not found.
    NotFound,
    /// A storage call did not complete within its time bound.
    StorageTimeout,
    /// The operational store could not be reached.
    StorageUnavailable,
    /// The requested report template is not supported.
    UnsupportedTemplate,
    /// An uploaded attachment exceeds the configured size ceiling.
    PayloadTooLarge,
    /// A stored attachment path resolves outside the upload root.
    PathTraversal,
    /// The operation conflicts with the current resource state.
    Conflict,
    /// A database query failed.
    Database,
    /// A file-system operation failed.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Stable code reported to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::NotFound => "NotFoundError",
            Self::StorageTimeout => "StorageTimeoutError",
            Self::StorageUnavailable => "StorageUnavailableError",
            Self::UnsupportedTemplate => "UnsupportedTemplateError",
            Self::PayloadTooLarge => "PayloadTooLargeError",
            Self::PathTraversal => "PathTraversalError",
            Self::Conflict => "ConflictError",
            Self::Database => "DatabaseError",
            Self::Storage => "StorageError",
            Self::Configuration => "ConfigurationError",
            Self::Serialization => "SerializationError",
            Self::Internal => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The unified application error used throughout MEMP Shore.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a storage-timeout error.
    pub fn storage_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageTimeout, message)
    }

    /// Create a storage-unavailable error.
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StorageUnavailable, message)
    }

    /// Create an unsupported-template error.
    pub fn unsupported_template(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedTemplate, message)
    }

    /// Create a payload-too-large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PayloadTooLarge, message)
    }

    /// Create a path-traversal error.
    pub fn path_traversal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PathTraversal, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage (file I/O) error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this failure originated in the operational store.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::StorageTimeout | ErrorKind::StorageUnavailable | ErrorKind::Database
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_stable_code() {
        let err = AppError::unsupported_template("template 'FOO' is not supported");
        assert_eq!(
            err.to_string(),
            "UnsupportedTemplateError: template 'FOO' is not supported"
        );
    }

    #[test]
    fn test_storage_failure_classification() {
        assert!(AppError::storage_timeout("slow").is_storage_failure());
        assert!(AppError::storage_unavailable("down").is_storage_failure());
        assert!(!AppError::validation("bad").is_storage_failure());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("disk");
        let err: AppError = io.into();
        assert_eq!(err.kind, ErrorKind::Storage);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.message, err.message);
    }
}
