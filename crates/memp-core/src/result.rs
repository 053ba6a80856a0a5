//! Convenience result type alias for MEMP Shore.

use crate::error::AppError;

/// A specialized `Result` type for pipeline operations.
pub type AppResult<T> = Result<T, AppError>;
