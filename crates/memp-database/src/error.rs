//! Mapping of `sqlx` failures onto application error kinds.

use memp_core::error::{AppError, ErrorKind};

/// Classify a `sqlx` error so callers can tell an unreachable or saturated
/// store apart from a failing statement.
pub fn map_sqlx_error(err: sqlx::Error, context: &str) -> AppError {
    let kind = match &err {
        sqlx::Error::PoolTimedOut => ErrorKind::StorageTimeout,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => ErrorKind::StorageUnavailable,
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        _ => ErrorKind::Database,
    };
    AppError::with_source(kind, context.to_string(), err)
}
