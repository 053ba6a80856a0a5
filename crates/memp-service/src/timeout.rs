//! Time limit shared by every storage call the services make.

use std::future::Future;
use std::time::Duration;

use memp_core::config::ReportingConfig;
use memp_core::error::AppError;
use memp_core::result::AppResult;

/// Upper bound on a single repository or data-source call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueryTimeout(Duration);

impl QueryTimeout {
    pub(crate) fn from_config(config: &ReportingConfig) -> Self {
        Self(Duration::from_secs(config.query_timeout_seconds))
    }

    /// Run `call`, failing with `StorageTimeout` once the limit elapses.
    pub(crate) async fn bound<T>(self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        match tokio::time::timeout(self.0, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::storage_timeout(format!(
                "Storage call exceeded {}s",
                self.0.as_secs()
            ))),
        }
    }
}
