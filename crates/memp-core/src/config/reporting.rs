//! Report generation configuration.

use serde::{Deserialize, Serialize};

/// Tuning for the aggregation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Upper bound for a single storage call, in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_seconds: u64,
    /// Page size used when listing a vessel's reports.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            query_timeout_seconds: default_query_timeout(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_query_timeout() -> u64 {
    30
}

fn default_page_size() -> u64 {
    25
}
