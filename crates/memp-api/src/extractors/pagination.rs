//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use memp_core::types::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: `reporting.default_page_size`, max: 100).
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest`.
    pub fn into_page_request(self, default_page_size: u64) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
        )
    }
}
