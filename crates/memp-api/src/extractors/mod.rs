//! Custom extractors and path helpers.

pub mod json;
pub mod pagination;
pub mod path;

pub use json::ApiJson;
pub use pagination::PaginationParams;
