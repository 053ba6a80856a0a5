//! Shared value types.

pub mod id;
pub mod pagination;

pub use id::{AttachmentId, ReportId};
pub use pagination::{PageRequest, PageResponse};
