//! # memp-service
//!
//! The period report pipeline: aggregation of operational rows, assembly
//! and template shaping of the report, the report lifecycle, and the
//! attachment workflow around it.
//!
//! Services follow constructor injection; storage collaborators are passed
//! in as `Arc<dyn Trait>` at construction time.

pub mod attachment;
pub mod locks;
pub mod report;
mod timeout;

pub use attachment::{AttachmentService, PublishedAttachment};
pub use locks::ReportLocks;
pub use report::{GenerateReportRequest, ReportDetails, ReportService, ReportState};
