//! Period report pipeline.

pub mod aggregate;
pub mod assemble;
pub mod lifecycle;
pub mod request;
pub mod service;

pub use assemble::{AssembledReport, assemble, shape};
pub use lifecycle::ReportState;
pub use request::{GenerateReportRequest, ValidatedRequest};
pub use service::{ReportDetails, ReportService};
