//! Typed path parameter helpers.

use uuid::Uuid;

use memp_core::error::AppError;
use memp_core::types::{AttachmentId, ReportId};

/// Parses a UUID from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid UUID: {s}")))
}

pub fn parse_report_id(s: &str) -> Result<ReportId, AppError> {
    parse_uuid(s).map(ReportId::from_uuid)
}

pub fn parse_attachment_id(s: &str) -> Result<AttachmentId, AppError> {
    parse_uuid(s).map(AttachmentId::from_uuid)
}
