//! Attachment entity model.

use chrono::{DateTime, Utc};
use memp_core::types::{AttachmentId, ReportId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A supporting file uploaded for a period report.
///
/// The report owns its attachments exclusively; the row is removed with the
/// report (`ON DELETE CASCADE`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    pub id: AttachmentId,
    pub report_id: ReportId,
    /// Path relative to the service root, never absolute.
    pub stored_path: String,
    /// Filename as sent by the client.
    pub original_filename: String,
    pub size_bytes: i64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Data required to record a stored attachment.
#[derive(Debug, Clone)]
pub struct CreateAttachment {
    pub report_id: ReportId,
    pub stored_path: String,
    pub original_filename: String,
    pub size_bytes: i64,
    pub content_type: String,
}
