//! Response DTOs.
//!
//! Stored attachment paths stay server-side; clients only ever see the
//! public path the file is served under.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use memp_core::types::{AttachmentId, ReportId};
use memp_entity::report::{PeriodReport, ReportBuckets, ReportStatus, TemplateKind};
use memp_service::{PublishedAttachment, ReportDetails};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Reporting period, both ends inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// A persisted report with its attachments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: ReportId,
    pub vessel_id: String,
    pub period: PeriodResponse,
    pub template: TemplateKind,
    pub status: ReportStatus,
    pub buckets: ReportBuckets,
    pub view: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
    pub attachments: Vec<AttachmentResponse>,
}

impl From<ReportDetails> for ReportResponse {
    fn from(details: ReportDetails) -> Self {
        let ReportDetails {
            report,
            attachments,
        } = details;
        Self {
            id: report.id,
            vessel_id: report.vessel_id,
            period: PeriodResponse {
                from: report.period_from,
                to: report.period_to,
            },
            template: report.template,
            status: report.status,
            buckets: report.buckets.0,
            view: report.view,
            created_at: report.created_at,
            generated_at: report.generated_at,
            finalized_at: report.finalized_at,
            attachments: attachments.into_iter().map(AttachmentResponse::from).collect(),
        }
    }
}

/// Report listing entry; buckets and attachments are fetched per report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryResponse {
    pub id: ReportId,
    pub vessel_id: String,
    pub period: PeriodResponse,
    pub template: TemplateKind,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl From<PeriodReport> for ReportSummaryResponse {
    fn from(report: PeriodReport) -> Self {
        Self {
            id: report.id,
            vessel_id: report.vessel_id,
            period: PeriodResponse {
                from: report.period_from,
                to: report.period_to,
            },
            template: report.template,
            status: report.status,
            created_at: report.created_at,
            generated_at: report.generated_at,
            finalized_at: report.finalized_at,
        }
    }
}

/// Attachment as exposed to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub id: AttachmentId,
    pub report_id: ReportId,
    pub original_filename: String,
    /// URL path the file is served under, e.g. `/uploads/report_attachments/...`.
    pub public_path: String,
    /// Size in bytes.
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<PublishedAttachment> for AttachmentResponse {
    fn from(published: PublishedAttachment) -> Self {
        let attachment = published.attachment;
        Self {
            id: attachment.id,
            report_id: attachment.report_id,
            original_filename: attachment.original_filename,
            public_path: published.public_path,
            size: attachment.size_bytes,
            content_type: attachment.content_type,
            uploaded_at: attachment.uploaded_at,
        }
    }
}

/// Outcome of a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Version.
    pub version: String,
    /// `"connected"`, `"unreachable"` or `"memory"`.
    pub database: String,
}
