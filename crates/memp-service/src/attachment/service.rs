//! Upload, listing and removal of report attachments.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use memp_core::config::ReportingConfig;
use memp_core::error::AppError;
use memp_core::result::AppResult;
use memp_core::types::{AttachmentId, ReportId};
use memp_database::traits::{AttachmentRepository, ReportRepository};
use memp_entity::attachment::{Attachment, CreateAttachment};
use memp_entity::report::PeriodReport;
use memp_storage::AttachmentManager;

use crate::locks::ReportLocks;
use crate::report::ReportState;
use crate::timeout::QueryTimeout;

/// An attachment record plus the URL it is served under.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedAttachment {
    pub attachment: Attachment,
    pub public_path: String,
}

impl PublishedAttachment {
    pub fn new(attachment: Attachment, files: &AttachmentManager) -> Self {
        let public_path = files.public_path(&attachment.stored_path);
        Self {
            attachment,
            public_path,
        }
    }
}

/// Manages the attachment set of draft reports.
#[derive(Debug, Clone)]
pub struct AttachmentService {
    reports: Arc<dyn ReportRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    files: Arc<AttachmentManager>,
    locks: ReportLocks,
    query_timeout: QueryTimeout,
}

impl AttachmentService {
    /// Creates a new attachment service.
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        files: Arc<AttachmentManager>,
        locks: ReportLocks,
        config: &ReportingConfig,
    ) -> Self {
        Self {
            reports,
            attachments,
            files,
            locks,
            query_timeout: QueryTimeout::from_config(config),
        }
    }

    /// Upload ceiling in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.files.max_upload_size()
    }

    /// Store a file and attach it to a draft report.
    ///
    /// Uploads to the same report run one at a time. If the record cannot
    /// be written the stored file is removed again.
    pub async fn upload(
        &self,
        report_id: ReportId,
        data: Bytes,
        original_filename: &str,
        content_type: Option<&str>,
    ) -> AppResult<PublishedAttachment> {
        if data.len() as u64 > self.files.max_upload_size() {
            return Err(AppError::payload_too_large(format!(
                "Attachment exceeds the {} byte limit",
                self.files.max_upload_size()
            )));
        }

        let _guard = self.locks.acquire(report_id).await;
        let report = self.find_report(report_id).await?;
        ensure_draft(&report)?;

        let stored = self
            .files
            .store(report_id, data, original_filename, content_type)
            .await?;

        let record = self
            .bounded(self.attachments.create(&CreateAttachment {
                report_id,
                stored_path: stored.stored_path.clone(),
                original_filename: stored.original_filename.clone(),
                size_bytes: stored.size_bytes as i64,
                content_type: stored.content_type.clone(),
            }))
            .await;

        let attachment = match record {
            Ok(attachment) => attachment,
            Err(e) => {
                if !matches!(self.files.delete(&stored.stored_path).await, Ok(true)) {
                    warn!(%report_id, stored_path = %stored.stored_path, "Orphaned attachment file left behind");
                }
                return Err(e);
            }
        };

        info!(
            %report_id,
            attachment_id = %attachment.id,
            size_bytes = attachment.size_bytes,
            state = %ReportState::AttachmentsUpdated,
            "Attachment added"
        );
        Ok(PublishedAttachment::new(attachment, &self.files))
    }

    /// Attachments of a report in upload order.
    pub async fn list(&self, report_id: ReportId) -> AppResult<Vec<PublishedAttachment>> {
        self.find_report(report_id).await?;
        let attachments = self
            .bounded(self.attachments.list_by_report(report_id))
            .await?;
        Ok(attachments
            .into_iter()
            .map(|a| PublishedAttachment::new(a, &self.files))
            .collect())
    }

    /// Remove an attachment and its file.
    ///
    /// An unknown id is treated as already deleted, including one whose
    /// report was deleted while this call waited for the report lock. When
    /// the file cannot be removed the record is kept and `false` is returned.
    pub async fn delete(&self, attachment_id: AttachmentId) -> AppResult<bool> {
        let Some(attachment) = self.find_attachment(attachment_id).await? else {
            return Ok(true);
        };

        let report_id = attachment.report_id;
        let _guard = self.locks.acquire(report_id).await;
        // Re-read under the lock.
        let Some(attachment) = self.find_attachment(attachment_id).await? else {
            return Ok(true);
        };
        let report = self.find_report(report_id).await?;
        ensure_draft(&report)?;

        if !self.files.delete(&attachment.stored_path).await? {
            return Ok(false);
        }
        self.bounded(self.attachments.delete(attachment_id)).await?;

        info!(
            %report_id,
            %attachment_id,
            state = %ReportState::AttachmentsUpdated,
            "Attachment removed"
        );
        Ok(true)
    }

    async fn find_report(&self, report_id: ReportId) -> AppResult<PeriodReport> {
        self.bounded(self.reports.find_by_id(report_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Report {report_id} not found")))
    }

    async fn find_attachment(&self, attachment_id: AttachmentId) -> AppResult<Option<Attachment>> {
        self.bounded(self.attachments.find_by_id(attachment_id)).await
    }

    async fn bounded<T>(&self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        self.query_timeout.bound(call).await
    }
}

fn ensure_draft(report: &PeriodReport) -> AppResult<()> {
    if ReportState::from(report.status).can_transition_to(ReportState::AttachmentsUpdated) {
        Ok(())
    } else {
        Err(AppError::conflict(format!(
            "Report {} is {}; its attachments can no longer change",
            report.id, report.status
        )))
    }
}
