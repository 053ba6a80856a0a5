//! Report attachment repository.

use async_trait::async_trait;
use sqlx::PgPool;

use memp_core::result::AppResult;
use memp_core::types::{AttachmentId, ReportId};
use memp_entity::attachment::{Attachment, CreateAttachment};

use crate::error::map_sqlx_error;
use crate::traits::AttachmentRepository;

#[derive(Debug, Clone)]
pub struct PgAttachmentRepository {
    pool: PgPool,
}

impl PgAttachmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentRepository for PgAttachmentRepository {
    async fn create(&self, data: &CreateAttachment) -> AppResult<Attachment> {
        sqlx::query_as::<_, Attachment>(
            "INSERT INTO report_attachments \
             (id, report_id, stored_path, original_filename, size_bytes, content_type) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(AttachmentId::new())
        .bind(data.report_id)
        .bind(&data.stored_path)
        .bind(&data.original_filename)
        .bind(data.size_bytes)
        .bind(&data.content_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to record attachment"))
    }

    async fn find_by_id(&self, id: AttachmentId) -> AppResult<Option<Attachment>> {
        sqlx::query_as::<_, Attachment>("SELECT * FROM report_attachments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to find attachment"))
    }

    async fn list_by_report(&self, report_id: ReportId) -> AppResult<Vec<Attachment>> {
        sqlx::query_as::<_, Attachment>(
            "SELECT * FROM report_attachments WHERE report_id = $1 \
             ORDER BY uploaded_at ASC, id ASC",
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to list attachments"))
    }

    async fn delete(&self, id: AttachmentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM report_attachments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete attachment"))?;
        Ok(result.rows_affected() > 0)
    }
}
