//! Period report repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use memp_core::result::AppResult;
use memp_core::types::{PageRequest, PageResponse, ReportId};
use memp_entity::report::{CreatePeriodReport, PeriodReport, ReportBuckets};

use crate::error::map_sqlx_error;
use crate::traits::ReportRepository;

#[derive(Debug, Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn create(&self, data: &CreatePeriodReport) -> AppResult<PeriodReport> {
        sqlx::query_as::<_, PeriodReport>(
            "INSERT INTO period_reports \
             (id, vessel_id, period_from, period_to, template, status, buckets, view) \
             VALUES ($1, $2, $3, $4, $5, 'draft', $6, $7) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.vessel_id)
        .bind(data.period.from)
        .bind(data.period.to)
        .bind(data.template)
        .bind(Json(&data.buckets))
        .bind(&data.view)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to create period report"))
    }

    async fn find_by_id(&self, id: ReportId) -> AppResult<Option<PeriodReport>> {
        sqlx::query_as::<_, PeriodReport>("SELECT * FROM period_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to find period report"))
    }

    async fn update_buckets(
        &self,
        id: ReportId,
        buckets: &ReportBuckets,
        view: &serde_json::Value,
    ) -> AppResult<Option<PeriodReport>> {
        sqlx::query_as::<_, PeriodReport>(
            "UPDATE period_reports SET buckets = $2, view = $3, generated_at = NOW() \
             WHERE id = $1 AND status = 'draft' RETURNING *",
        )
        .bind(id)
        .bind(Json(buckets))
        .bind(view)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to update report buckets"))
    }

    async fn finalize(&self, id: ReportId) -> AppResult<Option<PeriodReport>> {
        sqlx::query_as::<_, PeriodReport>(
            "UPDATE period_reports SET status = 'finalized', finalized_at = NOW() \
             WHERE id = $1 AND status = 'draft' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to finalize period report"))
    }

    async fn delete(&self, id: ReportId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM period_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to delete period report"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_vessel(
        &self,
        vessel_id: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<PeriodReport>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM period_reports WHERE vessel_id = $1")
                .bind(vessel_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(e, "Failed to count period reports"))?;

        let reports = sqlx::query_as::<_, PeriodReport>(
            "SELECT * FROM period_reports WHERE vessel_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(vessel_id)
        .bind(page.limit() as i64)
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Failed to list period reports"))?;

        Ok(PageResponse::new(reports, page, total as u64))
    }
}
