//! Storage seams of the report pipeline.
//!
//! Services hold these as `Arc<dyn Trait>` so the Postgres repositories and
//! the in-memory store are interchangeable.

use async_trait::async_trait;
use chrono::NaiveDate;

use memp_core::result::AppResult;
use memp_core::types::{AttachmentId, PageRequest, PageResponse, ReportId};
use memp_entity::attachment::{Attachment, CreateAttachment};
use memp_entity::operational::{FuelConsumptionRow, MachineryRunningRow};
use memp_entity::report::{CreatePeriodReport, PeriodReport, ReportBuckets};
use memp_entity::vessel::Vessel;

/// Range-filtered reads of raw operational records.
///
/// Implementations may group rows by dimension key at the storage layer but
/// must not apply any other business aggregation. Both bounds are inclusive
/// and compared by calendar day.
#[async_trait]
pub trait OperationalDataSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fuel consumed per fuel type for a vessel within `[from, to]`.
    async fn fetch_fuel_consumption(
        &self,
        vessel_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<FuelConsumptionRow>>;

    /// Running hours per machinery for a vessel within `[from, to]`.
    async fn fetch_machinery_running_hours(
        &self,
        vessel_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<MachineryRunningRow>>;
}

/// Read access to the fleet registry.
#[async_trait]
pub trait VesselRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn find_by_id(&self, vessel_id: &str) -> AppResult<Option<Vessel>>;
}

/// Persistence of period reports.
#[async_trait]
pub trait ReportRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new report in `draft` status.
    async fn create(&self, data: &CreatePeriodReport) -> AppResult<PeriodReport>;

    async fn find_by_id(&self, id: ReportId) -> AppResult<Option<PeriodReport>>;

    /// Replace buckets and view of a draft report in a single statement.
    /// Returns `None` when the report does not exist or is no longer a draft.
    async fn update_buckets(
        &self,
        id: ReportId,
        buckets: &ReportBuckets,
        view: &serde_json::Value,
    ) -> AppResult<Option<PeriodReport>>;

    /// Move a draft report to `finalized`. Returns `None` when the report
    /// does not exist or is already finalized.
    async fn finalize(&self, id: ReportId) -> AppResult<Option<PeriodReport>>;

    /// Hard-delete a report and, by cascade, its attachment rows.
    async fn delete(&self, id: ReportId) -> AppResult<bool>;

    /// Reports of a vessel, newest first.
    async fn list_by_vessel(
        &self,
        vessel_id: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<PeriodReport>>;
}

/// Persistence of attachment records.
#[async_trait]
pub trait AttachmentRepository: Send + Sync + std::fmt::Debug + 'static {
    async fn create(&self, data: &CreateAttachment) -> AppResult<Attachment>;

    async fn find_by_id(&self, id: AttachmentId) -> AppResult<Option<Attachment>>;

    /// Attachments of a report in upload order.
    async fn list_by_report(&self, report_id: ReportId) -> AppResult<Vec<Attachment>>;

    async fn delete(&self, id: AttachmentId) -> AppResult<bool>;
}
