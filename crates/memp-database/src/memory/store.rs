//! Process-local store backed by `DashMap`.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use sqlx::types::Json;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use memp_core::error::AppError;
use memp_core::result::AppResult;
use memp_core::types::{AttachmentId, PageRequest, PageResponse, ReportId};
use memp_entity::attachment::{Attachment, CreateAttachment};
use memp_entity::operational::{
    FuelConsumptionEvent, FuelConsumptionRow, MachineryRunningEvent, MachineryRunningRow,
};
use memp_entity::report::{CreatePeriodReport, PeriodReport, ReportBuckets, ReportPeriod, ReportStatus};
use memp_entity::vessel::Vessel;

use crate::traits::{AttachmentRepository, OperationalDataSource, ReportRepository, VesselRepository};

/// In-memory store for vessels, operational events, reports and attachments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    vessels: DashMap<String, Vessel>,
    fuel_events: RwLock<Vec<FuelConsumptionEvent>>,
    machinery_events: RwLock<Vec<MachineryRunningEvent>>,
    reports: DashMap<ReportId, PeriodReport>,
    attachments: DashMap<AttachmentId, Attachment>,
    next_event_id: AtomicI64,
    /// Number of operational fetches served.
    operational_reads: AtomicUsize,
    faults: Mutex<Faults>,
}

#[derive(Debug, Default)]
struct Faults {
    fetch_delay: Option<Duration>,
    write_delay: Option<Duration>,
    machinery_error: Option<AppError>,
    attachment_insert_error: Option<AppError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vessel in the fleet registry.
    pub fn add_vessel(&self, id: &str, name: &str) -> Vessel {
        let vessel = Vessel {
            id: id.to_string(),
            name: name.to_string(),
            imo_number: None,
            vessel_type: None,
            gross_tonnage: None,
            main_engine: None,
            created_at: Utc::now(),
        };
        self.vessels.insert(vessel.id.clone(), vessel.clone());
        vessel
    }

    /// Log a fuel consumption event.
    pub async fn record_fuel(
        &self,
        vessel_id: &str,
        fuel_type_key: &str,
        consumed_mass_tons: Decimal,
        entry_date: DateTime<Utc>,
    ) {
        let event = FuelConsumptionEvent {
            id: self.next_event_id.fetch_add(1, Ordering::Relaxed) + 1,
            vessel_id: vessel_id.to_string(),
            fuel_type_key: fuel_type_key.to_string(),
            consumed_mass_tons,
            entry_date,
        };
        self.fuel_events.write().await.push(event);
    }

    /// Log a machinery running-hours event.
    pub async fn record_machinery(
        &self,
        vessel_id: &str,
        machinery_name: &str,
        running_hours: Decimal,
        entry_date: DateTime<Utc>,
    ) {
        let event = MachineryRunningEvent {
            id: self.next_event_id.fetch_add(1, Ordering::Relaxed) + 1,
            vessel_id: vessel_id.to_string(),
            machinery_name: machinery_name.to_string(),
            running_hours,
            entry_date,
        };
        self.machinery_events.write().await.push(event);
    }

    /// How many operational fetches have been served so far.
    pub fn operational_reads(&self) -> usize {
        self.operational_reads.load(Ordering::SeqCst)
    }

    /// Delay every operational fetch, to simulate a hung store.
    pub async fn set_fetch_delay(&self, delay: Option<Duration>) {
        self.faults.lock().await.fetch_delay = delay;
    }

    /// Delay every report and attachment write, to simulate a stuck insert.
    pub async fn set_write_delay(&self, delay: Option<Duration>) {
        self.faults.lock().await.write_delay = delay;
    }

    /// Make machinery fetches fail with the given error.
    pub async fn fail_machinery_with(&self, error: Option<AppError>) {
        self.faults.lock().await.machinery_error = error;
    }

    /// Make attachment inserts fail with the given error.
    pub async fn fail_attachment_insert_with(&self, error: Option<AppError>) {
        self.faults.lock().await.attachment_insert_error = error;
    }

    async fn begin_read(&self) {
        self.operational_reads.fetch_add(1, Ordering::SeqCst);
        let delay = self.faults.lock().await.fetch_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn begin_write(&self) {
        let delay = self.faults.lock().await.write_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl OperationalDataSource for MemoryStore {
    async fn fetch_fuel_consumption(
        &self,
        vessel_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<FuelConsumptionRow>> {
        self.begin_read().await;
        let period = ReportPeriod::new(from, to);
        let rows: Vec<FuelConsumptionRow> = self
            .fuel_events
            .read()
            .await
            .iter()
            .filter(|e| e.vessel_id == vessel_id && period.contains(e.entry_date))
            .map(|e| FuelConsumptionRow::new(e.fuel_type_key.clone(), e.consumed_mass_tons))
            .collect();
        debug!(vessel_id, rows = rows.len(), "Served fuel rows from memory");
        Ok(rows)
    }

    async fn fetch_machinery_running_hours(
        &self,
        vessel_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<MachineryRunningRow>> {
        self.begin_read().await;
        if let Some(err) = self.faults.lock().await.machinery_error.clone() {
            return Err(err);
        }
        let period = ReportPeriod::new(from, to);
        let rows: Vec<MachineryRunningRow> = self
            .machinery_events
            .read()
            .await
            .iter()
            .filter(|e| e.vessel_id == vessel_id && period.contains(e.entry_date))
            .map(|e| MachineryRunningRow::new(e.machinery_name.clone(), e.running_hours))
            .collect();
        debug!(vessel_id, rows = rows.len(), "Served machinery rows from memory");
        Ok(rows)
    }
}

#[async_trait]
impl VesselRepository for MemoryStore {
    async fn find_by_id(&self, vessel_id: &str) -> AppResult<Option<Vessel>> {
        Ok(self.vessels.get(vessel_id).map(|v| v.clone()))
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn create(&self, data: &CreatePeriodReport) -> AppResult<PeriodReport> {
        self.begin_write().await;
        if self.reports.contains_key(&data.id) {
            return Err(AppError::conflict(format!("Report {} already exists", data.id)));
        }
        let now = Utc::now();
        let report = PeriodReport {
            id: data.id,
            vessel_id: data.vessel_id.clone(),
            period_from: data.period.from,
            period_to: data.period.to,
            template: data.template,
            status: ReportStatus::Draft,
            buckets: Json(data.buckets.clone()),
            view: data.view.clone(),
            created_at: now,
            generated_at: now,
            finalized_at: None,
        };
        self.reports.insert(report.id, report.clone());
        Ok(report)
    }

    async fn find_by_id(&self, id: ReportId) -> AppResult<Option<PeriodReport>> {
        Ok(self.reports.get(&id).map(|r| r.clone()))
    }

    async fn update_buckets(
        &self,
        id: ReportId,
        buckets: &ReportBuckets,
        view: &serde_json::Value,
    ) -> AppResult<Option<PeriodReport>> {
        self.begin_write().await;
        let Some(mut report) = self.reports.get_mut(&id) else {
            return Ok(None);
        };
        if !report.is_draft() {
            return Ok(None);
        }
        report.buckets = Json(buckets.clone());
        report.view = view.clone();
        report.generated_at = Utc::now();
        Ok(Some(report.clone()))
    }

    async fn finalize(&self, id: ReportId) -> AppResult<Option<PeriodReport>> {
        self.begin_write().await;
        let Some(mut report) = self.reports.get_mut(&id) else {
            return Ok(None);
        };
        if !report.is_draft() {
            return Ok(None);
        }
        report.status = ReportStatus::Finalized;
        report.finalized_at = Some(Utc::now());
        Ok(Some(report.clone()))
    }

    async fn delete(&self, id: ReportId) -> AppResult<bool> {
        self.begin_write().await;
        let removed = self.reports.remove(&id).is_some();
        if removed {
            self.attachments.retain(|_, a| a.report_id != id);
        }
        Ok(removed)
    }

    async fn list_by_vessel(
        &self,
        vessel_id: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<PeriodReport>> {
        let mut reports: Vec<PeriodReport> = self
            .reports
            .iter()
            .filter(|r| r.vessel_id == vessel_id)
            .map(|r| r.clone())
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = reports.len() as u64;
        let items = reports
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }
}

#[async_trait]
impl AttachmentRepository for MemoryStore {
    async fn create(&self, data: &CreateAttachment) -> AppResult<Attachment> {
        self.begin_write().await;
        if let Some(err) = self.faults.lock().await.attachment_insert_error.clone() {
            return Err(err);
        }
        if !self.reports.contains_key(&data.report_id) {
            return Err(AppError::not_found(format!(
                "Report {} not found",
                data.report_id
            )));
        }
        let attachment = Attachment {
            id: AttachmentId::new(),
            report_id: data.report_id,
            stored_path: data.stored_path.clone(),
            original_filename: data.original_filename.clone(),
            size_bytes: data.size_bytes,
            content_type: data.content_type.clone(),
            uploaded_at: Utc::now(),
        };
        self.attachments.insert(attachment.id, attachment.clone());
        Ok(attachment)
    }

    async fn find_by_id(&self, id: AttachmentId) -> AppResult<Option<Attachment>> {
        Ok(self.attachments.get(&id).map(|a| a.clone()))
    }

    async fn list_by_report(&self, report_id: ReportId) -> AppResult<Vec<Attachment>> {
        let mut attachments: Vec<Attachment> = self
            .attachments
            .iter()
            .filter(|a| a.report_id == report_id)
            .map(|a| a.clone())
            .collect();
        attachments.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.id.cmp(&b.id)));
        Ok(attachments)
    }

    async fn delete(&self, id: AttachmentId) -> AppResult<bool> {
        self.begin_write().await;
        Ok(self.attachments.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use memp_entity::report::TemplateKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn draft(vessel_id: &str) -> CreatePeriodReport {
        CreatePeriodReport {
            id: ReportId::new(),
            vessel_id: vessel_id.to_string(),
            period: ReportPeriod::new(day(1), day(31)),
            template: TemplateKind::EuMrv,
            buckets: ReportBuckets::default(),
            view: serde_json::json!({}),
        }
    }

    #[tokio::test]
    async fn test_fuel_rows_are_filtered_by_day() {
        let store = MemoryStore::new();
        store.add_vessel("V1", "Northern Star");
        let late = Utc.with_ymd_and_hms(2024, 1, 31, 22, 15, 0).unwrap();
        let outside = Utc.with_ymd_and_hms(2024, 2, 1, 0, 5, 0).unwrap();
        store.record_fuel("V1", "HFO", Decimal::new(105, 1), late).await;
        store.record_fuel("V1", "HFO", Decimal::new(40, 1), outside).await;
        store.record_fuel("V2", "HFO", Decimal::new(10, 1), late).await;

        let rows = store.fetch_fuel_consumption("V1", day(1), day(31)).await.unwrap();
        assert_eq!(rows, vec![FuelConsumptionRow::new("HFO", Decimal::new(105, 1))]);
        assert_eq!(store.operational_reads(), 1);
    }

    #[tokio::test]
    async fn test_finalize_only_once() {
        let store = MemoryStore::new();
        let report = ReportRepository::create(&store, &draft("V1")).await.unwrap();
        assert!(store.finalize(report.id).await.unwrap().is_some());
        assert!(store.finalize(report.id).await.unwrap().is_none());
        let frozen = store
            .update_buckets(report.id, &ReportBuckets::default(), &serde_json::json!({}))
            .await
            .unwrap();
        assert!(frozen.is_none());
    }

    #[tokio::test]
    async fn test_delete_report_cascades_to_attachments() {
        let store = MemoryStore::new();
        let report = ReportRepository::create(&store, &draft("V1")).await.unwrap();
        let attachment = AttachmentRepository::create(
            &store,
            &CreateAttachment {
                report_id: report.id,
                stored_path: "public/uploads/report_attachments/report-1-a.pdf".to_string(),
                original_filename: "bdn.pdf".to_string(),
                size_bytes: 3,
                content_type: "application/pdf".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(ReportRepository::delete(&store, report.id).await.unwrap());
        assert!(AttachmentRepository::find_by_id(&store, attachment.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_by_vessel_newest_first() {
        let store = MemoryStore::new();
        let first = ReportRepository::create(&store, &draft("V1")).await.unwrap();
        let second = ReportRepository::create(&store, &draft("V1")).await.unwrap();
        ReportRepository::create(&store, &draft("V2")).await.unwrap();

        let page = store.list_by_vessel("V1", PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].id, second.id);
        assert_eq!(page.items[1].id, first.id);
    }
}
