//! Report lifecycle: generation, regeneration, finalization and deletion.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use memp_core::config::ReportingConfig;
use memp_core::error::AppError;
use memp_core::result::AppResult;
use memp_core::types::{PageRequest, PageResponse, ReportId};
use memp_database::traits::{
    AttachmentRepository, OperationalDataSource, ReportRepository, VesselRepository,
};
use memp_entity::report::{CreatePeriodReport, PeriodReport, ReportPeriod, TemplateKind};
use memp_storage::AttachmentManager;

use super::aggregate::aggregate;
use super::assemble::{AssembledReport, assemble};
use super::lifecycle::ReportState;
use super::request::GenerateReportRequest;
use crate::attachment::PublishedAttachment;
use crate::locks::ReportLocks;
use crate::timeout::QueryTimeout;

/// A persisted report together with its attachments.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetails {
    pub report: PeriodReport,
    pub attachments: Vec<PublishedAttachment>,
}

/// Drives reports through their lifecycle.
#[derive(Debug, Clone)]
pub struct ReportService {
    vessels: Arc<dyn VesselRepository>,
    source: Arc<dyn OperationalDataSource>,
    reports: Arc<dyn ReportRepository>,
    attachments: Arc<dyn AttachmentRepository>,
    files: Arc<AttachmentManager>,
    locks: ReportLocks,
    query_timeout: QueryTimeout,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(
        vessels: Arc<dyn VesselRepository>,
        source: Arc<dyn OperationalDataSource>,
        reports: Arc<dyn ReportRepository>,
        attachments: Arc<dyn AttachmentRepository>,
        files: Arc<AttachmentManager>,
        locks: ReportLocks,
        config: &ReportingConfig,
    ) -> Self {
        Self {
            vessels,
            source,
            reports,
            attachments,
            files,
            locks,
            query_timeout: QueryTimeout::from_config(config),
        }
    }

    /// Validate, aggregate, assemble and persist a new draft report.
    ///
    /// Nothing is read before the request is valid, and nothing is written
    /// unless both operational fetches succeed.
    pub async fn generate(&self, request: GenerateReportRequest) -> AppResult<ReportDetails> {
        let request = request.into_validated()?;
        let report_id = ReportId::new();
        info!(
            %report_id,
            vessel_id = %request.vessel_id,
            template = %request.template,
            from = %request.period.from,
            to = %request.period.to,
            state = %ReportState::Requested,
            "Report requested"
        );

        self.bounded(self.vessels.find_by_id(&request.vessel_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Vessel '{}' not found", request.vessel_id)))?;

        let assembled = self
            .aggregate(
                report_id,
                ReportState::Requested,
                &request.vessel_id,
                request.period,
                request.template,
            )
            .await?;

        let report = self
            .bounded(self.reports.create(&CreatePeriodReport {
                id: report_id,
                vessel_id: assembled.vessel_id,
                period: assembled.period,
                template: assembled.template,
                buckets: assembled.buckets,
                view: assembled.view,
            }))
            .await
            .inspect_err(|e| self.log_failure(report_id, ReportState::Assembled, e))?;

        info!(%report_id, vessel_id = %report.vessel_id, state = %ReportState::Assembled, "Report assembled");
        Ok(ReportDetails {
            report,
            attachments: Vec::new(),
        })
    }

    /// Fetch a report with its attachments.
    pub async fn get(&self, report_id: ReportId) -> AppResult<ReportDetails> {
        let report = self.find(report_id).await?;
        self.with_attachments(report).await
    }

    /// Re-run aggregation for a draft report, keeping its attachments.
    ///
    /// Holds the report lock, so uploads and deletion of the same report
    /// wait until the new buckets are written.
    pub async fn regenerate(&self, report_id: ReportId) -> AppResult<ReportDetails> {
        let _guard = self.locks.acquire(report_id).await;
        let existing = self.find(report_id).await?;
        let state = ReportState::from(existing.status);
        if !state.is_mutable() {
            return Err(AppError::conflict(format!(
                "Report {report_id} is {} and can no longer be regenerated",
                existing.status
            )));
        }

        let assembled = self
            .aggregate(
                report_id,
                state,
                &existing.vessel_id,
                existing.period(),
                existing.template,
            )
            .await?;

        let updated = match self
            .bounded(
                self.reports
                    .update_buckets(report_id, &assembled.buckets, &assembled.view),
            )
            .await
            .inspect_err(|e| self.log_failure(report_id, ReportState::Assembled, e))?
        {
            Some(report) => report,
            // Finalized while we were aggregating.
            None => {
                self.find(report_id).await?;
                return Err(AppError::conflict(format!(
                    "Report {report_id} was finalized during regeneration"
                )));
            }
        };

        info!(%report_id, vessel_id = %updated.vessel_id, state = %ReportState::Assembled, "Report regenerated");
        self.with_attachments(updated).await
    }

    /// Freeze a draft report.
    pub async fn finalize(&self, report_id: ReportId) -> AppResult<ReportDetails> {
        let existing = self.find(report_id).await?;
        if !ReportState::from(existing.status).can_transition_to(ReportState::Finalized) {
            return Err(AppError::conflict(format!(
                "Report {report_id} is already finalized"
            )));
        }

        let report = self
            .bounded(self.reports.finalize(report_id))
            .await?
            .ok_or_else(|| AppError::conflict(format!("Report {report_id} is already finalized")))?;

        info!(%report_id, vessel_id = %report.vessel_id, state = %ReportState::Finalized, "Report finalized");
        self.with_attachments(report).await
    }

    /// Delete a report after releasing its attachment files.
    ///
    /// If any file cannot be released the report is kept, so the delete can
    /// be retried; files already removed count as released next time.
    pub async fn delete(&self, report_id: ReportId) -> AppResult<()> {
        let _guard = self.locks.acquire(report_id).await;
        self.find(report_id).await?;

        let attachments = self.bounded(self.attachments.list_by_report(report_id)).await?;
        let mut unreleased = 0usize;
        for attachment in &attachments {
            match self.files.delete(&attachment.stored_path).await {
                Ok(true) => {}
                Ok(false) => unreleased += 1,
                Err(e) => {
                    warn!(%report_id, attachment_id = %attachment.id, error = %e, "Refusing to release attachment");
                    unreleased += 1;
                }
            }
        }
        if unreleased > 0 {
            return Err(AppError::storage(format!(
                "{unreleased} attachment file(s) of report {report_id} could not be released"
            )));
        }

        self.bounded(self.reports.delete(report_id)).await?;
        self.locks.forget(report_id);
        info!(%report_id, attachments = attachments.len(), "Report deleted");
        Ok(())
    }

    /// Reports of a vessel, newest first.
    pub async fn list_for_vessel(
        &self,
        vessel_id: &str,
        page: PageRequest,
    ) -> AppResult<PageResponse<PeriodReport>> {
        self.bounded(self.vessels.find_by_id(vessel_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Vessel '{vessel_id}' not found")))?;
        self.bounded(self.reports.list_by_vessel(vessel_id, page)).await
    }

    /// Fetch both categories concurrently, then reduce and assemble.
    async fn aggregate(
        &self,
        report_id: ReportId,
        from_state: ReportState,
        vessel_id: &str,
        period: ReportPeriod,
        template: TemplateKind,
    ) -> AppResult<AssembledReport> {
        debug_assert!(from_state.can_transition_to(ReportState::Aggregating));
        info!(%report_id, vessel_id, state = %ReportState::Aggregating, "Aggregating operational data");

        let fetched = tokio::try_join!(
            self.bounded(
                self.source
                    .fetch_fuel_consumption(vessel_id, period.from, period.to)
            ),
            self.bounded(
                self.source
                    .fetch_machinery_running_hours(vessel_id, period.from, period.to)
            ),
        );
        let (fuel_rows, machinery_rows) =
            fetched.inspect_err(|e| self.log_failure(report_id, ReportState::Aggregating, e))?;

        let assembled = assemble(
            vessel_id,
            period,
            template,
            aggregate(fuel_rows),
            aggregate(machinery_rows),
        );
        if assembled.buckets.is_empty() {
            info!(%report_id, vessel_id, "No operational data in period");
        }
        Ok(assembled)
    }

    async fn find(&self, report_id: ReportId) -> AppResult<PeriodReport> {
        self.bounded(self.reports.find_by_id(report_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Report {report_id} not found")))
    }

    async fn with_attachments(&self, report: PeriodReport) -> AppResult<ReportDetails> {
        let attachments = self
            .bounded(self.attachments.list_by_report(report.id))
            .await?
            .into_iter()
            .map(|attachment| PublishedAttachment::new(attachment, &self.files))
            .collect();
        Ok(ReportDetails {
            report,
            attachments,
        })
    }

    /// Bound a storage call by the configured query timeout.
    async fn bounded<T>(&self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        self.query_timeout.bound(call).await
    }

    fn log_failure(&self, report_id: ReportId, from_state: ReportState, error: &AppError) {
        warn!(
            %report_id,
            from = %from_state,
            state = %ReportState::Failed,
            error_kind = %error.kind,
            error = %error.message,
            "Report generation failed"
        );
    }
}
