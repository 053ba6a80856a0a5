//! Period report entity model.

use chrono::{DateTime, NaiveDate, Utc};
use memp_core::types::ReportId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use super::bucket::{ReportBuckets, ReportPeriod};
use super::status::ReportStatus;
use super::template::TemplateKind;

/// A generated report for one vessel, period and template.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PeriodReport {
    pub id: ReportId,
    pub vessel_id: String,
    pub period_from: NaiveDate,
    pub period_to: NaiveDate,
    pub template: TemplateKind,
    pub status: ReportStatus,
    /// Aggregated buckets per category.
    pub buckets: Json<ReportBuckets>,
    /// Template-shaped rendering of `buckets`.
    pub view: serde_json::Value,
    pub created_at: DateTime<Utc>,
    /// When the buckets were last (re)generated.
    pub generated_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl PeriodReport {
    pub fn period(&self) -> ReportPeriod {
        ReportPeriod::new(self.period_from, self.period_to)
    }

    pub fn is_draft(&self) -> bool {
        self.status.is_mutable()
    }
}

/// Data required to persist a freshly assembled report.
#[derive(Debug, Clone)]
pub struct CreatePeriodReport {
    pub id: ReportId,
    pub vessel_id: String,
    pub period: ReportPeriod,
    pub template: TemplateKind,
    pub buckets: ReportBuckets,
    pub view: serde_json::Value,
}
