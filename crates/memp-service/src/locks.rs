//! Per-report serialization of attachment changes.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use memp_core::types::ReportId;

/// One async mutex per report id.
///
/// Uploads to the same report queue behind each other; different reports
/// never contend.
#[derive(Debug, Clone, Default)]
pub struct ReportLocks {
    inner: Arc<DashMap<ReportId, Arc<Mutex<()>>>>,
}

impl ReportLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a report's attachment set.
    pub async fn acquire(&self, report_id: ReportId) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .entry(report_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop the lock entry of a deleted report.
    pub fn forget(&self, report_id: ReportId) {
        self.inner.remove(&report_id);
    }
}
