//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use memp_core::config::AppConfig;
use memp_core::result::AppResult;
use memp_database::repositories::{
    PgAttachmentRepository, PgOperationalDataSource, PgReportRepository, PgVesselRepository,
};
use memp_database::{
    AttachmentRepository, DatabasePool, MemoryStore, OperationalDataSource, ReportRepository,
    VesselRepository,
};
use memp_service::{AttachmentService, ReportLocks, ReportService};
use memp_storage::AttachmentManager;

/// The storage collaborators the services are built on.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub vessels: Arc<dyn VesselRepository>,
    pub source: Arc<dyn OperationalDataSource>,
    pub reports: Arc<dyn ReportRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
}

impl Repositories {
    /// Postgres-backed repositories sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            vessels: Arc::new(PgVesselRepository::new(pool.clone())),
            source: Arc::new(PgOperationalDataSource::new(pool.clone())),
            reports: Arc::new(PgReportRepository::new(pool.clone())),
            attachments: Arc::new(PgAttachmentRepository::new(pool)),
        }
    }

    /// Every repository served by the same in-memory store.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            vessels: store.clone(),
            source: store.clone(),
            reports: store.clone(),
            attachments: store,
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Report lifecycle service
    pub reports: Arc<ReportService>,
    /// Attachment workflow service
    pub attachments: Arc<AttachmentService>,
    /// Attachment file storage
    pub files: Arc<AttachmentManager>,
    /// PostgreSQL pool, absent when running on the memory provider
    pub db: Option<DatabasePool>,
}

impl AppState {
    /// Wire services onto the given repositories.
    ///
    /// Both services share one lock registry so uploads, regeneration and
    /// deletion of the same report are serialized.
    pub async fn new(
        config: AppConfig,
        repositories: Repositories,
        db: Option<DatabasePool>,
    ) -> AppResult<Self> {
        let files = Arc::new(AttachmentManager::new(&config.attachments).await?);
        let locks = ReportLocks::new();

        let reports = Arc::new(ReportService::new(
            Arc::clone(&repositories.vessels),
            Arc::clone(&repositories.source),
            Arc::clone(&repositories.reports),
            Arc::clone(&repositories.attachments),
            Arc::clone(&files),
            locks.clone(),
            &config.reporting,
        ));
        let attachments = Arc::new(AttachmentService::new(
            Arc::clone(&repositories.reports),
            Arc::clone(&repositories.attachments),
            Arc::clone(&files),
            locks,
            &config.reporting,
        ));

        Ok(Self {
            config: Arc::new(config),
            reports,
            attachments,
            files,
            db,
        })
    }
}
