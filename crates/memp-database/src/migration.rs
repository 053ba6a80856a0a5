//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use memp_core::error::{AppError, ErrorKind};
use memp_core::result::AppResult;

/// Apply pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        available = migrator.iter().count(),
        "Applying report schema migrations"
    );

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            "Failed to apply report schema migrations",
            e,
        )
    })?;

    info!("Report schema is up to date");
    Ok(())
}
