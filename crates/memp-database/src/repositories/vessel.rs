//! Vessel registry lookups.

use async_trait::async_trait;
use sqlx::PgPool;

use memp_core::result::AppResult;
use memp_entity::vessel::Vessel;

use crate::error::map_sqlx_error;
use crate::traits::VesselRepository;

#[derive(Debug, Clone)]
pub struct PgVesselRepository {
    pool: PgPool,
}

impl PgVesselRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VesselRepository for PgVesselRepository {
    async fn find_by_id(&self, vessel_id: &str) -> AppResult<Option<Vessel>> {
        sqlx::query_as::<_, Vessel>("SELECT * FROM vessels WHERE id = $1")
            .bind(vessel_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to find vessel"))
    }
}
