//! Range queries over the operational event tables.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use memp_core::result::AppResult;
use memp_entity::operational::{FuelConsumptionRow, MachineryRunningRow};

use crate::error::map_sqlx_error;
use crate::traits::OperationalDataSource;

// Entry timestamps are truncated to their UTC calendar day so that the whole
// `to` date is included.
const FUEL_BY_TYPE: &str = "\
    SELECT fuel_type_key, SUM(consumed_mass_tons) AS consumed_mass_tons \
    FROM fuel_consumption_events \
    WHERE vessel_id = $1 \
      AND (entry_date AT TIME ZONE 'UTC')::date BETWEEN $2 AND $3 \
    GROUP BY fuel_type_key \
    ORDER BY fuel_type_key";

const MACHINERY_BY_NAME: &str = "\
    SELECT machinery_name, SUM(running_hours) AS running_hours \
    FROM machinery_running_events \
    WHERE vessel_id = $1 \
      AND (entry_date AT TIME ZONE 'UTC')::date BETWEEN $2 AND $3 \
    GROUP BY machinery_name \
    ORDER BY machinery_name";

/// Operational data source backed by Postgres.
///
/// Each call checks a connection out of the pool for its own duration. The
/// connection is a guard that goes back to the pool when dropped, so it is
/// released on success, on query error, and when the caller abandons the
/// future after a timeout.
#[derive(Debug, Clone)]
pub struct PgOperationalDataSource {
    pool: PgPool,
}

impl PgOperationalDataSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OperationalDataSource for PgOperationalDataSource {
    async fn fetch_fuel_consumption(
        &self,
        vessel_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<FuelConsumptionRow>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to acquire connection for fuel consumption"))?;

        let rows = sqlx::query_as::<_, FuelConsumptionRow>(FUEL_BY_TYPE)
            .bind(vessel_id)
            .bind(from)
            .bind(to)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch fuel consumption"))?;

        debug!(vessel_id, %from, %to, rows = rows.len(), "Fetched fuel consumption");
        Ok(rows)
    }

    async fn fetch_machinery_running_hours(
        &self,
        vessel_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<MachineryRunningRow>> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            map_sqlx_error(e, "Failed to acquire connection for machinery running hours")
        })?;

        let rows = sqlx::query_as::<_, MachineryRunningRow>(MACHINERY_BY_NAME)
            .bind(vessel_id)
            .bind(from)
            .bind(to)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, "Failed to fetch machinery running hours"))?;

        debug!(vessel_id, %from, %to, rows = rows.len(), "Fetched machinery running hours");
        Ok(rows)
    }
}
