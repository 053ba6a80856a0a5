//! Time-series events recorded on board.
//!
//! These rows are written by the logbook side of the platform and are never
//! mutated by reporting.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fuel burned by a vessel, recorded per logbook entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FuelConsumptionEvent {
    pub id: i64,
    pub vessel_id: String,
    /// Fuel type key (`HFO`, `MDO`, `LNG`, ...).
    pub fuel_type_key: String,
    /// Consumed mass in metric tons.
    pub consumed_mass_tons: Decimal,
    pub entry_date: DateTime<Utc>,
}

/// Running hours logged for one piece of machinery.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MachineryRunningEvent {
    pub id: i64,
    pub vessel_id: String,
    pub machinery_name: String,
    pub running_hours: Decimal,
    pub entry_date: DateTime<Utc>,
}
