//! Vessel entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A ship in the fleet registry. Read-only from the reporting pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    /// Fleet-assigned ship identifier (e.g. `"V1"`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// IMO number.
    pub imo_number: Option<String>,
    /// Vessel type (bulk carrier, tanker, ...).
    pub vessel_type: Option<String>,
    /// Gross tonnage.
    pub gross_tonnage: Option<Decimal>,
    /// Main engine description.
    pub main_engine: Option<String>,
    /// When the vessel was registered.
    pub created_at: DateTime<Utc>,
}
