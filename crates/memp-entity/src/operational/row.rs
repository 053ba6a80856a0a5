//! Rows returned by the range queries, grouped by dimension key.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fuel consumed for one fuel type within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FuelConsumptionRow {
    pub fuel_type_key: String,
    pub consumed_mass_tons: Decimal,
}

impl FuelConsumptionRow {
    pub fn new(fuel_type_key: impl Into<String>, consumed_mass_tons: Decimal) -> Self {
        Self {
            fuel_type_key: fuel_type_key.into(),
            consumed_mass_tons,
        }
    }
}

impl From<FuelConsumptionRow> for (String, Decimal) {
    fn from(row: FuelConsumptionRow) -> Self {
        (row.fuel_type_key, row.consumed_mass_tons)
    }
}

/// Running hours for one piece of machinery within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MachineryRunningRow {
    pub machinery_name: String,
    pub running_hours: Decimal,
}

impl MachineryRunningRow {
    pub fn new(machinery_name: impl Into<String>, running_hours: Decimal) -> Self {
        Self {
            machinery_name: machinery_name.into(),
            running_hours,
        }
    }
}

impl From<MachineryRunningRow> for (String, Decimal) {
    fn from(row: MachineryRunningRow) -> Self {
        (row.machinery_name, row.running_hours)
    }
}
