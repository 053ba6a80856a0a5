//! Aggregated buckets and the reporting period they cover.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inclusive reporting period, compared at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Whether the bounds are in order.
    pub fn is_ordered(&self) -> bool {
        self.from <= self.to
    }

    /// Whether a timestamp falls inside the period. Time of day is ignored,
    /// so anything logged on the `to` date counts.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.from <= day && day <= self.to
    }
}

/// Total fuel consumed for one fuel type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelBucket {
    pub key: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Total running hours for one piece of machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineryBucket {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Buckets of a report, per category, each ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBuckets {
    pub fuel: Vec<FuelBucket>,
    pub machinery: Vec<MachineryBucket>,
}

impl ReportBuckets {
    /// Whether no category produced any bucket.
    pub fn is_empty(&self) -> bool {
        self.fuel.is_empty() && self.machinery.is_empty()
    }
}
