//! Persisted report status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a persisted period report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Assembled and still open to regeneration and attachment edits.
    Draft,
    /// Submitted; buckets are frozen.
    Finalized,
}

impl ReportStatus {
    /// Whether the buckets may still be regenerated.
    pub fn is_mutable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
