//! Report lifecycle states.

use std::fmt;

use memp_entity::report::ReportStatus;

/// Where a report is in its lifecycle.
///
/// Only `Assembled` (draft) and `Finalized` are persisted; the other states
/// exist for the duration of a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportState {
    Requested,
    Aggregating,
    Assembled,
    AttachmentsUpdated,
    Finalized,
    Failed,
}

impl ReportState {
    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: ReportState) -> bool {
        use ReportState::*;
        matches!(
            (self, next),
            (Requested, Aggregating)
                | (Aggregating, Assembled)
                | (Aggregating, Failed)
                | (Assembled, Aggregating)
                | (Assembled, AttachmentsUpdated)
                | (Assembled, Finalized)
                | (Assembled, Failed)
                | (AttachmentsUpdated, AttachmentsUpdated)
                | (AttachmentsUpdated, Aggregating)
                | (AttachmentsUpdated, Finalized)
        )
    }

    /// Whether the report is still open to regeneration.
    pub fn is_mutable(self) -> bool {
        matches!(self, Self::Assembled | Self::AttachmentsUpdated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Aggregating => "aggregating",
            Self::Assembled => "assembled",
            Self::AttachmentsUpdated => "attachments_updated",
            Self::Finalized => "finalized",
            Self::Failed => "failed",
        }
    }
}

impl From<ReportStatus> for ReportState {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Draft => Self::Assembled,
            ReportStatus::Finalized => Self::Finalized,
        }
    }
}

impl fmt::Display for ReportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
