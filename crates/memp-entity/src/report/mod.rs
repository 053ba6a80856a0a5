//! Period report entities.

pub mod bucket;
pub mod model;
pub mod status;
pub mod template;

pub use bucket::{FuelBucket, MachineryBucket, ReportBuckets, ReportPeriod};
pub use model::{CreatePeriodReport, PeriodReport};
pub use status::ReportStatus;
pub use template::TemplateKind;
