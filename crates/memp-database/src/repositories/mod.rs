//! Postgres implementations of the repository traits.

pub mod attachment;
pub mod operational;
pub mod report;
pub mod vessel;

pub use attachment::PgAttachmentRepository;
pub use operational::PgOperationalDataSource;
pub use report::PgReportRepository;
pub use vessel::PgVesselRepository;
