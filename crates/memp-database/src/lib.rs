//! # memp-database
//!
//! PostgreSQL connection management, the repository traits the report
//! pipeline is written against, and two implementations of them: Postgres
//! repositories and an in-memory store for local runs and tests.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod traits;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use traits::{AttachmentRepository, OperationalDataSource, ReportRepository, VesselRepository};
