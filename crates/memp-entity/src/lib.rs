//! # memp-entity
//!
//! Domain entity models for MEMP Shore period reporting. Every struct in
//! this crate is either a database row or a domain value object. Row types
//! additionally derive `sqlx::FromRow`.

pub mod attachment;
pub mod operational;
pub mod report;
pub mod vessel;
