//! Request handlers, grouped by resource.

pub mod attachment;
pub mod health;
pub mod report;
