//! # memp-core
//!
//! Core crate for MEMP Shore. Contains configuration schemas, typed
//! identifiers, pagination types, and the unified error system shared by
//! the report pipeline crates.
//!
//! This crate has **no** internal dependencies on other MEMP crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
