//! Vessel registry entities.

pub mod model;

pub use model::Vessel;
