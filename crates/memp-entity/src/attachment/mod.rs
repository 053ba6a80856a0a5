//! Report attachment entities.

pub mod model;

pub use model::{Attachment, CreateAttachment};
