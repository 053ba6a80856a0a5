//! Attachment workflow around a report.

pub mod service;

pub use service::{AttachmentService, PublishedAttachment};
