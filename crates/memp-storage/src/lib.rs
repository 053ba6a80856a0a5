//! # memp-storage
//!
//! Filesystem storage for report attachments: collision-resistant naming,
//! upload size ceiling, containment-checked deletion and the mapping from
//! stored paths to publicly served URLs.

pub mod manager;
pub mod mime;
pub mod path;

pub use manager::{AttachmentManager, StoredFile};
