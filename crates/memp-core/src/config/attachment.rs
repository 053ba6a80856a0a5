//! Report attachment storage configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Where uploaded report attachments live and how large they may be.
///
/// Stored paths are recorded relative to `service_root`, e.g.
/// `public/uploads/report_attachments/report-1704067200000-ab12cd34.pdf`,
/// and served to clients under `/<public_segment>/...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// Root directory against which stored relative paths are resolved.
    #[serde(default = "default_service_root")]
    pub service_root: String,
    /// Upload directory, relative to `service_root`.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Path segment that is exposed by the static file route.
    #[serde(default = "default_public_segment")]
    pub public_segment: String,
    /// Maximum accepted upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl AttachmentConfig {
    /// Check that the upload directory is a relative path containing the
    /// public segment.
    pub fn validate(&self) -> Result<(), AppError> {
        let upload = std::path::Path::new(&self.upload_dir);
        if upload.is_absolute() || self.upload_dir.split('/').any(|s| s == "..") {
            return Err(AppError::configuration(format!(
                "attachments.upload_dir must be relative to the service root: {}",
                self.upload_dir
            )));
        }
        if !self
            .upload_dir
            .split('/')
            .any(|segment| segment == self.public_segment)
        {
            return Err(AppError::configuration(format!(
                "attachments.upload_dir '{}' does not contain the public segment '{}'",
                self.upload_dir, self.public_segment
            )));
        }
        Ok(())
    }

    /// Directory that is served statically, relative to `service_root`
    /// (everything up to and including the public segment).
    pub fn public_dir(&self) -> String {
        let mut parts = Vec::new();
        for segment in self.upload_dir.split('/').filter(|s| !s.is_empty()) {
            parts.push(segment);
            if segment == self.public_segment {
                break;
            }
        }
        parts.join("/")
    }
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            service_root: default_service_root(),
            upload_dir: default_upload_dir(),
            public_segment: default_public_segment(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_service_root() -> String {
    ".".to_string()
}

fn default_upload_dir() -> String {
    "public/uploads/report_attachments".to_string()
}

fn default_public_segment() -> String {
    "uploads".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_dir() {
        let config = AttachmentConfig::default();
        assert_eq!(config.public_dir(), "public/uploads");
    }

    #[test]
    fn test_upload_dir_must_contain_public_segment() {
        let config = AttachmentConfig {
            upload_dir: "private/attachments".to_string(),
            ..AttachmentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upload_dir_must_be_relative() {
        let config = AttachmentConfig {
            upload_dir: "../public/uploads".to_string(),
            ..AttachmentConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
