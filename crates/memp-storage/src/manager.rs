//! Attachment file storage rooted at the service root.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use memp_core::config::AttachmentConfig;
use memp_core::error::{AppError, ErrorKind};
use memp_core::result::AppResult;
use memp_core::types::ReportId;

use crate::mime::resolve_content_type;
use crate::path::{ensure_within_upload_dir, public_path};

/// Attempts at finding an unused file name before giving up.
const MAX_NAME_ATTEMPTS: usize = 3;

/// A file written to the upload directory.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    /// Path relative to the service root.
    pub stored_path: String,
    pub original_filename: String,
    pub size_bytes: u64,
    pub content_type: String,
}

/// Stores, locates and removes report attachment files.
#[derive(Debug, Clone)]
pub struct AttachmentManager {
    service_root: PathBuf,
    upload_dir: String,
    public_dir: String,
    public_segment: String,
    max_upload_size: u64,
}

impl AttachmentManager {
    /// Create the manager and make sure the upload directory exists.
    pub async fn new(config: &AttachmentConfig) -> AppResult<Self> {
        config.validate()?;
        let manager = Self {
            service_root: PathBuf::from(&config.service_root),
            upload_dir: config.upload_dir.trim_matches('/').to_string(),
            public_dir: config.public_dir(),
            public_segment: config.public_segment.clone(),
            max_upload_size: config.max_upload_size_bytes,
        };

        let root = manager.upload_root();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory: {}", root.display()),
                e,
            )
        })?;

        info!(upload_root = %root.display(), max_upload_size = manager.max_upload_size, "Attachment storage ready");
        Ok(manager)
    }

    /// Upload size ceiling in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.max_upload_size
    }

    /// Absolute (or service-root relative) directory uploads are written to.
    pub fn upload_root(&self) -> PathBuf {
        self.service_root.join(&self.upload_dir)
    }

    /// Directory served under `/<public_segment>`.
    pub fn public_root(&self) -> PathBuf {
        self.service_root.join(&self.public_dir)
    }

    /// Write an uploaded file under a fresh, collision-resistant name.
    ///
    /// Oversized payloads are rejected before anything touches the disk.
    pub async fn store(
        &self,
        report_id: ReportId,
        data: Bytes,
        original_filename: &str,
        content_type: Option<&str>,
    ) -> AppResult<StoredFile> {
        let size = data.len() as u64;
        if size > self.max_upload_size {
            return Err(AppError::payload_too_large(format!(
                "Attachment is {size} bytes, the limit is {} bytes",
                self.max_upload_size
            )));
        }

        let original_filename = display_name(original_filename);
        let content_type = resolve_content_type(content_type, &original_filename);
        let extension = safe_extension(&original_filename);

        for _ in 0..MAX_NAME_ATTEMPTS {
            let stored_path = format!("{}/{}", self.upload_dir, generate_name(&extension));
            let full_path = self.service_root.join(&stored_path);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&full_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == IoErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create attachment file: {stored_path}"),
                        e,
                    ));
                }
            };

            if let Err(e) = write_all(&mut file, &data).await {
                drop(file);
                let _ = fs::remove_file(&full_path).await;
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write attachment file: {stored_path}"),
                    e,
                ));
            }

            debug!(%report_id, stored_path = %stored_path, bytes = size, "Stored attachment file");
            return Ok(StoredFile {
                stored_path,
                original_filename,
                size_bytes: size,
                content_type,
            });
        }

        Err(AppError::storage(
            "Could not allocate a unique attachment file name",
        ))
    }

    /// Remove a stored file.
    ///
    /// A file that is already gone counts as deleted. Any other I/O failure
    /// is logged and reported as `false`; only an escaping path is an error.
    pub async fn delete(&self, stored_path: &str) -> AppResult<bool> {
        ensure_within_upload_dir(stored_path, &self.upload_dir)?;
        let full_path = self.service_root.join(stored_path);

        let root = match fs::canonicalize(self.upload_root()).await {
            Ok(root) => root,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!(stored_path, "Upload root absent; attachment file already gone");
                return Ok(true);
            }
            Err(e) => {
                warn!(stored_path, error = %e, "Failed to resolve upload root");
                return Ok(false);
            }
        };

        // Symlinks inside the upload directory must not lead out of it.
        match fs::canonicalize(&full_path).await {
            Ok(resolved) => {
                if !resolved.starts_with(&root) {
                    return Err(AppError::path_traversal(format!(
                        "Attachment path resolves outside the upload root: {stored_path}"
                    )));
                }
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!(stored_path, "Attachment file already absent");
                return Ok(true);
            }
            Err(e) => {
                warn!(stored_path, error = %e, "Failed to resolve attachment file");
                return Ok(false);
            }
        }

        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(stored_path, "Deleted attachment file");
                Ok(true)
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(true),
            Err(e) => {
                warn!(stored_path, error = %e, "Failed to delete attachment file");
                Ok(false)
            }
        }
    }

    /// URL path under which a stored file is served, or `""` when the
    /// stored path is not under the public tree.
    pub fn public_path(&self, stored_path: &str) -> String {
        public_path(stored_path, &self.public_dir, &self.public_segment)
    }
}

async fn write_all(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.flush().await
}

/// `report-<unix millis>-<random>.<ext>`
fn generate_name(extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random = Uuid::new_v4().as_u128() % 1_000_000_000;
    format!("report-{millis}-{random}{extension}")
}

/// Last path component of a client-supplied filename.
fn display_name(original: &str) -> String {
    let normalized = original.replace('\\', "/");
    let name = Path::new(&normalized)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        "attachment".to_string()
    } else {
        name.to_string()
    }
}

/// Extension with its dot, kept only when it is short and alphanumeric.
fn safe_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 10
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => String::new(),
    }
}
