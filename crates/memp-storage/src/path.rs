//! Validation of stored relative paths.

use std::path::{Component, Path};

use memp_core::error::AppError;
use memp_core::result::AppResult;

/// Check that `stored` is a plain relative path below `upload_dir`.
///
/// Absolute paths, drive prefixes and `..` components are rejected
/// outright, so the check does not depend on the file existing.
pub fn ensure_within_upload_dir(stored: &str, upload_dir: &str) -> AppResult<()> {
    let path = Path::new(stored);
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || stored.contains('\\') {
        return Err(AppError::path_traversal(format!(
            "Attachment path escapes the upload root: {stored}"
        )));
    }
    if !path.starts_with(upload_dir) || path == Path::new(upload_dir) {
        return Err(AppError::path_traversal(format!(
            "Attachment path is outside the upload root: {stored}"
        )));
    }
    Ok(())
}

/// Map a stored path to the URL it is served under.
///
/// The path must start at the first segment of the public directory (e.g.
/// `public/`) and contain `public_segment`; the URL is everything from that
/// segment on, with a leading slash. Anything else yields an empty string.
pub fn public_path(stored: &str, public_dir: &str, public_segment: &str) -> String {
    let normalized = stored.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    let Some(root) = public_dir.split('/').find(|s| !s.is_empty()) else {
        return String::new();
    };
    if segments.first() != Some(&root) || segments.iter().any(|s| *s == "..") {
        return String::new();
    }
    match segments.iter().position(|s| *s == public_segment) {
        Some(pos) => format!("/{}", segments[pos..].join("/")),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPLOAD_DIR: &str = "public/uploads/report_attachments";

    #[test]
    fn test_accepts_file_in_upload_dir() {
        let stored = "public/uploads/report_attachments/report-1704067200000-42.pdf";
        assert!(ensure_within_upload_dir(stored, UPLOAD_DIR).is_ok());
    }

    #[test]
    fn test_rejects_traversal() {
        for stored in [
            "../../secrets",
            "public/uploads/report_attachments/../../../etc/passwd",
            "/etc/passwd",
            "public/uploads/other/file.pdf",
            "public\\uploads\\report_attachments\\..\\..\\x",
        ] {
            let err = ensure_within_upload_dir(stored, UPLOAD_DIR).unwrap_err();
            assert_eq!(err.kind, memp_core::ErrorKind::PathTraversal, "{stored}");
        }
    }

    #[test]
    fn test_public_path() {
        assert_eq!(
            public_path(
                "public/uploads/report_attachments/report-1-2.pdf",
                "public/uploads",
                "uploads"
            ),
            "/uploads/report_attachments/report-1-2.pdf"
        );
    }

    #[test]
    fn test_public_path_non_conforming_is_empty() {
        assert_eq!(public_path("private/uploads/a.pdf", "public/uploads", "uploads"), "");
        assert_eq!(public_path("public/files/a.pdf", "public/uploads", "uploads"), "");
        assert_eq!(public_path("", "public/uploads", "uploads"), "");
    }
}
