//! Content type guessing for uploads that arrive without one.

/// Fallback when neither the client nor the extension says anything useful.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a MIME type from a filename extension.
pub fn mime_from_path(path: &str) -> Option<&'static str> {
    let (_, ext) = path.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        "eml" => "message/rfc822",
        "msg" => "application/vnd.ms-outlook",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(mime)
}

/// Pick the content type to record: the client's value when it sent a
/// specific one, else a guess from the filename.
pub fn resolve_content_type(declared: Option<&str>, filename: &str) -> String {
    match declared.map(str::trim) {
        Some(ct) if !ct.is_empty() && ct != OCTET_STREAM => ct.to_string(),
        _ => mime_from_path(filename).unwrap_or(OCTET_STREAM).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_is_case_insensitive() {
        assert_eq!(mime_from_path("BDN-0042.PDF"), Some("application/pdf"));
        assert_eq!(mime_from_path("no_extension"), None);
    }

    #[test]
    fn test_declared_type_wins() {
        assert_eq!(resolve_content_type(Some("image/png"), "scan.pdf"), "image/png");
    }

    #[test]
    fn test_octet_stream_falls_back_to_extension() {
        assert_eq!(
            resolve_content_type(Some(OCTET_STREAM), "noon-report.xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(resolve_content_type(None, "blob"), OCTET_STREAM);
    }
}
