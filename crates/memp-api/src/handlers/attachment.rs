//! Report attachment handlers.

use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};

use memp_core::error::AppError;

use crate::dto::response::{ApiResponse, AttachmentResponse, DeletedResponse};
use crate::extractors::path::{parse_attachment_id, parse_report_id};
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// POST /api/reports/{id}/attachments
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AttachmentResponse>>), AppError> {
    let report_id = parse_report_id(&id)?;
    let max_size = state.attachments.max_upload_size();

    let mut upload: Option<(String, Option<String>, Bytes)> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::validation("Only one file may be uploaded per request"));
        }
        let file_name = field.file_name().unwrap_or("attachment").to_string();
        let content_type = field.content_type().map(String::from);
        let data = read_limited(field, max_size).await?;
        upload = Some((file_name, content_type, data));
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| AppError::validation("Multipart field 'file' is required"))?;

    let published = state
        .attachments
        .upload(report_id, data, &file_name, content_type.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AttachmentResponse::from(published))),
    ))
}

/// GET /api/reports/{id}/attachments
pub async fn list_attachments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<AttachmentResponse>>>, AppError> {
    let report_id = parse_report_id(&id)?;
    let attachments = state.attachments.list(report_id).await?;
    Ok(Json(ApiResponse::ok(
        attachments.into_iter().map(AttachmentResponse::from).collect(),
    )))
}

/// DELETE /api/attachments/{id}
pub async fn delete_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, AppError> {
    let attachment_id = parse_attachment_id(&id)?;
    let deleted = state.attachments.delete(attachment_id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { deleted })))
}

/// Buffer a field, giving up as soon as it exceeds `max_size`.
async fn read_limited(mut field: Field<'_>, max_size: u64) -> Result<Bytes, AppError> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (buffer.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::payload_too_large(format!(
                "Attachment exceeds the {max_size} byte limit"
            )));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer.freeze())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(e.body_text())
    } else {
        AppError::validation(format!("Multipart error: {}", e.body_text()))
    }
}
