//! Report lifecycle handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use memp_core::error::AppError;
use memp_core::types::PageResponse;
use memp_service::GenerateReportRequest;

use crate::dto::response::{ApiResponse, DeletedResponse, ReportResponse, ReportSummaryResponse};
use crate::extractors::path::parse_report_id;
use crate::extractors::{ApiJson, PaginationParams};
use crate::state::AppState;

/// POST /api/reports
pub async fn generate_report(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponse>>), AppError> {
    let details = state.reports.generate(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ReportResponse::from(details))),
    ))
}

/// GET /api/reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponse>>, AppError> {
    let report_id = parse_report_id(&id)?;
    let details = state.reports.get(report_id).await?;
    Ok(Json(ApiResponse::ok(ReportResponse::from(details))))
}

/// POST /api/reports/{id}/regenerate
pub async fn regenerate_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponse>>, AppError> {
    let report_id = parse_report_id(&id)?;
    let details = state.reports.regenerate(report_id).await?;
    Ok(Json(ApiResponse::ok(ReportResponse::from(details))))
}

/// POST /api/reports/{id}/finalize
pub async fn finalize_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponse>>, AppError> {
    let report_id = parse_report_id(&id)?;
    let details = state.reports.finalize(report_id).await?;
    Ok(Json(ApiResponse::ok(ReportResponse::from(details))))
}

/// DELETE /api/reports/{id}
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, AppError> {
    let report_id = parse_report_id(&id)?;
    state.reports.delete(report_id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { deleted: true })))
}

/// GET /api/vessels/{vessel_id}/reports
pub async fn list_vessel_reports(
    State(state): State<AppState>,
    Path(vessel_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ReportSummaryResponse>>>, AppError> {
    let page = params.into_page_request(state.config.reporting.default_page_size);
    let reports = state.reports.list_for_vessel(&vessel_id, page).await?;
    Ok(Json(ApiResponse::ok(reports.map(ReportSummaryResponse::from))))
}
