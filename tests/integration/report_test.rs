//! Integration tests for the report lifecycle endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, VESSEL_ID, at, dec};
use memp_core::error::AppError;

#[tokio::test]
async fn test_generate_eu_mrv_report() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;

    let response = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({
                "vesselId": VESSEL_ID,
                "fromDate": "2024-01-01",
                "toDate": "2024-01-31",
                "template": "EU_MRV",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(data["vesselId"], json!(VESSEL_ID));
    assert_eq!(data["template"], json!("EU_MRV"));
    assert_eq!(data["status"], json!("draft"));
    assert_eq!(data["period"], json!({"from": "2024-01-01", "to": "2024-01-31"}));
    assert_eq!(
        data["buckets"]["fuel"],
        json!([{"key": "HFO", "total": 21.0}, {"key": "MDO", "total": 3.0}])
    );
    assert_eq!(
        data["buckets"]["machinery"],
        json!([{"name": "Main Engine", "total": 240.0}])
    );
    assert_eq!(data["view"]["regulation"], json!("EU 2015/757"));
    assert_eq!(data["view"]["totalFuelTonnes"], json!(24.0));
    assert_eq!(data["attachments"], json!([]));
}

#[tokio::test]
async fn test_generate_class_society_template() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;
    let id = app.generate_january("ClassNK").await;

    let response = app.request("GET", &format!("/api/reports/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    let view = &response.body["data"]["view"];
    assert_eq!(view["classSociety"], json!("Nippon Kaiji Kyokai"));
    assert_eq!(view["consumption"][0], json!({"fuel": "HFO", "tonnes": 21.0}));
}

#[tokio::test]
async fn test_reversed_period_is_rejected_before_any_read() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;

    let response = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({
                "vesselId": VESSEL_ID,
                "fromDate": "2024-02-01",
                "toDate": "2024-01-01",
                "template": "EU_MRV",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "ValidationError");
    assert_eq!(app.store.operational_reads(), 0);
}

#[tokio::test]
async fn test_unsupported_template() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;

    let response = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({
                "vesselId": VESSEL_ID,
                "fromDate": "2024-01-01",
                "toDate": "2024-01-31",
                "template": "LLOYDS",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "UnsupportedTemplateError");
    assert_eq!(app.store.operational_reads(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({"vesselId": VESSEL_ID, "fromDate": "2024-13-01"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "ValidationError");
}

#[tokio::test]
async fn test_unknown_vessel_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({
                "vesselId": "GHOST",
                "fromDate": "2024-01-01",
                "toDate": "2024-01-31",
                "template": "IMO_DCS",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NotFoundError");
}

#[tokio::test]
async fn test_unavailable_store_persists_nothing() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;
    app.store
        .fail_machinery_with(Some(AppError::storage_unavailable("connection refused")))
        .await;

    let response = app
        .request(
            "POST",
            "/api/reports",
            Some(json!({
                "vesselId": VESSEL_ID,
                "fromDate": "2024-01-01",
                "toDate": "2024-01-31",
                "template": "EU_MRV",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), "StorageUnavailableError");

    let list = app
        .request("GET", &format!("/api/vessels/{VESSEL_ID}/reports"), None)
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["data"]["totalItems"], json!(0));
}

#[tokio::test]
async fn test_get_report_errors() {
    let app = TestApp::new().await;

    let missing = app
        .request("GET", "/api/reports/00000000-0000-0000-0000-999999999999", None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app.request("GET", "/api/reports/not-a-uuid", None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.error_code(), "ValidationError");
}

#[tokio::test]
async fn test_regenerate_reflects_new_data_and_keeps_attachments() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;
    let id = app.generate_january("EU_MRV").await;

    let upload = app
        .upload(&id, "bunker-note.pdf", Some("application/pdf"), b"%PDF-1.4")
        .await;
    assert_eq!(upload.status, StatusCode::CREATED);

    app.store
        .record_fuel(VESSEL_ID, "MDO", dec("1.5"), at(2024, 1, 20))
        .await;

    let response = app
        .request("POST", &format!("/api/reports/{id}/regenerate"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["id"], json!(id));
    assert_eq!(
        data["buckets"]["fuel"],
        json!([{"key": "HFO", "total": 21.0}, {"key": "MDO", "total": 4.5}])
    );
    assert_eq!(data["attachments"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        data["attachments"][0]["originalFilename"],
        json!("bunker-note.pdf")
    );
}

#[tokio::test]
async fn test_finalized_report_is_frozen() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;
    let id = app.generate_january("IMO_DCS").await;

    let finalized = app
        .request("POST", &format!("/api/reports/{id}/finalize"), None)
        .await;
    assert_eq!(finalized.status, StatusCode::OK);
    assert_eq!(finalized.body["data"]["status"], json!("finalized"));
    assert!(finalized.body["data"]["finalizedAt"].is_string());

    let regenerate = app
        .request("POST", &format!("/api/reports/{id}/regenerate"), None)
        .await;
    assert_eq!(regenerate.status, StatusCode::CONFLICT);
    assert_eq!(regenerate.error_code(), "ConflictError");

    let again = app
        .request("POST", &format!("/api/reports/{id}/finalize"), None)
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_report() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;
    let id = app.generate_january("DNV").await;

    let response = app
        .request("DELETE", &format!("/api/reports/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["deleted"], json!(true));

    let gone = app.request("GET", &format!("/api/reports/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_vessel_reports_newest_first() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;
    let first = app.generate_january("EU_MRV").await;
    let second = app.generate_january("IMO_DCS").await;
    let third = app.generate_january("ABS").await;

    let response = app
        .request(
            "GET",
            &format!("/api/vessels/{VESSEL_ID}/reports?page=1&pageSize=2"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["data"];
    assert_eq!(page["totalItems"], json!(3));
    assert_eq!(page["totalPages"], json!(2));
    assert_eq!(page["hasNext"], json!(true));
    assert_eq!(page["items"][0]["id"], json!(third));
    assert_eq!(page["items"][1]["id"], json!(second));

    let rest = app
        .request(
            "GET",
            &format!("/api/vessels/{VESSEL_ID}/reports?page=2&pageSize=2"),
            None,
        )
        .await;
    assert_eq!(rest.body["data"]["items"][0]["id"], json!(first));
}

#[tokio::test]
async fn test_list_page_far_past_the_end() {
    let app = TestApp::new().await;
    app.seed_january_voyage().await;
    app.generate_january("EU_MRV").await;

    let response = app
        .request(
            "GET",
            &format!("/api/vessels/{VESSEL_ID}/reports?page=18446744073709551615"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"], json!([]));
    assert_eq!(response.body["data"]["totalItems"], json!(1));
    assert_eq!(response.body["data"]["hasNext"], json!(false));
}

#[tokio::test]
async fn test_list_for_unknown_vessel() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/vessels/GHOST/reports", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_on_memory_store() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], json!("ok"));
    assert_eq!(response.body["data"]["database"], json!("memory"));
}
