//! Integration tests for report attachments.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

const MIB: usize = 1024 * 1024;

async fn draft_report(app: &TestApp) -> String {
    app.seed_january_voyage().await;
    app.generate_january("EU_MRV").await
}

#[tokio::test]
async fn test_upload_one_megabyte_is_published() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;
    let data = vec![b'x'; MIB];

    let response = app
        .upload(&id, "engine-log.pdf", Some("application/pdf"), &data)
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let attachment = &response.body["data"];
    let public_path = attachment["publicPath"].as_str().unwrap();
    assert!(public_path.starts_with("/uploads/"), "{public_path}");
    assert!(public_path.ends_with(".pdf"));
    assert_eq!(attachment["originalFilename"], json!("engine-log.pdf"));
    assert_eq!(attachment["size"], json!(MIB));
    assert_eq!(attachment["contentType"], json!("application/pdf"));
    assert_eq!(attachment["reportId"], json!(id));
    assert!(attachment.get("storedPath").is_none());

    let (status, served) = app.get_raw(public_path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served.len(), MIB);
}

#[tokio::test]
async fn test_upload_twelve_megabytes_is_rejected() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;
    let data = vec![0u8; 12 * MIB];

    let response = app
        .upload(&id, "hull-survey.pdf", Some("application/pdf"), &data)
        .await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.error_code(), "PayloadTooLargeError");

    let list = app
        .request("GET", &format!("/api/reports/{id}/attachments"), None)
        .await;
    assert_eq!(list.body["data"], json!([]));
    let upload_dir = app.root.path().join(&app.config.attachments.upload_dir);
    assert_eq!(std::fs::read_dir(upload_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_content_type_falls_back_to_extension() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;

    let response = app.upload(&id, "noon-report.csv", None, b"date,hfo\n").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["contentType"], json!("text/csv"));
}

#[tokio::test]
async fn test_client_path_in_filename_is_not_trusted() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;

    let response = app
        .upload(&id, "../../etc/passwd.txt", Some("text/plain"), b"root")
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let public_path = response.body["data"]["publicPath"].as_str().unwrap();
    assert!(public_path.starts_with("/uploads/report_attachments/report-"));
    assert!(!public_path.contains(".."));
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;
    let body = b"--memp-test-boundary\r\n\
Content-Disposition: form-data; name=\"note\"\r\n\r\n\
hello\r\n\
--memp-test-boundary--\r\n"
        .to_vec();

    let response = app
        .multipart(&format!("/api/reports/{id}/attachments"), body)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "ValidationError");
}

#[tokio::test]
async fn test_upload_to_unknown_report() {
    let app = TestApp::new().await;

    let response = app
        .upload(
            "00000000-0000-0000-0000-999999999999",
            "log.txt",
            Some("text/plain"),
            b"hello",
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_to_finalized_report_conflicts() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;
    app.request("POST", &format!("/api/reports/{id}/finalize"), None)
        .await;

    let response = app.upload(&id, "late.pdf", None, b"%PDF").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_attachment() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;
    let uploaded = app.upload(&id, "log.txt", None, b"hello").await;
    let attachment_id = uploaded.body["data"]["id"].as_str().unwrap().to_string();
    let public_path = uploaded.body["data"]["publicPath"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request("DELETE", &format!("/api/attachments/{attachment_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!({"deleted": true}));

    let list = app
        .request("GET", &format!("/api/reports/{id}/attachments"), None)
        .await;
    assert_eq!(list.body["data"], json!([]));

    let (status, _) = app.get_raw(&public_path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let again = app
        .request("DELETE", &format!("/api/attachments/{attachment_id}"), None)
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["data"]["deleted"], json!(true));
}

#[tokio::test]
async fn test_deleting_report_releases_files() {
    let app = TestApp::new().await;
    let id = draft_report(&app).await;
    let uploaded = app.upload(&id, "log.txt", None, b"hello").await;
    let public_path = uploaded.body["data"]["publicPath"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request("DELETE", &format!("/api/reports/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let (status, _) = app.get_raw(&public_path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
