//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{DateTime, TimeZone, Utc};
use http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use memp_api::{AppState, Repositories};
use memp_core::config::AppConfig;
use memp_database::MemoryStore;

pub const VESSEL_ID: &str = "V1";

const BOUNDARY: &str = "memp-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for seeding and fault injection
    pub store: Arc<MemoryStore>,
    /// Application config
    pub config: AppConfig,
    /// Service root holding the upload tree
    pub root: TempDir,
}

impl TestApp {
    /// Create a new test application on the in-memory store.
    pub async fn new() -> Self {
        let root = TempDir::new().expect("Failed to create service root");

        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.attachments.service_root = root.path().to_string_lossy().into_owned();
        config.reporting.query_timeout_seconds = 5;

        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config.clone(), Repositories::memory(store.clone()), None)
            .await
            .expect("Failed to build app state");

        Self {
            router: memp_api::build_app(state),
            store,
            config,
            root,
        }
    }

    /// Register V1 and log a January 2024 voyage: HFO 10.5 + 10.5, MDO 3.0,
    /// main engine 240 h, plus one HFO entry in February.
    pub async fn seed_january_voyage(&self) {
        self.store.add_vessel(VESSEL_ID, "MV Northern Star");
        self.store
            .record_fuel(VESSEL_ID, "HFO", dec("10.5"), at(2024, 1, 3))
            .await;
        self.store
            .record_fuel(VESSEL_ID, "HFO", dec("10.5"), at(2024, 1, 17))
            .await;
        self.store
            .record_fuel(VESSEL_ID, "MDO", dec("3.0"), at(2024, 1, 31))
            .await;
        self.store
            .record_fuel(VESSEL_ID, "HFO", dec("8.0"), at(2024, 2, 1))
            .await;
        self.store
            .record_machinery(VESSEL_ID, "Main Engine", dec("240"), at(2024, 1, 10))
            .await;
    }

    /// Generate a January 2024 report for V1 and return its id.
    pub async fn generate_january(&self, template: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/reports",
                Some(serde_json::json!({
                    "vesselId": VESSEL_ID,
                    "fromDate": "2024-01-01",
                    "toDate": "2024-01-31",
                    "template": template,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("report id")
            .to_string()
    }

    /// Make a JSON request against the router.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `data` as the multipart `file` field of a report.
    pub async fn upload(
        &self,
        report_id: &str,
        filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> TestResponse {
        let mut body = Vec::with_capacity(data.len() + 256);
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        self.multipart(&format!("/api/reports/{report_id}/attachments"), body)
            .await
    }

    /// POST a raw multipart body.
    pub async fn multipart(&self, path: &str, body: Vec<u8>) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// GET a path and return the raw body.
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid date")
}
