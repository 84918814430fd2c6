//! Integration tests for the Symposia API endpoints
//!
//! Tests cover:
//! - Login and user listing (hash never leaves the server)
//! - Paper CRUD, creation defaults, and single-status updates
//! - Full-text upload, replacement, rejection, and detach
//! - Announcement and registration endpoints
//! - Site content shallow-merge updates
//! - Operational endpoints (health, ready, metrics)

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use symposia_common::{
    config::AppConfig,
    errors::AppError,
    seed::SeedData,
    storage::MemoryBlobStore,
    store::{today_display_date, MemoryStore},
    BlobStore,
};
use tower::util::ServiceExt; // for `oneshot` method
use symposia_server::{create_router, install_metrics, AppState};

/// Test helper: app state over a seeded in-memory store
fn test_state() -> (AppState, Arc<MemoryBlobStore>) {
    let blobs = Arc::new(MemoryBlobStore::new("http://localhost:3001"));
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        store: Arc::new(MemoryStore::new(SeedData::initial().expect("seed data"))),
        blobs: blobs.clone(),
        metrics: install_metrics(),
    };
    (state, blobs)
}

/// Test helper: router over a fresh seeded state
fn setup_app() -> axum::Router {
    let (state, _) = test_state();
    create_router(state)
}

/// Test helper: request with an empty body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: request with a JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: multipart upload with a single `file` part
fn multipart_request(uri: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "test-boundary-4aa2dd97";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Test helper: run one request against the app
async fn send(app: &axum::Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Test helper: extract JSON body from a response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

// =============================================================================
// Operational Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();

    let response = send(&app, test_request("GET", "/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_endpoint_reports_store_up() {
    let app = setup_app();

    let response = send(&app, test_request("GET", "/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"]["status"], "up");
}

#[tokio::test]
async fn test_metrics_endpoint_renders_request_counters() {
    let app = setup_app();

    // One tracked request so the counter exists before rendering
    send(&app, test_request("GET", "/health")).await;

    let response = send(&app, test_request("GET", "/metrics")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body");
    let text = String::from_utf8(bytes.to_vec()).expect("exposition is utf-8");
    assert!(text.contains("symposia_requests_total"));
}

// =============================================================================
// Login and Users
// =============================================================================

#[tokio::test]
async fn test_login_returns_user_without_hash() {
    let app = setup_app();

    let request = json_request(
        "POST",
        "/api/login",
        json!({"username": "admin", "password": "password"}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "admin");
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let app = setup_app();

    let request = json_request(
        "POST",
        "/api/login",
        json!({"username": "admin", "password": "nope"}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_unknown_user_gets_same_message() {
    let app = setup_app();

    let request = json_request(
        "POST",
        "/api/login",
        json!({"username": "nobody", "password": "password"}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_list_users_strips_hashes() {
    let app = setup_app();

    let response = send(&app, test_request("GET", "/api/users")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let users = body.as_array().expect("users array");
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user["username"].is_string());
    }
}

// =============================================================================
// Papers
// =============================================================================

#[tokio::test]
async fn test_list_papers_newest_first() {
    let app = setup_app();

    let response = send(&app, test_request("GET", "/api/papers")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let ids: Vec<i64> = body
        .as_array()
        .expect("papers array")
        .iter()
        .map(|p| p["id"].as_i64().expect("paper id"))
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_get_paper() {
    let app = setup_app();

    let response = send(&app, test_request("GET", "/api/papers/1")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["authorName"], "Nguyễn Văn An");
    assert_eq!(body["abstractStatus"], "Duyệt");
    assert_eq!(body["presentationStatus"], "Trình bày");
}

#[tokio::test]
async fn test_get_missing_paper_is_404() {
    let app = setup_app();

    let response = send(&app, test_request("GET", "/api/papers/999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_create_paper_applies_default_statuses() {
    let app = setup_app();

    // Client-sent statuses and file fields must be ignored
    let request = json_request(
        "POST",
        "/api/papers",
        json!({
            "authorName": "Phạm Thị Dung",
            "organization": "Đại học Bách khoa",
            "paperTitle": "Chuyển đổi số trong dạy học",
            "topic": "1",
            "reviewStatus": "Duyệt",
            "fullTextUrl": "https://example.com/smuggled.pdf"
        }),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 4);
    assert_eq!(body["topic"], 1);
    assert_eq!(body["abstractStatus"], "Duyệt");
    assert_eq!(body["fullTextStatus"], "Đang chờ duyệt");
    assert_eq!(body["reviewStatus"], "Đang chờ duyệt");
    assert_eq!(body["presentationStatus"], "Không trình bày");
    assert!(body["fullTextUrl"].is_null());
    assert!(body["fullTextFileName"].is_null());
}

#[tokio::test]
async fn test_create_paper_rejects_out_of_range_topic() {
    let app = setup_app();

    let request = json_request(
        "POST",
        "/api/papers",
        json!({
            "authorName": "A",
            "organization": "O",
            "paperTitle": "T",
            "topic": 5
        }),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_paper_missing_field_is_rejected_by_extractor() {
    let app = setup_app();

    // Body shape errors are caught before validation runs
    let request = json_request(
        "POST",
        "/api/papers",
        json!({"authorName": "A", "topic": 2}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_single_status_leaves_siblings_unchanged() {
    let app = setup_app();

    let request = json_request(
        "PUT",
        "/api/papers/1",
        json!({"reviewStatus": "Không duyệt"}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["reviewStatus"], "Không duyệt");
    // Paper 1 is seeded fully approved; the other three must survive
    assert_eq!(body["abstractStatus"], "Duyệt");
    assert_eq!(body["fullTextStatus"], "Duyệt");
    assert_eq!(body["presentationStatus"], "Trình bày");
    assert_eq!(body["authorName"], "Nguyễn Văn An");
}

#[tokio::test]
async fn test_update_with_empty_patch_is_a_noop() {
    let app = setup_app();

    let before = extract_json(
        send(&app, test_request("GET", "/api/papers/2"))
            .await
            .into_body(),
    )
    .await;

    let response = send(&app, json_request("PUT", "/api/papers/2", json!({}))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = extract_json(response.into_body()).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_missing_paper_is_404() {
    let app = setup_app();

    let request = json_request("PUT", "/api/papers/999", json!({"reviewStatus": "Duyệt"}));
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_paper_returns_id_and_removes_record() {
    let app = setup_app();

    let response = send(&app, test_request("DELETE", "/api/papers/2")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"id": 2}));

    let response = send(&app, test_request("GET", "/api/papers/2")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listed = extract_json(
        send(&app, test_request("GET", "/api/papers"))
            .await
            .into_body(),
    )
    .await;
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1]);
}

// =============================================================================
// Full-Text Upload
// =============================================================================

#[tokio::test]
async fn test_upload_attaches_file_and_approves_full_text() {
    let (state, blobs) = test_state();
    let app = create_router(state);

    let request = multipart_request(
        "/api/papers/3/upload-fulltext",
        "bai-bao-toan-van.pdf",
        "application/pdf",
        b"%PDF-1.4 test content",
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let file_url = body["fileUrl"].as_str().expect("file url");
    assert!(!file_url.is_empty());
    assert_eq!(body["paper"]["fullTextStatus"], "Duyệt");
    assert_eq!(body["paper"]["fullTextUrl"], file_url);
    assert_eq!(body["paper"]["fullTextFileName"], "bai-bao-toan-van.pdf");

    assert_eq!(blobs.len().await, 1);
}

#[tokio::test]
async fn test_upload_replaces_previous_file() {
    let (state, blobs) = test_state();
    let app = create_router(state);

    let first = extract_json(
        send(
            &app,
            multipart_request(
                "/api/papers/3/upload-fulltext",
                "v1.pdf",
                "application/pdf",
                b"first",
            ),
        )
        .await
        .into_body(),
    )
    .await;

    let second = extract_json(
        send(
            &app,
            multipart_request(
                "/api/papers/3/upload-fulltext",
                "v2.pdf",
                "application/pdf",
                b"second",
            ),
        )
        .await
        .into_body(),
    )
    .await;

    assert_eq!(second["paper"]["fullTextFileName"], "v2.pdf");
    assert_ne!(first["fileUrl"], second["fileUrl"]);
    // The first blob was released when the second arrived
    assert_eq!(blobs.len().await, 1);
}

#[tokio::test]
async fn test_upload_rejects_wrong_type_and_leaves_paper_unchanged() {
    let app = setup_app();

    let request = multipart_request(
        "/api/papers/3/upload-fulltext",
        "notes.txt",
        "text/plain",
        b"plain text",
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let paper = extract_json(
        send(&app, test_request("GET", "/api/papers/3"))
            .await
            .into_body(),
    )
    .await;
    assert!(paper["fullTextUrl"].is_null());
    assert_eq!(paper["fullTextStatus"], "Đang chờ duyệt");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let app = setup_app();

    // 15 MiB is above the 10 MiB file rule but below the transport cap,
    // so it must fail with the validation taxonomy, not a 413
    let oversized = vec![0u8; 15 * 1024 * 1024];
    let request = multipart_request(
        "/api/papers/3/upload-fulltext",
        "big.pdf",
        "application/pdf",
        &oversized,
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let paper = extract_json(
        send(&app, test_request("GET", "/api/papers/3"))
            .await
            .into_body(),
    )
    .await;
    assert!(paper["fullTextUrl"].is_null());
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let app = setup_app();

    let boundary = "test-boundary-4aa2dd97";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/papers/3/upload-fulltext")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let message = extract_json(response.into_body()).await;
    assert_eq!(message["message"], "Missing file field");
}

#[tokio::test]
async fn test_upload_to_missing_paper_is_404() {
    let app = setup_app();

    let request = multipart_request(
        "/api/papers/999/upload-fulltext",
        "paper.pdf",
        "application/pdf",
        b"%PDF-1.4",
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_full_text_round_trip() {
    let (state, blobs) = test_state();
    let app = create_router(state);

    send(
        &app,
        multipart_request(
            "/api/papers/3/upload-fulltext",
            "paper.pdf",
            "application/pdf",
            b"%PDF-1.4",
        ),
    )
    .await;
    assert_eq!(blobs.len().await, 1);

    let response = send(&app, test_request("DELETE", "/api/papers/3/delete-fulltext")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["paper"]["fullTextStatus"], "Đang chờ duyệt");
    assert!(body["paper"]["fullTextUrl"].is_null());
    assert!(body["paper"]["fullTextFileName"].is_null());

    assert!(blobs.is_empty().await);
}

#[tokio::test]
async fn test_delete_paper_succeeds_when_blob_delete_fails() {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        store: Arc::new(MemoryStore::new(SeedData::initial().expect("seed data"))),
        blobs: Arc::new(FailingBlobStore::new()),
        metrics: install_metrics(),
    };
    let app = create_router(state);

    // Attach a file so the delete path has a blob to release
    let response = send(
        &app,
        multipart_request(
            "/api/papers/3/upload-fulltext",
            "paper.pdf",
            "application/pdf",
            b"%PDF-1.4",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, test_request("DELETE", "/api/papers/3")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 3);

    let response = send(&app, test_request("GET", "/api/papers/3")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Blob store whose deletes always fail; uploads pass through
struct FailingBlobStore {
    inner: MemoryBlobStore,
}

impl FailingBlobStore {
    fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new("http://localhost:3001"),
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for FailingBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> symposia_common::errors::Result<String> {
        self.inner.put(key, bytes).await
    }

    async fn delete(&self, _key: &str) -> symposia_common::errors::Result<()> {
        Err(AppError::Storage {
            message: "injected blob failure".to_string(),
        })
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        self.inner.key_for_url(url)
    }
}

// =============================================================================
// Announcements
// =============================================================================

#[tokio::test]
async fn test_list_announcements_newest_first() {
    let app = setup_app();

    let body = extract_json(
        send(&app, test_request("GET", "/api/announcements"))
            .await
            .into_body(),
    )
    .await;
    let ids: Vec<i64> = body
        .as_array()
        .expect("announcements array")
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_create_announcement_assigns_id_and_date() {
    let app = setup_app();

    // Client-sent id and date are ignored
    let request = json_request(
        "POST",
        "/api/announcements",
        json!({
            "title": "Gia hạn nộp bài",
            "content": "Hạn nộp toàn văn được gia hạn đến cuối tháng.",
            "id": 99,
            "date": "01/01/1999"
        }),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 4);
    assert_eq!(body["date"], today_display_date());
    assert!(body["imageUrl"].is_null());
}

#[tokio::test]
async fn test_update_and_delete_announcement() {
    let app = setup_app();

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/announcements/2",
            json!({"title": "Cập nhật chương trình"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["title"], "Cập nhật chương trình");
    // Untouched fields keep their seeded values
    assert_eq!(body["date"], "01/08/2025");

    let response = send(&app, test_request("DELETE", "/api/announcements/2")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"id": 2}));

    let response = send(
        &app,
        json_request("PUT", "/api/announcements/2", json!({"title": "x"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Registrations
// =============================================================================

#[tokio::test]
async fn test_create_registration() {
    let app = setup_app();

    let request = json_request(
        "POST",
        "/api/registrations",
        json!({
            "name": "Hoàng Văn Em",
            "organization": "Đại học Mở",
            "email": "hve@email.com",
            "phone": "0901234567",
            "withPaper": "yes"
        }),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["withPaper"], "yes");

    let listed = extract_json(
        send(&app, test_request("GET", "/api/registrations"))
            .await
            .into_body(),
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 3);
    assert_eq!(listed[0]["id"], 3);
}

#[tokio::test]
async fn test_create_registration_rejects_bad_email() {
    let app = setup_app();

    let request = json_request(
        "POST",
        "/api/registrations",
        json!({"name": "X", "email": "not-an-email"}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Site Content
// =============================================================================

#[tokio::test]
async fn test_get_site_content() {
    let app = setup_app();

    let body = extract_json(
        send(&app, test_request("GET", "/api/site-content"))
            .await
            .into_body(),
    )
    .await;
    assert_eq!(body["heroTitle"], "Hội thảo quốc tế về nghiên cứu giáo dục");
    assert_eq!(body["navLinks"].as_array().unwrap().len(), 7);
    assert_eq!(body["keynoteSpeakers"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_patch_site_content_touches_only_sent_keys() {
    let app = setup_app();

    let mut before = extract_json(
        send(&app, test_request("GET", "/api/site-content"))
            .await
            .into_body(),
    )
    .await;

    let response = send(
        &app,
        json_request("PUT", "/api/site-content", json!({"navLinks": []})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut after = extract_json(response.into_body()).await;
    assert_eq!(after["navLinks"], json!([]));

    // Every other top-level key is byte-identical to before the call
    before.as_object_mut().unwrap().remove("navLinks");
    after.as_object_mut().unwrap().remove("navLinks");
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_patch_site_content_scalar_key() {
    let app = setup_app();

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/site-content",
            json!({"heroTitle": "Hội thảo 2026"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["heroTitle"], "Hội thảo 2026");
    // Sibling scalar untouched
    assert_eq!(
        body["heroSubtitle"],
        "Cơ hội kết nối, chia sẻ và phát triển trong lĩnh vực giáo dục."
    );
}
