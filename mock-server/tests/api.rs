use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, FastLog, FastType};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Clones of a router share its store, so state survives between calls.
async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

// --- list ---

#[tokio::test]
async fn list_logs_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/fastlogs"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let logs: Vec<FastLog> = body_json(resp).await;
    assert!(logs.is_empty());
}

#[tokio::test]
async fn list_orders_by_date_descending() {
    let app = app();
    for date in ["2026-01-05", "2026-01-07", "2026-01-06"] {
        let body = format!(r#"{{"date":"{date}","fastType":"RELIGIOUS"}}"#);
        let resp = send(&app, json_request("POST", "/api/fastlogs", &body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(&app, empty_request("GET", "/api/fastlogs")).await;
    let logs: Vec<FastLog> = body_json(resp).await;
    let dates: Vec<String> = logs.iter().map(|l| l.date.to_string()).collect();
    assert_eq!(dates, vec!["2026-01-07", "2026-01-06", "2026-01-05"]);
}

// --- create ---

#[tokio::test]
async fn create_log_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/fastlogs",
            r#"{"date":"2026-01-05","fastType":"RELIGIOUS","completed":false,"notes":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let log: FastLog = body_json(resp).await;
    assert_eq!(log.id, 1);
    assert_eq!(log.fast_type, FastType::Religious);
    assert!(!log.completed);
}

#[tokio::test]
async fn create_log_missing_date_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/fastlogs",
            r#"{"fastType":"RELIGIOUS"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let text = body_bytes(resp).await;
    assert!(std::str::from_utf8(&text).unwrap().contains("date"));
}

#[tokio::test]
async fn update_log_missing_fast_type_returns_400() {
    let app = app();
    let created = send(
        &app,
        json_request("POST", "/api/fastlogs", r#"{"date":"2026-01-05","fastType":"RELIGIOUS"}"#),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let resp = send(
        &app,
        json_request("PUT", "/api/fastlogs/1", r#"{"date":"2026-01-06"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let text = body_bytes(resp).await;
    assert!(std::str::from_utf8(&text).unwrap().contains("fastType"));
}

#[tokio::test]
async fn create_log_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/fastlogs", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_log_long_notes_returns_400_with_message() {
    let body = format!(
        r#"{{"date":"2026-01-05","fastType":"RELIGIOUS","notes":"{}"}}"#,
        "x".repeat(1001)
    );
    let resp = app()
        .oneshot(json_request("POST", "/api/fastlogs", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let text = body_bytes(resp).await;
    assert_eq!(&text[..], b"notes must be at most 1000 characters");
}

// --- get ---

#[tokio::test]
async fn get_log_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/fastlogs/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let text = body_bytes(resp).await;
    assert_eq!(&text[..], b"fasting log 1 not found");
}

#[tokio::test]
async fn get_log_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/fastlogs/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update / complete / delete on missing ids ---

#[tokio::test]
async fn update_log_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/fastlogs/1",
            r#"{"date":"2026-01-05","fastType":"RELIGIOUS"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn complete_log_not_found() {
    let resp = app()
        .oneshot(empty_request("PATCH", "/api/fastlogs/1/complete"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_log_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/fastlogs/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();

    // create
    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/fastlogs",
            r#"{"date":"2026-01-05","fastType":"RELIGIOUS","completed":false,"notes":"Ramadan day 1"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: FastLog = body_json(resp).await;
    let id = created.id;

    // get
    let resp = send(&app, empty_request("GET", &format!("/api/fastlogs/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: FastLog = body_json(resp).await;
    assert_eq!(fetched.notes.as_deref(), Some("Ramadan day 1"));

    // update replaces every field
    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/fastlogs/{id}"),
            r#"{"date":"2026-01-06","fastType":"INTERMITTENT","completed":false}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: FastLog = body_json(resp).await;
    assert_eq!(updated.id, id);
    assert_eq!(updated.date.to_string(), "2026-01-06");
    assert_eq!(updated.fast_type, FastType::Intermittent);
    assert!(updated.notes.is_none());

    // complete
    let resp = send(
        &app,
        empty_request("PATCH", &format!("/api/fastlogs/{id}/complete")),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let completed: FastLog = body_json(resp).await;
    assert!(completed.completed);
    assert_eq!(completed.fast_type, FastType::Intermittent); // unchanged

    // delete
    let resp = send(&app, empty_request("DELETE", &format!("/api/fastlogs/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = send(&app, empty_request("GET", &format!("/api/fastlogs/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete
    let resp = send(&app, empty_request("GET", "/api/fastlogs")).await;
    let logs: Vec<FastLog> = body_json(resp).await;
    assert!(logs.is_empty());

    // ids are not reused
    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/fastlogs",
            r#"{"date":"2026-01-07","fastType":"RELIGIOUS"}"#,
        ),
    )
    .await;
    let next: FastLog = body_json(resp).await;
    assert_eq!(next.id, id + 1);
}
