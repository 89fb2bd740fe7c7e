//! HTTP-level tests through the full router

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use ken_library::api;

use crate::common::app_state;

async fn app() -> Router {
    api::router(app_state().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn health_and_readiness() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn lending_scenario_over_http() {
    let app = app().await;

    let (status, dune) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(json!({ "title": "Dune", "author": "Frank Herbert", "genre": "Sci-Fi" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Same book again is not a second title
    let (status, again) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(json!({ "title": "Dune", "author": "Frank Herbert", "genre": "Sci-Fi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["id"], dune["id"]);

    let (status, copy) = send(
        &app,
        Method::POST,
        "/api/v1/copies",
        Some(json!({ "book_id": dune["id"], "accession_no": "ACC-001" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["condition"], "Good");

    let (_, alice) = send(&app, Method::POST, "/api/v1/members", Some(json!({ "name": "Alice" }))).await;
    let (_, bob) = send(&app, Method::POST, "/api/v1/members", Some(json!({ "name": "Bob" }))).await;

    let (status, loan) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(json!({
            "accession_no": "ACC-001",
            "member_id": alice["id"],
            "issue_date": "2024-05-01",
            "due_date": "2024-05-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(loan["return_date"], Value::Null);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(json!({ "copy_id": copy["id"], "member_id": bob["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8);

    let (status, copy_status) = send(&app, Method::GET, "/api/v1/accessions/ACC-001/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(copy_status["availability"], "Issued");
    assert_eq!(copy_status["holder"]["name"], "Alice");

    let return_uri = format!("/api/v1/transactions/{}/return", loan["id"]);
    let (status, returned) = send(
        &app,
        Method::POST,
        &return_uri,
        Some(json!({ "return_date": "2024-05-10" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["return_date"], "2024-05-10");

    let (status, _) = send(&app, Method::POST, &return_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let status_uri = format!("/api/v1/copies/{}/status", copy["id"]);
    let (_, copy_status) = send(&app, Method::GET, &status_uri, None).await;
    assert_eq!(copy_status["availability"], "Available");
    assert_eq!(copy_status["holder"], Value::Null);

    let (status, label) = send(&app, Method::GET, &format!("/api/v1/copies/{}/label", copy["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(label["payload"], "KEN|ACC-001|Dune");

    let (_, history) = send(&app, Method::GET, "/api/v1/transactions", None).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));

    let (_, dashboard) = send(&app, Method::GET, "/api/v1/reports/dashboard", None).await;
    assert_eq!(dashboard["total_titles"], 1);
    assert_eq!(dashboard["issued_now"], 0);
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/books/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");

    let (status, _) = send(&app, Method::POST, "/api/v1/books", Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(json!({ "member_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/api/v1/transactions/7/return", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn import_endpoint_reports_counts() {
    let app = app().await;
    let rows = json!([
        { "title": "Dune" },
        { "title": "Dune" },
        { "title": "" },
        { "title": "Emma", "genre": "Classic" }
    ]);

    let (status, report) = send(&app, Method::POST, "/api/v1/books/import", Some(rows)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["created"], 2);
    assert_eq!(report["duplicates"], 1);
    assert_eq!(report["skipped"], 1);

    let (_, genres) = send(&app, Method::GET, "/api/v1/reports/genres", None).await;
    assert_eq!(genres.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn location_create_is_idempotent() {
    let app = app().await;
    let body = json!({ "code": "Compartment 1", "description": "Front desk" });

    let (status, first) = send(&app, Method::POST, "/api/v1/locations", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) = send(&app, Method::POST, "/api/v1/locations", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app().await;
    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/transactions/{id}/return"].is_object());
}

#[tokio::test]
async fn malformed_return_body_leaves_loan_open() {
    let app = app().await;

    let (_, book) = send(&app, Method::POST, "/api/v1/books", Some(json!({ "title": "Dune" }))).await;
    let (_, copy) = send(
        &app,
        Method::POST,
        "/api/v1/copies",
        Some(json!({ "book_id": book["id"], "accession_no": "ACC-001" })),
    )
    .await;
    let (_, alice) = send(&app, Method::POST, "/api/v1/members", Some(json!({ "name": "Alice" }))).await;
    let (_, loan) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(json!({ "copy_id": copy["id"], "member_id": alice["id"], "issue_date": "2024-05-01" })),
    )
    .await;

    let return_uri = format!("/api/v1/transactions/{}/return", loan["id"]);
    let (status, _) = send(
        &app,
        Method::POST,
        &return_uri,
        Some(json!({ "return_date": "2024-13-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, Method::GET, &format!("/api/v1/transactions/{}", loan["id"]), None).await;
    assert_eq!(stored["return_date"], Value::Null);

    // A well-formed body still closes it with the given date
    let (status, returned) = send(
        &app,
        Method::POST,
        &return_uri,
        Some(json!({ "return_date": "2024-05-09" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned["return_date"], "2024-05-09");
}

#[tokio::test]
async fn export_endpoints_return_full_rows() {
    let app = app().await;

    let (_, book) = send(&app, Method::POST, "/api/v1/books", Some(json!({ "title": "Dune" }))).await;
    send(
        &app,
        Method::POST,
        "/api/v1/copies",
        Some(json!({
            "book_id": book["id"],
            "accession_no": "ACC-001",
            "acquired_date": "2023-02-01",
            "purchase_price": "14.25"
        })),
    )
    .await;

    let (status, copies) = send(&app, Method::GET, "/api/v1/export/copies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(copies[0]["acquired_date"], "2023-02-01");
    assert_eq!(copies[0]["purchase_price"], "14.25");

    for table in ["books", "members", "transactions", "locations"] {
        let (status, rows) = send(&app, Method::GET, &format!("/api/v1/export/{}", table), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(rows.is_array());
    }

    let (status, snapshot) = send(&app, Method::GET, "/api/v1/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["books"].as_array().map(Vec::len), Some(1));
    assert_eq!(snapshot["copies"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn settings_expose_library_defaults() {
    let app = app().await;
    let (status, settings) = send(&app, Method::GET, "/api/v1/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["default_loan_days"], 14);
    assert_eq!(settings["label_prefix"], "KEN");
}
