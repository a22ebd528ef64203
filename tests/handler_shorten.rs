mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::SqlitePool;

use linkcut::api::handlers::shorten_handler;

fn test_app(state: linkcut::state::AppState) -> TestServer {
    let app = Router::new()
        .route("/api/id", post(shorten_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_shorten_generates_short_id(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool.clone()));

    let response = server
        .post("/api/id")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["url"], "https://example.com/page");

    let short_link = json["short_link"].as_str().unwrap();
    let short_id = short_link
        .strip_prefix(&format!("{}/", common::TEST_BASE_URL))
        .unwrap();
    assert_eq!(short_id.len(), 6);
    assert!(short_id.chars().all(|c| c.is_ascii_alphanumeric()));

    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_with_custom_id(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool));

    let response = server
        .post("/api/id")
        .json(&json!({
            "url": "https://example.com",
            "custom_id": "myLink01"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(
        json["short_link"],
        format!("{}/myLink01", common::TEST_BASE_URL)
    );
}

#[sqlx::test]
async fn test_blank_custom_id_falls_back_to_generation(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool));

    let response = server
        .post("/api/id")
        .json(&json!({
            "url": "https://example.com",
            "custom_id": "   "
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let short_link = json["short_link"].as_str().unwrap();
    let short_id = short_link
        .strip_prefix(&format!("{}/", common::TEST_BASE_URL))
        .unwrap();
    assert_eq!(short_id.len(), 6);
}

#[sqlx::test]
async fn test_shorten_rejects_invalid_characters(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool.clone()));

    let response = server
        .post("/api/id")
        .json(&json!({
            "url": "https://example.com",
            "custom_id": "bad id!"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_short_format");

    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_rejects_too_long_custom_id(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool));

    // 16 characters: the upper bound is exclusive.
    let response = server
        .post("/api/id")
        .json(&json!({
            "url": "https://example.com",
            "custom_id": "a".repeat(16)
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_short_format");
}

#[sqlx::test]
async fn test_shorten_rejects_reserved_prefix(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool.clone()));

    let response = server
        .post("/api/id")
        .json(&json!({
            "url": "https://example.com",
            "custom_id": "apidocs"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "short_already_exists");

    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_rejects_taken_custom_id(pool: SqlitePool) {
    common::create_test_mapping(&pool, "https://existing.example", "taken1").await;

    let server = test_app(common::create_test_state(pool));

    let response = server
        .post("/api/id")
        .json(&json!({
            "url": "https://example.com",
            "custom_id": "taken1"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "short_already_exists");
}

#[sqlx::test]
async fn test_duplicate_original_reports_existing_link(pool: SqlitePool) {
    common::create_test_mapping(&pool, "https://example.com/dup", "old123").await;

    let server = test_app(common::create_test_state(pool.clone()));

    let response = server
        .post("/api/id")
        .json(&json!({ "url": "https://example.com/dup" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "duplicate_original");
    assert_eq!(
        json["error"]["details"]["short_link"],
        format!("{}/old123", common::TEST_BASE_URL)
    );

    // The failed create must not add a second row.
    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_rejects_malformed_url(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool));

    let response = server
        .post("/api/id")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_shorten_rejects_non_http_scheme(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool.clone()));

    let response = server
        .post("/api/id")
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");

    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_concurrent_same_custom_id_yields_one_winner(pool: SqlitePool) {
    let server = test_app(common::create_test_state(pool.clone()));

    // Two simultaneous creates racing for the same custom ID; the UNIQUE
    // index on `short` decides the winner.
    let first = server.post("/api/id").json(&json!({
        "url": "https://example.com/one",
        "custom_id": "race99"
    }));
    let second = server.post("/api/id").json(&json!({
        "url": "https://example.com/two",
        "custom_id": "race99"
    }));

    let (r1, r2) = tokio::join!(first, second);

    let (winner, loser) = if r1.status_code() == axum::http::StatusCode::CREATED {
        (r1, r2)
    } else {
        (r2, r1)
    };

    winner.assert_status(axum::http::StatusCode::CREATED);
    loser.assert_status(axum::http::StatusCode::CONFLICT);

    let json = loser.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "short_already_exists");

    assert_eq!(common::count_mappings(&pool).await, 1);
}
