//! Book CRUD API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use book_catalog::shared::error::ErrorResponse;

use crate::common::{crime_and_punishment, war_and_peace, FixtureMetadata, TestApp};

#[tokio::test]
async fn test_create_and_get_book() {
    let app = TestApp::new();
    let created = app.create_book(war_and_peace()).await;

    let id = created["id"].as_i64().unwrap();
    let response = app.server.get(&format!("/books/{id}")).await;
    response.assert_status_ok();

    let fetched: Value = response.json();
    assert_eq!(fetched, created);
    assert_eq!(fetched["title"], "Война и мир");
    assert_eq!(fetched["author"], "Лев Толстой");
    assert_eq!(fetched["publication_year"], 1869);
    assert_eq!(fetched["isbn"], "9781400079988");
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let app = TestApp::new();
    let response = app
        .server
        .post("/books")
        .json(&json!({"title": " ", "author": "Someone", "isbn": "12-34"}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, 10007);
    let fields: Vec<String> = body.errors.unwrap().into_iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["isbn".to_string(), "title".to_string()]);
}

#[tokio::test]
async fn test_create_rejects_missing_author_and_malformed_json() {
    let app = TestApp::new();

    let response = app.server.post("/books").json(&json!({"title": "Solo"})).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .server
        .post("/books")
        .text("{not json")
        .content_type("application/json")
        .await;
    assert!(response.status_code().is_client_error());
    let body: ErrorResponse = response.json();
    assert!(body.message.contains("JSON"));
}

#[tokio::test]
async fn test_duplicate_isbn_conflicts() {
    let app = TestApp::new();
    app.create_book(war_and_peace()).await;

    let response = app
        .server
        .post("/books")
        .json(&json!({"title": "Copy", "author": "Someone", "isbn": "9781400079988"}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_unknown_and_invalid_ids() {
    let app = TestApp::new();

    let response = app.server.get("/books/404").await;
    response.assert_status_not_found();
    let body: ErrorResponse = response.json();
    assert_eq!(body.message, "Book with id 404 not found");

    app.server
        .get("/books/not-a-number")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_partial_update() {
    let app = TestApp::new();
    let created = app.create_book(war_and_peace()).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/books/{id}"))
        .json(&json!({"description": "Epic novel"}))
        .await;
    response.assert_status_ok();

    let updated: Value = response.json();
    assert_eq!(updated["description"], "Epic novel");
    assert_eq!(updated["title"], created["title"]);
    assert_eq!(updated["isbn"], created["isbn"]);
}

#[tokio::test]
async fn test_update_unknown_book_and_invalid_year() {
    let app = TestApp::new();
    app.server
        .put("/books/77")
        .json(&json!({"title": "Ghost"}))
        .await
        .assert_status_not_found();

    let created = app.create_book(war_and_peace()).await;
    let id = created["id"].as_i64().unwrap();
    app.server
        .put(&format!("/books/{id}"))
        .json(&json!({"publication_year": 999}))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_then_get_and_delete_again() {
    let app = TestApp::new();
    let created = app.create_book(war_and_peace()).await;
    let path = format!("/books/{}", created["id"]);

    app.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server.get(&path).await.assert_status_not_found();
    app.server.delete(&path).await.assert_status_not_found();
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let app = TestApp::new();
    app.create_book(war_and_peace()).await;
    app.create_book(crime_and_punishment()).await;
    for i in 0..3 {
        app.create_book(json!({"title": format!("Filler {i}"), "author": "Anon"}))
            .await;
    }

    let response = app
        .server
        .get("/books")
        .add_query_param("author", "достоев")
        .await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["title"], "Преступление и наказание");

    let page: Value = app
        .server
        .get("/books")
        .add_query_param("offset", 1)
        .add_query_param("limit", 2)
        .await
        .json();
    assert_eq!(page["total"], 5);
    assert_eq!(page["offset"], 1);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["items"][0]["title"], "Преступление и наказание");

    let page: Value = app
        .server
        .get("/books")
        .add_query_param("offset", 100)
        .await
        .json();
    assert_eq!(page["items"], json!([]));
    assert_eq!(page["total"], 5);
}

#[tokio::test]
async fn test_list_rejects_bad_query() {
    let app = TestApp::new();
    app.server
        .get("/books")
        .add_query_param("limit", "many")
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    app.server
        .get("/books")
        .add_query_param("offset", -5)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_enrich_book_from_metadata() {
    let app = TestApp::with_metadata(FixtureMetadata);
    let created = app
        .create_book(json!({
            "title": "Crime and Punishment",
            "author": "Fyodor Dostoevsky",
            "isbn": "9780143107637"
        }))
        .await;
    let id = created["id"].as_i64().unwrap();

    let response = app.server.post(&format!("/books/{id}/metadata")).await;
    response.assert_status_ok();
    let enriched: Value = response.json();
    assert_eq!(enriched["description"], "A novel about guilt and redemption");
    assert_eq!(enriched["publication_year"], 1866);
    assert_eq!(enriched["title"], "Crime and Punishment");

    let other = app
        .create_book(json!({"title": "Unknown", "author": "Anon", "isbn": "0306406152"}))
        .await;
    app.server
        .post(&format!("/books/{}/metadata", other["id"]))
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_enrich_without_provider_is_unavailable() {
    let app = TestApp::new();
    let created = app.create_book(war_and_peace()).await;

    app.server
        .post(&format!("/books/{}/metadata", created["id"]))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_enrich_checks_book_before_provider() {
    let app = TestApp::new();
    app.server
        .post("/books/999/metadata")
        .await
        .assert_status_not_found();

    let created = app
        .create_book(json!({"title": "No ISBN", "author": "Anon"}))
        .await;
    app.server
        .post(&format!("/books/{}/metadata", created["id"]))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let app = TestApp::with_unreachable_store();
    let response = app.server.get("/books/1").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = response.json();
    assert_eq!(body.code, 10000);
}
