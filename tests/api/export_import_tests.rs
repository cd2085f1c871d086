//! CSV export and JSON import API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{crime_and_punishment, war_and_peace, TestApp};

const HEADER: &str = "id,title,author,description,publication_year,isbn";

#[tokio::test]
async fn test_export_sets_attachment_headers() {
    let app = TestApp::new();
    app.create_book(war_and_peace()).await;

    let response = app.server.get("/books/export/csv").await;
    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=books_export.csv"
    );

    let text = response.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines[1], "1,Война и мир,Лев Толстой,Роман-эпопея,1869,9781400079988");
}

#[tokio::test]
async fn test_export_empty_selection_is_header_only() {
    let app = TestApp::new();
    let text = app
        .server
        .get("/books/export/csv")
        .add_query_param("title", "nothing matches")
        .await
        .text();
    assert_eq!(text.trim_end(), HEADER);
}

#[tokio::test]
async fn test_export_quotes_delimiters() {
    let app = TestApp::new();
    app.create_book(json!({
        "title": "Notes, from \"Underground\"",
        "author": "Fyodor Dostoevsky"
    }))
    .await;

    let text = app.server.get("/books/export/csv").await.text();
    assert!(text.contains("\"Notes, from \"\"Underground\"\"\""));
}

#[tokio::test]
async fn test_import_then_list_and_export() {
    let app = TestApp::new();
    let response = app
        .server
        .post("/books/import/json")
        .json(&json!([war_and_peace(), crime_and_punishment()]))
        .await;
    response.assert_status_ok();

    let report: Value = response.json();
    assert_eq!(report["total"], 2);
    assert_eq!(report["imported"], 2);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["message"], "Imported 2 of 2 books");

    let page: Value = app.server.get("/books").await.json();
    assert_eq!(page["total"], 2);

    let text = app.server.get("/books/export/csv").await.text();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("9780143107637"));
}

#[tokio::test]
async fn test_import_reports_rejected_items() {
    let app = TestApp::new();
    let report: Value = app
        .server
        .post("/books/import/json")
        .json(&json!([
            war_and_peace(),
            {"title": "", "author": "Nobody"},
            war_and_peace()
        ]))
        .await
        .json();

    assert_eq!(report["imported"], 1);
    assert_eq!(report["failed"], 2);
    assert_eq!(report["message"], "Imported 1 of 3 books, 2 rejected");
    assert_eq!(report["items"][0]["status"], "imported");
    assert_eq!(report["items"][1]["status"], "failed");
    assert_eq!(report["items"][1]["index"], 1);
    assert!(report["items"][1]["error"].as_str().unwrap().contains("title"));
    assert_eq!(report["items"][2]["status"], "failed");
}

#[tokio::test]
async fn test_import_single_object_and_scalar() {
    let app = TestApp::new();
    let report: Value = app
        .server
        .post("/books/import/json")
        .json(&crime_and_punishment())
        .await
        .json();
    assert_eq!(report["imported"], 1);

    app.server
        .post("/books/import/json")
        .json(&json!("books"))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_metrics_count_requests() {
    let app = TestApp::new();
    app.server.get("/books").await.assert_status_ok();

    let response = app.server.get("/metrics").await;
    response.assert_status_ok();
    assert!(response
        .text()
        .contains("book_catalog_http_requests_total"));
}
