//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};

use book_catalog::application::services::{BookMetadata, MetadataError, MetadataProvider};
use book_catalog::config::PaginationSettings;
use book_catalog::domain::{Book, BookChanges, BookFilter, BookRepository, NewBook};
use book_catalog::infrastructure::repositories::InMemoryBookRepository;
use book_catalog::presentation::http::routes::create_router;
use book_catalog::shared::error::AppError;
use book_catalog::startup::AppState;

/// Test application over an in-memory book store
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    /// Application with default pagination and no metadata provider
    pub fn new() -> Self {
        Self::with_state(AppState::new(
            Arc::new(InMemoryBookRepository::new()),
            None,
            PaginationSettings::default(),
        ))
    }

    /// Application with a metadata provider that answers from fixtures
    pub fn with_metadata(provider: impl MetadataProvider + 'static) -> Self {
        Self::with_state(AppState::new(
            Arc::new(InMemoryBookRepository::new()),
            Some(Arc::new(provider)),
            PaginationSettings::default(),
        ))
    }

    /// Application whose store rejects every call
    pub fn with_unreachable_store() -> Self {
        Self::with_state(AppState::new(
            Arc::new(UnreachableStore),
            None,
            PaginationSettings::default(),
        ))
    }

    fn with_state(state: AppState) -> Self {
        let server = TestServer::new(create_router(state)).expect("failed to start test server");
        Self { server }
    }

    /// Create a book and return the response body
    pub async fn create_book(&self, body: Value) -> Value {
        let response = self.server.post("/books").json(&body).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()
    }
}

pub fn war_and_peace() -> Value {
    json!({
        "title": "Война и мир",
        "author": "Лев Толстой",
        "description": "Роман-эпопея",
        "publication_year": 1869,
        "isbn": "9781400079988"
    })
}

pub fn crime_and_punishment() -> Value {
    json!({
        "title": "Преступление и наказание",
        "author": "Фёдор Достоевский",
        "publication_year": 1866,
        "isbn": "9780143107637"
    })
}

/// Store that fails every operation, as a lost database connection would.
pub struct UnreachableStore;

fn store_down() -> AppError {
    AppError::Internal("connection refused".into())
}

#[async_trait]
impl BookRepository for UnreachableStore {
    async fn insert(&self, _book: &NewBook) -> Result<Book, AppError> {
        Err(store_down())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Book>, AppError> {
        Err(store_down())
    }

    async fn find_filtered(
        &self,
        _filter: &BookFilter,
        _offset: i64,
        _limit: Option<i64>,
    ) -> Result<(Vec<Book>, i64), AppError> {
        Err(store_down())
    }

    async fn update_by_id(&self, _id: i64, _changes: &BookChanges) -> Result<Book, AppError> {
        Err(store_down())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), AppError> {
        Err(store_down())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(store_down())
    }
}

/// Metadata provider that knows a single ISBN.
pub struct FixtureMetadata;

#[async_trait]
impl MetadataProvider for FixtureMetadata {
    async fn fetch(&self, isbn: &str) -> Result<BookMetadata, MetadataError> {
        if isbn == "9780143107637" {
            Ok(BookMetadata {
                isbn: isbn.to_string(),
                title: Some("Crime and Punishment".into()),
                authors: Vec::new(),
                description: Some("A novel about guilt and redemption".into()),
                publication_date: Some("1866-01-01".into()),
            })
        } else {
            Err(MetadataError::Status(404))
        }
    }
}
