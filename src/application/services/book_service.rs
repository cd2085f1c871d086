//! Book Service
//!
//! Validates catalog requests, orchestrates the book repository and
//! implements CSV export, JSON import and metadata enrichment.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use validator::Validate;

use super::book_export::{write_csv, ExportError};
use super::book_import::{
    describe_field_errors, payload_items, ImportItemOutcome, ImportReport,
};
use super::metadata_service::{enrichment_changes, MetadataProvider};
use crate::application::dto::request::{CreateBookRequest, UpdateBookRequest};
use crate::config::PaginationSettings;
use crate::domain::{Book, BookFilter, BookRepository};
use crate::shared::error::{AppError, FieldError};
use crate::shared::validation::{field_errors, summarize};

/// Book service trait
#[async_trait]
pub trait BookService: Send + Sync {
    /// Create a new book
    async fn create_book(&self, request: CreateBookRequest) -> Result<Book, BookError>;

    /// Get book by ID
    async fn get_book(&self, id: i64) -> Result<Book, BookError>;

    /// List books matching `filter`, one page at a time
    async fn list_books(&self, filter: BookFilter, page: PageRequest) -> Result<BookPage, BookError>;

    /// Apply a partial update
    async fn update_book(&self, id: i64, request: UpdateBookRequest) -> Result<Book, BookError>;

    /// Delete a book
    async fn delete_book(&self, id: i64) -> Result<(), BookError>;

    /// Export every book matching `filter` as CSV, optionally capped at `limit` rows
    async fn export_csv(&self, filter: BookFilter, limit: Option<i64>) -> Result<String, BookError>;

    /// Import a JSON array of books or a single book object (best-effort)
    async fn import_json(&self, payload: Value) -> Result<ImportReport, BookError>;

    /// Fill missing fields from the metadata provider
    async fn enrich_book(&self, id: i64) -> Result<Book, BookError>;
}

/// Raw pagination parameters as received from the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// One page of a book listing
#[derive(Debug, Clone)]
pub struct BookPage {
    pub items: Vec<Book>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

/// Book service errors
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("Book with id {0} not found")]
    NotFound(i64),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Metadata provider error: {0}")]
    Upstream(String),

    #[error("Metadata provider is not configured")]
    Unavailable,
}

impl BookError {
    fn field(field: &str, message: impl Into<String>) -> Self {
        BookError::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }
}

impl From<AppError> for BookError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Conflict(msg) => BookError::Conflict(msg),
            AppError::Validation { message, errors } if errors.is_empty() => {
                BookError::field("book", message)
            }
            AppError::Validation { errors, .. } => BookError::Validation(errors),
            other => BookError::Store(other.to_string()),
        }
    }
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Validation(errors) => AppError::Validation {
                message: summarize(&errors),
                errors,
            },
            BookError::NotFound(id) => AppError::NotFound(format!("Book with id {} not found", id)),
            BookError::Conflict(msg) => AppError::Conflict(msg),
            BookError::Store(msg) => AppError::Internal(msg),
            BookError::Export(e) => AppError::Internal(e.to_string()),
            BookError::Upstream(msg) => AppError::Upstream(msg),
            BookError::Unavailable => {
                AppError::Unavailable("Metadata provider is not configured".into())
            }
        }
    }
}

/// Map a repository error for a specific book, keeping NotFound tied to its id.
fn for_book(id: i64) -> impl Fn(AppError) -> BookError {
    move |err| match err {
        AppError::NotFound(_) => BookError::NotFound(id),
        other => other.into(),
    }
}

/// BookService implementation
pub struct BookServiceImpl<R>
where
    R: BookRepository,
{
    book_repo: Arc<R>,
    metadata: Option<Arc<dyn MetadataProvider>>,
    pagination: PaginationSettings,
}

impl<R> BookServiceImpl<R>
where
    R: BookRepository,
{
    pub fn new(book_repo: Arc<R>, pagination: PaginationSettings) -> Self {
        Self {
            book_repo,
            metadata: None,
            pagination,
        }
    }

    /// Enable metadata enrichment.
    pub fn with_metadata(mut self, provider: Arc<dyn MetadataProvider>) -> Self {
        self.metadata = Some(provider);
        self
    }

    /// Resolve client pagination into concrete `(offset, limit)`.
    ///
    /// A missing or zero limit falls back to the default; oversized limits are clamped.
    fn resolve_page(&self, page: PageRequest) -> Result<(i64, i64), BookError> {
        let offset = page.offset.unwrap_or(0);
        if offset < 0 {
            return Err(BookError::field("offset", "must not be negative"));
        }

        let limit = match page.limit {
            None | Some(0) => self.pagination.default_limit,
            Some(limit) if limit < 0 => {
                return Err(BookError::field("limit", "must not be negative"));
            }
            Some(limit) => limit.min(self.pagination.max_limit),
        };

        Ok((offset, limit))
    }
}

#[async_trait]
impl<R> BookService for BookServiceImpl<R>
where
    R: BookRepository + 'static,
{
    async fn create_book(&self, request: CreateBookRequest) -> Result<Book, BookError> {
        request
            .validate()
            .map_err(|e| BookError::Validation(field_errors(&e)))?;

        let book = self.book_repo.insert(&request.into_new_book()).await?;

        tracing::info!(book_id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    async fn get_book(&self, id: i64) -> Result<Book, BookError> {
        self.book_repo
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))
    }

    async fn list_books(&self, filter: BookFilter, page: PageRequest) -> Result<BookPage, BookError> {
        let (offset, limit) = self.resolve_page(page)?;
        let filter = filter.normalized();

        let (items, total) = self
            .book_repo
            .find_filtered(&filter, offset, Some(limit))
            .await?;

        tracing::debug!(returned = items.len(), total, offset, limit, "Books listed");
        Ok(BookPage {
            items,
            total,
            offset,
            limit,
        })
    }

    async fn update_book(&self, id: i64, request: UpdateBookRequest) -> Result<Book, BookError> {
        request
            .validate()
            .map_err(|e| BookError::Validation(field_errors(&e)))?;

        let changes = request.into_changes();
        if changes.is_empty() {
            return self.get_book(id).await;
        }

        let book = self
            .book_repo
            .update_by_id(id, &changes)
            .await
            .map_err(for_book(id))?;

        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }

    async fn delete_book(&self, id: i64) -> Result<(), BookError> {
        self.book_repo
            .delete_by_id(id)
            .await
            .map_err(for_book(id))?;

        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    async fn export_csv(&self, filter: BookFilter, limit: Option<i64>) -> Result<String, BookError> {
        let limit = match limit {
            Some(l) if l < 0 => return Err(BookError::field("limit", "must not be negative")),
            Some(0) | None => None,
            Some(l) => Some(l),
        };

        let (books, total) = self
            .book_repo
            .find_filtered(&filter.normalized(), 0, limit)
            .await?;

        let csv = write_csv(&books)?;
        tracing::debug!(exported = books.len(), total, "Books exported to CSV");
        Ok(csv)
    }

    async fn import_json(&self, payload: Value) -> Result<ImportReport, BookError> {
        let items = payload_items(payload).map_err(|e| BookError::field("payload", e.to_string()))?;

        let mut report = ImportReport {
            total: items.len(),
            ..Default::default()
        };

        for (index, item) in items.into_iter().enumerate() {
            let request: CreateBookRequest = match serde_json::from_value(item) {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!(index, error = %e, "Rejected malformed book in import");
                    report.record(ImportItemOutcome::failed(index, format!("invalid book object: {}", e)));
                    continue;
                }
            };

            match self.create_book(request).await {
                Ok(book) => report.record(ImportItemOutcome::imported(index, book.id)),
                Err(BookError::Validation(errors)) => {
                    let reason = describe_field_errors(&errors);
                    tracing::warn!(index, error = %reason, "Rejected invalid book in import");
                    report.record(ImportItemOutcome::failed(index, reason));
                }
                Err(BookError::Conflict(msg)) => {
                    tracing::warn!(index, error = %msg, "Rejected duplicate book in import");
                    report.record(ImportItemOutcome::failed(index, msg));
                }
                // Store failures abort the batch; earlier items stay persisted.
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            total = report.total,
            imported = report.imported,
            failed = report.failed,
            "JSON import finished"
        );
        Ok(report)
    }

    async fn enrich_book(&self, id: i64) -> Result<Book, BookError> {
        let book = self.get_book(id).await?;
        let isbn = book
            .isbn
            .as_deref()
            .ok_or_else(|| BookError::field("isbn", "book has no ISBN to look up metadata"))?;
        let provider = self.metadata.as_ref().ok_or(BookError::Unavailable)?;

        let metadata = provider
            .fetch(isbn)
            .await
            .map_err(|e| BookError::Upstream(e.to_string()))?;

        let changes = enrichment_changes(&book, &metadata);
        if changes.is_empty() {
            tracing::debug!(book_id = id, "Metadata had nothing to add");
            return Ok(book);
        }

        let book = self
            .book_repo
            .update_by_id(id, &changes)
            .await
            .map_err(for_book(id))?;

        tracing::info!(book_id = id, "Book enriched with metadata");
        Ok(book)
    }
}
