//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{BookPage, ImportItemOutcome, ImportReport};
use crate::domain::Book;

/// Book response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            publication_year: book.publication_year,
            isbn: book.isbn,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Paginated book listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookListResponse {
    pub items: Vec<BookResponse>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl From<BookPage> for BookListResponse {
    fn from(page: BookPage) -> Self {
        Self {
            items: page.items.into_iter().map(BookResponse::from).collect(),
            total: page.total,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

/// Result of `POST /books/import/json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub message: String,
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
    pub items: Vec<ImportItemOutcome>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        let message = if report.failed == 0 {
            format!("Imported {} of {} books", report.imported, report.total)
        } else {
            format!(
                "Imported {} of {} books, {} rejected",
                report.imported, report.total, report.failed
            )
        };

        Self {
            message,
            total: report.total,
            imported: report.imported,
            failed: report.failed,
            items: report.items,
        }
    }
}
