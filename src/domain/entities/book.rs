//! Book entity, filter and repository trait.
//!
//! Maps to the `books` table:
//! - id: BIGSERIAL PRIMARY KEY
//! - title: VARCHAR(255) NOT NULL
//! - author: VARCHAR(255) NOT NULL
//! - description: TEXT NULL
//! - publication_year: INTEGER NULL
//! - isbn: VARCHAR(20) NULL UNIQUE
//! - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier, immutable after creation
    pub id: i64,

    pub title: String,

    pub author: String,

    pub description: Option<String>,

    pub publication_year: Option<i32>,

    /// Unique across the catalog when present
    pub isbn: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Validated field values for a book that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
}

impl BookChanges {
    /// True when applying the changes would not modify any field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.publication_year.is_none()
            && self.isbn.is_none()
    }

    /// Apply the changes to an in-memory copy of a book.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(description) = &self.description {
            book.description = Some(description.clone());
        }
        if let Some(year) = self.publication_year {
            book.publication_year = Some(year);
        }
        if let Some(isbn) = &self.isbn {
            book.isbn = Some(isbn.clone());
        }
    }
}

/// Optional predicates narrowing a listing or export.
///
/// `title` and `author` match case-insensitive substrings; `publication_year`
/// and `isbn` match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
}

impl BookFilter {
    /// Drop blank string predicates and trim the rest.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: clean(self.title),
            author: clean(self.author),
            publication_year: self.publication_year,
            isbn: clean(self.isbn),
        }
    }

    /// Evaluate the filter against a single book.
    pub fn matches(&self, book: &Book) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        self.title
            .as_deref()
            .map_or(true, |t| contains_ci(&book.title, t))
            && self
                .author
                .as_deref()
                .map_or(true, |a| contains_ci(&book.author, a))
            && self
                .publication_year
                .map_or(true, |y| book.publication_year == Some(y))
            && self
                .isbn
                .as_deref()
                .map_or(true, |i| book.isbn.as_deref() == Some(i))
    }
}

/// Repository trait for Book data access operations.
///
/// Every write runs in its own transaction. Unique violations on `isbn`
/// surface as [`AppError::Conflict`], missing rows as [`AppError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a new book and return it with its assigned id.
    async fn insert(&self, book: &NewBook) -> Result<Book, AppError>;

    /// Find a book by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError>;

    /// Books matching `filter` ordered by id, plus the total match count.
    ///
    /// `limit = None` returns every match after `offset`.
    async fn find_filtered(
        &self,
        filter: &BookFilter,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<(Vec<Book>, i64), AppError>;

    /// Apply a partial update and return the stored result.
    async fn update_by_id(&self, id: i64, changes: &BookChanges) -> Result<Book, AppError>;

    /// Hard-delete a book.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
