//! Request DTOs
//!
//! Typed request bodies and query strings. Bodies carry `validator` rules;
//! the book service runs them before touching the store. Title and author
//! rules apply to the trimmed value, which is also what gets stored.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::PageRequest;
use crate::domain::{BookChanges, BookFilter, NewBook};
use crate::shared::validation::{validate_book_text, validate_isbn, validate_publication_year};

/// Create book request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(custom(function = "validate_book_text"))]
    pub title: String,

    #[validate(custom(function = "validate_book_text"))]
    pub author: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_publication_year"))]
    pub publication_year: Option<i32>,

    #[serde(default)]
    #[validate(custom(function = "validate_isbn"))]
    pub isbn: Option<String>,
}

impl CreateBookRequest {
    /// Convert into store input. Title and author are stored trimmed.
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            description: self.description,
            publication_year: self.publication_year,
            isbn: self.isbn,
        }
    }
}

/// Partial update request; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_book_text"))]
    pub title: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_book_text"))]
    pub author: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_publication_year"))]
    pub publication_year: Option<i32>,

    #[serde(default)]
    #[validate(custom(function = "validate_isbn"))]
    pub isbn: Option<String>,
}

impl UpdateBookRequest {
    pub fn into_changes(self) -> BookChanges {
        BookChanges {
            title: self.title.map(|t| t.trim().to_string()),
            author: self.author.map(|a| a.trim().to_string()),
            description: self.description,
            publication_year: self.publication_year,
            isbn: self.isbn,
        }
    }
}

/// `GET /books` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListBooksQuery {
    pub fn into_parts(self) -> (BookFilter, PageRequest) {
        let filter = BookFilter {
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            isbn: self.isbn,
        };
        let page = PageRequest {
            offset: self.offset,
            limit: self.limit,
        };
        (filter, page)
    }
}

/// `GET /books/export/csv` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportBooksQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
    pub isbn: Option<String>,
    /// Optional cap on exported rows; omitted or 0 exports every match
    pub limit: Option<i64>,
}

impl ExportBooksQuery {
    pub fn into_parts(self) -> (BookFilter, Option<i64>) {
        let filter = BookFilter {
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            isbn: self.isbn,
        };
        (filter, self.limit)
    }
}
