//! Metadata Provider
//!
//! Contract for the external bibliographic API used to enrich books, and the
//! rules for merging its answer into a stored book.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Book, BookChanges};
use crate::shared::validation::validate_publication_year;

/// Author entry in a metadata response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAuthor {
    pub name: String,
}

/// Bibliographic metadata for one ISBN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub isbn: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<MetadataAuthor>,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY`, `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default)]
    pub publication_date: Option<String>,
}

impl BookMetadata {
    /// Year prefix of `publication_date`, if it has one.
    pub fn publication_year(&self) -> Option<i32> {
        let date = self.publication_date.as_deref()?.trim();
        let year = date.get(..4)?;
        if !year.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        year.parse().ok()
    }
}

/// Metadata lookup failures
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("metadata request failed: {0}")]
    Request(String),

    #[error("metadata API answered with status {0}")]
    Status(u16),

    #[error("metadata response could not be decoded: {0}")]
    Decode(String),
}

/// Source of book metadata keyed by ISBN.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch(&self, isbn: &str) -> Result<BookMetadata, MetadataError>;
}

/// Changes that fill gaps in `book` from `metadata`. Populated fields are never overwritten.
pub fn enrichment_changes(book: &Book, metadata: &BookMetadata) -> BookChanges {
    let mut changes = BookChanges::default();

    let has_description = book
        .description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());
    if !has_description {
        changes.description = metadata
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
    }

    if book.publication_year.is_none() {
        changes.publication_year = metadata
            .publication_year()
            .filter(|year| validate_publication_year(*year).is_ok());
    }

    changes
}
