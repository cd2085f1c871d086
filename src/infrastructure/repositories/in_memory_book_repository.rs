//! In-memory BookRepository used by tests and database-less runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{Book, BookChanges, BookFilter, BookRepository, NewBook};
use crate::shared::error::AppError;

#[derive(Debug, Default)]
struct Shelf {
    books: BTreeMap<i64, Book>,
    last_id: i64,
}

impl Shelf {
    fn isbn_taken(&self, isbn: Option<&str>, except: Option<i64>) -> bool {
        let Some(isbn) = isbn else {
            return false;
        };
        self.books
            .values()
            .any(|b| Some(b.id) != except && b.isbn.as_deref() == Some(isbn))
    }
}

fn isbn_conflict() -> AppError {
    AppError::Conflict("A book with this ISBN already exists".to_string())
}

/// Book store kept in a `BTreeMap`, so iteration is already ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    shelf: Mutex<Shelf>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, book: &NewBook) -> Result<Book, AppError> {
        let mut shelf = self.shelf.lock().await;
        if shelf.isbn_taken(book.isbn.as_deref(), None) {
            return Err(isbn_conflict());
        }

        shelf.last_id += 1;
        let now = Utc::now();
        let stored = Book {
            id: shelf.last_id,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            publication_year: book.publication_year,
            isbn: book.isbn.clone(),
            created_at: now,
            updated_at: now,
        };
        shelf.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        Ok(self.shelf.lock().await.books.get(&id).cloned())
    }

    async fn find_filtered(
        &self,
        filter: &BookFilter,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<(Vec<Book>, i64), AppError> {
        let shelf = self.shelf.lock().await;
        let matching: Vec<&Book> = shelf.books.values().filter(|b| filter.matches(b)).collect();
        let total = matching.len() as i64;

        let skip = usize::try_from(offset).unwrap_or(0);
        let take = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        let page = matching.into_iter().skip(skip).take(take).cloned().collect();
        Ok((page, total))
    }

    async fn update_by_id(&self, id: i64, changes: &BookChanges) -> Result<Book, AppError> {
        let mut shelf = self.shelf.lock().await;
        if !shelf.books.contains_key(&id) {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        if shelf.isbn_taken(changes.isbn.as_deref(), Some(id)) {
            return Err(isbn_conflict());
        }

        let book = shelf
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        changes.apply_to(book);
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        self.shelf
            .lock()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
