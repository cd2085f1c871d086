//! Book Repository Implementation
//!
//! PostgreSQL implementation of the BookRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{Book, BookChanges, BookFilter, BookRepository, NewBook};
use crate::shared::error::AppError;

const BOOK_COLUMNS: &str =
    "id, title, author, description, publication_year, isbn, created_at, updated_at";

/// Database row representation matching the books table schema.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    description: Option<String>,
    publication_year: Option<i32>,
    isbn: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            description: row.description,
            publication_year: row.publication_year,
            isbn: row.isbn,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Append `WHERE` predicates for every populated filter field.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &BookFilter) {
    builder.push(" WHERE TRUE");

    if let Some(title) = &filter.title {
        builder.push(" AND title ILIKE ").push_bind(like_pattern(title));
    }
    if let Some(author) = &filter.author {
        builder.push(" AND author ILIKE ").push_bind(like_pattern(author));
    }
    if let Some(year) = filter.publication_year {
        builder.push(" AND publication_year = ").push_bind(year);
    }
    if let Some(isbn) = &filter.isbn {
        builder.push(" AND isbn = ").push_bind(isbn.clone());
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A book with this ISBN already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL book repository implementation.
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    /// Create a new PgBookRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn insert(&self, book: &NewBook) -> Result<Book, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            INSERT INTO books (title, author, description, publication_year, isbn)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.publication_year)
        .bind(&book.isbn)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, AppError> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Book::from))
    }

    async fn find_filtered(
        &self,
        filter: &BookFilter,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<(Vec<Book>, i64), AppError> {
        // Count and page share a snapshot so `total` agrees with `items`.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(&mut *tx).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {BOOK_COLUMNS} FROM books"));
        push_filter(&mut select, filter);
        select.push(" ORDER BY id ASC");
        if let Some(limit) = limit {
            select.push(" LIMIT ").push_bind(limit);
        }
        select.push(" OFFSET ").push_bind(offset);

        let rows: Vec<BookRow> = select.build_query_as::<BookRow>().fetch_all(&mut *tx).await?;

        tx.commit().await?;

        Ok((rows.into_iter().map(Book::from).collect(), total))
    }

    async fn update_by_id(&self, id: i64, changes: &BookChanges) -> Result<Book, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                description = COALESCE($4, description),
                publication_year = COALESCE($5, publication_year),
                isbn = COALESCE($6, isbn),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.description)
        .bind(changes.publication_year)
        .bind(&changes.isbn)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("tolstoy"), "%tolstoy%");
        assert_eq!(like_pattern("100%_done\\"), "%100\\%\\_done\\\\%");
    }

    #[test]
    fn filter_builds_parameterised_predicates() {
        let filter = BookFilter {
            title: Some("war".into()),
            publication_year: Some(1869),
            ..Default::default()
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filter(&mut builder, &filter);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM books WHERE TRUE AND title ILIKE $1 AND publication_year = $2"
        );
    }
}
