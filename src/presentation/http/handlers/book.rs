//! Book Handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::application::dto::request::{
    CreateBookRequest, ExportBooksQuery, ListBooksQuery, UpdateBookRequest,
};
use crate::application::dto::response::{BookListResponse, BookResponse, ImportResponse};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{parse_book_id, JsonBody, QueryParams};
use crate::shared::error::AppError;
use crate::startup::AppState;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=books_export.csv";

/// List books with optional filters and pagination
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListBooksQuery>,
) -> Result<Json<BookListResponse>, AppError> {
    let (filter, page) = query.into_parts();
    let page = state.books.list_books(filter, page).await?;
    Ok(Json(BookListResponse::from(page)))
}

/// Create a new book
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    let book = state.books.create_book(body).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// Get book by ID
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let book_id = parse_book_id(&book_id)?;
    let book = state.books.get_book(book_id).await?;
    Ok(Json(BookResponse::from(book)))
}

/// Partially update a book
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    JsonBody(body): JsonBody<UpdateBookRequest>,
) -> Result<Json<BookResponse>, AppError> {
    let book_id = parse_book_id(&book_id)?;
    let book = state.books.update_book(book_id, body).await?;
    Ok(Json(BookResponse::from(book)))
}

/// Delete a book
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let book_id = parse_book_id(&book_id)?;
    state.books.delete_book(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export matching books as a CSV attachment
pub async fn export_csv(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ExportBooksQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (filter, limit) = query.into_parts();
    let csv = state.books.export_csv(filter, limit).await?;

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
        ],
        csv,
    ))
}

/// Import books from a JSON array or single object
pub async fn import_json(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<Json<ImportResponse>, AppError> {
    let report = state.books.import_json(payload).await?;
    metrics::record_import(report.imported, report.failed);
    Ok(Json(ImportResponse::from(report)))
}

/// Fill missing book fields from the metadata API
pub async fn enrich_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let book_id = parse_book_id(&book_id)?;
    let book = state.books.enrich_book(book_id).await?;
    Ok(Json(BookResponse::from(book)))
}
