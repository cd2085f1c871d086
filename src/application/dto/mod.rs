//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{CreateBookRequest, ExportBooksQuery, ListBooksQuery, UpdateBookRequest};
pub use response::{BookListResponse, BookResponse, ImportResponse};
