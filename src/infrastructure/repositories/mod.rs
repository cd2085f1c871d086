//! Repository Implementations
//!
//! Concrete implementations of the domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgBookRepository** - Books stored in PostgreSQL
//! - **InMemoryBookRepository** - Process-local store for tests
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::PgBookRepository;
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let book_repo = PgBookRepository::new(pool.clone());
//! }
//! ```

pub mod book_repository;
pub mod in_memory_book_repository;

pub use book_repository::PgBookRepository;
pub use in_memory_book_repository::InMemoryBookRepository;
