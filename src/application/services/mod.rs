//! Application Services
//!
//! Business logic that coordinates the book repository and the metadata provider.
//!
//! ## Available Services
//!
//! - **BookService**: CRUD, filtered listing, CSV export, JSON import, enrichment
//! - **MetadataProvider**: Lookup contract for the external bibliographic API

pub mod book_export;
pub mod book_import;
pub mod book_service;
pub mod metadata_service;

pub use book_export::{write_csv, ExportError, CSV_COLUMNS};
pub use book_import::{ImportItemOutcome, ImportReport, ImportStatus};
pub use book_service::{BookError, BookPage, BookService, BookServiceImpl, PageRequest};
pub use metadata_service::{
    enrichment_changes, BookMetadata, MetadataAuthor, MetadataError, MetadataProvider,
};
