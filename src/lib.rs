//! # Book Catalog Library
//!
//! A book catalog service with:
//! - RESTful CRUD endpoints with filtered, paginated listing
//! - CSV export and best-effort JSON import
//! - Metadata enrichment from an external bibliographic API
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Book entity, filters and the repository trait
//! - **Application Layer**: Book service, import/export and DTOs
//! - **Infrastructure Layer**: Database, repositories, metadata client, metrics
//! - **Presentation Layer**: HTTP routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! book_catalog/
//! +-- config/         Configuration management
//! +-- domain/         Book entity and repository trait
//! +-- application/    Book service and DTOs
//! +-- infrastructure/ Database, repositories, metadata client, metrics
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Errors and validation rules
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
