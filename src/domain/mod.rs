//! # Domain Layer
//!
//! Core catalog types, independent of HTTP and database concerns.
//!
//! - **entities**: the `Book` entity, filters, partial updates and the
//!   repository contract implemented by the infrastructure layer

pub mod entities;

pub use entities::*;
