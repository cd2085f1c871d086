//! # Domain Entities
//!
//! The catalog has a single entity, [`Book`], stored in the `books` table.
//! Its repository trait lives next to it and is implemented in the
//! infrastructure layer, following the dependency inversion principle.

mod book;

pub use book::{Book, BookChanges, BookFilter, BookRepository, NewBook};

#[cfg(test)]
pub use book::MockBookRepository;
