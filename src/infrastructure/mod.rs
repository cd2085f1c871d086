//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database pool and migrations (PostgreSQL)
//! - Book repositories
//! - Metadata API client
//! - Prometheus metrics

pub mod database;
pub mod metadata;
pub mod metrics;
pub mod repositories;
