//! # Book Catalog
//!
//! Application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - HTTP server

use anyhow::Result;
use tracing::info;

use book_catalog::config::Settings;
use book_catalog::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    book_catalog::telemetry::init_tracing();

    info!("Starting Book Catalog...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        metadata_enabled = settings.metadata.api_url.is_some(),
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
