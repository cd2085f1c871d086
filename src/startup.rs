//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::application::services::{BookService, BookServiceImpl, MetadataProvider};
use crate::config::{PaginationSettings, Settings};
use crate::domain::BookRepository;
use crate::infrastructure::database;
use crate::infrastructure::metadata::HttpMetadataProvider;
use crate::infrastructure::repositories::PgBookRepository;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookService>,
    pub store: Arc<dyn BookRepository>,
}

impl AppState {
    /// Wire the book service over `repo`.
    pub fn new<R>(
        repo: Arc<R>,
        metadata: Option<Arc<dyn MetadataProvider>>,
        pagination: PaginationSettings,
    ) -> Self
    where
        R: BookRepository + 'static,
    {
        let mut service = BookServiceImpl::new(repo.clone(), pagination);
        if let Some(provider) = metadata {
            service = service.with_metadata(provider);
        }

        Self {
            books: Arc::new(service),
            store: repo,
        }
    }
}

/// Full router with tracing and CORS layers.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(create_trace_layer())
            .layer(create_cors_layer(&settings.cors)),
    )
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    db: PgPool,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to create database pool")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
        }

        let metadata = HttpMetadataProvider::from_settings(&settings.metadata)?
            .map(|provider| Arc::new(provider) as Arc<dyn MetadataProvider>);
        if metadata.is_none() {
            tracing::info!("Metadata API not configured, enrichment disabled");
        }

        let repo = Arc::new(PgBookRepository::new(db.clone()));
        let state = AppState::new(repo, metadata, settings.pagination);
        let router = build_router(state, &settings);

        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router, db })
    }

    /// Run the server until SIGINT or SIGTERM, then drain and close the pool.
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped, closing database pool");
        self.db.close().await;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
