//! Bookshelf Server - Book Catalog
//!
//! REST server for the book registry.

use std::net::SocketAddr;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_server::{
    api,
    config::{AppConfig, DatabaseConfig, LogFormat, StorageBackend},
    repository::Repository,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookshelf_server={},tower_http=debug", config.logging.level).into());

    match config.logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    let repository = match config.storage.backend {
        StorageBackend::Postgres => connect_postgres(&config.database).await?,
        StorageBackend::Memory => {
            tracing::info!("Using in-memory book store");
            Repository::in_memory()
        }
    };

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state and router
    let state = AppState::new(config, repository);
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Create the connection pool and run migrations
async fn connect_postgres(database: &DatabaseConfig) -> anyhow::Result<Repository> {
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(database.min_connections)
        .connect(&database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    if database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations completed");
    }

    Ok(Repository::postgres(pool))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
