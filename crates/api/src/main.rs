use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use cinerate_core::ports::{MovieStore, UserStore};
use cinerate_db::memory::SEED_CATALOG;
use cinerate_db::{MemoryMovieStore, MemoryUserStore, PgMovieStore, PgUserStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinerate_api::config::{ServerConfig, StoreBackend};
use cinerate_api::router::build_app_router;
use cinerate_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "cinerate_api=debug,cinerate_db=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("invalid server configuration")?;
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    // --- Stores ---
    let (users, movies) = connect_stores(&config.store).await?;

    // --- Router ---
    let addr = SocketAddr::new(config.host, config.port);
    let app = build_app_router(AppState::new(users, movies, config));

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Build the store adapters for the configured backend.
async fn connect_stores(
    backend: &StoreBackend,
) -> anyhow::Result<(Arc<dyn UserStore>, Arc<dyn MovieStore>)> {
    match backend {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = cinerate_db::create_pool(database_url, *max_connections)
                .await
                .context("failed to connect to database")?;
            tracing::info!(max_connections, "Database connection pool created");

            cinerate_db::health_check(&pool)
                .await
                .context("database health check failed")?;
            tracing::info!("Database health check passed");

            cinerate_db::run_migrations(&pool)
                .await
                .context("failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok((
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgMovieStore::new(pool)),
            ))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; data will not survive a restart");
            Ok((
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryMovieStore::with_catalog(SEED_CATALOG.iter().copied())),
            ))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
