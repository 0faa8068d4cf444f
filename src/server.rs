//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, worker spawning, the periodic sweep and the Axum
//! server lifecycle including graceful shutdown.

use crate::api::links::LinkBuilder;
use crate::application::services::AuthService;
use crate::application::workers::{SoftRemovedSweep, run_car_command_worker};
use crate::config::{Config, StorageBackend};
use crate::domain::clock::SystemClock;
use crate::infrastructure::messaging::ChannelCarCommandSender;
use crate::infrastructure::persistence::{
    InMemoryStore, PgBrandRepository, PgCarRepository, PgCountryRepository,
};
use crate::infrastructure::scheduler::Scheduler;
use crate::routes::{RouterOptions, app_router};
use crate::state::{AppState, Repositories};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL pool with migrations, or in-memory tables)
/// - Background car command worker
/// - Soft-removed sweep on the scheduler
/// - Axum HTTP server
///
/// On Ctrl+C the server stops accepting requests, the scheduler is stopped and
/// the command worker drains whatever is still queued before this returns.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migrations fail
/// - Auth configuration is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repositories = connect_storage(&config).await?;
    let auth_service = build_auth_service(&config)?;

    let (car_tx, car_rx) = mpsc::channel(config.car_queue_capacity);

    let state = AppState::new(
        repositories,
        Arc::new(SystemClock),
        Arc::new(ChannelCarCommandSender::new(car_tx)),
        Arc::new(auth_service),
        LinkBuilder::new(&config.public_base_url),
    );

    let worker = tokio::spawn(run_car_command_worker(car_rx, state.car_service.clone()));
    tracing::info!("Car command worker started");

    let mut scheduler = Scheduler::new();
    scheduler.schedule(
        Arc::new(SoftRemovedSweep::new(state.car_service.clone())),
        Duration::from_secs(config.sweep_interval_seconds),
    );
    tracing::info!(
        every_secs = config.sweep_interval_seconds,
        "Soft-removed sweep scheduled"
    );

    let app = app_router(
        state,
        RouterOptions {
            auth_mode: config.auth_mode,
            rate_limit_enabled: config.rate_limit_enabled,
        },
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("HTTP server stopped, shutting down background tasks");
    scheduler.shutdown().await;

    // The router owned the last sender, so the worker exits once the queue is empty.
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Car command worker terminated abnormally");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn connect_storage(config: &Config) -> Result<Repositories> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required with STORAGE_BACKEND=postgres")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            let pool = Arc::new(pool);
            Ok(Repositories {
                cars: Arc::new(PgCarRepository::new(pool.clone())),
                brands: Arc::new(PgBrandRepository::new(pool.clone())),
                countries: Arc::new(PgCountryRepository::new(pool)),
            })
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(InMemoryStore::new());
            Ok(Repositories {
                cars: store.clone(),
                brands: store.clone(),
                countries: store,
            })
        }
    }
}

/// Configures every credential type that has settings, independent of the mode.
///
/// The router picks the middleware; unused halves stay inert.
pub fn build_auth_service(config: &Config) -> Result<AuthService> {
    let mut auth = AuthService::disabled();

    if let Some(secret) = config.jwt_secret.as_deref() {
        auth = auth
            .with_jwt(secret, config.jwt_issuer.clone())
            .context("Failed to configure JWT authentication")?;
    }

    if let (Some(username), Some(password)) = (
        config.basic_auth_username.as_deref(),
        config.basic_auth_password.as_deref(),
    ) {
        auth = auth.with_basic(username, password);
    }

    Ok(auth)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
