//! # salonbookd: salonbook daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`salonbook.toml`, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGTERM/SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use salonbook_adapter_http_axum::state::AppState;
use salonbook_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteBarberRepository, SqliteBookingRepository,
    SqliteOfferingRepository,
};
use salonbook_app::reference_allocator::{RandomCandidates, ReferenceAllocator};
use salonbook_app::services::barber_service::BarberService;
use salonbook_app::services::booking_service::BookingService;
use salonbook_app::services::offering_service::OfferingService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();
    tracing::info!(url = config.database_url(), "database ready");

    // Repositories
    let barber_repo = SqliteBarberRepository::new(pool.clone());
    let offering_repo = SqliteOfferingRepository::new(pool.clone());
    let booking_repo = SqliteBookingRepository::new(pool);

    // Services
    let allocator = ReferenceAllocator::new(RandomCandidates, config.booking.max_reference_attempts);
    let state = AppState::new(
        BarberService::new(barber_repo),
        OfferingService::new(offering_repo),
        BookingService::with_allocator(booking_repo, allocator),
    );

    // HTTP
    let app = salonbook_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        max_reference_attempts = config.booking.max_reference_attempts,
        "salonbookd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("salonbookd stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
