//! Flight Compensation API Server
//!
//! # Usage
//!
//! ```bash
//! API_JWT_SECRET=... API_DATABASE_URL=postgres://... cargo run --bin flightclaim-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - Token lifetime in seconds (default: 3600)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `API_AVIATIONSTACK_API_KEY` - Enables the flight feed when set
//! * `API_AVIATIONSTACK_BASE_URL` - Feed base URL
//! * `API_DEPARTURE_IATA` - Airport the feed is queried for (default: TUN)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_admin::AdminService;
use domain_claims::CompensationService;
use domain_flight::{AviationstackConfig, AviationstackFeed, FlightService};
use infra_db::{
    create_pool_from_url, run_migrations, PostgresAdminAdapter, PostgresClaimsAdapter,
    PostgresFlightAdapter,
};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API configuration")?;
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting flight compensation API server"
    );

    let pool = create_pool_from_url(&config.database_url)
        .await
        .context("database connection failed")?;
    run_migrations(&pool).await.context("database migrations failed")?;

    let flight_port = Arc::new(PostgresFlightAdapter::new(pool.clone()));
    let mut flights = FlightService::new(flight_port.clone());
    match config.feed_api_key() {
        Some(key) => {
            let feed_config = AviationstackConfig::new(key).with_base_url(&config.aviationstack_base_url);
            let feed = AviationstackFeed::new(feed_config).context("flight feed client")?;
            flights = flights.with_feed(Arc::new(feed), config.departure_iata.clone());
            tracing::info!(iata = %config.departure_iata, "Flight feed enabled");
        }
        None => tracing::warn!("No Aviationstack key configured, flight feed disabled"),
    }

    let claims = CompensationService::new(Arc::new(PostgresClaimsAdapter::new(pool.clone())), flight_port);
    let admins = AdminService::new(Arc::new(PostgresAdminAdapter::new(pool)));

    let addr: SocketAddr = config.server_addr().parse().context("invalid server address")?;
    let app = create_router(AppState::new(flights, claims, admins, config));

    tracing::info!(%addr, "Server listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
