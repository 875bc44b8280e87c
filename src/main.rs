//! EventHub API server.

use std::sync::Arc;

use secrecy::Secret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use eventhub::adapters::auth::{JwtSessionValidator, JwtTokenIssuer, Pbkdf2Hasher};
use eventhub::adapters::http::{build_router, AppState};
use eventhub::adapters::postgres::{
    PostgresBookingRepository, PostgresCategoryRepository, PostgresEventRepository,
    PostgresTagRepository, PostgresTicketInventory, PostgresUserRepository,
};
use eventhub::config::{AppConfig, AuthConfig, DatabaseConfig};
use eventhub::ports::UserRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        "Starting EventHub"
    );

    let pool = connect(&config.database).await?;
    let state = build_state(pool, &config.auth);
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs as JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(&config.url)
        .await?;
    info!(max_connections = config.max_connections, "Database pool ready");

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }
    Ok(pool)
}

fn build_state(pool: PgPool, auth: &AuthConfig) -> AppState {
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let secret: &Secret<String> = &auth.jwt_secret;

    AppState {
        events: Arc::new(PostgresEventRepository::new(pool.clone())),
        bookings: Arc::new(PostgresBookingRepository::new(pool.clone())),
        inventory: Arc::new(PostgresTicketInventory::new(pool.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
        tags: Arc::new(PostgresTagRepository::new(pool)),
        hasher: Arc::new(Pbkdf2Hasher::new(auth.password_iterations)),
        issuer: Arc::new(JwtTokenIssuer::new(
            secret,
            auth.jwt_issuer.clone(),
            auth.token_ttl_secs,
        )),
        validator: Arc::new(JwtSessionValidator::new(
            secret,
            auth.jwt_issuer.clone(),
            users.clone(),
        )),
        users,
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
