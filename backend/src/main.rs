//! Todo Service Backend
//!
//! A multi-user todo-list API with bearer-token authentication.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic, one store call per operation
//! - Repositories: Data access behind the `Store` trait
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use std::sync::Arc;
use todo_backend::{
    config, db,
    routes,
    services::UserService,
    state::AppState,
};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Todo Service Backend"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    // Any failure from here until the listener is bound is fatal
    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    let store = Arc::new(db::PgStore::new(db_pool));
    seed_admin(store.as_ref(), &config.bootstrap).await?;

    let state = AppState::new(store, config.clone());
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Ensure the bootstrap admin account exists
async fn seed_admin(store: &db::PgStore, bootstrap: &config::BootstrapConfig) -> Result<()> {
    let created = UserService::register(store, &bootstrap.admin_username, &bootstrap.admin_password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed admin account: {:?}", e))?;

    if created {
        info!(username = %bootstrap.admin_username, "Seeded admin account");
    }
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "todo_backend=info,tower_http=info".into()
        } else {
            "todo_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let errors = config.production_errors();

    if config.bootstrap.admin_password == config::BootstrapConfig::default().admin_password {
        warn!("Bootstrap admin password is the default - set TODOAPP__BOOTSTRAP__ADMIN_PASSWORD");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
