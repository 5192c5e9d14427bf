// src/main.rs
use dotenv::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use neurodetect_api::build_app;
use neurodetect_api::common::{database::connect_pool, migrations::run_migrations};
use neurodetect_api::common::{AppConfig, AppState};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env()?;
    info!(
        access_ttl_secs = config.access_token_lifetime_secs,
        refresh_ttl_secs = config.refresh_token_lifetime_secs,
        cors_origins = ?config.cors_origins,
        "Configuration loaded"
    );

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    let pool = connect_pool(&config.database_url).await?;
    run_migrations(&pool, config.reset_db).await?;

    // ========================================================================
    // APPLICATION STATE AND ROUTER
    // ========================================================================

    let shared = AppState::new(pool, &config).into_shared();
    let app = build_app(shared, &config.cors_origins);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
