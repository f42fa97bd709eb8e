//! Backend entry-point: applies migrations, wires the counter endpoints,
//! health probes and OpenAPI docs, then serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use backend::settings::server_settings_from_env;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = server_settings_from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;

    let applied = apply_migrations(settings.database_url.clone())
        .await
        .map_err(|e| std::io::Error::other(format!("database schema setup failed: {e}")))?;
    info!(applied, "database schema ready");

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.as_str()).with_max_size(settings.pool_max_size),
    )
    .await
    .map_err(|e| std::io::Error::other(format!("database pool build failed: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr, pool),
    )?;
    info!(bind_addr = %settings.bind_addr, "counter backend listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
