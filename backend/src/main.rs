//! Application entry point: config, pool, schema catalog, HTTP server.

use actix_web::HttpServer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::DbPool;
use backend::server::{AppConfig, build_app, build_state};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let pool = DbPool::connect(&config.database_url, config.pool_size)
        .await
        .map_err(std::io::Error::other)?;
    let state = build_state(&config, pool)
        .await
        .map_err(std::io::Error::other)?;

    info!(addr = %config.bind_addr, "starting shelter API");
    HttpServer::new(move || build_app(state.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}
