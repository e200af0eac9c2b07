use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, StorageBackend};
use models::db::{connect_and_migrate, DatabaseConfig};
use service::auth::{HashParams, PasswordHasher};
use service::stores::Stores;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}:{}: {e}", server.host, server.port)))
}

/// Open the configured backend and wire the services on top of it.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let hasher = PasswordHasher::new(HashParams::from(cfg.password))?;
    let stores = match cfg.storage.backend {
        StorageBackend::Memory => Stores::memory(),
        StorageBackend::File => {
            common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
            Stores::file(&cfg.storage.data_dir).await?
        }
        StorageBackend::Database => {
            let db = connect_and_migrate(&DatabaseConfig::from(&cfg.database)).await?;
            Stores::database(db)
        }
    };
    info!(backend = ?cfg.storage.backend, data_dir = %cfg.storage.data_dir, "storage ready");
    Ok(AppState::new(stores, Arc::new(hasher))?)
}

pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app from a loaded configuration and serve
/// until the task is dropped.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
