mod config;
mod cors;
mod db;
mod error;
mod store;
mod v1;

use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, Router};
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{Args, Config},
    store::TaskStore,
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::load(Args::parse())?;

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    info!(url = %config.database_url, "connected to database");

    let state = Arc::new(AppState::new(TaskStore::new(pool)));
    let app = app(state).into_make_service();
    let addr = SocketAddr::from(([0; 4], config.port));

    match config.tls() {
        Some((cert, key)) => {
            let tls = RustlsConfig::from_pem_file(cert, key).await?;

            info!(%addr, "serving https");
            axum_server::bind_rustls(addr, tls).serve(app).await?;
        }
        None => {
            info!(%addr, "serving http");
            axum_server::bind(addr).serve(app).await?;
        }
    }

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(v1::router())
        .layer(middleware::from_fn(cors::permissive))
        .with_state(state)
}

#[derive(Debug)]
pub struct AppState {
    pub store: TaskStore,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }
}
