use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use service::{file::product_store::FileProductStore, product::store::ProductStore, runtime};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(5000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Storage paths from configs or env vars
fn load_storage_config() -> configs::StorageConfig {
    match configs::load_default() {
        Ok(cfg) => cfg.storage,
        Err(_) => configs::StorageConfig::from_env(),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let storage = load_storage_config();
    runtime::ensure_env(&storage.data_dir).await?;

    // Product collection, persisted as one JSON array file
    let store: Arc<dyn ProductStore> =
        FileProductStore::new(storage.products_file.as_str()).await?;

    let cors = build_cors();
    let app: Router = routes::build_router(Arc::clone(&store), cors);

    let addr = load_bind_addr()?;
    info!(%addr, "starting product api server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
