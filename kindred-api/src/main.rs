use std::sync::Arc;

use kindred_api::config::AppConfig;
use kindred_api::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kindred_shared::middleware::init_tracing("kindred-api");

    let config = AppConfig::load()?;
    let port = config.port;

    let metrics_handle = kindred_shared::middleware::init_metrics();

    let store: Arc<dyn Store> = match config.store_backend.as_str() {
        "memory" => {
            tracing::warn!("using the in-memory store; data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
        _ => Arc::new(PgStore::connect(&config.database_url)?),
    };

    let app = kindred_api::build_app(config, store, Some(metrics_handle));

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "kindred-api starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
