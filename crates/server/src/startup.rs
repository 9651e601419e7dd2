use std::{path::PathBuf, sync::Arc};

use axum::Router;
use common::{env::ensure_data_dir, utils::logging::init_logging_from_env};
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{
    records::RecordService,
    storage::{JsonFileStore, RecordStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let data_file = PathBuf::from(&cfg.storage.data_file);
    ensure_data_dir(&data_file).await?;
    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(&data_file));
    let records = Arc::new(RecordService::new(store));

    let state = AppState::new(records, cfg.server.port);
    let app: Router = routes::build_router(state, build_cors());

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, data_file = %data_file.display(), "starting server");
    println!("Starting server on http://localhost:{}", cfg.server.port);
    axum::serve(listener, app).await?;
    Ok(())
}
