use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use linkdex_backend::config::AppConfig;
use linkdex_backend::logging;
use linkdex_backend::module::catalog::CatalogStore;
use linkdex_backend::module::websearch::WebSearchClient;
use linkdex_backend::service::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load("config.toml")?;

    // Initialize logging
    let _logging_guard = logging::init_logging("logs", &config.log_level);

    info!("linkdex backend starting...");
    info!("Loaded configuration: {:?}", config);

    // Open the catalog snapshot
    let store = CatalogStore::open(&config.data_dir).await?;

    let search = WebSearchClient::new(
        config.search_endpoint.clone(),
        config.search_api_key.clone(),
        config.search_max_results,
    );

    let state = AppState::new(config.clone(), store, Arc::new(search));
    let app = build_router(state);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
