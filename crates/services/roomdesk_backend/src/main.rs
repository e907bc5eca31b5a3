// File: services/roomdesk_backend/src/main.rs
use roomdesk_backend::build_app;
use roomdesk_common::{config_error, internal_error, logging, RoomdeskError};
use roomdesk_config::load_config;
use roomdesk_sheets::routes as sheets_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), RoomdeskError> {
    let config = Arc::new(load_config().map_err(config_error)?);

    // Held until exit so buffered file logs are flushed.
    let _log_guard = logging::init_from_config(&config.logging);

    let sheets_router = sheets_routes::routes(config.clone()).await;
    let app = build_app(&config.static_files, sheets_router);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| internal_error(format!("failed to bind {addr}: {e}")))?;
    info!("Server running at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
