// --- File: crates/roomdesk_sheets/src/routes.rs ---

use crate::handlers::{book_handler, check_handler, SheetsState};
use crate::service::connect_sheet_service;
use axum::{routing::post, Router};
use roomdesk_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing the booking routes, connecting to Google Sheets with
/// the configured service account.
pub async fn routes(config: Arc<AppConfig>) -> Router {
    let sheet_service = connect_sheet_service(&config.sheets).await;
    router(Arc::new(SheetsState::new(config, sheet_service)))
}

/// Creates the booking router around an existing state.
pub fn router(state: Arc<SheetsState>) -> Router {
    Router::new()
        .route("/check", post(check_handler))
        .route("/book", post(book_handler))
        .with_state(state)
}
