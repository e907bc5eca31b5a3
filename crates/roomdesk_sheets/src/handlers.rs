// File: crates/roomdesk_sheets/src/handlers.rs
use crate::logic::{
    check_availability, read_body, submit_booking, BookRequest, BookResponse, CheckRequest,
    CheckResponse, ReferenceGenerator,
};
use crate::service::SheetsServiceError;
use axum::{extract::State, response::Json};
use roomdesk_common::services::SheetService;
use roomdesk_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

// Define shared state needed by the booking handlers
#[derive(Clone)]
pub struct SheetsState {
    pub config: Arc<AppConfig>,
    pub sheet_service: Arc<dyn SheetService<Error = SheetsServiceError>>, // Built once at startup
    pub references: Arc<ReferenceGenerator>,
}

impl SheetsState {
    pub fn new(
        config: Arc<AppConfig>,
        sheet_service: Arc<dyn SheetService<Error = SheetsServiceError>>,
    ) -> Self {
        Self {
            config,
            sheet_service,
            references: Arc::new(ReferenceGenerator::new()),
        }
    }
}

/// Handler for room availability queries.
///
/// A request without a JSON content type is read as an empty object.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/check",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Availability answer; `ok` is false when a field is missing", body = CheckResponse)
    ),
    tag = "Booking"
))]
pub async fn check_handler(body: Option<Json<Value>>) -> Json<CheckResponse> {
    let request: CheckRequest = read_body(body.map(|Json(value)| value));
    let response = check_availability(&request);
    debug!(ok = response.ok, room_type = ?request.room_type, "availability check");
    Json(response)
}

/// Handler for booking submissions.
///
/// Always answers 200; the outcome is carried in `ok`, with the upstream message in
/// `error` when the sheet append fails. A request without a JSON content type is read
/// as an empty object.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/book",
    request_body = BookRequest,
    responses(
        (status = 200, description = "Booking result", body = BookResponse)
    ),
    tag = "Booking"
))]
pub async fn book_handler(
    State(state): State<Arc<SheetsState>>,
    body: Option<Json<Value>>,
) -> Json<BookResponse> {
    let request: BookRequest = read_body(body.map(|Json(value)| value));
    let response = submit_booking(
        state.sheet_service.as_ref(),
        &state.config.sheets,
        &state.references,
        request,
    )
    .await;
    Json(response)
}
