// File: crates/roomdesk_sheets/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{BookRequest, BookResponse, CheckRequest, CheckResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::check_handler, crate::handlers::book_handler),
    components(schemas(CheckRequest, CheckResponse, BookRequest, BookResponse)),
    tags(
        (name = "Booking", description = "Room availability and booking intake")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct SheetsApiDoc;
