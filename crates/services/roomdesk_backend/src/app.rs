// File: services/roomdesk_backend/src/app.rs
use axum::{routing::get_service, Router};
use roomdesk_config::StaticFilesConfig;
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Assembles the full application router.
///
/// The booking routes answer both at the root and under `/api`. `GET /` returns the
/// index document from the public directory, and any other unmatched path falls
/// through to the static file server.
pub fn build_app(static_files: &StaticFilesConfig, booking_router: Router) -> Router {
    let public_dir = Path::new(&static_files.public_dir);
    let index = public_dir.join(&static_files.index_file);

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .merge(roomdesk_common::routes())
        .merge(booking_router.clone())
        .nest("/api", booking_router)
        .route("/", get_service(ServeFile::new(index)));

    #[cfg(feature = "openapi")]
    {
        app = app.merge(swagger_ui());
    }

    app.fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use roomdesk_sheets::doc::SheetsApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Roomdesk API",
            version = "0.1.0",
            description = "Room booking intake API",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        tags((name = "Roomdesk", description = "Core service endpoints")),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    let mut openapi_doc = ApiDoc::openapi();
    openapi_doc.merge(SheetsApiDoc::openapi());
    tracing::info!("Adding Swagger UI at /api/docs");

    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
