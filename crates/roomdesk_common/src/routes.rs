// --- File: crates/roomdesk_common/src/routes.rs ---

use axum::{routing::get, Router};

use crate::handlers::health_handler;

/// Creates a router containing the routes shared by every deployment.
///
/// Stateless, so it can be merged into a router of any state type.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_handler))
}
