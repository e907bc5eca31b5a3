// --- File: crates/roomdesk_common/src/handlers.rs ---

/// Liveness probe. Always answers `ok` while the process is able to serve requests.
pub async fn health_handler() -> &'static str {
    "ok"
}
