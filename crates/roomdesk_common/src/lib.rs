// --- File: crates/roomdesk_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod handlers; // HTTP request handlers
pub mod logging; // Logging utilities
pub mod routes; // Route definitions
pub mod services; // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{config_error, internal_error, RoomdeskError};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, init_with_level};
