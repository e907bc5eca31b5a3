// File: services/roomdesk_backend/src/lib.rs
pub mod app;

pub use app::build_app;
