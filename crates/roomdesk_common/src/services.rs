// --- File: crates/roomdesk_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers only see these traits, so the real Google client and the in-memory
//! test double are interchangeable.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// One spreadsheet row: positional scalar cells.
pub type SheetRow = Vec<serde_json::Value>;

/// A trait for tabular store operations.
///
/// The only operation is appending a single row. There are no reads, updates or
/// deletes, and no ordering guarantee between concurrent appends.
pub trait SheetService: Send + Sync {
    /// Error type returned by sheet service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append one row after the last populated row of `range`.
    fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: SheetRow,
    ) -> BoxFuture<'_, AppendResult, Self::Error>;
}

/// Represents the result of an append operation.
///
/// Callers only need to know the append did not fail; the fields are informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppendResult {
    /// The A1 range that received the row, e.g. `Sheet1!A7:I7`.
    pub updated_range: Option<String>,
    /// Number of rows written.
    pub updated_rows: Option<i32>,
}
