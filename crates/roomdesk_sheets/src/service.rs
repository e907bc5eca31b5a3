// --- File: crates/roomdesk_sheets/src/service.rs ---
//! Google Sheets service implementation.
//!
//! This module provides the `SheetService` implementation backed by the Sheets v4
//! `values.append` call, a timeout wrapper, a stand-in used when credentials could
//! not be loaded at startup, and an in-memory mock for tests.

use google_sheets4::api::ValueRange;
use roomdesk_common::services::{AppendResult, BoxFuture, SheetRow, SheetService};
use roomdesk_config::SheetsConfig;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::{create_sheets_hub, HubType};

/// Errors that can occur when appending to Google Sheets.
#[derive(Error, Debug)]
pub enum SheetsServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_sheets4::Error),
    #[error("Sheets client unavailable: {0}")]
    Unavailable(String),
    #[error("Append timed out after {0} seconds")]
    Timeout(u64),
    #[error("{0}")]
    Upstream(String),
}

impl SheetsServiceError {
    /// The message the upstream service gave, as shown to the booking caller.
    ///
    /// Google error bodies look like `{"error": {"code": 404, "message": "..."}}`; when
    /// such a body is present its `message` is used, otherwise the error's own text.
    pub fn upstream_message(&self) -> String {
        match self {
            SheetsServiceError::ApiError(google_sheets4::Error::BadRequest(body)) => body
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| self.to_string()),
            SheetsServiceError::Unavailable(reason) => reason.clone(),
            SheetsServiceError::Upstream(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Google Sheets service implementation.
pub struct GoogleSheetsService {
    sheets_hub: Arc<HubType>,
    scope: String,
    value_input_option: String,
}

impl GoogleSheetsService {
    /// Create a new Google Sheets service.
    pub fn new(sheets_hub: Arc<HubType>, config: &SheetsConfig) -> Self {
        Self {
            sheets_hub,
            scope: config.scope.clone(),
            value_input_option: config.value_input_option.clone(),
        }
    }
}

impl SheetService for GoogleSheetsService {
    type Error = SheetsServiceError;

    /// Appends one row below the last populated row of `range`.
    ///
    /// Values are sent with the configured input option (`USER_ENTERED` by default), so
    /// the sheet parses dates and numbers the way it would for typed input.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the call or the token exchange fails.
    fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: SheetRow,
    ) -> BoxFuture<'_, AppendResult, Self::Error> {
        let spreadsheet_id = spreadsheet_id.to_string();
        let range = range.to_string();
        let sheets_hub = self.sheets_hub.clone();

        Box::pin(async move {
            let request = ValueRange {
                values: Some(vec![row]),
                ..Default::default()
            };

            let (_response, append_response) = sheets_hub
                .spreadsheets()
                .values_append(request, &spreadsheet_id, &range)
                .value_input_option(&self.value_input_option)
                .add_scope(self.scope.as_str())
                .doit()
                .await?;

            let updates = append_response.updates.unwrap_or_default();
            Ok(AppendResult {
                updated_range: updates.updated_range,
                updated_rows: updates.updated_rows,
            })
        })
    }
}

/// Bounds every append of the wrapped service by `limit`.
///
/// The inner call is dropped when the limit passes; whether the row was written
/// upstream is then unknown.
pub struct TimeoutSheetService<S> {
    inner: S,
    limit: Duration,
}

impl<S> TimeoutSheetService<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

impl<S> SheetService for TimeoutSheetService<S>
where
    S: SheetService<Error = SheetsServiceError>,
{
    type Error = SheetsServiceError;

    fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: SheetRow,
    ) -> BoxFuture<'_, AppendResult, Self::Error> {
        let call = self.inner.append_row(spreadsheet_id, range, row);
        let limit = self.limit;

        Box::pin(async move {
            tokio::time::timeout(limit, call)
                .await
                .map_err(|_| SheetsServiceError::Timeout(limit.as_secs()))?
        })
    }
}

/// Stand-in used when the service account could not be loaded.
///
/// Every append fails with the reason captured at startup, so booking callers see the
/// credential problem in their response while the rest of the server keeps running.
pub struct UnavailableSheetService {
    reason: String,
}

impl UnavailableSheetService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SheetService for UnavailableSheetService {
    type Error = SheetsServiceError;

    fn append_row(
        &self,
        _spreadsheet_id: &str,
        _range: &str,
        _row: SheetRow,
    ) -> BoxFuture<'_, AppendResult, Self::Error> {
        let reason = self.reason.clone();
        Box::pin(async move { Err(SheetsServiceError::Unavailable(reason)) })
    }
}

/// Builds the Sheets client once from the service account key.
///
/// Falls back to [`UnavailableSheetService`] when the key cannot be read or the
/// authenticator cannot be built. With `append_timeout_secs` set, appends are wrapped
/// in [`TimeoutSheetService`].
pub async fn connect_sheet_service(
    config: &SheetsConfig,
) -> Arc<dyn SheetService<Error = SheetsServiceError>> {
    match create_sheets_hub(config).await {
        Ok(hub) => {
            info!(
                spreadsheet_id = %config.spreadsheet_id,
                range = %config.append_range(),
                "Google Sheets client ready"
            );
            let service = GoogleSheetsService::new(Arc::new(hub), config);
            match config.append_timeout_secs {
                Some(secs) => Arc::new(TimeoutSheetService::new(
                    service,
                    Duration::from_secs(secs),
                )),
                None => Arc::new(service),
            }
        }
        Err(err) => {
            warn!(
                key_path = %config.key_path,
                error = %err,
                "could not load service account; bookings will fail until restarted"
            );
            Arc::new(UnavailableSheetService::new(err.to_string()))
        }
    }
}

pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// One recorded append.
    #[derive(Debug, Clone, PartialEq)]
    pub struct AppendedRow {
        pub spreadsheet_id: String,
        pub range: String,
        pub row: SheetRow,
    }

    /// Mock sheet service for testing.
    ///
    /// Records every append. When a failure message is set, appends fail with it and
    /// nothing is recorded. An optional delay holds each append before it completes.
    #[derive(Default)]
    pub struct MockSheetService {
        rows: Mutex<Vec<AppendedRow>>,
        failure: Mutex<Option<String>>,
        delay: Option<Duration>,
    }

    impl MockSheetService {
        /// Create a new mock sheet service.
        pub fn new() -> Self {
            Self::default()
        }

        /// A mock whose appends all fail with `message`.
        pub fn failing(message: impl Into<String>) -> Self {
            let service = Self::new();
            service.fail_with(Some(message.into()));
            service
        }

        /// A mock whose appends each take `delay` to complete.
        pub fn with_delay(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::default()
            }
        }

        pub fn fail_with(&self, message: Option<String>) {
            *self.failure.lock().unwrap() = message;
        }

        /// Rows appended so far, oldest first.
        pub fn rows(&self) -> Vec<AppendedRow> {
            self.rows.lock().unwrap().clone()
        }

        pub fn append_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    impl SheetService for MockSheetService {
        type Error = SheetsServiceError;

        fn append_row(
            &self,
            spreadsheet_id: &str,
            range: &str,
            row: SheetRow,
        ) -> BoxFuture<'_, AppendResult, Self::Error> {
            let spreadsheet_id = spreadsheet_id.to_string();
            let range = range.to_string();

            Box::pin(async move {
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }

                if let Some(message) = self.failure.lock().unwrap().clone() {
                    return Err(SheetsServiceError::Upstream(message));
                }

                let mut rows = self.rows.lock().unwrap();
                rows.push(AppendedRow {
                    spreadsheet_id,
                    range: range.clone(),
                    row,
                });

                let sheet = range.split('!').next().unwrap_or_default();
                // Row 1 is the header row.
                let row_number = rows.len() + 1;
                Ok(AppendResult {
                    updated_range: Some(format!("{sheet}!A{row_number}:I{row_number}")),
                    updated_rows: Some(1),
                })
            })
        }
    }
}
