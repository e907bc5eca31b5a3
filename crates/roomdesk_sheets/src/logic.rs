use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use roomdesk_common::services::{SheetRow, SheetService};
use roomdesk_config::SheetsConfig;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info};

use crate::service::SheetsServiceError;

pub const MSG_MISSING_FIELDS: &str = "Missing fields";
pub const MSG_ROOM_AVAILABLE: &str = "Room available ✅";
pub const MSG_MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub const MSG_BOOKING_SAVED: &str = "Booking saved to Google Sheets ✅";
pub const MSG_BOOKING_FAILED: &str = "Error saving booking";

/// Number of distinct reference codes, `REF-000000` to `REF-999999`.
pub const REFERENCE_SPACE: u32 = 1_000_000;
/// How many recently issued codes are kept for the collision check.
pub const RECENT_REFERENCES: usize = 10_000;
const REFERENCE_PREFIX: &str = "REF-";
const RANDOM_DRAWS: usize = 32;

// --- Data Structures ---
// Fields are kept as raw JSON so that any non-empty value counts as supplied.
#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "Deluxe"))]
    pub room_type: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date", example = "2024-01-01"))]
    pub checkin: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date", example = "2024-01-03"))]
    pub checkout: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CheckResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "Ann"))]
    pub name: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "a@x.com"))]
    pub email: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date", example = "2024-01-01"))]
    pub checkin: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date", example = "2024-01-03"))]
    pub checkout: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "Deluxe"))]
    pub room_type: Option<Value>,
    /// Passed through to the sheet as sent.
    #[cfg_attr(feature = "openapi", schema(value_type = Object, example = 2))]
    pub guests: Option<Value>,
    /// Passed through to the sheet as sent.
    #[cfg_attr(feature = "openapi", schema(value_type = Object, example = 100))]
    pub price: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookResponse {
    pub ok: bool,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookResponse {
    pub fn saved(reference: String) -> Self {
        Self {
            ok: true,
            reference: Some(reference),
            message: MSG_BOOKING_SAVED.to_string(),
            error: None,
        }
    }

    pub fn missing_fields() -> Self {
        Self {
            ok: false,
            reference: None,
            message: MSG_MISSING_REQUIRED_FIELDS.to_string(),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            ok: false,
            reference: None,
            message: MSG_BOOKING_FAILED.to_string(),
            error: Some(error),
        }
    }
}

/// The caller-supplied part of a booking, after the required-field check.
///
/// Values are written to the sheet exactly as they arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestDetails {
    pub name: Value,
    pub email: Value,
    pub checkin: Value,
    pub checkout: Value,
    pub room_type: Value,
    pub guests: Value,
    pub price: Value,
}

/// One accepted booking, in sheet column order.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub timestamp: String,
    pub reference: String,
    pub details: GuestDetails,
}

impl BookingRecord {
    pub fn new(details: GuestDetails, reference: String, submitted_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(submitted_at),
            reference,
            details,
        }
    }

    /// `[timestamp, reference, name, email, checkin, checkout, roomType, guests, price]`
    pub fn into_row(self) -> SheetRow {
        let GuestDetails {
            name,
            email,
            checkin,
            checkout,
            room_type,
            guests,
            price,
        } = self.details;

        vec![
            Value::String(self.timestamp),
            Value::String(self.reference),
            name,
            email,
            checkin,
            checkout,
            room_type,
            guests,
            price,
        ]
    }
}

// --- Validation ---

/// Reads a request body. No body, or a body that is not a JSON object, reads as `{}`.
pub fn read_body<T: DeserializeOwned + Default>(body: Option<Value>) -> T {
    body.and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

/// Whether a field counts as supplied.
///
/// Absent, `null`, `""`, `0` and `false` are missing. Any other value is accepted,
/// including whitespace-only strings.
pub fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present(field: Option<Value>) -> Option<Value> {
    field.filter(is_filled)
}

impl CheckRequest {
    pub fn has_required_fields(&self) -> bool {
        [&self.room_type, &self.checkin, &self.checkout]
            .iter()
            .all(|field| field.as_ref().is_some_and(is_filled))
    }
}

impl BookRequest {
    /// Splits out the guest details, or `None` when name, email, checkin, checkout or
    /// roomType is missing.
    pub fn into_details(self) -> Option<GuestDetails> {
        let (Some(name), Some(email), Some(checkin), Some(checkout), Some(room_type)) = (
            present(self.name),
            present(self.email),
            present(self.checkin),
            present(self.checkout),
            present(self.room_type),
        ) else {
            return None;
        };

        Some(GuestDetails {
            name,
            email,
            checkin,
            checkout,
            room_type,
            guests: self.guests.unwrap_or(Value::Null),
            price: self.price.unwrap_or(Value::Null),
        })
    }
}

// --- Availability Logic ---

/// Answers an availability query.
///
/// There is no inventory behind this: any complete query is reported as available.
pub fn check_availability(request: &CheckRequest) -> CheckResponse {
    if !request.has_required_fields() {
        return CheckResponse {
            ok: false,
            message: MSG_MISSING_FIELDS.to_string(),
        };
    }

    CheckResponse {
        ok: true,
        message: MSG_ROOM_AVAILABLE.to_string(),
    }
}

// --- Reference Codes ---

pub fn format_reference(number: u32) -> String {
    format!("{}{:06}", REFERENCE_PREFIX, number)
}

fn parse_reference(reference: &str) -> Option<u32> {
    reference.strip_prefix(REFERENCE_PREFIX)?.parse().ok()
}

/// ISO-8601 in UTC with milliseconds, e.g. `2024-01-01T10:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Default)]
struct RecentReferences {
    order: VecDeque<u32>,
    members: HashSet<u32>,
}

impl RecentReferences {
    fn remember(&mut self, number: u32, window: usize) {
        if !self.members.insert(number) {
            return;
        }
        self.order.push_back(number);
        while self.order.len() > window {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
    }

    fn forget(&mut self, number: u32) {
        if self.members.remove(&number) {
            self.order.retain(|&issued| issued != number);
        }
    }
}

/// Issues random `REF-NNNNNN` codes that avoid the codes handed out recently.
///
/// A draw that hits a recent code is redrawn, up to a fixed number of times; after
/// that the last draw is used as is. Issuing never fails. Only the last `window`
/// codes are remembered, so memory stays bounded however long the process runs.
#[derive(Debug)]
pub struct ReferenceGenerator {
    recent: Mutex<RecentReferences>,
    window: usize,
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self::with_window(RECENT_REFERENCES)
    }
}

impl ReferenceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            recent: Mutex::new(RecentReferences::default()),
            window,
        }
    }

    pub fn next_reference(&self) -> String {
        self.next_reference_with(&mut rand::thread_rng())
    }

    pub fn next_reference_with<R: Rng>(&self, rng: &mut R) -> String {
        let mut recent = self.recent();

        let mut candidate = rng.gen_range(0..REFERENCE_SPACE);
        for _ in 1..RANDOM_DRAWS {
            if !recent.members.contains(&candidate) {
                break;
            }
            candidate = rng.gen_range(0..REFERENCE_SPACE);
        }

        recent.remember(candidate, self.window);
        format_reference(candidate)
    }

    /// Gives a code back, e.g. when the booking it was issued for was not saved.
    pub fn release(&self, reference: &str) {
        if let Some(number) = parse_reference(reference) {
            self.recent().forget(number);
        }
    }

    #[cfg(test)]
    pub(crate) fn remembered_count(&self) -> usize {
        self.recent().members.len()
    }

    fn recent(&self) -> MutexGuard<'_, RecentReferences> {
        self.recent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// --- Booking Logic ---

/// Generates a reference, builds the row and appends it. A single attempt, no retry.
///
/// The reference is released again when the append fails.
pub async fn append_booking<S>(
    service: &S,
    sheets: &SheetsConfig,
    references: &ReferenceGenerator,
    details: GuestDetails,
) -> Result<String, SheetsServiceError>
where
    S: SheetService<Error = SheetsServiceError> + ?Sized,
{
    let reference = references.next_reference();
    let record = BookingRecord::new(details, reference.clone(), Utc::now());

    let result = match service
        .append_row(&sheets.spreadsheet_id, &sheets.append_range(), record.into_row())
        .await
    {
        Ok(result) => result,
        Err(err) => {
            references.release(&reference);
            return Err(err);
        }
    };

    info!(
        reference = %reference,
        updated_range = result.updated_range.as_deref().unwrap_or("-"),
        updated_rows = result.updated_rows.unwrap_or_default(),
        "booking appended"
    );
    Ok(reference)
}

/// Full booking intake: required-field check, then append, then the caller payload.
///
/// Every outcome is a `BookResponse`; failures never escape as errors.
pub async fn submit_booking<S>(
    service: &S,
    sheets: &SheetsConfig,
    references: &ReferenceGenerator,
    request: BookRequest,
) -> BookResponse
where
    S: SheetService<Error = SheetsServiceError> + ?Sized,
{
    let Some(details) = request.into_details() else {
        return BookResponse::missing_fields();
    };

    match append_booking(service, sheets, references, details).await {
        Ok(reference) => BookResponse::saved(reference),
        Err(err) => {
            error!(error = %err, "failed to save booking");
            BookResponse::failed(err.upstream_message())
        }
    }
}
