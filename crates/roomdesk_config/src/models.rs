// --- File: crates/roomdesk_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Column span of one booking row: timestamp, reference, name, email,
/// check-in, check-out, room type, guests, price.
pub const BOOKING_COLUMNS: &str = "A:I";

pub const DEFAULT_SPREADSHEET_ID: &str = "1GOTjxdcb2hTqTqR_xG-4WCk6gADnHiSb9LYzUufBSwQ";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_KEY_PATH: &str = "credentials.json";
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_VALUE_INPUT_OPTION: &str = "USER_ENTERED";

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Google Sheets Config ---
// The service account key itself stays on disk, only its path is configured.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String, // SPREADSHEET_ID or ROOMDESK__SHEETS__SPREADSHEET_ID
    pub sheet_name: String,
    pub key_path: String,
    pub scope: String,
    pub value_input_option: String,
    /// Upper bound for a single append call. Unset means the call may wait forever.
    #[serde(default)]
    pub append_timeout_secs: Option<u64>,
}

impl SheetsConfig {
    /// The A1 range rows are appended to, e.g. `Sheet1!A:I`.
    pub fn append_range(&self) -> String {
        format!("{}!{}", self.sheet_name, BOOKING_COLUMNS)
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            key_path: DEFAULT_KEY_PATH.to_string(),
            scope: SPREADSHEETS_SCOPE.to_string(),
            value_input_option: DEFAULT_VALUE_INPUT_OPTION.to_string(),
            append_timeout_secs: None,
        }
    }
}

// --- Static Frontend Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StaticFilesConfig {
    pub public_dir: String,
    pub index_file: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            public_dir: "public".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs are additionally written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            sheets: SheetsConfig::default(),
            static_files: StaticFilesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
