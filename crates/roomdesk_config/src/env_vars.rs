//! Environment variable handling for the Roomdesk application.
//!
//! Structured settings follow the `ROOMDESK__SECTION__KEY` pattern and are read by
//! the `config` crate. A couple of flat variables predate that scheme and are still
//! honoured on top of everything else: `PORT` and `SPREADSHEET_ID`.

use std::env;

use config::ConfigError;

use crate::models::AppConfig;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "ROOMDESK";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Flat override for `server.port`.
pub const PORT_VAR: &str = "PORT";

/// Flat override for `sheets.spreadsheet_id`.
pub const SPREADSHEET_ID_VAR: &str = "SPREADSHEET_ID";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Applies `PORT` and `SPREADSHEET_ID` from the process environment.
pub fn apply_legacy_overrides(config: &mut AppConfig) -> Result<(), ConfigError> {
    apply_legacy_overrides_with(config, |key| env::var(key).ok())
}

/// Applies the flat overrides using `lookup` as the variable source.
///
/// Empty values are ignored so that `PORT=` in a `.env` file does not wipe the
/// configured port.
pub fn apply_legacy_overrides_with<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(PORT_VAR).filter(|v| !v.is_empty()) {
        config.server.port = port.trim().parse().map_err(|err| {
            ConfigError::Message(format!("{PORT_VAR} must be a port number, got {port:?}: {err}"))
        })?;
    }

    if let Some(spreadsheet_id) = lookup(SPREADSHEET_ID_VAR).filter(|v| !v.is_empty()) {
        config.sheets.spreadsheet_id = spreadsheet_id;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_legacy_overrides_apply_port_and_spreadsheet() {
        let mut config = AppConfig::default();
        apply_legacy_overrides_with(
            &mut config,
            lookup_from(&[("PORT", "8081"), ("SPREADSHEET_ID", "sheet-from-env")]),
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.sheets.spreadsheet_id, "sheet-from-env");
    }

    #[test]
    fn test_legacy_overrides_keep_defaults_when_unset() {
        let mut config = AppConfig::default();
        apply_legacy_overrides_with(&mut config, lookup_from(&[("PORT", "")])).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(
            config.sheets.spreadsheet_id,
            crate::models::DEFAULT_SPREADSHEET_ID
        );
    }

    #[test]
    fn test_legacy_overrides_reject_bad_port() {
        let mut config = AppConfig::default();
        let result = apply_legacy_overrides_with(&mut config, lookup_from(&[("PORT", "http")]));

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PORT"));
    }
}
