// File: crates/roomdesk_sheets/src/auth.rs
use google_sheets4::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    Sheets,
};
use roomdesk_config::SheetsConfig;
use std::{error::Error, path::Path};

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = Sheets<Connector>;

/// Reads the service account key and builds an authenticated Sheets client.
///
/// Tokens are fetched lazily on the first call and cached by the authenticator.
pub async fn create_sheets_hub(
    config: &SheetsConfig,
) -> Result<HubType, Box<dyn Error + Send + Sync>> {
    if config.key_path.trim().is_empty() {
        return Err("Missing key_path in SheetsConfig".into());
    }

    let sa_key = read_service_account_key(Path::new(&config.key_path)).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let hub = Sheets::new(client, auth);

    Ok(hub)
}
