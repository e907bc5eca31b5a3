#[cfg(test)]
mod tests {
    use crate::auth::create_sheets_hub;
    use roomdesk_config::SheetsConfig;

    #[tokio::test]
    async fn test_create_sheets_hub_empty_key_path() {
        let config = SheetsConfig {
            key_path: "  ".to_string(),
            ..SheetsConfig::default()
        };

        let result = create_sheets_hub(&config).await;
        match result {
            Ok(_) => panic!("Expected an error but got Ok"),
            Err(err) => assert_eq!(err.to_string(), "Missing key_path in SheetsConfig"),
        }
    }

    #[tokio::test]
    async fn test_create_sheets_hub_missing_key_file() {
        let config = SheetsConfig {
            key_path: "/nonexistent/roomdesk/credentials.json".to_string(),
            ..SheetsConfig::default()
        };

        let result = create_sheets_hub(&config).await;
        match result {
            Ok(_) => panic!("Expected an error but got Ok"),
            Err(err) => {
                let err_string = err.to_string();
                assert!(
                    err_string.contains("No such file")
                        || err_string.contains("not found")
                        || err_string.contains("cannot find"),
                    "Error message should indicate file not found, got: {}",
                    err_string
                );
            }
        }
    }

    #[tokio::test]
    async fn test_create_sheets_hub_malformed_key_file() {
        let path = std::env::temp_dir().join(format!(
            "roomdesk-malformed-key-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ this is not a service account").unwrap();

        let config = SheetsConfig {
            key_path: path.to_string_lossy().into_owned(),
            ..SheetsConfig::default()
        };
        let result = create_sheets_hub(&config).await;
        std::fs::remove_file(&path).ok();

        assert!(result.is_err(), "Malformed key file must not authenticate");
    }
}
