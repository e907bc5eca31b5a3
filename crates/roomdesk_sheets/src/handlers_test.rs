#[cfg(test)]
mod tests {
    use crate::handlers::{book_handler, check_handler, SheetsState};
    use crate::service::mock::MockSheetService;
    use axum::{extract::State, Json};
    use roomdesk_config::AppConfig;
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(service: Arc<MockSheetService>) -> Arc<SheetsState> {
        Arc::new(SheetsState::new(Arc::new(AppConfig::default()), service))
    }

    fn booking(body: serde_json::Value) -> Option<Json<serde_json::Value>> {
        Some(Json(body))
    }

    #[tokio::test]
    async fn test_check_handler() {
        let Json(response) = check_handler(Some(Json(json!({
            "roomType": "Standard",
            "checkin": "2024-03-01",
            "checkout": "2024-03-02"
        }))))
        .await;

        assert!(response.ok);
        assert_eq!(response.message, "Room available ✅");
    }

    #[tokio::test]
    async fn test_handlers_without_body_report_missing_fields() {
        let Json(check) = check_handler(None).await;
        assert!(!check.ok);
        assert_eq!(check.message, "Missing fields");

        let service = Arc::new(MockSheetService::new());
        let Json(book) = book_handler(State(state_with(service.clone())), None).await;
        assert!(!book.ok);
        assert_eq!(book.message, "Missing required fields");
        assert_eq!(service.append_count(), 0);
    }

    #[tokio::test]
    async fn test_book_handler_non_object_body_reads_as_empty() {
        let service = Arc::new(MockSheetService::new());
        let Json(response) =
            book_handler(State(state_with(service.clone())), booking(json!(["Ann"]))).await;

        assert_eq!(response.message, "Missing required fields");
        assert_eq!(service.append_count(), 0);
    }

    #[tokio::test]
    async fn test_book_handler_saves_booking() {
        let service = Arc::new(MockSheetService::new());
        let state = state_with(service.clone());

        let Json(response) = book_handler(
            State(state),
            booking(json!({
                "name": "Ann",
                "email": "a@x.com",
                "checkin": "2024-01-01",
                "checkout": "2024-01-03",
                "roomType": "Deluxe",
                "guests": 2,
                "price": 100
            })),
        )
        .await;

        assert!(response.ok);
        assert_eq!(service.append_count(), 1);
        assert_eq!(service.rows()[0].row[1], json!(response.reference.unwrap()));
    }

    #[tokio::test]
    async fn test_book_handler_uses_configured_sheet() {
        let service = Arc::new(MockSheetService::new());
        let mut config = AppConfig::default();
        config.sheets.spreadsheet_id = "custom-spreadsheet".to_string();
        config.sheets.sheet_name = "Bookings".to_string();
        let state = Arc::new(SheetsState::new(Arc::new(config), service.clone()));

        let Json(response) = book_handler(
            State(state),
            booking(json!({
                "name": "Bo",
                "email": "bo@example.com",
                "checkin": "2024-05-01",
                "checkout": "2024-05-04",
                "roomType": "Suite"
            })),
        )
        .await;

        assert!(response.ok);
        let rows = service.rows();
        assert_eq!(rows[0].spreadsheet_id, "custom-spreadsheet");
        assert_eq!(rows[0].range, "Bookings!A:I");
    }

    #[tokio::test]
    async fn test_book_handler_failure_is_payload_not_error() {
        let service = Arc::new(MockSheetService::failing("The caller does not have permission"));
        let state = state_with(service.clone());

        let Json(response) = book_handler(
            State(state),
            booking(json!({
                "name": "Ann",
                "email": "a@x.com",
                "checkin": "2024-01-01",
                "checkout": "2024-01-03",
                "roomType": "Deluxe"
            })),
        )
        .await;

        assert!(!response.ok);
        assert_eq!(response.message, "Error saving booking");
        assert_eq!(
            response.error.as_deref(),
            Some("The caller does not have permission")
        );
    }
}
