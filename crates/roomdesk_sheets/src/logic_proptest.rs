#[cfg(test)]
mod tests {
    use crate::logic::{check_availability, format_reference, BookRequest, CheckRequest};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    // Absent, one of the missing values, some text, or a non-zero number
    fn field() -> impl Strategy<Value = Option<Value>> {
        prop_oneof![
            Just(None),
            Just(Some(json!(""))),
            Just(Some(Value::Null)),
            Just(Some(json!(0))),
            "[ a-zA-Z0-9@.-]{1,20}".prop_map(|text| Some(json!(text))),
            (1u32..10_000).prop_map(|number| Some(json!(number))),
        ]
    }

    fn filled(field: &Option<Value>) -> bool {
        match field {
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Number(number)) => number.as_u64() != Some(0),
            _ => false,
        }
    }

    proptest! {
        #[test]
        fn test_reference_format(number in 0u32..1_000_000) {
            let code = format_reference(number);
            prop_assert_eq!(code.len(), 10);
            prop_assert!(code.starts_with("REF-"));
            prop_assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(code[4..].parse::<u32>().unwrap(), number);
        }

        #[test]
        fn test_check_ok_iff_all_fields_present(
            room_type in field(),
            checkin in field(),
            checkout in field(),
        ) {
            let expected = filled(&room_type) && filled(&checkin) && filled(&checkout);
            let response = check_availability(&CheckRequest { room_type, checkin, checkout });

            prop_assert_eq!(response.ok, expected);
            if expected {
                prop_assert_eq!(response.message, "Room available ✅");
            } else {
                prop_assert_eq!(response.message, "Missing fields");
            }
        }

        #[test]
        fn test_booking_accepted_iff_required_fields_present(
            name in field(),
            email in field(),
            checkin in field(),
            checkout in field(),
            room_type in field(),
        ) {
            let expected = [&name, &email, &checkin, &checkout, &room_type]
                .into_iter()
                .all(filled);
            let request = BookRequest {
                name,
                email,
                checkin,
                checkout,
                room_type,
                guests: None,
                price: None,
            };

            prop_assert_eq!(request.into_details().is_some(), expected);
        }
    }
}
