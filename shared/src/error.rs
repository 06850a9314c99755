use serde_json::Value;

/// Fallback message when a prediction request fails without a usable body.
pub const GENERIC_PREDICT_ERROR: &str = "Error processing file. Please try again.";

/// Pulls a user-facing message out of a structured error body. The service
/// reports validation failures as `{"detail": "..."}` or as an ordered list
/// `{"detail": [{"msg": "..."}, ...]}` whose entries get joined with
/// commas. Anything else yields `None` and the caller falls back to the
/// generic message.
pub fn extract_detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(entries) if !entries.is_empty() => Some(
            entries
                .iter()
                .map(|entry| {
                    entry
                        .get("msg")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown error")
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_detail_string_is_shown_verbatim() {
        assert_eq!(
            extract_detail_message(r#"{"detail": "Invalid Firebase token"}"#).as_deref(),
            Some("Invalid Firebase token")
        );
    }

    #[test]
    fn detail_list_joins_messages_in_order() {
        let body = r#"{"detail": [{"msg": "field required"}, {"msg": "value is not a valid file"}]}"#;
        assert_eq!(
            extract_detail_message(body).as_deref(),
            Some("field required, value is not a valid file")
        );
    }

    #[test]
    fn entries_without_msg_get_a_placeholder() {
        let body = r#"{"detail": [{"msg": "field required"}, {"loc": ["body"]}]}"#;
        assert_eq!(
            extract_detail_message(body).as_deref(),
            Some("field required, Unknown error")
        );
    }

    #[test]
    fn unusable_bodies_fall_back_to_none() {
        assert_eq!(extract_detail_message("<html>502</html>"), None);
        assert_eq!(extract_detail_message(r#"{"error": "nope"}"#), None);
        assert_eq!(extract_detail_message(r#"{"detail": []}"#), None);
        assert_eq!(extract_detail_message(r#"{"detail": 42}"#), None);
    }
}
