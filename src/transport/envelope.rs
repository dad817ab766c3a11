use serde_json::Value;

/// Application-level error reported in a JSON body.
///
/// TelQ signals failures with a non-null top-level `error`; the human readable text is in
/// `message` when present.
pub fn embedded_error(body: &Value) -> Option<String> {
    let error = body.get("error").filter(|error| !error.is_null())?;
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty());
    Some(match (message, error) {
        (Some(message), _) => message.to_owned(),
        (None, Value::String(error)) => error.clone(),
        (None, other) => other.to_string(),
    })
}

pub fn decode_json_body(body: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_is_preferred_over_error() {
        let body = json!({"error": "Unauthorized", "message": "Invalid appId or appKey"});
        assert_eq!(
            embedded_error(&body).as_deref(),
            Some("Invalid appId or appKey")
        );
    }

    #[test]
    fn error_is_used_without_message() {
        let body = json!({"error": "Bad Request"});
        assert_eq!(embedded_error(&body).as_deref(), Some("Bad Request"));

        let body = json!({"error": 400, "message": null});
        assert_eq!(embedded_error(&body).as_deref(), Some("400"));
    }

    #[test]
    fn null_error_and_lists_are_not_errors() {
        assert_eq!(embedded_error(&json!({"error": null, "content": []})), None);
        assert_eq!(embedded_error(&json!([{"mcc": "246"}])), None);
        assert_eq!(embedded_error(&json!({"testStatus": "WAIT"})), None);
    }
}
