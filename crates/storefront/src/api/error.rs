//! Errors of the REST gateway.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, DNS, invalid URL, ...).
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("Server responded with status {status}")]
    Status { status: u16, body: Value },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// First message of a field-keyed validation payload.
    ///
    /// `{"email": ["already exists"], "password": [...]}` yields `"already exists"`. A plain
    /// string value is accepted in place of the list.
    pub fn first_validation_message(&self) -> Option<String> {
        let Self::Status {
            body: Value::Object(fields),
            ..
        } = self
        else {
            return None;
        };
        let (_, value) = fields.iter().next()?;
        match value {
            Value::Array(messages) => messages.first()?.as_str().map(str::to_string),
            Value::String(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// The `error` field of the response body, else its `detail` field.
    pub fn error_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        ["error", "detail"]
            .iter()
            .find_map(|key| body.get(key)?.as_str())
            .map(str::to_string)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bad_request(body: Value) -> ApiError {
        ApiError::Status { status: 400, body }
    }

    #[test]
    fn test_first_validation_message_takes_first_key_first_message() {
        let err = bad_request(json!({
            "email": ["already exists", "is invalid"],
            "password": ["too short"],
        }));
        assert_eq!(err.first_validation_message().as_deref(), Some("already exists"));
    }

    #[test]
    fn test_first_validation_message_accepts_plain_string() {
        let err = bad_request(json!({"password_confirm": "passwords differ"}));
        assert_eq!(
            err.first_validation_message().as_deref(),
            Some("passwords differ")
        );
    }

    #[test]
    fn test_first_validation_message_absent_for_other_shapes() {
        assert!(bad_request(json!({"email": []})).first_validation_message().is_none());
        assert!(bad_request(json!(["oops"])).first_validation_message().is_none());
        assert!(ApiError::Request("timeout".into())
            .first_validation_message()
            .is_none());
    }

    #[test]
    fn test_error_message_prefers_error_over_detail() {
        let err = bad_request(json!({"detail": "not allowed", "error": "Invalid credentials"}));
        assert_eq!(err.error_message().as_deref(), Some("Invalid credentials"));

        let err = bad_request(json!({"detail": "Not found."}));
        assert_eq!(err.error_message().as_deref(), Some("Not found."));

        assert!(bad_request(Value::Null).error_message().is_none());
    }
}
