//! Client error types

use serde_json::Value;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failure (connection, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("sin mensaje"))]
    Api {
        status: u16,
        /// Message extracted from the response body, when there was one
        message: Option<String>,
    },
}

impl ClientError {
    /// Message the server attached to a failed request, if any.
    ///
    /// Callers fall back to an operation-specific message when the server
    /// sent nothing usable.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Best-effort extraction of a human message from an error body.
///
/// The backend is inconsistent here too: the body may be a JSON string,
/// an object with a `message` field, or plain text. Anything else yields
/// `None` and the caller's generic message wins.
pub fn message_from_body(body: &str) -> Option<String> {
    let text = body.trim();
    if text.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::String(message)) if !message.trim().is_empty() => Some(message),
        Ok(Value::Object(fields)) => match fields.get("message") {
            Some(Value::String(message)) if !message.trim().is_empty() => Some(message.clone()),
            _ => None,
        },
        Ok(_) => None,
        // Not JSON at all: the raw text is the message
        Err(_) => Some(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_body_wins() {
        assert_eq!(
            message_from_body("\"producto duplicado\"").as_deref(),
            Some("producto duplicado")
        );
    }

    #[test]
    fn object_message_field_is_second() {
        assert_eq!(
            message_from_body("{\"message\": \"sin stock\", \"code\": 409}").as_deref(),
            Some("sin stock")
        );
        assert_eq!(message_from_body("{\"error\": \"x\"}"), None);
        assert_eq!(message_from_body("{\"message\": \"\"}"), None);
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        assert_eq!(
            message_from_body("Internal Server Error").as_deref(),
            Some("Internal Server Error")
        );
    }

    #[test]
    fn useless_bodies_yield_none() {
        assert_eq!(message_from_body(""), None);
        assert_eq!(message_from_body("   "), None);
        assert_eq!(message_from_body("42"), None);
        assert_eq!(message_from_body("[1, 2]"), None);
    }

    #[test]
    fn server_message_ignores_transport_errors() {
        let err = ClientError::Api {
            status: 422,
            message: Some("cantidad inválida".into()),
        };
        assert_eq!(err.server_message(), Some("cantidad inválida"));

        let empty = ClientError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(empty.server_message(), None);
    }
}
