use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use server_fn::ServerFnError;
use std::fmt;
use std::str::FromStr;

const MESSAGE_KEYS: &[&str] = &["message", "error", "detail"];

/// Body of a failed backend response, kept as the backend sent it.
///
/// The backend answers errors either with a bare string or with a JSON
/// object whose shape is not fixed, so both are stored and rendering goes
/// through [`ErrorPayload::message`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Object(Map<String, Value>),
    Text(String),
}

impl ErrorPayload {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Self::Object(map),
            Ok(Value::String(text)) => Self::Text(text),
            _ => Self::Text(body.trim().to_string()),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Text(text) if text.trim().is_empty() => "Unknown error".to_string(),
            Self::Text(text) => text.clone(),
            Self::Object(map) => MESSAGE_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(map.clone()).to_string()),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Backend rejected the request ({status}): {payload}")]
    Backend { status: u16, payload: ErrorPayload },

    #[error("Could not reach the CityCare backend: {0}")]
    Network(String),

    #[error("Unexpected response from the backend: {0}")]
    Decode(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Not allowed for this role")]
    Forbidden,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(err) = serde_json::from_str::<AppError>(s) {
            return Ok(err);
        }

        if s.starts_with("Not signed in") {
            Ok(AppError::Unauthenticated)
        } else if s.starts_with("Could not reach") {
            Ok(AppError::Network(s.to_string()))
        } else {
            Ok(AppError::Internal(s.to_string()))
        }
    }
}

impl AppError {
    pub fn backend(status: u16, body: &str) -> Self {
        Self::Backend {
            status,
            payload: ErrorPayload::from_body(body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { status: 401, .. } | Self::Unauthenticated => {
                "Please log in to continue.".to_string()
            }
            Self::Backend { status: 403, .. } | Self::Forbidden => {
                "You are not allowed to do that.".to_string()
            }
            Self::Backend { payload, .. } => payload.message(),
            Self::Network(_) => "The CityCare service is unreachable. Try again later.".to_string(),
            Self::Decode(_) => "The CityCare service sent an unexpected response.".to_string(),
            Self::Config(_) | Self::Internal(_) => {
                "Something went wrong on our side. Try again later.".to_string()
            }
        }
    }

    /// Encodes the error so it survives the trip through a server function.
    pub fn into_server_error(self) -> ServerFnError {
        let wire = serde_json::to_string(&self).unwrap_or_else(|_| self.to_string());
        ServerFnError::new(wire)
    }

    pub fn from_server_error(err: ServerFnError) -> Self {
        match err {
            ServerFnError::ServerError(message) => {
                message.parse().unwrap_or_else(|never| match never {})
            }
            other => AppError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_keeps_object_bodies() {
        let payload = ErrorPayload::from_body(r#"{"message":"Issue not found","status":404}"#);
        assert!(matches!(payload, ErrorPayload::Object(_)));
        assert_eq!(payload.message(), "Issue not found");
    }

    #[test]
    fn test_payload_keeps_plain_text_bodies() {
        let payload = ErrorPayload::from_body("Invalid OTP\n");
        assert_eq!(payload, ErrorPayload::Text("Invalid OTP".to_string()));
        assert_eq!(payload.message(), "Invalid OTP");
    }

    #[test]
    fn test_payload_object_without_known_key_renders_json() {
        let payload = ErrorPayload::from_body(r#"{"code":7}"#);
        assert_eq!(payload.message(), r#"{"code":7}"#);
    }

    #[test]
    fn test_empty_payload_has_fallback_message() {
        assert_eq!(ErrorPayload::from_body("").message(), "Unknown error");
    }

    #[test]
    fn test_server_error_transport_preserves_variant() {
        let original = AppError::backend(409, r#"{"error":"Email already registered"}"#);
        let decoded = AppError::from_server_error(original.clone().into_server_error());
        assert_eq!(decoded, original);
        assert_eq!(decoded.user_message(), "Email already registered");
    }

    #[test]
    fn test_unstructured_message_falls_back() {
        let err: AppError = "Not signed in".parse().unwrap();
        assert_eq!(err, AppError::Unauthenticated);

        let err: AppError = "boom".parse().unwrap();
        assert_eq!(err, AppError::Internal("boom".to_string()));
    }

    #[test]
    fn test_not_found_detection() {
        assert!(AppError::backend(404, "").is_not_found());
        assert!(!AppError::Network("refused".to_string()).is_not_found());
    }
}
