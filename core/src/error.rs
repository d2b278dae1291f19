//! Error types for the customer API client.
//!
//! # Design
//! Every failure collapses into one of three kinds, each with a fixed message
//! that the front-end shows as-is:
//!
//! - the server answered with an error status (`Response`),
//! - the request went out but nothing came back (`NoResponse`),
//! - something else broke inside the HTTP layer (`Unexpected`).
//!
//! `Unknown` covers failures that never reached the HTTP layer at all.

use serde_json::Value;
use thiserror::Error;

use crate::http::{HttpResponse, TransportFailure};

/// Placeholder used when an error response carries no `error` field.
pub const UNKNOWN_SERVER_MESSAGE: &str = "Unknown error";

/// Errors produced by `CustomerClient` and the transports that drive it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server responded with a non-2xx status.
    #[error("API error: {status} - {status_text}: {message}")]
    Response {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("No response received from the API.")]
    NoResponse,

    /// Encoding, decoding or client-side request failure. The detail is kept
    /// for logs; the message shown to users is fixed.
    #[error("Unexpected error occurred within the HTTP client.")]
    Unexpected { detail: String },

    #[error("An unknown error occurred.")]
    Unknown,
}

impl ApiError {
    /// Classify a failed round trip.
    pub fn from_transport(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Response(response) => Self::from_response(&response),
            TransportFailure::NoResponse => ApiError::NoResponse,
            TransportFailure::Unexpected(detail) => ApiError::Unexpected { detail },
        }
    }

    /// Build the `Response` variant, pulling the server message out of a
    /// `{"error": "..."}` body when there is one.
    pub fn from_response(response: &HttpResponse) -> Self {
        ApiError::Response {
            status: response.status,
            status_text: response.status_text.clone(),
            message: server_message(&response.body)
                .unwrap_or_else(|| UNKNOWN_SERVER_MESSAGE.to_string()),
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        ApiError::Unexpected {
            detail: detail.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Response { status: 404, .. })
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn response_error_uses_server_message() {
        let err = ApiError::from_response(&response(404, "Not Found", r#"{"error":"Not found"}"#));
        assert_eq!(err.to_string(), "API error: 404 - Not Found: Not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn response_error_without_body_falls_back() {
        let err = ApiError::from_response(&response(500, "Unknown error", ""));
        assert_eq!(err.to_string(), "API error: 500 - Unknown error: Unknown error");
    }

    #[test]
    fn response_error_with_non_string_error_field_falls_back() {
        let err = ApiError::from_response(&response(400, "Bad Request", r#"{"error":42}"#));
        assert_eq!(err.to_string(), "API error: 400 - Bad Request: Unknown error");
    }

    #[test]
    fn response_error_with_plain_text_body_falls_back() {
        let err = ApiError::from_response(&response(502, "Bad Gateway", "upstream down"));
        assert_eq!(err.to_string(), "API error: 502 - Bad Gateway: Unknown error");
    }

    #[test]
    fn no_response_message() {
        let err = ApiError::from_transport(TransportFailure::NoResponse);
        assert_eq!(err.to_string(), "No response received from the API.");
    }

    #[test]
    fn unexpected_message_hides_detail() {
        let err = ApiError::from_transport(TransportFailure::Unexpected("builder error".into()));
        assert_eq!(err.to_string(), "Unexpected error occurred within the HTTP client.");
        assert!(matches!(err, ApiError::Unexpected { ref detail } if detail == "builder error"));
    }

    #[test]
    fn unknown_message() {
        assert_eq!(ApiError::Unknown.to_string(), "An unknown error occurred.");
    }
}
