//! Response envelope
//!
//! Every endpoint answers with
//! `{ "description": <human message>, "response": <payload or null> }`.
//! Success is always HTTP 200; error statuses come from [`crate::error`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub description: String,
    pub response: Option<T>,
}

/// A 200 envelope carrying a payload
pub fn ok<T: Serialize>(description: impl Into<String>, payload: T) -> Envelope<T> {
    Envelope {
        description: description.into(),
        response: Some(payload),
    }
}

/// A 200 envelope with `"response": null`
pub fn ok_empty(description: impl Into<String>) -> Envelope<()> {
    Envelope {
        description: description.into(),
        response: None,
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_envelope_shape() {
        let envelope = ok("add member success", serde_json::json!({"id": 1}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["description"], "add member success");
        assert_eq!(value["response"]["id"], 1);
    }

    #[test]
    fn test_empty_envelope_serializes_null() {
        let envelope = ok_empty("nothing here");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["response"], serde_json::Value::Null);
    }
}
