//! Typed response abstraction
//!
//! Holds the status code and raw body of a completed exchange; JSON
//! decoding is explicit and failure carries the raw text.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// A completed HTTP exchange with the body read into memory
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Create a response from a status code and raw body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Raw response body text
    pub fn raw_body(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON into the operation's response record
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            Error::api(
                self.status,
                "unknown",
                format!("unparseable response body ({e}): {}", self.body),
            )
        })
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn test_json_decode() {
        let response = ApiResponse::new(200, r#"{"ResponseCode":"0","ResponseDescription":"ok"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["ResponseCode"], "0");
    }

    #[test]
    fn test_json_decode_failure_carries_raw_text() {
        let response = ApiResponse::new(200, "<html>gateway error</html>");
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, Error::Api { status: 200, .. }));
        assert!(err.to_string().contains("<html>gateway error</html>"));
    }
}
