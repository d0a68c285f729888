//! Response types for the HTTP transport layer.

use std::collections::HashMap;

use serde_json::Value;

/// A parsed API response.
///
/// The raw body is always retained alongside the parsed JSON so callers can
/// fall back to it when the server returns something unparseable or an XML
/// payload.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, grouped by name.
    pub headers: HashMap<String, Vec<String>>,
    /// Parsed JSON body, or [`Value::Null`] when the body is not JSON.
    pub body: Value,
    /// The raw response body.
    pub raw: String,
}

impl ApiResponse {
    /// Creates a response from a status code, headers, and raw body text.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, raw: String) -> Self {
        let body = serde_json::from_str(&raw).unwrap_or(Value::Null);
        Self {
            code,
            headers,
            body,
            raw,
        }
    }

    /// Returns true for a 2xx status.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Extracts the server's error message.
    ///
    /// The API reports errors as `{"error": {"message": "..."}}`; when that
    /// envelope is absent the raw body is returned instead.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map_or_else(|| self.raw.clone(), ToString::to_string)
    }
}
