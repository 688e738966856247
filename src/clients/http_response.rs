//! HTTP response type for the storefront client.

use std::collections::HashMap;

/// An HTTP response from the storefront API.
///
/// The body is parsed as JSON when possible. An empty body becomes
/// `Value::Null` and a non-JSON body is kept as `Value::String`.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Parses raw body text the way the backend's payloads require.
    #[must_use]
    pub fn parse_body(text: &str) -> serde_json::Value {
        if text.trim().is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `message` field of a JSON body, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(serde_json::Value::as_str)
    }

    /// Extracts a human-readable error message from a failed response.
    ///
    /// Checks the `error` field, then `message`, then a bare string body.
    #[must_use]
    pub fn error_message(&self) -> String {
        let from_body = self
            .body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .or_else(|| self.message())
            .or_else(|| self.body.as_str())
            .map(str::trim)
            .filter(|message| !message.is_empty());

        from_body.map_or_else(
            || format!("Request failed with status {}", self.code),
            str::to_string,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in [200, 201, 204, 299] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 404, 500] {
            assert!(!HttpResponse::new(code, HashMap::new(), json!({})).is_ok());
        }
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(HttpResponse::parse_body(""), serde_json::Value::Null);
        assert_eq!(HttpResponse::parse_body(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(
            HttpResponse::parse_body("Current password is incorrect"),
            json!("Current password is incorrect")
        );
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            json!({"error": "Passwords do not match", "message": "ignored"}),
        );
        assert_eq!(response.error_message(), "Passwords do not match");
    }

    #[test]
    fn test_error_message_falls_back_to_message_and_raw_string() {
        let response = HttpResponse::new(400, HashMap::new(), json!({"message": "Bad OTP"}));
        assert_eq!(response.error_message(), "Bad OTP");

        let response = HttpResponse::new(400, HashMap::new(), json!("Plain failure"));
        assert_eq!(response.error_message(), "Plain failure");

        let response = HttpResponse::new(503, HashMap::new(), serde_json::Value::Null);
        assert_eq!(response.error_message(), "Request failed with status 503");
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123".to_string()]);

        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("abc-123"));
    }
}
