//! HTTP client for the boutique REST API.
//!
//! This module provides the [`HttpClient`] type for making requests that
//! carry the session's bearer token.

use std::collections::HashMap;

use reqwest::header::HeaderValue;

use crate::auth::{SessionContext, AUTHORIZATION_HEADER};
use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiBaseUrl, StorefrontConfig};

/// Library version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the storefront API.
///
/// The client handles:
/// - URL construction from the configured [`ApiBaseUrl`]
/// - Default headers including User-Agent and Accept
/// - Attaching `Authorization: Bearer <token>` while a session is held
/// - Invalidating the session when the backend answers 401
///
/// Requests are attempted exactly once.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use boutique_storefront::{SessionContext, StorefrontConfig};
/// use boutique_storefront::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&StorefrontConfig::default(), SessionContext::in_memory());
/// let request = HttpRequest::builder(HttpMethod::Get, "products/featured").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: ApiBaseUrl,
    default_headers: HashMap<String, String>,
    session: SessionContext,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client bound to `session`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &StorefrontConfig, session: SessionContext) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Boutique Storefront Client v{CLIENT_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            session,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session this client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Sends an HTTP request to the storefront API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - The backend answers 401 (`Unauthorized`); the session is cleared first
    ///   unless a newer token replaced the one this request carried
    /// - Any other non-2xx response is received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        // Read the token per request so a 401 elsewhere takes effect immediately
        let sent_token = self.session.token();
        if let Some(token) = &sent_token {
            let value = HeaderValue::from_str(&token.header_value()).map_err(|_| {
                InvalidHttpRequestError::InvalidHeader {
                    name: AUTHORIZATION_HEADER.to_string(),
                }
            })?;
            req_builder = req_builder.header(AUTHORIZATION_HEADER, value);
        }

        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                req_builder = req_builder.header(key, value);
            }
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending request");

        let res = req_builder.send().await.map_err(|e| {
            tracing::warn!(path = %request.path, error = %e, "Request failed to send");
            HttpError::Network(e)
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();
        let response = HttpResponse::new(code, res_headers, HttpResponse::parse_body(&body_text));

        if response.is_ok() {
            return Ok(response);
        }

        if code == 401 {
            tracing::warn!(path = %request.path, "Received 401, clearing session token");
            self.session.invalidate_if_current(sent_token.as_ref());
            return Err(HttpError::Unauthorized);
        }

        let message = response.error_message();
        tracing::warn!(
            path = %request.path,
            status = code,
            request_id = response.request_id().unwrap_or("-"),
            "Request returned an error: {}",
            message
        );

        Err(HttpError::Response(HttpResponseError { code, message }))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
