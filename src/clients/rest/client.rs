//! REST client implementation for the boutique API.
//!
//! This module provides the [`RestClient`] type for making REST API requests
//! with path normalization and typed response decoding.

use serde::de::DeserializeOwned;

use crate::auth::SessionContext;
use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse, QueryParams};
use crate::config::StorefrontConfig;

/// REST API client for the boutique backend.
///
/// Provides `get`, `post`, `put` and `delete` returning the raw
/// [`HttpResponse`], plus `*_json` variants that decode the body.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use boutique_storefront::{RestClient, SessionContext, StorefrontConfig};
///
/// let client = RestClient::new(&StorefrontConfig::default(), SessionContext::in_memory());
/// let categories: Vec<String> = client.get_json("products/categories", None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client for the given configuration and session.
    #[must_use]
    pub fn new(config: &StorefrontConfig, session: SessionContext) -> Self {
        Self {
            http_client: HttpClient::new(config, session),
        }
    }

    /// Returns the session this client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        self.http_client.session()
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(
        &self,
        path: &str,
        query: Option<QueryParams>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request. Many backend actions take only query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<QueryParams>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, body, query).await
    }

    /// Sends a PUT request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<QueryParams>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, body, query).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<QueryParams>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    /// Sends a GET request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Deserialize`] if the body does not match `T`,
    /// otherwise the same errors as [`get`](Self::get).
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<QueryParams>,
    ) -> Result<T, RestError> {
        let response = self.get(path, query).await?;
        decode(path, response)
    }

    /// Sends a POST request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Deserialize`] if the body does not match `T`,
    /// otherwise the same errors as [`post`](Self::post).
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<QueryParams>,
    ) -> Result<T, RestError> {
        let response = self.post(path, body, query).await?;
        decode(path, response)
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<QueryParams>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, normalized_path);
        if let Some(body_value) = body {
            builder = builder.body(body_value);
        }
        if let Some(query_params) = query {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: HttpResponse) -> Result<T, RestError> {
    serde_json::from_value(response.body).map_err(|source| RestError::Deserialize {
        path: path.to_string(),
        source,
    })
}

/// Strips surrounding slashes; an empty result is rejected.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
