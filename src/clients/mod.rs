//! HTTP client types for the boutique REST API.
//!
//! This module provides the transport layer shared by every storefront
//! service: request building, bearer-token injection from the
//! [`SessionContext`](crate::auth::SessionContext), response parsing and the
//! 401 handling that clears the session.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`rest::RestClient`]: Higher-level REST API client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Failure Behavior
//!
//! Requests are attempted once. A 401 invalidates the session and surfaces as
//! [`HttpError::Unauthorized`]; the caller decides whether to navigate to a
//! login screen. Later requests carry no `Authorization` header.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, QueryParams};
pub use http_response::HttpResponse;

pub use rest::{RestClient, RestError};
