//! HTTP client types for Content API communication.
//!
//! This module provides the transport layer for authenticated JSON requests
//! to the Content API. Typed resource services live in [`crate::content`] and
//! are built on top of [`HttpClient`].
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client bound to one endpoint
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`ApiError`]: A non-2xx response with its `(reason, message)` pairs
//! - [`RequestLog`]: JSON log of requests and responses for `--log_file`
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_samples::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::builder(&endpoint, credential).build()?;
//! let request = HttpRequest::builder(HttpMethod::Get, "accounts/authinfo").build()?;
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client does not retry on its own, apart from one token refresh after
//! a 401. Retrying reads of freshly created resources is the caller's choice
//! via [`crate::retry`].

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod request_log;

pub use errors::{ApiError, ErrorDetail, HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, HttpClientBuilder, SDK_VERSION, USER_AGENT_PRODUCT};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use request_log::RequestLog;
