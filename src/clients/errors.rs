//! HTTP-specific error types for Content API calls.
//!
//! # Error Handling
//!
//! - [`ApiError`]: a non-2xx response, with the `(reason, message)` pairs the
//!   API reports in its error body
//! - [`InvalidHttpRequestError`]: a request that fails validation before sending
//! - [`HttpError`]: unified error type for everything that can go wrong in a call
//!
//! # Example
//!
//! ```rust,ignore
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         for detail in &e.errors {
//!             println!("[{}] {}", detail.reason, detail.message);
//!         }
//!     }
//!     Err(other) => println!("Call failed: {other}"),
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::auth::AuthError;

/// One `(reason, message)` entry from an API error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable reason, such as `notFound` or `invalid`.
    #[serde(default)]
    pub reason: String,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

/// Error returned when an API call receives a non-successful response.
///
/// The API wraps failures as
/// `{"error": {"code": 404, "message": "...", "errors": [{"reason": "...", "message": "..."}]}}`.
/// Bodies that do not follow that shape still produce an `ApiError`, with the
/// raw body as the message and no details.
///
/// # Example
///
/// ```rust
/// use shopping_samples::clients::ApiError;
/// use serde_json::json;
///
/// let body = json!({
///     "error": {
///         "code": 404,
///         "message": "item not found",
///         "errors": [{ "reason": "notFound", "message": "item not found" }]
///     }
/// });
/// let error = ApiError::from_body(404, &body);
/// assert_eq!(error.code, 404);
/// assert_eq!(error.errors[0].reason, "notFound");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("API error {code}: {message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The top-level error message.
    pub message: String,
    /// Individual errors reported by the API.
    pub errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

impl ApiError {
    /// Builds an error from a status code and a parsed response body.
    #[must_use]
    pub fn from_body(code: u16, body: &serde_json::Value) -> Self {
        match serde_json::from_value::<ErrorEnvelope>(body.clone()) {
            Ok(envelope) => Self {
                code,
                message: envelope.error.message,
                errors: envelope.error.errors,
            },
            Err(_) => Self {
                code,
                message: body
                    .get("raw_body")
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| body.to_string(), String::from),
                errors: Vec::new(),
            },
        }
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The path is empty or absolute; paths are relative to the base path.
    #[error("Invalid request path '{path}'. Paths must be relative to the service base path.")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] ApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// No access token could be obtained for the request.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The response body did not match the expected resource shape.
    #[error("Failed to decode response from {path}: {message}")]
    Decode {
        /// The request path.
        path: String,
        /// The decoder error message.
        message: String,
    },

    /// A request body could not be serialized.
    #[error("Failed to encode request body for {path}: {message}")]
    Encode {
        /// The request path.
        path: String,
        /// The encoder error message.
        message: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code for response errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the `(reason, message)` pairs for response errors.
    #[must_use]
    pub fn details(&self) -> &[ErrorDetail] {
        match self {
            Self::Response(e) => &e.errors,
            _ => &[],
        }
    }
}
