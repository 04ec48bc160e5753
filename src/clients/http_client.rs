//! HTTP client for Content API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests against a resolved [`Endpoint`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::Credential;
use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::request_log::RequestLog;
use crate::endpoint::Endpoint;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Product token sent in every `User-Agent` header.
pub const USER_AGENT_PRODUCT: &str = "Content API for Shopping Samples";

/// HTTP client for making requests to the Content API.
///
/// The client handles:
/// - URL construction from the endpoint root URL and base path
/// - Default headers including `User-Agent`
/// - Bearer tokens from the shared [`Credential`], with one forced refresh
///   when the API answers 401
/// - Optional request/response logging
///
/// The endpoint is fixed at construction. A client for a different endpoint
/// (such as the sandbox) is derived with [`HttpClient::with_endpoint`], which
/// shares the credential, connection pool and request log.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// let client = HttpClient::builder(&endpoint, credential)
///     .application_name("My Samples")
///     .build()?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "accounts/authinfo").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Root URL, always ending in `/` (e.g. `https://shoppingcontent.googleapis.com/`).
    base_uri: String,
    /// Service path, always ending in `/` (e.g. `content/v2.1/`).
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    credential: Arc<Credential>,
    request_log: Option<Arc<RequestLog>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    endpoint: Endpoint,
    credential: Arc<Credential>,
    application_name: Option<String>,
    request_log: Option<Arc<RequestLog>>,
}

impl HttpClientBuilder {
    /// Prefixes the `User-Agent` header with an application name.
    #[must_use]
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.application_name = Some(name);
        }
        self
    }

    /// Logs every request and response to `log`.
    #[must_use]
    pub fn request_log(mut self, log: Arc<RequestLog>) -> Self {
        self.request_log = Some(log);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be initialized.
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let prefix = self
            .application_name
            .map_or(String::new(), |name| format!("{name} | "));
        let user_agent = format!("{prefix}{USER_AGENT_PRODUCT} v{SDK_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(HttpClient {
            client,
            base_uri: self.endpoint.root_url().to_string(),
            base_path: self.endpoint.base_path().to_string(),
            default_headers,
            credential: self.credential,
            request_log: self.request_log,
        })
    }
}

impl HttpClient {
    /// Starts building a client for `endpoint` authenticated by `credential`.
    #[must_use]
    pub fn builder(endpoint: &Endpoint, credential: Arc<Credential>) -> HttpClientBuilder {
        HttpClientBuilder {
            endpoint: endpoint.clone(),
            credential,
            application_name: None,
            request_log: None,
        }
    }

    /// Returns a client with the same credential, headers and log that talks
    /// to a different endpoint.
    #[must_use]
    pub fn with_endpoint(&self, endpoint: &Endpoint) -> Self {
        Self {
            base_uri: endpoint.root_url().to_string(),
            base_path: endpoint.base_path().to_string(),
            ..self.clone()
        }
    }

    /// Returns the root URL for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the service path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the credential used to authorize requests.
    #[must_use]
    pub fn credential(&self) -> &Arc<Credential> {
        &self.credential
    }

    /// Sends a request to the Content API.
    ///
    /// A 401 response triggers one token refresh and a single resend when the
    /// credential can mint new tokens. Every other non-2xx response becomes an
    /// [`ApiError`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No access token can be obtained (`Auth`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}{}", self.base_uri, self.base_path, request.path);
        let method = match request.http_method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut refreshed = false;
        loop {
            let token = self.credential.access_token().await?;

            let mut req_builder = self
                .client
                .request(method.clone(), &url)
                .bearer_auth(&token);
            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }
            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.json(body);
            }
            let built = req_builder.build()?;

            tracing::debug!(method = %request.http_method, url = %built.url(), "sending request");
            if let Some(log) = &self.request_log {
                log.request(
                    request.http_method.as_str(),
                    built.url().as_str(),
                    request.body.as_ref(),
                );
            }

            let res = self.client.execute(built).await?;
            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;

            if let Some(log) = &self.request_log {
                log.response(code, &body_text);
            }

            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);
            if response.is_ok() {
                return Ok(response);
            }

            if code == 401 && !refreshed && self.credential.can_refresh() {
                tracing::info!("Access token rejected for {}, refreshing", request.path);
                self.credential.invalidate().await;
                refreshed = true;
                continue;
            }

            let error = ApiError::from_body(code, &response.body);
            tracing::debug!(code, message = %error.message, "request failed");
            return Err(HttpError::Response(error));
        }
    }

    /// Parses response headers into a `HashMap`.
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint_for(server: &MockServer) -> Endpoint {
        Endpoint::resolve(Some(&format!("{}/content/v2.1/", server.uri()))).unwrap()
    }

    fn create_test_client(server: &MockServer) -> HttpClient {
        HttpClient::builder(
            &endpoint_for(server),
            Arc::new(Credential::from_token("test-access-token")),
        )
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn test_client_construction_splits_endpoint() {
        let server = MockServer::start().await;
        let client = create_test_client(&server);

        assert_eq!(client.base_uri(), format!("{}/", server.uri()));
        assert_eq!(client.base_path(), "content/v2.1/");
    }

    #[tokio::test]
    async fn test_user_agent_header_format() {
        let server = MockServer::start().await;
        let client = HttpClient::builder(
            &endpoint_for(&server),
            Arc::new(Credential::from_token("t")),
        )
        .application_name("MyApp/1.0")
        .build()
        .unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains(USER_AGENT_PRODUCT));
    }

    #[tokio::test]
    async fn test_request_sends_bearer_token_query_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/content/v2.1/12345/products"))
            .and(header("authorization", "Bearer test-access-token"))
            .and(query_param("dryRun", "true"))
            .and(body_json(json!({"offerId": "book123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let request = HttpRequest::builder(HttpMethod::Post, "12345/products")
            .query_param("dryRun", "true")
            .body(json!({"offerId": "book123"}))
            .build()
            .unwrap();

        let response = client.request(request).await.unwrap();
        assert_eq!(response.body["id"], "x");
    }

    #[tokio::test]
    async fn test_error_response_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/12345/products/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "code": 404,
                    "message": "item not found",
                    "errors": [{"reason": "notFound", "message": "item not found"}]
                }
            })))
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let request = HttpRequest::builder(HttpMethod::Get, "12345/products/missing")
            .build()
            .unwrap();

        let error = client.request(request).await.unwrap_err();
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.details()[0].reason, "notFound");
    }

    #[tokio::test]
    async fn test_empty_body_parses_as_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/content/v2.1/12345/products/p1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = create_test_client(&server);
        let request = HttpRequest::builder(HttpMethod::Delete, "12345/products/p1")
            .build()
            .unwrap();

        let response = client.request(request).await.unwrap();
        assert_eq!(response.code, 204);
        assert_eq!(response.body, json!({}));
    }

    #[tokio::test]
    async fn test_with_endpoint_keeps_headers_and_changes_path() {
        let server = MockServer::start().await;
        let client = create_test_client(&server);
        let sandbox = client.with_endpoint(&endpoint_for(&server).sandbox());

        assert_eq!(sandbox.base_path(), "content/v2.1sandbox/");
        assert_eq!(sandbox.base_uri(), client.base_uri());
        assert_eq!(sandbox.default_headers(), client.default_headers());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
