//! Access tokens and the OAuth 2.0 token endpoint.
//!
//! Every credential kind ends in the same place: a form-encoded POST to a
//! token endpoint that answers with an [`TokenResponse`]. [`post_token_form`]
//! performs that exchange and maps failures to
//! [`AuthError::TokenRequestFailed`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Google's OAuth 2.0 token endpoint.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens expiring within this many seconds are treated as expired.
const EXPIRY_LEEWAY_SECS: i64 = 60;

/// A bearer token with an optional expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The token value for the `Authorization` header.
    pub value: String,
    /// When the token stops being accepted, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"*****")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    /// Creates a token that never expires locally.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// Returns `true` if the token is expired or about to expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires| expires - Duration::seconds(EXPIRY_LEEWAY_SECS) <= Utc::now())
    }
}

/// A successful response from a token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// The new access token.
    pub access_token: String,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// A refresh token, returned by authorization-code exchanges.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Usually `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Space-separated granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Converts the response into an [`AccessToken`], stamping the expiry
    /// relative to now.
    #[must_use]
    pub fn access_token(&self) -> AccessToken {
        AccessToken {
            value: self.access_token.clone(),
            expires_at: self
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }
}

/// A token persisted in `merchant-info.json` after the interactive flow.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// The last access token obtained.
    pub access_token: String,
    /// The refresh token used to mint new access tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Usually `Bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Space-separated granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// The OAuth client the token was issued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// When the access token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for StoredToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredToken")
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl StoredToken {
    /// Builds a stored token from a token endpoint response.
    #[must_use]
    pub fn from_response(response: &TokenResponse, client_id: &str) -> Self {
        let token = response.access_token();
        Self {
            access_token: token.value,
            refresh_token: response.refresh_token.clone(),
            token_type: response.token_type.clone(),
            scope: response.scope.clone(),
            client_id: Some(client_id.to_string()),
            expiry: token.expires_at,
        }
    }

    /// Returns the stored access token.
    #[must_use]
    pub fn access_token(&self) -> AccessToken {
        AccessToken {
            value: self.access_token.clone(),
            expires_at: self.expiry,
        }
    }
}

/// Posts a form to a token endpoint and decodes the response.
///
/// # Errors
///
/// Returns [`AuthError::TokenRequestFailed`] for network failures (status 0),
/// non-2xx responses, and undecodable bodies.
pub async fn post_token_form(
    client: &reqwest::Client,
    token_uri: &str,
    form: &[(&str, &str)],
) -> Result<TokenResponse, AuthError> {
    let response = client
        .post(token_uri)
        .form(form)
        .send()
        .await
        .map_err(|e| AuthError::TokenRequestFailed {
            status: 0,
            message: format!("Network error: {e}"),
        })?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenRequestFailed {
            status,
            message: error_body,
        });
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| AuthError::TokenRequestFailed {
            status,
            message: format!("Failed to parse token response: {e}"),
        })
}
