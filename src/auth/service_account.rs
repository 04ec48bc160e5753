//! Service-account key files and the JWT-bearer grant.
//!
//! A service account exchanges a self-signed RS256 assertion for an access
//! token. The assertion names the service account as issuer, the token
//! endpoint as audience and the requested scopes, and is valid for one hour.

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::auth::token::{post_token_form, AccessToken, GOOGLE_TOKEN_URI};
use crate::auth::AuthError;

/// Grant type for service-account assertions (RFC 7523).
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion, in seconds.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

/// The fields of a service-account key file this crate needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// The service account's email address.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// ID of the key, sent as the JWT `kid`.
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// Token endpoint for the assertion exchange.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// The owning project, informational only.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"*****")
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl ServiceAccountKey {
    /// Parses a key file's contents.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentialFile`] if required fields are missing.
    pub fn from_json(contents: &str, path: &Path) -> Result<Self, AuthError> {
        serde_json::from_str(contents).map_err(|e| AuthError::InvalidCredentialFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Builds the signed assertion for `scopes`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if the private key is not a usable RSA key.
    pub fn assertion(&self, scopes: &[&str]) -> Result<String, AuthError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.private_key_id);

        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: scopes.join(" "),
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&header, &claims, &key).map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Exchanges a fresh assertion for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if signing or the token request fails.
    pub async fn fetch_token(
        &self,
        client: &reqwest::Client,
        scopes: &[&str],
    ) -> Result<AccessToken, AuthError> {
        let assertion = self.assertion(scopes)?;
        let response = post_token_form(
            client,
            &self.token_uri,
            &[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", &assertion),
            ],
        )
        .await?;
        tracing::debug!("Obtained access token for {}", self.client_email);
        Ok(response.access_token())
    }
}
