//! OAuth 2.0 user credentials.
//!
//! - [`ClientSecrets`]: an OAuth client downloaded from the Cloud console
//!   (`client-secrets.json`), in either the `installed` or `web` layout
//! - [`AuthorizedUser`]: a client plus a refresh token, from `gcloud` or
//!   from a token stored by the interactive flow

use std::path::Path;

use serde::Deserialize;

use crate::auth::token::{post_token_form, TokenResponse, GOOGLE_TOKEN_URI};
use crate::auth::AuthError;
use crate::config::ClientSecret;

/// Google's OAuth 2.0 authorization endpoint.
pub const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

fn default_auth_uri() -> String {
    GOOGLE_AUTH_URI.to_string()
}

/// An OAuth client registration.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientSecrets {
    /// The client ID.
    pub client_id: String,
    /// The client secret.
    pub client_secret: ClientSecret,
    /// Authorization endpoint for the consent screen.
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    /// Token endpoint for code exchange and refresh.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Registered redirect URIs.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Parses a client-secrets file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentialFile`] if the file has neither an
    /// `installed` nor a `web` section, or the section is incomplete.
    pub fn from_json(contents: &str, path: &Path) -> Result<Self, AuthError> {
        let invalid = |message: String| AuthError::InvalidCredentialFile {
            path: path.to_path_buf(),
            message,
        };
        let file: ClientSecretsFile =
            serde_json::from_str(contents).map_err(|e| invalid(e.to_string()))?;
        file.installed
            .or(file.web)
            .ok_or_else(|| invalid("expected an 'installed' or 'web' section".to_string()))
    }

    /// Pairs this client with a refresh token.
    #[must_use]
    pub fn authorized_user(&self, refresh_token: impl Into<String>) -> AuthorizedUser {
        AuthorizedUser {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            refresh_token: refresh_token.into(),
            token_uri: self.token_uri.clone(),
        }
    }
}

/// A user credential that can mint access tokens from a refresh token.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthorizedUser {
    /// The OAuth client ID.
    pub client_id: String,
    /// The OAuth client secret.
    pub client_secret: ClientSecret,
    /// The long-lived refresh token.
    pub refresh_token: String,
    /// Token endpoint used for refreshes.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl AuthorizedUser {
    /// Parses an `authorized_user` credential file.
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

    /// Redeems the refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenRequestFailed`] if the token endpoint refuses.
    pub async fn refresh(&self, client: &reqwest::Client) -> Result<TokenResponse, AuthError> {
        post_token_form(
            client,
            &self.token_uri,
            &[
                ("grant_type", "refresh_token"),
                ("client_id", &self.client_id),
                ("client_secret", self.client_secret.as_ref()),
                ("refresh_token", &self.refresh_token),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INSTALLED: &str = r#"{
        "installed": {
            "client_id": "123.apps.googleusercontent.com",
            "client_secret": "shh",
            "redirect_uris": ["http://localhost"]
        }
    }"#;

    #[test]
    fn test_parses_installed_client() {
        let secrets = ClientSecrets::from_json(INSTALLED, Path::new("client-secrets.json")).unwrap();
        assert_eq!(secrets.client_id, "123.apps.googleusercontent.com");
        assert_eq!(secrets.client_secret.as_ref(), "shh");
        assert_eq!(secrets.auth_uri, GOOGLE_AUTH_URI);
        assert_eq!(secrets.token_uri, GOOGLE_TOKEN_URI);
    }

    #[test]
    fn test_parses_web_client() {
        let json = r#"{"web": {"client_id": "w", "client_secret": "s", "token_uri": "https://t.example/token"}}"#;
        let secrets = ClientSecrets::from_json(json, Path::new("x.json")).unwrap();
        assert_eq!(secrets.client_id, "w");
        assert_eq!(secrets.token_uri, "https://t.example/token");
    }

    #[test]
    fn test_rejects_file_without_client_section() {
        let result = ClientSecrets::from_json(r#"{"other": {}}"#, Path::new("x.json"));
        assert!(matches!(
            result,
            Err(AuthError::InvalidCredentialFile { ref message, .. }) if message.contains("installed")
        ));
    }

    #[test]
    fn test_parses_gcloud_authorized_user() {
        let json = r#"{
            "type": "authorized_user",
            "client_id": "c",
            "client_secret": "s",
            "refresh_token": "1//r"
        }"#;
        let user = AuthorizedUser::from_json(json, Path::new("adc.json")).unwrap();
        assert_eq!(user.refresh_token, "1//r");
        assert_eq!(user.token_uri, GOOGLE_TOKEN_URI);
    }

    #[tokio::test]
    async fn test_refresh_posts_refresh_token_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=1%2F%2Fr"))
            .and(body_string_contains("client_id=c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.refreshed",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let secrets = ClientSecrets::from_json(
            &format!(
                r#"{{"installed": {{"client_id": "c", "client_secret": "s", "token_uri": "{}/token"}}}}"#,
                server.uri()
            ),
            Path::new("x.json"),
        )
        .unwrap();

        let response = secrets
            .authorized_user("1//r")
            .refresh(&reqwest::Client::new())
            .await
            .unwrap();
        assert_eq!(response.access_token, "ya29.refreshed");
    }
}
