//! Authorization URL generation.

use crate::auth::oauth::pkce::PkcePair;
use crate::auth::oauth::state::StateParam;
use crate::auth::user::ClientSecrets;

/// Everything needed to send the user to the consent screen and later
/// validate the callback.
#[derive(Clone, Debug)]
pub struct BeginAuthResult {
    /// The full authorization URL to open in a browser.
    pub auth_url: String,

    /// The state sent with the request. The callback must echo it.
    pub state: StateParam,

    /// The PKCE pair whose challenge was sent. The verifier goes with the
    /// code exchange.
    pub pkce: PkcePair,

    /// The redirect URI sent with the request. The code exchange must repeat it.
    pub redirect_uri: String,
}

/// Builds an authorization URL for `scopes` with a fresh state and PKCE pair.
///
/// `access_type=offline` and `prompt=consent` make Google return a refresh
/// token even for a user who has consented before.
///
/// # Example
///
/// ```rust,ignore
/// let result = begin_auth(&secrets, "http://127.0.0.1:8080/oauth2callback", &[CONTENT_SCOPE]);
/// println!("{}", result.auth_url);
/// ```
#[must_use]
pub fn begin_auth(secrets: &ClientSecrets, redirect_uri: &str, scopes: &[&str]) -> BeginAuthResult {
    let state = StateParam::new();
    let pkce = PkcePair::generate();

    let params = [
        ("client_id", secrets.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", &scopes.join(" ")),
        ("state", state.as_ref()),
        ("code_challenge", pkce.challenge()),
        ("code_challenge_method", PkcePair::METHOD),
        ("access_type", "offline"),
        ("prompt", "consent"),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    BeginAuthResult {
        auth_url: format!("{}?{}", secrets.auth_uri, query_string),
        state,
        pkce,
        redirect_uri: redirect_uri.to_string(),
    }
}

// Verify BeginAuthResult is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BeginAuthResult>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CONTENT_SCOPE;
    use std::path::Path;

    fn test_secrets() -> ClientSecrets {
        ClientSecrets::from_json(
            r#"{"installed": {"client_id": "123.apps.googleusercontent.com", "client_secret": "s"}}"#,
            Path::new("client-secrets.json"),
        )
        .unwrap()
    }

    fn query_of(auth_url: &str) -> Vec<(String, String)> {
        url::Url::parse(auth_url)
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect()
    }

    #[test]
    fn test_url_targets_client_auth_uri() {
        let result = begin_auth(&test_secrets(), "urn:ietf:wg:oauth:2.0:oob", &[CONTENT_SCOPE]);
        assert!(result
            .auth_url
            .starts_with("https://accounts.google.com/o/oauth2/auth?"));
    }

    #[test]
    fn test_url_carries_state_challenge_and_scope() {
        let result = begin_auth(
            &test_secrets(),
            "http://127.0.0.1:8080/oauth2callback",
            &[CONTENT_SCOPE],
        );
        let query = query_of(&result.auth_url);
        let get = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(get("client_id"), "123.apps.googleusercontent.com");
        assert_eq!(get("redirect_uri"), "http://127.0.0.1:8080/oauth2callback");
        assert_eq!(get("response_type"), "code");
        assert_eq!(get("scope"), CONTENT_SCOPE);
        assert_eq!(get("state"), result.state.as_ref());
        assert_eq!(get("code_challenge"), result.pkce.challenge());
        assert_eq!(get("code_challenge_method"), "S256");
        assert_eq!(get("access_type"), "offline");
    }

    #[test]
    fn test_each_call_uses_fresh_state() {
        let secrets = test_secrets();
        let first = begin_auth(&secrets, "urn:ietf:wg:oauth:2.0:oob", &[CONTENT_SCOPE]);
        let second = begin_auth(&secrets, "urn:ietf:wg:oauth:2.0:oob", &[CONTENT_SCOPE]);
        assert_ne!(first.state, second.state);
        assert_ne!(first.pkce.verifier(), second.pkce.verifier());
    }
}
