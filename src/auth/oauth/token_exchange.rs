//! Authorization-code exchange.

use crate::auth::oauth::begin_auth::BeginAuthResult;
use crate::auth::token::{post_token_form, TokenResponse};
use crate::auth::user::ClientSecrets;
use crate::auth::AuthError;

/// Exchanges an authorization code for tokens at the client's token endpoint.
///
/// The redirect URI and PKCE verifier are taken from the request that
/// produced the code.
///
/// # Errors
///
/// Returns [`AuthError::TokenRequestFailed`] if the endpoint refuses the code.
pub async fn exchange_code(
    client: &reqwest::Client,
    secrets: &ClientSecrets,
    request: &BeginAuthResult,
    code: &str,
) -> Result<TokenResponse, AuthError> {
    let response = post_token_form(
        client,
        &secrets.token_uri,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &secrets.client_id),
            ("client_secret", secrets.client_secret.as_ref()),
            ("redirect_uri", &request.redirect_uri),
            ("code_verifier", request.pkce.verifier()),
        ],
    )
    .await?;

    if response.refresh_token.is_none() {
        tracing::warn!("Authorization server returned no refresh token; the next run will prompt again");
    }
    Ok(response)
}
