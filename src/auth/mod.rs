//! Credentials for the Content API.
//!
//! This module finds a usable credential and turns it into bearer tokens.
//!
//! # Overview
//!
//! - [`CredentialResolver`]: walks the credential sources in precedence order
//! - [`Credential`]: a resolved credential with a lazily refreshed token cache
//! - [`ServiceAccountKey`]: service-account keys and the JWT-bearer grant
//! - [`ClientSecrets`] / [`AuthorizedUser`]: OAuth 2.0 user credentials
//! - [`oauth`]: the interactive authorization-code flow with PKCE
//!
//! # Precedence
//!
//! 1. Application default credentials (`GOOGLE_APPLICATION_CREDENTIALS` or
//!    the gcloud well-known file)
//! 2. A service-account key in the configuration directory
//! 3. An OAuth client in the configuration directory, together with the token
//!    stored in `merchant-info.json`, or a new token from the interactive flow
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_samples::auth::{CredentialResolver, oauth::AuthFlowMode};
//!
//! let resolver = CredentialResolver::new(Some(paths), AuthFlowMode::default());
//! let credential = resolver.resolve(&mut config).await?;
//! let token = credential.access_token().await?;
//! ```

mod adc;
mod credentials;
pub mod oauth;
mod service_account;
mod token;
mod user;

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ConfigError;

pub use adc::{find_application_default, CredentialFile, ADC_ENV_VAR};
pub use credentials::{Credential, CredentialKind, CredentialResolver};
pub use service_account::{ServiceAccountKey, JWT_BEARER_GRANT_TYPE};
pub use token::{AccessToken, StoredToken, TokenResponse, GOOGLE_TOKEN_URI};
pub use user::{AuthorizedUser, ClientSecrets, GOOGLE_AUTH_URI};

/// OAuth scope granting read/write access to the Content API.
pub const CONTENT_SCOPE: &str = "https://www.googleapis.com/auth/content";

/// Errors that can occur while resolving credentials or obtaining tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential source was usable.
    #[error(
        "No OAuth2 credentials found. Checked application default credentials and: {}",
        checked.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    MissingCredentials {
        /// Every location that was checked, in order.
        checked: Vec<PathBuf>,
    },

    /// Running without a configuration directory requires ADC.
    #[error("Must use Application Default Credentials with no configuration.")]
    NoConfigRequiresAdc,

    /// `GOOGLE_APPLICATION_CREDENTIALS` names a file that does not exist.
    #[error("'{}' (from GOOGLE_APPLICATION_CREDENTIALS) does not exist.", path.display())]
    AdcFileMissing {
        /// The path named by the environment variable.
        path: PathBuf,
    },

    /// A credential file could not be read or decoded.
    #[error("Invalid credential file '{}': {message}", path.display())]
    InvalidCredentialFile {
        /// The file being read.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The credential file declares a `type` this crate does not handle.
    #[error("Unsupported credential type '{kind}' in '{}'", path.display())]
    UnsupportedCredentialType {
        /// The declared type.
        kind: String,
        /// The file that declared it.
        path: PathBuf,
    },

    /// The token endpoint refused a grant or could not be reached.
    #[error("Token request failed (status {status}): {message}")]
    TokenRequestFailed {
        /// HTTP status code, or 0 if no response was received.
        status: u16,
        /// The error body or transport error.
        message: String,
    },

    /// A service-account assertion could not be signed.
    #[error("Failed to sign service account assertion: {0}")]
    Signing(String),

    /// The authorization callback carried an unexpected `state`.
    #[error("OAuth state mismatch in authorization callback")]
    StateMismatch,

    /// The authorization callback carried no code.
    #[error("Authorization was not granted: {reason}")]
    MissingAuthorizationCode {
        /// The `error` parameter from the callback, if any.
        reason: String,
    },

    /// Local I/O during the interactive flow failed.
    #[error("Authorization flow I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The new token could not be persisted.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
