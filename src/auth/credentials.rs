//! Resolved credentials and the resolver that finds them.

use std::fmt;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::auth::adc::{find_application_default, CredentialFile};
use crate::auth::oauth::{self, AuthFlowMode};
use crate::auth::service_account::ServiceAccountKey;
use crate::auth::token::{AccessToken, StoredToken};
use crate::auth::user::{AuthorizedUser, ClientSecrets};
use crate::auth::{AuthError, CONTENT_SCOPE};
use crate::config::{ConfigPaths, SamplesConfig};

/// The kind of credential in use, for logging and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialKind {
    /// A fixed bearer token that cannot be refreshed.
    Static,
    /// A service-account key.
    ServiceAccount,
    /// An OAuth user with a refresh token.
    User,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Static => "static token",
            Self::ServiceAccount => "service account",
            Self::User => "OAuth2 user",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
enum Source {
    Static(String),
    ServiceAccount(ServiceAccountKey),
    User(AuthorizedUser),
}

/// A credential that hands out bearer tokens.
///
/// Tokens are cached and minted again only when the cached one is close to
/// expiry or has been [invalidated](Credential::invalidate). Concurrent
/// callers share one refresh.
///
/// # Example
///
/// ```rust
/// use shopping_samples::auth::Credential;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let credential = Credential::from_token("ya29.example");
/// assert_eq!(credential.access_token().await.unwrap(), "ya29.example");
/// assert!(!credential.can_refresh());
/// # }
/// ```
pub struct Credential {
    source: Source,
    http: reqwest::Client,
    cached: Mutex<Option<AccessToken>>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};

impl Credential {
    fn with_source(source: Source) -> Self {
        Self {
            source,
            http: reqwest::Client::new(),
            cached: Mutex::new(None),
        }
    }

    /// Wraps a fixed bearer token.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self::with_source(Source::Static(token.into()))
    }

    /// Creates a credential backed by a service-account key.
    #[must_use]
    pub fn service_account(key: ServiceAccountKey) -> Self {
        Self::with_source(Source::ServiceAccount(key))
    }

    /// Creates a credential backed by a refresh token.
    #[must_use]
    pub fn user(user: AuthorizedUser) -> Self {
        Self::with_source(Source::User(user))
    }

    /// Creates a credential from a parsed credential file.
    #[must_use]
    pub fn from_file(file: CredentialFile) -> Self {
        match file {
            CredentialFile::ServiceAccount(key) => Self::service_account(key),
            CredentialFile::AuthorizedUser(user) => Self::user(user),
        }
    }

    /// Seeds the cache with a token that is already known to be valid.
    #[must_use]
    pub fn with_cached_token(mut self, token: AccessToken) -> Self {
        *self.cached.get_mut() = Some(token);
        self
    }

    /// Uses `client` for token endpoint requests.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Returns the kind of credential.
    #[must_use]
    pub const fn kind(&self) -> CredentialKind {
        match self.source {
            Source::Static(_) => CredentialKind::Static,
            Source::ServiceAccount(_) => CredentialKind::ServiceAccount,
            Source::User(_) => CredentialKind::User,
        }
    }

    /// Returns `true` if a rejected token can be replaced by a new one.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        !matches!(self.source, Source::Static(_))
    }

    /// Returns a valid bearer token, minting one if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the token endpoint refuses the credential.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| !t.is_expired()) {
            return Ok(token.value.clone());
        }

        let fresh = self.fetch().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    /// Drops the cached token so the next call mints a new one.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    async fn fetch(&self) -> Result<AccessToken, AuthError> {
        match &self.source {
            Source::Static(token) => Ok(AccessToken::new(token.clone())),
            Source::ServiceAccount(key) => key.fetch_token(&self.http, &[CONTENT_SCOPE]).await,
            Source::User(user) => {
                let response = user.refresh(&self.http).await?;
                tracing::debug!("Refreshed OAuth2 user access token");
                Ok(response.access_token())
            }
        }
    }
}

/// Finds the credential to use, in precedence order.
///
/// See the [module documentation](crate::auth) for the order.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    paths: Option<ConfigPaths>,
    flow: AuthFlowMode,
    http: reqwest::Client,
    application_default: bool,
}

impl CredentialResolver {
    /// Creates a resolver. `paths` is `None` when running with `--noconfig`.
    #[must_use]
    pub fn new(paths: Option<ConfigPaths>, flow: AuthFlowMode) -> Self {
        Self {
            paths,
            flow,
            http: reqwest::Client::new(),
            application_default: true,
        }
    }

    /// Enables or disables the application default credentials lookup.
    #[must_use]
    pub fn application_default(mut self, enabled: bool) -> Self {
        self.application_default = enabled;
        self
    }

    /// Uses `client` for all token endpoint requests.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Resolves a credential.
    ///
    /// When the OAuth client flow produces or refreshes a token, it is stored
    /// in `config` and written back to the settings file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoConfigRequiresAdc`] without a configuration
    /// directory and without ADC, [`AuthError::MissingCredentials`] if no
    /// source exists, and other [`AuthError`] variants if a source is present
    /// but unusable.
    pub async fn resolve(&self, config: &mut SamplesConfig) -> Result<Credential, AuthError> {
        if self.application_default {
            if let Some((path, file)) = find_application_default()? {
                tracing::debug!("Application default credentials from {}", path.display());
                return Ok(Credential::from_file(file).with_http_client(self.http.clone()));
            }
        }

        let Some(paths) = &self.paths else {
            return Err(AuthError::NoConfigRequiresAdc);
        };

        let mut checked = Vec::new();

        for path in paths.service_account_files() {
            if path.is_file() {
                let key = ServiceAccountKey::from_json(&read_credential_file(&path)?, &path)?;
                tracing::info!("Loading service account credentials from {}", path.display());
                return Ok(Credential::service_account(key).with_http_client(self.http.clone()));
            }
            checked.push(path);
        }

        for path in paths.client_secrets_files() {
            if path.is_file() {
                let secrets = ClientSecrets::from_json(&read_credential_file(&path)?, &path)?;
                tracing::info!("Loading OAuth2 client from {}", path.display());
                return self.user_credential(paths, config, &secrets).await;
            }
            checked.push(path);
        }

        Err(AuthError::MissingCredentials { checked })
    }

    async fn user_credential(
        &self,
        paths: &ConfigPaths,
        config: &mut SamplesConfig,
        secrets: &ClientSecrets,
    ) -> Result<Credential, AuthError> {
        match stored_refresh_token(config.token.as_ref(), &secrets.client_id) {
            Some(refresh_token) => {
                let user = secrets.authorized_user(refresh_token);
                match user.refresh(&self.http).await {
                    Ok(response) => {
                        let token = response.access_token();
                        if let Some(stored) = config.token.as_mut() {
                            stored.access_token.clone_from(&token.value);
                            stored.expiry = token.expires_at;
                        }
                        config.save(paths)?;
                        return Ok(Credential::user(user)
                            .with_http_client(self.http.clone())
                            .with_cached_token(token));
                    }
                    Err(e) => {
                        tracing::warn!("Stored token could not be refreshed, starting authorization: {e}");
                    }
                }
            }
            None if config.token.is_some() => {
                tracing::info!("Stored token was not issued to this OAuth2 client, ignoring it");
            }
            None => {}
        }

        let response = oauth::authorize(&self.http, secrets, &self.flow).await?;
        let token = response.access_token();
        config.token = Some(StoredToken::from_response(&response, &secrets.client_id));
        config.save(paths)?;

        let credential = match response.refresh_token {
            Some(refresh_token) => Credential::user(secrets.authorized_user(refresh_token)),
            None => Credential::from_token(token.value.clone()),
        };
        Ok(credential
            .with_http_client(self.http.clone())
            .with_cached_token(token))
    }
}

/// Returns the stored refresh token if it was issued to `client_id`.
fn stored_refresh_token<'a>(stored: Option<&'a StoredToken>, client_id: &str) -> Option<&'a str> {
    stored
        .filter(|token| token.client_id.as_deref() == Some(client_id))
        .and_then(|token| token.refresh_token.as_deref())
}

fn read_credential_file(path: &Path) -> Result<String, AuthError> {
    std::fs::read_to_string(path).map_err(|e| AuthError::InvalidCredentialFile {
        path: PathBuf::from(path),
        message: e.to_string(),
    })
}
