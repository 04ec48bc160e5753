//! API endpoint resolution.
//!
//! An [`Endpoint`] is a root URL (`scheme://host[:port]/`) plus a service
//! base path (`content/v2.1/`). Both always end in `/` so request URLs are
//! a plain concatenation of root, base path and resource path.
//!
//! The default endpoint is the production Content API. Setting
//! `GOOGLE_SHOPPING_SAMPLES_ENDPOINT` to an absolute URL overrides it; a
//! missing trailing slash is appended.
//!
//! # Sandbox
//!
//! Order workflows run against a parallel sandbox service. Its base path is
//! derived from the primary one by rewriting the final version segment:
//!
//! ```rust
//! use shopping_samples::Endpoint;
//!
//! let endpoint = Endpoint::resolve(Some("https://example.test/custom/v2.1/")).unwrap();
//! assert_eq!(endpoint.root_url(), "https://example.test/");
//! assert_eq!(endpoint.base_path(), "custom/v2.1/");
//! assert_eq!(endpoint.sandbox().base_path(), "custom/v2.1sandbox/");
//! ```

use thiserror::Error;
use url::Url;

/// Environment variable overriding the API endpoint.
pub const ENDPOINT_ENV_VAR: &str = "GOOGLE_SHOPPING_SAMPLES_ENDPOINT";

/// Root URL of the production Content API.
pub const DEFAULT_ROOT_URL: &str = "https://shoppingcontent.googleapis.com/";

/// Service path of the production Content API.
pub const DEFAULT_BASE_PATH: &str = "content/v2.1/";

/// Version segments that have a `{version}sandbox` counterpart.
const SANDBOX_VERSIONS: &[&str] = &["v2", "v2.1"];

/// Errors produced while resolving an endpoint override.
///
/// These are usage errors: the binary aborts with exit code 2.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The override could not be parsed as a URL.
    #[error("Invalid endpoint URL '{url}': {message}")]
    Invalid {
        /// The rejected value.
        url: String,
        /// The parser message.
        message: String,
    },

    /// The override parsed, but is not an absolute URL with a host.
    #[error("Endpoint '{url}' must be an absolute URL, e.g. 'https://example.com/content/v2.1/'.")]
    NotAbsolute {
        /// The rejected value.
        url: String,
    },
}

/// A resolved API root URL and service base path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    root_url: String,
    base_path: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

impl Endpoint {
    /// Resolves the endpoint from an optional override URL.
    ///
    /// `None` or a blank string yields the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] if the override is malformed or relative.
    pub fn resolve(override_url: Option<&str>) -> Result<Self, EndpointError> {
        let Some(raw) = override_url.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let mut normalized = raw.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let parsed = match Url::parse(&normalized) {
            Ok(parsed) => parsed,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(EndpointError::NotAbsolute {
                    url: raw.to_string(),
                })
            }
            Err(e) => {
                return Err(EndpointError::Invalid {
                    url: raw.to_string(),
                    message: e.to_string(),
                })
            }
        };

        let Some(host) = parsed.host_str().filter(|_| !parsed.cannot_be_a_base()) else {
            return Err(EndpointError::NotAbsolute {
                url: raw.to_string(),
            });
        };

        let root_url = parsed.port().map_or_else(
            || format!("{}://{host}/", parsed.scheme()),
            |port| format!("{}://{host}:{port}/", parsed.scheme()),
        );
        let trimmed = parsed.path().trim_matches('/');
        let base_path = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        };

        tracing::info!("Using non-standard API endpoint: {root_url}{base_path}");
        Ok(Self {
            root_url,
            base_path,
        })
    }

    /// Resolves the endpoint from `GOOGLE_SHOPPING_SAMPLES_ENDPOINT`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] if the variable is set to an unusable value.
    pub fn from_env() -> Result<Self, EndpointError> {
        Self::resolve(std::env::var(ENDPOINT_ENV_VAR).ok().as_deref())
    }

    /// Returns the root URL, ending in `/`.
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Returns the service base path, ending in `/` unless empty.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the full service URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.root_url, self.base_path)
    }

    /// Returns `true` for the production endpoint.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Derives the sandbox endpoint.
    ///
    /// When the last base path segment is a known version (`v2`, `v2.1`) it
    /// becomes `{version}sandbox`. Any other path is returned unchanged, with
    /// a warning that sandbox calls share the primary endpoint.
    #[must_use]
    pub fn sandbox(&self) -> Self {
        let trimmed = self.base_path.trim_end_matches('/');
        let (prefix, version) = trimmed.rsplit_once('/').unwrap_or(("", trimmed));

        if !SANDBOX_VERSIONS.contains(&version) {
            tracing::warn!("Using same endpoint for sandbox methods: {}", self.url());
            return self.clone();
        }

        let base_path = if prefix.is_empty() {
            format!("{version}sandbox/")
        } else {
            format!("{prefix}/{version}sandbox/")
        };
        Self {
            root_url: self.root_url.clone(),
            base_path,
        }
    }
}
