//! Error types for the shopping samples.
//!
//! Each layer owns a focused error enum ([`ConfigError`] for the local
//! configuration directory, [`AuthError`](crate::auth::AuthError) for
//! credentials, [`EndpointError`](crate::endpoint::EndpointError) for the
//! endpoint override and [`HttpError`] for API calls). [`SamplesError`]
//! unifies them at the session and demo boundary.
//!
//! # Example
//!
//! ```rust
//! use shopping_samples::{ConfigError, MerchantId};
//!
//! let result = MerchantId::parse("not-a-number");
//! assert!(matches!(result, Err(ConfigError::InvalidMerchantId { .. })));
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::HttpError;
use crate::endpoint::EndpointError;

/// Errors raised while locating, reading or writing the samples configuration.
///
/// All variants are fatal for the process: they are reported once and the
/// binary exits with a non-zero status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No home directory could be determined for the default configuration path.
    #[error("Could not determine the home directory. Please pass --config_path explicitly.")]
    MissingHomeDirectory,

    /// The configuration directory does not exist.
    #[error("Configuration directory '{}' does not exist. Please create it or pass --config_path.", path.display())]
    MissingConfigDirectory {
        /// The directory that was expected.
        path: PathBuf,
    },

    /// The per-API subdirectory inside the configuration directory is missing.
    #[error("Configuration directory '{}' does not exist. Please create it and place your credentials there.", path.display())]
    MissingApiDirectory {
        /// The directory that was expected.
        path: PathBuf,
    },

    /// A file could not be read.
    #[error("Failed to read '{}': {message}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },

    /// A file contained malformed JSON or an unexpected shape.
    #[error("Failed to decode JSON file '{}': {message}", path.display())]
    InvalidJson {
        /// The file being decoded.
        path: PathBuf,
        /// The decoder error message.
        message: String,
    },

    /// The configuration could not be written back to disk.
    #[error("Failed to write '{}': {message}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error message.
        message: String,
    },

    /// A merchant ID was not a positive decimal integer.
    #[error("Invalid merchant ID '{value}'. Expected a positive decimal integer.")]
    InvalidMerchantId {
        /// The invalid value that was provided.
        value: String,
    },
}

/// Unified error type for the session bootstrap and the demos.
#[derive(Debug, Error)]
pub enum SamplesError {
    /// Local configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credential discovery or token exchange failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The endpoint override was not usable.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// An API call failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The credential cannot act on any Merchant Center account.
    #[error("The authenticated user cannot access any Merchant Center accounts.")]
    NoAccountAccess,

    /// The configured account's own record could not be read.
    #[error("Cannot access Merchant Center account {merchant_id}: {source}")]
    AccountUnreadable {
        /// The resolved merchant ID.
        merchant_id: u64,
        /// The failed lookup.
        #[source]
        source: HttpError,
    },

    /// A demo was run against an account of the wrong kind.
    #[error("{0}")]
    WrongAccountType(&'static str),

    /// A demo name on the command line is not registered.
    #[error("Unknown demo '{name}'.")]
    UnknownDemo {
        /// The name that was given.
        name: String,
    },

    /// An API response was missing a field the demo depends on.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A local file, such as the request log, could not be opened.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SamplesError {
    /// Returns the HTTP status of the failed API call, if this error wraps one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) | Self::AccountUnreadable { source: e, .. } => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiError, ErrorDetail};

    #[test]
    fn test_missing_config_directory_message_names_path() {
        let error = ConfigError::MissingConfigDirectory {
            path: PathBuf::from("/nowhere/shopping-samples"),
        };
        let message = error.to_string();
        assert!(message.contains("/nowhere/shopping-samples"));
        assert!(message.contains("--config_path"));
    }

    #[test]
    fn test_invalid_merchant_id_message() {
        let error = ConfigError::InvalidMerchantId {
            value: "abc".to_string(),
        };
        assert!(error.to_string().contains("'abc'"));
    }

    #[test]
    fn test_status_is_exposed_for_api_errors() {
        let error = SamplesError::Http(HttpError::Response(ApiError {
            code: 404,
            message: "Not found".to_string(),
            errors: vec![ErrorDetail {
                reason: "notFound".to_string(),
                message: "Not found".to_string(),
            }],
        }));
        assert_eq!(error.status(), Some(404));
        assert_eq!(SamplesError::NoAccountAccess.status(), None);
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingHomeDirectory;
        let _: &dyn std::error::Error = &error;
        let error = SamplesError::NoAccountAccess;
        let _: &dyn std::error::Error = &error;
    }
}
