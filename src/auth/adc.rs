//! Application default credentials.
//!
//! The file named by `GOOGLE_APPLICATION_CREDENTIALS` wins; otherwise the
//! gcloud well-known file is used when present. Its `type` field selects
//! between a service-account key and an authorized-user credential.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::auth::service_account::ServiceAccountKey;
use crate::auth::user::AuthorizedUser;
use crate::auth::AuthError;

/// Environment variable naming an explicit credential file.
pub const ADC_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

const WELL_KNOWN_FILE: &str = "application_default_credentials.json";

/// A parsed Google credential file.
#[derive(Clone, Debug)]
pub enum CredentialFile {
    /// A `service_account` key.
    ServiceAccount(ServiceAccountKey),
    /// An `authorized_user` credential, as written by `gcloud auth application-default login`.
    AuthorizedUser(AuthorizedUser),
}

#[derive(Deserialize)]
struct TypeProbe {
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl CredentialFile {
    /// Reads and parses a credential file, dispatching on its `type`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentialFile`] for unreadable or malformed
    /// files, and [`AuthError::UnsupportedCredentialType`] for unknown types.
    pub fn read(path: &Path) -> Result<Self, AuthError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| AuthError::InvalidCredentialFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::parse(&contents, path)
    }

    /// Parses credential file contents.
    ///
    /// # Errors
    ///
    /// See [`CredentialFile::read`].
    pub fn parse(contents: &str, path: &Path) -> Result<Self, AuthError> {
        let probe: TypeProbe =
            serde_json::from_str(contents).map_err(|e| AuthError::InvalidCredentialFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        match probe.kind.as_deref() {
            Some("service_account") => {
                ServiceAccountKey::from_json(contents, path).map(Self::ServiceAccount)
            }
            Some("authorized_user") => {
                AuthorizedUser::from_json(contents, path).map(Self::AuthorizedUser)
            }
            other => Err(AuthError::UnsupportedCredentialType {
                kind: other.unwrap_or("<missing>").to_string(),
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Returns the gcloud well-known credential file location for this platform.
#[must_use]
pub fn well_known_file() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        dirs::config_dir()
    } else {
        dirs::home_dir().map(|home| home.join(".config"))
    };
    base.map(|dir| dir.join("gcloud").join(WELL_KNOWN_FILE))
}

/// Looks up application default credentials.
///
/// Returns `Ok(None)` when neither source exists.
///
/// # Errors
///
/// Returns [`AuthError::AdcFileMissing`] if the environment variable names a
/// nonexistent file, or a parse error if the chosen file is malformed.
pub fn find_application_default() -> Result<Option<(PathBuf, CredentialFile)>, AuthError> {
    let explicit = std::env::var_os(ADC_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    find_in(explicit, well_known_file())
}

fn find_in(
    explicit: Option<PathBuf>,
    well_known: Option<PathBuf>,
) -> Result<Option<(PathBuf, CredentialFile)>, AuthError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AuthError::AdcFileMissing { path });
        }
        let file = CredentialFile::read(&path)?;
        tracing::info!("Using application default credentials from {}", path.display());
        return Ok(Some((path, file)));
    }

    match well_known {
        Some(path) if path.is_file() => {
            let file = CredentialFile::read(&path)?;
            tracing::info!("Using gcloud application default credentials");
            Ok(Some((path, file)))
        }
        _ => Ok(None),
    }
}
