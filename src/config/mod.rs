//! Samples configuration directory and `merchant-info.json`.
//!
//! # Overview
//!
//! All local configuration lives under one directory, by default
//! `$HOME/shopping-samples`. Each API family has its own subdirectory holding
//! both the settings file and the credential files:
//!
//! ```text
//! shopping-samples/
//! └── content/
//!     ├── merchant-info.json
//!     ├── service-account.json   (or legacy content-service.json)
//!     └── client-secrets.json    (or legacy content-oauth2.json)
//! ```
//!
//! - [`ConfigPaths`]: resolves the directory layout and checks it exists
//! - [`SamplesConfig`]: the parsed `merchant-info.json`
//! - [`MerchantId`]: a validated account ID newtype
//! - [`ClientSecret`]: an OAuth client secret with masked debug output
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_samples::{ConfigPaths, SamplesConfig};
//!
//! let paths = ConfigPaths::new(ConfigPaths::default_root()?);
//! let config = SamplesConfig::load(&paths)?;
//! println!("Merchant: {:?}", config.merchant_id);
//! ```

mod newtypes;

pub use newtypes::{ClientSecret, MerchantId};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::auth::StoredToken;
use crate::error::ConfigError;

/// Name of the default configuration directory under `$HOME`.
pub const DEFAULT_CONFIG_DIR: &str = "shopping-samples";

/// The API family whose configuration is being read.
///
/// Each family has its own subdirectory and settings file name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApiFamily {
    /// Content API for Shopping (`content/merchant-info.json`).
    #[default]
    Content,
    /// Manufacturer Center API (`manufacturers/manufacturer-info.json`).
    Manufacturers,
}

impl ApiFamily {
    /// Returns the subdirectory name for this family.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Manufacturers => "manufacturers",
        }
    }

    /// Returns the settings file name for this family.
    #[must_use]
    pub const fn settings_file(self) -> &'static str {
        match self {
            Self::Content => "merchant-info.json",
            Self::Manufacturers => "manufacturer-info.json",
        }
    }

    const fn legacy_prefix(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Manufacturers => "manufacturers",
        }
    }
}

/// Resolved locations of the configuration files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
    family: ApiFamily,
}

impl ConfigPaths {
    /// Creates paths for the Content API under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::for_family(root, ApiFamily::Content)
    }

    /// Creates paths for a specific API family under `root`.
    #[must_use]
    pub fn for_family(root: impl Into<PathBuf>, family: ApiFamily) -> Self {
        Self {
            root: root.into(),
            family,
        }
    }

    /// Returns `$HOME/shopping-samples`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingHomeDirectory`] if `$HOME` is unknown.
    pub fn default_root() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_CONFIG_DIR))
            .ok_or(ConfigError::MissingHomeDirectory)
    }

    /// Returns the configuration root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the per-family directory holding settings and credentials.
    #[must_use]
    pub fn api_dir(&self) -> PathBuf {
        self.root.join(self.family.directory())
    }

    /// Returns the path of the settings file.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.api_dir().join(self.family.settings_file())
    }

    /// Returns the service-account key locations in lookup order.
    #[must_use]
    pub fn service_account_files(&self) -> [PathBuf; 2] {
        let dir = self.api_dir();
        [
            dir.join("service-account.json"),
            dir.join(format!("{}-service.json", self.family.legacy_prefix())),
        ]
    }

    /// Returns the OAuth client-secrets locations in lookup order.
    #[must_use]
    pub fn client_secrets_files(&self) -> [PathBuf; 2] {
        let dir = self.api_dir();
        [
            dir.join("client-secrets.json"),
            dir.join(format!("{}-oauth2.json", self.family.legacy_prefix())),
        ]
    }

    /// Checks that the root and per-family directories exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfigDirectory`] or
    /// [`ConfigError::MissingApiDirectory`].
    pub fn ensure_exists(&self) -> Result<(), ConfigError> {
        if !self.root.is_dir() {
            return Err(ConfigError::MissingConfigDirectory {
                path: self.root.clone(),
            });
        }
        let api_dir = self.api_dir();
        if !api_dir.is_dir() {
            return Err(ConfigError::MissingApiDirectory { path: api_dir });
        }
        Ok(())
    }
}

/// Settings read from `merchant-info.json`.
///
/// Derived values such as the multi-client flag or the website URL are
/// never stored here; they come from the API on every run (see
/// [`crate::context::AccountContext`]). Stale copies of them in an existing
/// file are ignored and dropped on the next write.
///
/// # Example
///
/// ```rust
/// use shopping_samples::SamplesConfig;
///
/// let config = SamplesConfig::from_json(r#"{"merchantId": "12345", "isMCA": false}"#).unwrap();
/// assert_eq!(config.merchant_id.unwrap().get(), 12345);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplesConfig {
    /// The Merchant Center account to operate on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<MerchantId>,

    /// The Manufacturer Center account, for manufacturer configurations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<MerchantId>,

    /// Application name sent as a `User-Agent` prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,

    /// Email address of the authorized user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// User to add and remove in the accounts demo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_sample_user: Option<String>,

    /// Google Ads customer ID to link and unlink in the accounts demo.
    #[serde(
        default,
        rename = "accountSampleGoogleAdsCID",
        alias = "accountSampleAdWordsCID",
        deserialize_with = "newtypes::optional_numeric_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub account_sample_ads_cid: Option<u64>,

    /// Token obtained through the interactive OAuth flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<StoredToken>,
}

impl SamplesConfig {
    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidJson`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json, Path::new("<inline>"))
    }

    fn parse(json: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads the settings file.
    ///
    /// The configuration directories must exist. A missing settings file is
    /// not an error: defaults are used and every value is discovered from
    /// the API instead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a directory is missing or the file cannot
    /// be read or decoded.
    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        paths.ensure_exists()?;

        let path = paths.settings_file();
        if !path.exists() {
            tracing::warn!(
                "No configuration file found at {}; using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&contents, &path)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the settings file with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the file cannot be written.
    pub fn save(&self, paths: &ConfigPaths) -> Result<(), ConfigError> {
        let path = paths.settings_file();
        let mut json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        json.push('\n');
        std::fs::write(&path, json).map_err(|e| ConfigError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::info!("Stored configuration in {}", path.display());
        Ok(())
    }

    /// Returns the configured account ID for whichever family is in use.
    #[must_use]
    pub fn account_id(&self) -> Option<MerchantId> {
        self.merchant_id.or(self.manufacturer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn config_dir() -> (TempDir, ConfigPaths) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("content")).unwrap();
        let paths = ConfigPaths::new(dir.path());
        (dir, paths)
    }

    #[test]
    fn test_paths_layout() {
        let paths = ConfigPaths::new("/home/me/shopping-samples");
        assert_eq!(
            paths.settings_file(),
            PathBuf::from("/home/me/shopping-samples/content/merchant-info.json")
        );
        assert_eq!(
            paths.service_account_files()[1],
            PathBuf::from("/home/me/shopping-samples/content/content-service.json")
        );
        assert_eq!(
            paths.client_secrets_files()[0],
            PathBuf::from("/home/me/shopping-samples/content/client-secrets.json")
        );
    }

    #[test]
    fn test_manufacturer_paths_layout() {
        let paths = ConfigPaths::for_family("/cfg", ApiFamily::Manufacturers);
        assert_eq!(
            paths.settings_file(),
            PathBuf::from("/cfg/manufacturers/manufacturer-info.json")
        );
        assert_eq!(
            paths.client_secrets_files()[1],
            PathBuf::from("/cfg/manufacturers/manufacturers-oauth2.json")
        );
    }

    #[test]
    fn test_load_fails_when_root_missing() {
        let paths = ConfigPaths::new("/definitely/not/here");
        assert!(matches!(
            SamplesConfig::load(&paths),
            Err(ConfigError::MissingConfigDirectory { .. })
        ));
    }

    #[test]
    fn test_load_fails_when_api_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::new(dir.path());
        assert!(matches!(
            SamplesConfig::load(&paths),
            Err(ConfigError::MissingApiDirectory { .. })
        ));
    }

    #[test]
    fn test_load_defaults_when_file_missing() {
        let (_dir, paths) = config_dir();
        assert_eq!(SamplesConfig::load(&paths).unwrap(), SamplesConfig::default());
    }

    #[test]
    fn test_load_reports_invalid_json() {
        let (_dir, paths) = config_dir();
        std::fs::write(paths.settings_file(), "{ not json").unwrap();
        assert!(matches!(
            SamplesConfig::load(&paths),
            Err(ConfigError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_parses_all_keys_and_ignores_derived_ones() {
        let config = SamplesConfig::from_json(
            r#"{
                "merchantId": 12345,
                "applicationName": "Samples",
                "emailAddress": "me@example.com",
                "accountSampleUser": "user@example.com",
                "accountSampleAdWordsCID": "1234567890",
                "websiteUrl": "https://shop.example.com",
                "isMCA": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.merchant_id, Some(MerchantId::new(12345).unwrap()));
        assert_eq!(config.application_name.as_deref(), Some("Samples"));
        assert_eq!(config.account_sample_user.as_deref(), Some("user@example.com"));
        assert_eq!(config.account_sample_ads_cid, Some(1_234_567_890));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_manufacturer_id_is_used_as_account_id() {
        let config = SamplesConfig::from_json(r#"{"manufacturerId": "777"}"#).unwrap();
        assert_eq!(config.account_id().map(MerchantId::get), Some(777));
    }

    #[test]
    fn test_save_round_trips_with_two_space_indent() {
        let (_dir, paths) = config_dir();
        std::fs::write(
            paths.settings_file(),
            r#"{"merchantId": "12345", "isMCA": false}"#,
        )
        .unwrap();

        let mut config = SamplesConfig::load(&paths).unwrap();
        config.token = Some(StoredToken {
            access_token: "ya29.token".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            token_type: Some("Bearer".to_string()),
            scope: None,
            client_id: Some("client.apps.googleusercontent.com".to_string()),
            expiry: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
        });
        config.save(&paths).unwrap();

        let written = std::fs::read_to_string(paths.settings_file()).unwrap();
        assert!(written.contains("\n  \"merchantId\": 12345"));
        assert!(!written.contains("isMCA"));
        assert!(written.ends_with("}\n"));

        let reloaded = SamplesConfig::load(&paths).unwrap();
        assert_eq!(reloaded, config);
    }
}
