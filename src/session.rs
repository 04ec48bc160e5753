//! Session bootstrap.
//!
//! A [`ContentSession`] is everything a demo needs: the loaded
//! configuration, a [`ContentClient`] for the resolved endpoint, a second
//! client for the sandbox endpoint, the discovered [`AccountContext`] and the
//! [`UniqueIds`] generator for names and offer IDs.
//!
//! [`ContentSession::bootstrap`] runs the full sequence:
//!
//! 1. Resolve the endpoint from `GOOGLE_SHOPPING_SAMPLES_ENDPOINT` and derive
//!    the sandbox endpoint. A bad override fails here, before any
//!    interactive authorization.
//! 2. Load `merchant-info.json` (skipped with `--noconfig`).
//! 3. Resolve a credential ([`CredentialResolver`]).
//! 4. Build the HTTP clients.
//! 5. Load the account context.
//!
//! [`ContentSession::connect`] starts at step 4 with a credential and an
//! endpoint supplied by the caller.

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::oauth::AuthFlowMode;
use crate::auth::{Credential, CredentialResolver};
use crate::clients::{HttpClient, RequestLog};
use crate::config::{ConfigPaths, SamplesConfig};
use crate::content::ContentClient;
use crate::context::AccountContext;
use crate::endpoint::Endpoint;
use crate::error::SamplesError;
use crate::ids::UniqueIds;

/// Options gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Configuration root; `None` means `$HOME/shopping-samples`.
    pub config_path: Option<PathBuf>,
    /// Skip the configuration directory and use application default
    /// credentials only.
    pub no_config: bool,
    /// File receiving a JSON log of every request and response.
    pub log_file: Option<PathBuf>,
    /// How the interactive OAuth flow captures the code.
    pub auth_flow: AuthFlowMode,
}

/// An authenticated connection to the Content API for one account.
#[derive(Debug)]
pub struct ContentSession {
    config: SamplesConfig,
    content: ContentClient,
    sandbox: ContentClient,
    context: AccountContext,
    ids: UniqueIds,
}

// Verify ContentSession is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentSession>();
};

impl ContentSession {
    /// Runs the full bootstrap.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError`] if the configuration, credential, endpoint or
    /// account context cannot be resolved. All of them are fatal.
    pub async fn bootstrap(options: &SessionOptions) -> Result<Self, SamplesError> {
        let endpoint = Endpoint::from_env()?;

        let (paths, mut config) = if options.no_config {
            tracing::info!("Skipping configuration directory; using application default credentials");
            (None, SamplesConfig::default())
        } else {
            let root = match &options.config_path {
                Some(path) => path.clone(),
                None => ConfigPaths::default_root()?,
            };
            let paths = ConfigPaths::new(root);
            let config = SamplesConfig::load(&paths)?;
            (Some(paths), config)
        };

        let credential = CredentialResolver::new(paths, options.auth_flow)
            .resolve(&mut config)
            .await?;

        let request_log = match &options.log_file {
            Some(path) => {
                tracing::info!("Logging API requests to {}", path.display());
                Some(Arc::new(RequestLog::create(path)?))
            }
            None => None,
        };

        Self::connect(config, &endpoint, Arc::new(credential), request_log).await
    }

    /// Builds the clients for `endpoint` and loads the account context.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError`] if the HTTP client cannot be built or the
    /// account context cannot be loaded.
    pub async fn connect(
        config: SamplesConfig,
        endpoint: &Endpoint,
        credential: Arc<Credential>,
        request_log: Option<Arc<RequestLog>>,
    ) -> Result<Self, SamplesError> {
        let mut builder = HttpClient::builder(endpoint, credential);
        if let Some(name) = &config.application_name {
            builder = builder.application_name(name.clone());
        }
        if let Some(log) = request_log {
            builder = builder.request_log(log);
        }

        let content = ContentClient::new(builder.build()?);
        let sandbox = content.with_endpoint(&endpoint.sandbox());
        let context = AccountContext::load(&content, config.merchant_id).await?;

        Ok(Self {
            config,
            content,
            sandbox,
            context,
            ids: UniqueIds::new(),
        })
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &SamplesConfig {
        &self.config
    }

    /// Client for the primary endpoint.
    #[must_use]
    pub const fn content(&self) -> &ContentClient {
        &self.content
    }

    /// Client for the sandbox endpoint, used by order workflows.
    #[must_use]
    pub const fn sandbox(&self) -> &ContentClient {
        &self.sandbox
    }

    /// The resolved account.
    #[must_use]
    pub const fn context(&self) -> &AccountContext {
        &self.context
    }

    /// The resolved merchant ID.
    #[must_use]
    pub const fn merchant_id(&self) -> u64 {
        self.context.id()
    }

    /// Returns a suffix that is unique across runs.
    pub fn unique_id(&self) -> String {
        self.ids.next_id()
    }
}
