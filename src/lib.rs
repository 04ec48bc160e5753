//! # Shopping Samples
//!
//! Runnable samples for the Content API for Shopping v2.1: a small typed
//! client for the API's resources, the credential and configuration handling
//! the samples share, and the demo procedures themselves.
//!
//! ## Overview
//!
//! This crate provides:
//! - Local configuration in `$HOME/shopping-samples/content/` via
//!   [`SamplesConfig`] and [`ConfigPaths`]
//! - Credential discovery (stored user token, service account key, OAuth
//!   client secrets, application default credentials) via [`auth`]
//! - An async HTTP client with bearer authentication, JSON error decoding and
//!   optional request logging via [`clients`]
//! - Typed services for products, product statuses, inventory, datafeeds,
//!   accounts, account statuses, shipping settings, account tax and orders
//!   via [`content`]
//! - Endpoint overrides through `GOOGLE_SHOPPING_SAMPLES_ENDPOINT` via
//!   [`Endpoint`]
//! - Retry helpers for eventually consistent reads via [`retry`]
//! - The demos and their example payloads via [`samples`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopping_samples::{MerchantId, SamplesConfig};
//!
//! let config = SamplesConfig::from_json(r#"{"merchantId": "1234", "isMCA": false}"#).unwrap();
//! assert_eq!(config.merchant_id, Some(MerchantId::new(1234).unwrap()));
//! ```
//!
//! ## Running Demos
//!
//! ```rust,ignore
//! use shopping_samples::samples::{run_all, select};
//! use shopping_samples::{ContentSession, SessionOptions};
//!
//! let session = ContentSession::bootstrap(&SessionOptions::default()).await?;
//! let demos = select(&["products".to_string()])?;
//! let failures = run_all(&session, &demos).await;
//! ```
//!
//! ## Endpoints
//!
//! ```rust
//! use shopping_samples::Endpoint;
//!
//! let endpoint = Endpoint::resolve(None).unwrap();
//! assert!(endpoint.is_default());
//! assert_eq!(
//!     endpoint.sandbox().base_path(),
//!     "content/v2.1sandbox/"
//! );
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and clients are passed explicitly
//! - **Fail-fast validation**: merchant IDs and endpoints validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: built on the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod content;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod ids;
pub mod retry;
pub mod samples;
pub mod session;

// Re-export public types at crate root for convenience
pub use config::{ApiFamily, ClientSecret, ConfigPaths, MerchantId, SamplesConfig};
pub use context::AccountContext;
pub use endpoint::{Endpoint, EndpointError};
pub use error::{ConfigError, SamplesError};
pub use session::{ContentSession, SessionOptions};

// Re-export HTTP client types
pub use clients::{ApiError, HttpClient, HttpError, RequestLog};
pub use content::ContentClient;
