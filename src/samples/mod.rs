//! Sample payloads and the demo procedures.
//!
//! # Overview
//!
//! Each [`Demo`] walks one resource through a short scenario (insert, list,
//! get, update, delete) against the session's account and prints what it
//! sees. Demos that only make sense for standalone or for multi-client
//! accounts check [`AccountContext`](crate::context::AccountContext) first
//! and are skipped otherwise.
//!
//! | Name | Resource |
//! | --- | --- |
//! | `products` | Products: insert, list, get, delete |
//! | `productsBatch` | Products through `custombatch` |
//! | `productstatuses` | Product statuses |
//! | `datafeeds` | Datafeeds: insert, list, get, delete |
//! | `datafeedsBatch` | Datafeeds through `custombatch` |
//! | `inventory` | Price and availability updates |
//! | `accounts` | Account users and Ads links; sub-accounts on an MCA |
//! | `accountstatuses` | Account-level issues |
//! | `shippingSettings` | Shipping settings |
//! | `accountTax` | Tax settings |
//! | `orders` | The full order lifecycle on the sandbox endpoint |
//!
//! Running without demo names runs every demo except `orders`.
//!
//! # Example
//!
//! ```rust
//! use shopping_samples::samples::Demo;
//!
//! assert_eq!(Demo::from_name("productsBatch"), Some(Demo::ProductsBatch));
//! assert!(!Demo::defaults().contains(&Demo::Orders));
//! ```

mod accounts;
mod builders;
mod datafeeds;
mod orders;
pub mod output;
mod products;
mod settings;

pub use builders::{
    apply_settings_patch, create_example_account, create_example_datafeed,
    create_example_product, create_example_shipping_settings,
    create_example_shipping_settings_patch, create_example_tax_patch,
    create_example_tax_settings, FALLBACK_WEBSITE_URL,
};

use crate::error::SamplesError;
use crate::session::ContentSession;
use output::ErrorReport;

/// A runnable demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    /// `products`
    Products,
    /// `productsBatch`
    ProductsBatch,
    /// `productstatuses`
    ProductStatuses,
    /// `datafeeds`
    Datafeeds,
    /// `datafeedsBatch`
    DatafeedsBatch,
    /// `inventory`
    Inventory,
    /// `accounts`
    Accounts,
    /// `accountstatuses`
    AccountStatuses,
    /// `shippingSettings`
    ShippingSettings,
    /// `accountTax`
    AccountTax,
    /// `orders`
    Orders,
}

impl Demo {
    /// Every demo, in run order.
    pub const ALL: [Self; 11] = [
        Self::Products,
        Self::ProductsBatch,
        Self::ProductStatuses,
        Self::Datafeeds,
        Self::DatafeedsBatch,
        Self::Inventory,
        Self::Accounts,
        Self::AccountStatuses,
        Self::ShippingSettings,
        Self::AccountTax,
        Self::Orders,
    ];

    /// The name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::ProductsBatch => "productsBatch",
            Self::ProductStatuses => "productstatuses",
            Self::Datafeeds => "datafeeds",
            Self::DatafeedsBatch => "datafeedsBatch",
            Self::Inventory => "inventory",
            Self::Accounts => "accounts",
            Self::AccountStatuses => "accountstatuses",
            Self::ShippingSettings => "shippingSettings",
            Self::AccountTax => "accountTax",
            Self::Orders => "orders",
        }
    }

    /// Looks a demo up by its command-line name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|demo| demo.name() == name)
    }

    /// The demos run when none are named: all but `orders`.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|demo| *demo != Self::Orders)
            .collect()
    }

    /// Runs the demo.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::WrongAccountType`] if the account is of the
    /// wrong kind, or the first API error the demo cannot continue past.
    pub async fn run(self, session: &ContentSession) -> Result<(), SamplesError> {
        match self {
            Self::Products => products::products(session).await,
            Self::ProductsBatch => products::products_batch(session).await,
            Self::ProductStatuses => products::product_statuses(session).await,
            Self::Datafeeds => datafeeds::datafeeds(session).await,
            Self::DatafeedsBatch => datafeeds::datafeeds_batch(session).await,
            Self::Inventory => products::inventory(session).await,
            Self::Accounts => accounts::accounts(session).await,
            Self::AccountStatuses => accounts::account_statuses(session).await,
            Self::ShippingSettings => settings::shipping_settings(session).await,
            Self::AccountTax => settings::account_tax(session).await,
            Self::Orders => orders::orders(session).await,
        }
    }
}

/// Resolves command-line names to demos; an empty list means the defaults.
///
/// # Errors
///
/// Returns [`SamplesError::UnknownDemo`] for the first unknown name.
pub fn select(names: &[String]) -> Result<Vec<Demo>, SamplesError> {
    if names.is_empty() {
        return Ok(Demo::defaults());
    }
    names
        .iter()
        .map(|name| {
            Demo::from_name(name).ok_or_else(|| SamplesError::UnknownDemo { name: name.clone() })
        })
        .collect()
}

/// Runs demos in order and returns how many failed.
///
/// A failing demo is reported and the next one still runs. Demos skipped for
/// the wrong account type do not count as failures.
pub async fn run_all(session: &ContentSession, demos: &[Demo]) -> usize {
    let mut failures = 0;
    for demo in demos {
        println!("Running demo {}...", demo.name());
        match demo.run(session).await {
            Ok(()) => {}
            Err(SamplesError::WrongAccountType(message)) => println!("{message}"),
            Err(e) => {
                tracing::error!("Demo {} failed: {e}", demo.name());
                eprint!("{}", ErrorReport(&e));
                failures += 1;
            }
        }
        println!("Finished running demo {}.", demo.name());
        println!();
    }
    failures
}
