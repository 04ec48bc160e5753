//! Account tax resource: per-region sales tax rules.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::content::{build_path, int64, ContentClient, ListParams, ListResponse};

const COLLECTION_PATH: &str = "{merchantId}/accounttax";
const RESOURCE_PATH: &str = "{merchantId}/accounttax/{accountId}";

/// Tax rule for one region.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountTaxRule {
    /// CLDR territory code; only `US` is supported.
    #[serde(default)]
    pub country: String,

    /// State location criteria ID.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub location_id: Option<u64>,

    /// Whether the region's global tax table applies. Exclusive with
    /// `rate_percent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_global_rate: Option<bool>,

    /// Explicit rate, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_percent: Option<String>,

    /// Whether shipping charges are taxed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_taxed: Option<bool>,
}

/// The tax settings of an account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountTax {
    /// The account the settings belong to.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    /// Tax rules. Empty means no tax is charged.
    #[serde(default)]
    pub rules: Vec<AccountTaxRule>,
}

/// The `accounttax` service.
#[derive(Debug, Clone, Copy)]
pub struct AccountTaxService<'a> {
    client: &'a ContentClient,
}

impl<'a> AccountTaxService<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Retrieves an account's tax settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get(&self, merchant_id: u64, account_id: u64) -> Result<AccountTax, HttpError> {
        self.client
            .get(&resource_path(merchant_id, account_id))
            .await
    }

    /// Replaces an account's tax settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn update(
        &self,
        merchant_id: u64,
        account_id: u64,
        tax: &AccountTax,
    ) -> Result<AccountTax, HttpError> {
        self.client
            .put(&resource_path(merchant_id, account_id), tax)
            .await
    }

    /// Fetches one page of sub-account tax settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<AccountTax>, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of sub-account tax settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[AccountTax])>(
        &self,
        merchant_id: u64,
        max_results: Option<u32>,
        on_page: F,
    ) -> Result<usize, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        let params = ListParams {
            max_results,
            ..ListParams::default()
        };
        self.client.paginate(&path, params, on_page).await
    }
}

fn resource_path(merchant_id: u64, account_id: u64) -> String {
    build_path(
        RESOURCE_PATH,
        &[("merchantId", merchant_id), ("accountId", account_id)],
    )
}
