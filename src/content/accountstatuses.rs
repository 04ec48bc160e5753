//! Account status resource: account-level issues.

use serde::Deserialize;

use crate::clients::HttpError;
use crate::content::{build_path, ContentClient, ListParams, ListResponse};

const COLLECTION_PATH: &str = "{merchantId}/accountstatuses";
const RESOURCE_PATH: &str = "{merchantId}/accountstatuses/{accountId}";

/// An issue affecting the whole account.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountLevelIssue {
    /// Issue identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Short description.
    #[serde(default)]
    pub title: Option<String>,

    /// Affected country, if the issue is country-specific.
    #[serde(default)]
    pub country: Option<String>,

    /// `critical`, `error` or `suggestion`.
    #[serde(default)]
    pub severity: Option<String>,

    /// Affected destination.
    #[serde(default)]
    pub destination: Option<String>,

    /// Additional details.
    #[serde(default)]
    pub detail: Option<String>,

    /// Help center URL.
    #[serde(default)]
    pub documentation: Option<String>,
}

/// The status of an account.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatus {
    /// The account ID, as a decimal string.
    #[serde(default)]
    pub account_id: Option<String>,

    /// Account-level issues; `None` when the API reports none.
    #[serde(default)]
    pub account_level_issues: Option<Vec<AccountLevelIssue>>,
}

/// The `accountstatuses` service.
#[derive(Debug, Clone, Copy)]
pub struct AccountStatuses<'a> {
    client: &'a ContentClient,
}

impl<'a> AccountStatuses<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Retrieves the status of an account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get(&self, merchant_id: u64, account_id: u64) -> Result<AccountStatus, HttpError> {
        let path = build_path(
            RESOURCE_PATH,
            &[("merchantId", merchant_id), ("accountId", account_id)],
        );
        self.client.get(&path).await
    }

    /// Fetches one page of sub-account statuses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<AccountStatus>, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of sub-account statuses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[AccountStatus])>(
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
