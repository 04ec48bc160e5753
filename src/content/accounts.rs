//! Account resource and account discovery.
//!
//! Every Merchant Center account, standalone or sub-account, is an
//! [`Account`]. Sub-accounts are created, listed and removed through their
//! multi-client parent: `{merchantId}` is the parent and `{accountId}` the
//! sub-account. For a standalone account both are the same ID.
//!
//! [`Accounts::authinfo`] answers which accounts the credential can reach,
//! which is how the session finds its merchant ID when none is configured.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::content::{build_path, int64, ContentClient, ListParams, ListResponse};

const AUTHINFO_PATH: &str = "accounts/authinfo";
const COLLECTION_PATH: &str = "{merchantId}/accounts";
const RESOURCE_PATH: &str = "{merchantId}/accounts/{accountId}";

/// A user with access to an account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountUser {
    /// The user's email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// Whether the user is an admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

/// A link to a Google Ads account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountAdsLink {
    /// Customer ID of the Ads account.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub ads_id: Option<u64>,

    /// Link status: `active` or `pending`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A Merchant Center account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Merchant Center account ID. Assigned on insertion.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The merchant's storefront URL. `None` when none is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Whether the account sells adult content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adult_content: Option<bool>,

    /// Users with access to the account.
    #[serde(default)]
    pub users: Vec<AccountUser>,

    /// Linked Google Ads accounts.
    #[serde(default)]
    pub ads_links: Vec<AccountAdsLink>,
}

/// An account the credential can act on.
///
/// A standalone account has only `merchant_id`; a sub-account reached
/// through its parent has both; a multi-client account the user administers
/// directly has only `aggregator_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentifier {
    /// The account's own ID.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<u64>,

    /// The multi-client account the access goes through.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub aggregator_id: Option<u64>,
}

/// Response of `accounts/authinfo`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountsAuthInfoResponse {
    /// Accounts the credential can access.
    #[serde(default)]
    pub account_identifiers: Vec<AccountIdentifier>,
}

/// The `accounts` service.
#[derive(Debug, Clone, Copy)]
pub struct Accounts<'a> {
    client: &'a ContentClient,
}

impl<'a> Accounts<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Lists the accounts the credential can access.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn authinfo(&self) -> Result<AccountsAuthInfoResponse, HttpError> {
        self.client.get(AUTHINFO_PATH).await
    }

    /// Retrieves an account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get(&self, merchant_id: u64, account_id: u64) -> Result<Account, HttpError> {
        self.client
            .get(&resource_path(merchant_id, account_id))
            .await
    }

    /// Creates a sub-account of a multi-client account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn insert(&self, merchant_id: u64, account: &Account) -> Result<Account, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.post(&path, Some(account)).await
    }

    /// Replaces an account's settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn update(
        &self,
        merchant_id: u64,
        account_id: u64,
        account: &Account,
    ) -> Result<Account, HttpError> {
        self.client
            .put(&resource_path(merchant_id, account_id), account)
            .await
    }

    /// Removes a sub-account.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn delete(&self, merchant_id: u64, account_id: u64) -> Result<(), HttpError> {
        self.client
            .delete(&resource_path(merchant_id, account_id))
            .await
    }

    /// Fetches one page of sub-accounts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<Account>, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of sub-accounts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[Account])>(
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_authinfo_parses_string_ids() {
        let response: AccountsAuthInfoResponse = serde_json::from_value(json!({
            "kind": "content#accountsAuthInfoResponse",
            "accountIdentifiers": [
                {"merchantId": "111"},
                {"aggregatorId": "222"},
                {"merchantId": "333", "aggregatorId": "222"}
            ]
        }))
        .unwrap();
        let ids = &response.account_identifiers;
        assert_eq!(ids[0].merchant_id, Some(111));
        assert_eq!(ids[1].aggregator_id, Some(222));
        assert_eq!(ids[1].merchant_id, None);
        assert_eq!(ids[2].aggregator_id, Some(222));
    }

    #[test]
    fn test_account_keeps_empty_website_url() {
        let present: Account = serde_json::from_value(json!({"id": "1", "websiteUrl": ""})).unwrap();
        assert_eq!(present.website_url.as_deref(), Some(""));
        let absent: Account = serde_json::from_value(json!({"id": "1"})).unwrap();
        assert!(absent.website_url.is_none());
    }

    #[tokio::test]
    async fn test_update_puts_users_and_ads_links() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/content/v2.1/42/accounts/42"))
            .and(body_json(json!({
                "id": "42",
                "name": "Shop",
                "users": [{"emailAddress": "user@example.com", "admin": false}],
                "adsLinks": [{"adsId": "1234567890", "status": "active"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42", "name": "Shop"})))
            .expect(1)
            .mount(&server)
            .await;

        let account = Account {
            id: Some(42),
            name: Some("Shop".to_string()),
            users: vec![AccountUser {
                email_address: Some("user@example.com".to_string()),
                admin: Some(false),
            }],
            ads_links: vec![AccountAdsLink {
                ads_id: Some(1_234_567_890),
                status: Some("active".to_string()),
            }],
            ..Default::default()
        };

        let client = client_for(&server);
        let updated = client.accounts().update(42, 42, &account).await.unwrap();
        assert_eq!(updated.id, Some(42));
        assert!(updated.users.is_empty());
    }
}
