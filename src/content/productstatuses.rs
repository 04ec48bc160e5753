//! Product status resource: per-destination approval and item-level issues.

use serde::Deserialize;

use crate::clients::HttpError;
use crate::content::{build_path, ContentClient, ListParams, ListResponse};

const LIST_PATH: &str = "{merchantId}/productstatuses";
const RESOURCE_PATH: &str = "{merchantId}/productstatuses/{productId}";

/// Approval state of a product for one destination.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationStatus {
    /// Destination name, such as `Shopping`.
    #[serde(default)]
    pub destination: Option<String>,

    /// Aggregate status, such as `approved` or `disapproved`.
    #[serde(default)]
    pub status: Option<String>,

    /// Countries where the offer is approved.
    #[serde(default)]
    pub approved_countries: Vec<String>,

    /// Countries where the offer is pending.
    #[serde(default)]
    pub pending_countries: Vec<String>,

    /// Countries where the offer is disapproved.
    #[serde(default)]
    pub disapproved_countries: Vec<String>,
}

/// A problem with one product attribute.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemLevelIssue {
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,

    /// Short description.
    #[serde(default)]
    pub description: Option<String>,

    /// Detailed explanation.
    #[serde(default)]
    pub detail: Option<String>,

    /// Help center URL.
    #[serde(default)]
    pub documentation: Option<String>,

    /// Whether the merchant or Google must act.
    #[serde(default)]
    pub resolution: Option<String>,

    /// Effect on serving, such as `disapproved`.
    #[serde(default)]
    pub servability: Option<String>,

    /// Attribute the issue is about.
    #[serde(default)]
    pub attribute_name: Option<String>,

    /// Affected destination.
    #[serde(default)]
    pub destination: Option<String>,
}

/// The status of a product.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatus {
    /// The product's REST ID.
    #[serde(default)]
    pub product_id: Option<String>,

    /// The product's title.
    #[serde(default)]
    pub title: Option<String>,

    /// Per-destination state.
    #[serde(default)]
    pub destination_statuses: Option<Vec<DestinationStatus>>,

    /// Reported issues.
    #[serde(default)]
    pub item_level_issues: Option<Vec<ItemLevelIssue>>,
}

/// The `productstatuses` service.
#[derive(Debug, Clone, Copy)]
pub struct ProductStatuses<'a> {
    client: &'a ContentClient,
}

impl<'a> ProductStatuses<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Retrieves the status of one product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get(&self, merchant_id: u64, product_id: &str) -> Result<ProductStatus, HttpError> {
        let path = build_path(
            RESOURCE_PATH,
            &[
                ("merchantId", merchant_id.to_string()),
                ("productId", product_id.to_string()),
            ],
        );
        self.client.get(&path).await
    }

    /// Fetches one page of statuses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<ProductStatus>, HttpError> {
        let path = build_path(LIST_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of statuses.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[ProductStatus])>(
        &self,
        merchant_id: u64,
        max_results: Option<u32>,
        on_page: F,
    ) -> Result<usize, HttpError> {
        let path = build_path(LIST_PATH, &[("merchantId", merchant_id)]);
        let params = ListParams {
            max_results,
            ..ListParams::default()
        };
        self.client.paginate(&path, params, on_page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_lists_stay_none() {
        let status: ProductStatus = serde_json::from_value(json!({
            "productId": "online:en:US:book123",
            "title": "A Tale of Two Cities"
        }))
        .unwrap();
        assert!(status.destination_statuses.is_none());
        assert!(status.item_level_issues.is_none());
    }

    #[test]
    fn test_parses_issues_and_destinations() {
        let status: ProductStatus = serde_json::from_value(json!({
            "productId": "online:en:US:book123",
            "destinationStatuses": [{"destination": "Shopping", "status": "disapproved", "disapprovedCountries": ["US"]}],
            "itemLevelIssues": [{"code": "image_link_broken", "servability": "disapproved", "attributeName": "image link"}]
        }))
        .unwrap();
        let destinations = status.destination_statuses.unwrap();
        assert_eq!(destinations[0].disapproved_countries, vec!["US"]);
        let issues = status.item_level_issues.unwrap();
        assert_eq!(issues[0].attribute_name.as_deref(), Some("image link"));
    }
}
