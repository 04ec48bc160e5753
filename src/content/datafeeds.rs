//! Datafeed resource: scheduled fetches of a product file.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::content::common::{BatchErrors, BatchMethod, BatchRequest, BatchResponse};
use crate::content::{build_path, int64, ContentClient, ListParams, ListResponse};

const COLLECTION_PATH: &str = "{merchantId}/datafeeds";
const RESOURCE_PATH: &str = "{merchantId}/datafeeds/{datafeedId}";
const BATCH_PATH: &str = "datafeeds/batch";

/// When and where the feed file is fetched from.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatafeedFetchSchedule {
    /// Day of the week for weekly fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,

    /// Hour of the day (0-23).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,

    /// IANA time zone for `hour`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    /// URL of the feed file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_url: Option<String>,
}

/// How the feed file is encoded.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatafeedFormat {
    /// Character encoding, such as `utf-8`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_encoding: Option<String>,

    /// Column separator: `tab`, `pipe` or `tilde`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_delimiter: Option<String>,

    /// `normal character` or `value quoting`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quoting_mode: Option<String>,
}

/// A country and language the feed's products are for.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatafeedTarget {
    /// ISO 639-1 language of the items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// CLDR territory code of the target country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Destinations the items are eligible for, such as `Shopping`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_destinations: Vec<String>,
}

/// A datafeed configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Datafeed {
    /// Datafeed ID. Assigned on insertion.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Feed type, such as `products`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Language of the attribute names in the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_language: Option<String>,

    /// File name; must be unique within the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Targets of the feed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<DatafeedTarget>,

    /// Fetch schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_schedule: Option<DatafeedFetchSchedule>,

    /// File format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DatafeedFormat>,
}

/// One entry of a `datafeeds/batch` request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatafeedBatchEntry {
    /// Correlates the entry with its response.
    pub batch_id: u32,

    /// The account the entry applies to.
    #[serde(with = "int64::option")]
    pub merchant_id: Option<u64>,

    /// The operation.
    pub method: BatchMethod,

    /// The datafeed to insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datafeed: Option<Datafeed>,

    /// The datafeed ID for `get` and `delete`.
    #[serde(
        default,
        with = "int64::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub datafeed_id: Option<u64>,
}

impl DatafeedBatchEntry {
    /// An insert entry.
    #[must_use]
    pub fn insert(batch_id: u32, merchant_id: u64, datafeed: Datafeed) -> Self {
        Self {
            batch_id,
            merchant_id: Some(merchant_id),
            method: BatchMethod::Insert,
            datafeed: Some(datafeed),
            datafeed_id: None,
        }
    }

    /// A delete entry.
    #[must_use]
    pub fn delete(batch_id: u32, merchant_id: u64, datafeed_id: u64) -> Self {
        Self {
            batch_id,
            merchant_id: Some(merchant_id),
            method: BatchMethod::Delete,
            datafeed: None,
            datafeed_id: Some(datafeed_id),
        }
    }
}

/// One entry of a `datafeeds/batch` response.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatafeedBatchResult {
    /// The request entry's batch ID.
    #[serde(default)]
    pub batch_id: u32,

    /// Errors, when the entry failed.
    #[serde(default)]
    pub errors: Option<BatchErrors>,

    /// The datafeed, for successful inserts and gets.
    #[serde(default)]
    pub datafeed: Option<Datafeed>,
}

/// The `datafeeds` service.
#[derive(Debug, Clone, Copy)]
pub struct Datafeeds<'a> {
    client: &'a ContentClient,
}

impl<'a> Datafeeds<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Registers a datafeed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn insert(&self, merchant_id: u64, datafeed: &Datafeed) -> Result<Datafeed, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.post(&path, Some(datafeed)).await
    }

    /// Retrieves a datafeed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get(&self, merchant_id: u64, datafeed_id: u64) -> Result<Datafeed, HttpError> {
        self.client
            .get(&resource_path(merchant_id, datafeed_id))
            .await
    }

    /// Deletes a datafeed.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn delete(&self, merchant_id: u64, datafeed_id: u64) -> Result<(), HttpError> {
        self.client
            .delete(&resource_path(merchant_id, datafeed_id))
            .await
    }

    /// Fetches one page of datafeeds.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<Datafeed>, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of datafeeds.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[Datafeed])>(
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

    /// Sends several datafeed operations in one call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the batch call itself fails.
    pub async fn custombatch(
        &self,
        entries: &[DatafeedBatchEntry],
    ) -> Result<Vec<DatafeedBatchResult>, HttpError> {
        let response: BatchResponse<DatafeedBatchResult> = self
            .client
            .post(BATCH_PATH, Some(&BatchRequest { entries }))
            .await?;
        Ok(response.entries)
    }
}

fn resource_path(merchant_id: u64, datafeed_id: u64) -> String {
    build_path(
        RESOURCE_PATH,
        &[("merchantId", merchant_id), ("datafeedId", datafeed_id)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/content/v2.1/5/datafeeds"))
            .and(body_partial_json(json!({"name": "feed1", "fileName": "feed1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "987",
                "name": "feed1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let feed = Datafeed {
            name: Some("feed1".to_string()),
            file_name: Some("feed1".to_string()),
            ..Default::default()
        };
        let inserted = client_for(&server).datafeeds().insert(5, &feed).await.unwrap();
        assert_eq!(inserted.id, Some(987));
    }

    #[test]
    fn test_delete_entry_sends_string_id() {
        let entry = DatafeedBatchEntry::delete(3, 5, 987);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"batchId": 3, "merchantId": "5", "method": "delete", "datafeedId": "987"})
        );
    }
}
