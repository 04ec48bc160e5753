//! Typed access to the Content API for Shopping v2.1.
//!
//! # Overview
//!
//! [`ContentClient`] wraps an [`HttpClient`] and hands out one lightweight
//! service per resource:
//!
//! | Accessor | Resource |
//! | --- | --- |
//! | [`ContentClient::products`] | `products` (insert, get, list, delete, custombatch, update) |
//! | [`ContentClient::productstatuses`] | `productstatuses` (get, list) |
//! | [`ContentClient::inventory`] | price and availability updates on a product |
//! | [`ContentClient::accounts`] | `accounts` (authinfo, get, list, insert, update, delete) |
//! | [`ContentClient::accountstatuses`] | `accountstatuses` (get, list) |
//! | [`ContentClient::datafeeds`] | `datafeeds` (insert, get, list, delete, custombatch) |
//! | [`ContentClient::orders`] | `orders` on the sandbox endpoint |
//! | [`ContentClient::shippingsettings`] | `shippingsettings` (get, list, update, getsupportedcarriers) |
//! | [`ContentClient::accounttax`] | `accounttax` (get, list, update) |
//!
//! Resource types are plain serde structs with camelCase wire names; absent
//! fields stay `None` and are not sent.
//!
//! # Pagination
//!
//! Every list method returns one [`ListResponse`] page. The `*_all` helpers
//! walk the pages with [`ContentClient::paginate`], calling back once per page
//! until no `nextPageToken` is returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_samples::content::ContentClient;
//!
//! let content = ContentClient::new(http);
//! let product = content.products().get(merchant_id, "online:en:US:book123").await?;
//! let count = content
//!     .products()
//!     .list_all(merchant_id, Some(25), |page| {
//!         for product in page {
//!             println!("{}", product.title.as_deref().unwrap_or_default());
//!         }
//!     })
//!     .await?;
//! ```

mod accounts;
mod accountstatuses;
mod accounttax;
mod common;
mod datafeeds;
pub(crate) mod int64;
mod inventory;
mod orders;
mod path;
mod products;
mod productstatuses;
mod shippingsettings;

pub use accounts::{
    Account, AccountAdsLink, AccountIdentifier, AccountUser, Accounts, AccountsAuthInfoResponse,
};
pub use accountstatuses::{AccountLevelIssue, AccountStatus, AccountStatuses};
pub use accounttax::{AccountTax, AccountTaxRule, AccountTaxService};
pub use common::{BatchError, BatchErrors, BatchMethod, Price};
pub use datafeeds::{
    Datafeed, DatafeedBatchEntry, DatafeedBatchResult, DatafeedFetchSchedule, DatafeedFormat,
    DatafeedTarget, Datafeeds,
};
pub use inventory::{Inventory, InventorySetRequest};
pub use orders::{
    LineItemChange, MarketingRightsInfo, Order, OrderCustomer, OrderLineItem,
    OrderLineItemProduct, OrderLineItemReturnInfo, OrderLineItemShippingDetails, OrderReturn,
    OrderShipment, Orders, ShipLineItemsRequest, ShipmentInfo, ShipmentLineItem, ShippingMethod,
    UpdateShipmentRequest,
};
pub use path::build_path;
pub use products::{
    Product, ProductBatchEntry, ProductBatchResult, ProductShipping, ProductShippingWeight,
    Products,
};
pub use productstatuses::{
    DestinationStatus, ItemLevelIssue, ProductStatus, ProductStatuses,
};
pub use shippingsettings::{
    CarrierRate, CarriersCarrier, DeliveryTime, Headers, LocationIdSet, PostalCodeGroup,
    PostalCodeRange, RateGroup, Row, ShippingService, ShippingSettings, ShippingSettingsService,
    Table, Value, Weight,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder};
use crate::endpoint::Endpoint;

/// Page selection for list calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Maximum entries per page; the server default applies when `None`.
    pub max_results: Option<u32>,
    /// Token from the previous page's `nextPageToken`.
    pub page_token: Option<String>,
    /// Extra filters, such as `acknowledged=false` for orders.
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    /// Requests pages of at most `max_results` entries.
    #[must_use]
    pub fn with_max_results(max_results: u32) -> Self {
        Self {
            max_results: Some(max_results),
            ..Self::default()
        }
    }

    /// Adds a filter parameter.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    fn apply(&self, mut builder: HttpRequestBuilder) -> HttpRequestBuilder {
        builder = builder
            .optional_query_param("maxResults", self.max_results)
            .optional_query_param("pageToken", self.page_token.as_deref());
        for (key, value) in &self.filters {
            builder = builder.query_param(key.clone(), value.clone());
        }
        builder
    }
}

/// One page of a list call.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    /// The entries on this page.
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
    /// Token for the next page; `None` on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Client for the Content API resources.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: HttpClient,
}

// Verify ContentClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentClient>();
};

impl ContentClient {
    /// Wraps a configured HTTP client.
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Returns a client for another endpoint sharing the same credential and
    /// headers. Used for the sandbox endpoint.
    #[must_use]
    pub fn with_endpoint(&self, endpoint: &Endpoint) -> Self {
        Self {
            http: self.http.with_endpoint(endpoint),
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Products service.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Product statuses service.
    #[must_use]
    pub const fn productstatuses(&self) -> ProductStatuses<'_> {
        ProductStatuses::new(self)
    }

    /// Price and availability updates.
    #[must_use]
    pub const fn inventory(&self) -> Inventory<'_> {
        Inventory::new(self)
    }

    /// Accounts service.
    #[must_use]
    pub const fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    /// Account statuses service.
    #[must_use]
    pub const fn accountstatuses(&self) -> AccountStatuses<'_> {
        AccountStatuses::new(self)
    }

    /// Datafeeds service.
    #[must_use]
    pub const fn datafeeds(&self) -> Datafeeds<'_> {
        Datafeeds::new(self)
    }

    /// Orders service. Build the client with the sandbox endpoint to use test
    /// orders.
    #[must_use]
    pub const fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// Shipping settings service.
    #[must_use]
    pub const fn shippingsettings(&self) -> ShippingSettingsService<'_> {
        ShippingSettingsService::new(self)
    }

    /// Account tax service.
    #[must_use]
    pub const fn accounttax(&self) -> AccountTaxService<'_> {
        AccountTaxService::new(self)
    }

    /// Fetches one page of a list call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails or the page cannot be decoded.
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<ListResponse<T>, HttpError> {
        let request = params.apply(HttpRequest::builder(HttpMethod::Get, path)).build()?;
        self.send(request).await
    }

    /// Walks every page of a list call, passing each page to `on_page`.
    ///
    /// Starts from `params` and follows `nextPageToken` until the server
    /// stops returning one. Returns the number of entries seen.
    ///
    /// # Errors
    ///
    /// Returns the first [`HttpError`]; pages already delivered stay delivered.
    pub async fn paginate<T, F>(
        &self,
        path: &str,
        mut params: ListParams,
        mut on_page: F,
    ) -> Result<usize, HttpError>
    where
        T: DeserializeOwned,
        F: FnMut(&[T]),
    {
        let mut total = 0;
        loop {
            let page: ListResponse<T> = self.list_page(path, &params).await?;
            total += page.resources.len();
            on_page(&page.resources);

            match page.next_page_token {
                Some(token) if !token.is_empty() => params.page_token = Some(token),
                _ => return Ok(total),
            }
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.send(request).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = HttpRequest::builder(HttpMethod::Post, path);
        if let Some(body) = body {
            builder = builder.body(encode(path, body)?);
        }
        self.send(builder.build()?).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(encode(path, body)?)
            .build()?;
        self.send(request).await
    }

    pub(crate) async fn patch<B, T>(
        &self,
        path: &str,
        update_mask: &str,
        body: &B,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = HttpRequest::builder(HttpMethod::Patch, path)
            .query_param("updateMask", update_mask)
            .body(encode(path, body)?)
            .build()?;
        self.send(request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
        self.http.request(request).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, HttpError> {
        let path = request.path.clone();
        let response = self.http.request(request).await?;
        response.json(&path)
    }
}

fn encode<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<serde_json::Value, HttpError> {
    serde_json::to_value(body).map_err(|e| HttpError::Encode {
        path: path.to_string(),
        message: e.to_string(),
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::client_for;
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn first_page(request: &Request) -> bool {
        !request.url.query_pairs().any(|(key, _)| key == "pageToken")
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_list_response_defaults_to_empty() {
        let page: ListResponse<Item> = serde_json::from_value(json!({"kind": "x"})).unwrap();
        assert!(page.resources.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_paginate_follows_next_page_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/1/things"))
            .and(query_param("maxResults", "2"))
            .and(first_page)
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"id": "a"}, {"id": "b"}],
                "nextPageToken": "p2"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/1/things"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"id": "c"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let mut pages: Vec<Vec<String>> = Vec::new();
        let total = client
            .paginate("1/things", ListParams::with_max_results(2), |page: &[Item]| {
                pages.push(page.iter().map(|i| i.id.clone()).collect());
            })
            .await
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(pages, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[tokio::test]
    async fn test_paginate_stops_on_empty_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/1/things"))
            .and(query_param("acknowledged", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [],
                "nextPageToken": ""
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let params = ListParams::default().filter("acknowledged", "false");
        let total = client
            .paginate("1/things", params, |_: &[Item]| {})
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_patch_sends_update_mask() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/content/v2.1/1/things/a"))
            .and(query_param("updateMask", "price,availability"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let item: Item = client
            .patch("1/things/a", "price,availability", &json!({"availability": "in stock"}))
            .await
            .unwrap();
        assert_eq!(item.id, "a");
    }

    #[tokio::test]
    async fn test_delete_ignores_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/content/v2.1/1/things/a"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete("1/things/a").await.unwrap();
    }
}
