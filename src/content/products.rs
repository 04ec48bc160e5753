//! Product resource.
//!
//! A product is one offer in the merchant's catalog. It is addressed by its
//! REST ID `channel:contentLanguage:targetCountry:offerId`, which the API
//! returns in [`Product::id`] after insertion.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_samples::content::{Price, Product};
//!
//! let product = Product {
//!     offer_id: Some("book123".to_string()),
//!     title: Some("A Tale of Two Cities".to_string()),
//!     price: Some(Price::new("2.50", "USD")),
//!     ..Default::default()
//! };
//! let inserted = content.products().insert(merchant_id, &product).await?;
//! content.products().delete(merchant_id, inserted.id.as_deref().unwrap_or_default()).await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::content::common::{
    BatchError, BatchErrors, BatchMethod, BatchRequest, BatchResponse, Price,
};
use crate::content::{build_path, int64, ContentClient, ListParams, ListResponse};

const INSERT_PATH: &str = "{merchantId}/products";
const RESOURCE_PATH: &str = "{merchantId}/products/{productId}";
const BATCH_PATH: &str = "products/batch";

/// Shipping cost for one country and service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductShipping {
    /// CLDR territory code of the destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Free-form service class or delivery speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Fixed shipping price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}

/// Weight used to compute shipping costs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductShippingWeight {
    /// The weight.
    pub value: f64,

    /// Unit, such as `grams` or `lb`.
    pub unit: String,
}

/// A product in the merchant's catalog.
///
/// ## Read-Only Fields
/// - `id` - The REST ID
/// - `warnings` - Non-fatal problems reported on insertion
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The REST ID, `channel:contentLanguage:targetCountry:offerId`.
    /// Read-only field.
    #[serde(skip_serializing)]
    pub id: Option<String>,

    /// The merchant's own identifier for the offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,

    /// Product title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Product description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Landing page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Main image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,

    /// Two-letter ISO 639-1 language of the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_language: Option<String>,

    /// CLDR territory code where the item is sold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_country: Option<String>,

    /// `online` or `local`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Availability status, such as `in stock`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,

    /// Condition, such as `new`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Google's category of the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_product_category: Option<String>,

    /// Global Trade Item Number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,

    /// Brand of the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Price of the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    /// Shipping rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shipping: Vec<ProductShipping>,

    /// Weight of the item for shipping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_weight: Option<ProductShippingWeight>,

    /// Warnings returned by the API.
    /// Read-only field.
    #[serde(default, skip_serializing)]
    pub warnings: Vec<BatchError>,
}

/// One entry of a `products/batch` request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductBatchEntry {
    /// Correlates the entry with its response.
    pub batch_id: u32,

    /// The account the entry applies to.
    #[serde(with = "int64::option")]
    pub merchant_id: Option<u64>,

    /// The operation.
    pub method: BatchMethod,

    /// The product to insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,

    /// The REST ID for `get` and `delete`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl ProductBatchEntry {
    /// An insert entry.
    #[must_use]
    pub fn insert(batch_id: u32, merchant_id: u64, product: Product) -> Self {
        Self {
            batch_id,
            merchant_id: Some(merchant_id),
            method: BatchMethod::Insert,
            product: Some(product),
            product_id: None,
        }
    }

    /// A delete entry.
    #[must_use]
    pub fn delete(batch_id: u32, merchant_id: u64, product_id: impl Into<String>) -> Self {
        Self {
            batch_id,
            merchant_id: Some(merchant_id),
            method: BatchMethod::Delete,
            product: None,
            product_id: Some(product_id.into()),
        }
    }
}

/// One entry of a `products/batch` response.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductBatchResult {
    /// The request entry's batch ID.
    #[serde(default)]
    pub batch_id: u32,

    /// Errors, when the entry failed.
    #[serde(default)]
    pub errors: Option<BatchErrors>,

    /// The product, for successful inserts and gets.
    #[serde(default)]
    pub product: Option<Product>,
}

/// The `products` service.
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a ContentClient,
}

impl<'a> Products<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Inserts a product, replacing any product with the same REST ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn insert(&self, merchant_id: u64, product: &Product) -> Result<Product, HttpError> {
        let path = build_path(INSERT_PATH, &[("merchantId", merchant_id)]);
        self.client.post(&path, Some(product)).await
    }

    /// Retrieves a product by REST ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails; 404 if the product is unknown.
    pub async fn get(&self, merchant_id: u64, product_id: &str) -> Result<Product, HttpError> {
        self.client.get(&resource_path(merchant_id, product_id)).await
    }

    /// Deletes a product by REST ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn delete(&self, merchant_id: u64, product_id: &str) -> Result<(), HttpError> {
        self.client.delete(&resource_path(merchant_id, product_id)).await
    }

    /// Updates the fields named in `update_mask` (comma-separated attribute
    /// names) from `product`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        merchant_id: u64,
        product_id: &str,
        update_mask: &str,
        product: &B,
    ) -> Result<Product, HttpError> {
        self.client
            .patch(&resource_path(merchant_id, product_id), update_mask, product)
            .await
    }

    /// Fetches one page of products.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<Product>, HttpError> {
        let path = build_path(INSERT_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of products.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[Product])>(
        &self,
        merchant_id: u64,
        max_results: Option<u32>,
        on_page: F,
    ) -> Result<usize, HttpError> {
        let path = build_path(INSERT_PATH, &[("merchantId", merchant_id)]);
        let params = ListParams {
            max_results,
            ..ListParams::default()
        };
        self.client.paginate(&path, params, on_page).await
    }

    /// Sends several product operations in one call.
    ///
    /// The call succeeds as a whole even when entries fail; check each
    /// result's `errors`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the batch call itself fails.
    pub async fn custombatch(
        &self,
        entries: &[ProductBatchEntry],
    ) -> Result<Vec<ProductBatchResult>, HttpError> {
        let response: BatchResponse<ProductBatchResult> = self
            .client
            .post(BATCH_PATH, Some(&BatchRequest { entries }))
            .await?;
        Ok(response.entries)
    }
}

fn resource_path(merchant_id: u64, product_id: &str) -> String {
    build_path(
        RESOURCE_PATH,
        &[
            ("merchantId", merchant_id.to_string()),
            ("productId", product_id.to_string()),
        ],
    )
}
