//! Price and availability updates.
//!
//! v2.1 has no separate inventory resource: the same change is a partial
//! product update restricted to `price,availability`.

use serde::Serialize;

use crate::clients::HttpError;
use crate::content::common::Price;
use crate::content::{ContentClient, Product};

const UPDATE_MASK: &str = "price,availability";

/// New price and availability for a product.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventorySetRequest {
    /// The new price.
    pub price: Price,

    /// The new availability, such as `out of stock`.
    pub availability: String,
}

/// Inventory updates.
#[derive(Debug, Clone, Copy)]
pub struct Inventory<'a> {
    client: &'a ContentClient,
}

impl<'a> Inventory<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Sets the price and availability of a product and returns the updated
    /// product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn set(
        &self,
        merchant_id: u64,
        product_id: &str,
        request: &InventorySetRequest,
    ) -> Result<Product, HttpError> {
        self.client
            .products()
            .update(merchant_id, product_id, UPDATE_MASK, request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_set_patches_price_and_availability() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/content/v2.1/12345/products/online%3Aen%3AUS%3Abook1"))
            .and(query_param("updateMask", "price,availability"))
            .and(body_json(json!({
                "price": {"value": "5.00", "currency": "USD"},
                "availability": "out of stock"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "online:en:US:book1",
                "availability": "out of stock",
                "price": {"value": "5.00", "currency": "USD"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = InventorySetRequest {
            price: Price::new("5.00", "USD"),
            availability: "out of stock".to_string(),
        };
        let product = client
            .inventory()
            .set(12345, "online:en:US:book1", &request)
            .await
            .unwrap();
        assert_eq!(product.availability.as_deref(), Some("out of stock"));
    }
}
