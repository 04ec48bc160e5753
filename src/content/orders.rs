//! Order resource.
//!
//! Test orders exist only on the sandbox endpoint, so the orders workflow
//! uses a [`ContentClient`] built with [`crate::endpoint::Endpoint::sandbox`].
//!
//! Every mutating call carries an operation ID. Repeating a call with the
//! same operation ID is a no-op on the server; the workflow draws a fresh
//! one from an [`crate::ids::OperationIds`] counter for each call. The
//! server answers mutations with an execution status, `executed` or
//! `duplicate`.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::content::common::Price;
use crate::content::{build_path, int64, ContentClient, ListParams, ListResponse};

const COLLECTION_PATH: &str = "{merchantId}/orders";
const RESOURCE_PATH: &str = "{merchantId}/orders/{orderId}";
const ACTION_PATH: &str = "{merchantId}/orders/{orderId}/{action}";
const BY_MERCHANT_ORDER_ID_PATH: &str = "{merchantId}/ordersbymerchantid/{merchantOrderId}";
const TEST_ORDERS_PATH: &str = "{merchantId}/testorders";
const ADVANCE_PATH: &str = "{merchantId}/testorders/{orderId}/advance";

/// Marketing preferences of a customer.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarketingRightsInfo {
    /// Address for marketing email, if the customer opted in.
    #[serde(default)]
    pub marketing_email_address: Option<String>,
}

/// The buyer of an order.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,

    /// Marketing preferences.
    #[serde(default)]
    pub marketing_rights_info: Option<MarketingRightsInfo>,
}

/// The product a line item is for.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItemProduct {
    /// The product's REST ID.
    #[serde(default)]
    pub id: Option<String>,

    /// The merchant's offer ID.
    #[serde(default)]
    pub offer_id: Option<String>,

    /// Product title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Carrier and transit time of a line item.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    /// Carrier name, such as `USPS`.
    #[serde(default)]
    pub carrier: Option<String>,

    /// Service name.
    #[serde(default)]
    pub method_name: Option<String>,

    /// Fastest transit time in days.
    #[serde(default)]
    pub min_days_in_transit: Option<u32>,

    /// Slowest transit time in days.
    #[serde(default)]
    pub max_days_in_transit: Option<u32>,
}

/// Shipping commitments of a line item.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItemShippingDetails {
    /// Latest ship date.
    #[serde(default)]
    pub ship_by_date: Option<String>,

    /// Latest delivery date.
    #[serde(default)]
    pub deliver_by_date: Option<String>,

    /// Shipping method.
    #[serde(default)]
    pub method: Option<ShippingMethod>,
}

/// Return policy of a line item.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItemReturnInfo {
    /// Whether the item can be returned.
    #[serde(default)]
    pub is_returnable: Option<bool>,

    /// Return window in days.
    #[serde(default)]
    pub days_to_return: Option<u32>,

    /// Return policy URL.
    #[serde(default)]
    pub policy_url: Option<String>,
}

/// A return of some quantity of a line item.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReturn {
    /// Who initiated the return.
    #[serde(default)]
    pub actor: Option<String>,

    /// When the return was created.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Returned quantity.
    #[serde(default)]
    pub quantity: u32,

    /// Reason code.
    #[serde(default)]
    pub reason: Option<String>,

    /// Free-form reason.
    #[serde(default)]
    pub reason_text: Option<String>,
}

/// One product line of an order, with its fulfillment counters.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    /// Line item ID.
    #[serde(default)]
    pub id: Option<String>,

    /// The ordered product.
    #[serde(default)]
    pub product: Option<OrderLineItemProduct>,

    /// Total price of the line.
    #[serde(default)]
    pub price: Option<Price>,

    /// Total tax of the line.
    #[serde(default)]
    pub tax: Option<Price>,

    /// Units ordered.
    #[serde(default)]
    pub quantity_ordered: u32,

    /// Units not yet shipped or canceled.
    #[serde(default)]
    pub quantity_pending: u32,

    /// Units shipped.
    #[serde(default)]
    pub quantity_shipped: u32,

    /// Units delivered.
    #[serde(default)]
    pub quantity_delivered: u32,

    /// Units returned.
    #[serde(default)]
    pub quantity_returned: u32,

    /// Units canceled.
    #[serde(default)]
    pub quantity_canceled: u32,

    /// Shipping commitments.
    #[serde(default)]
    pub shipping_details: Option<OrderLineItemShippingDetails>,

    /// Return policy.
    #[serde(default)]
    pub return_info: Option<OrderLineItemReturnInfo>,

    /// Returns recorded so far.
    #[serde(default)]
    pub returns: Vec<OrderReturn>,
}

/// Quantity of one line item inside a shipment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentLineItem {
    /// Line item ID.
    pub line_item_id: String,

    /// Units in the shipment.
    pub quantity: u32,
}

/// A shipment of an order.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderShipment {
    /// Shipment ID.
    #[serde(default)]
    pub id: Option<String>,

    /// When the shipment was created.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Carrier.
    #[serde(default)]
    pub carrier: Option<String>,

    /// Carrier tracking ID.
    #[serde(default)]
    pub tracking_id: Option<String>,

    /// Shipped line items.
    #[serde(default)]
    pub line_items: Vec<ShipmentLineItem>,

    /// Delivery date, once delivered.
    #[serde(default)]
    pub delivery_date: Option<String>,
}

/// An order.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Google's order ID.
    #[serde(default)]
    pub id: Option<String>,

    /// The merchant the order was placed with.
    #[serde(default, with = "int64::option")]
    pub merchant_id: Option<u64>,

    /// The merchant's own order ID.
    #[serde(default)]
    pub merchant_order_id: Option<String>,

    /// Order status, such as `pendingShipment`.
    #[serde(default)]
    pub status: Option<String>,

    /// The buyer.
    #[serde(default)]
    pub customer: Option<OrderCustomer>,

    /// When the order was placed.
    #[serde(default)]
    pub placed_date: Option<String>,

    /// Net amount of the order.
    #[serde(default)]
    pub net_price_amount: Option<Price>,

    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<String>,

    /// Whether the order was acknowledged.
    #[serde(default)]
    pub acknowledged: Option<bool>,

    /// Line items.
    #[serde(default)]
    pub line_items: Vec<OrderLineItem>,

    /// Shipping cost.
    #[serde(default)]
    pub shipping_cost: Option<Price>,

    /// Tax on the shipping cost.
    #[serde(default)]
    pub shipping_cost_tax: Option<Price>,

    /// Shipments.
    #[serde(default)]
    pub shipments: Vec<OrderShipment>,
}

/// Cancels or returns some quantity of a line item.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItemChange {
    /// Line item ID.
    pub line_item_id: String,

    /// Units affected.
    pub quantity: u32,

    /// Reason code, such as `noInventory` or `productArrivedDamaged`.
    pub reason: String,

    /// Free-form reason.
    pub reason_text: String,
}

/// Carrier and IDs of a new shipment.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentInfo {
    /// Carrier.
    pub carrier: String,

    /// Merchant-chosen shipment ID.
    pub shipment_id: String,

    /// Carrier tracking ID.
    pub tracking_id: String,
}

/// Ships line items.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShipLineItemsRequest {
    /// Items and quantities shipped.
    pub line_items: Vec<ShipmentLineItem>,

    /// The shipment carrying them.
    pub shipment_infos: Vec<ShipmentInfo>,
}

/// Updates the status of an existing shipment.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentRequest {
    /// Carrier.
    pub carrier: String,

    /// Shipment ID.
    pub shipment_id: String,

    /// Carrier tracking ID.
    pub tracking_id: String,

    /// New status, such as `delivered`.
    pub status: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WithOperationId<'a, B: Serialize> {
    operation_id: &'a str,
    #[serde(flatten)]
    body: &'a B,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MerchantOrderIdBody<'a> {
    merchant_order_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTestOrderBody<'a> {
    template_name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTestOrderResponse {
    #[serde(default)]
    order_id: Option<String>,
}

#[derive(Deserialize)]
struct GetByMerchantOrderIdResponse {
    #[serde(default)]
    order: Option<Order>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionResponse {
    #[serde(default)]
    execution_status: String,
}

/// The `orders` service.
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    client: &'a ContentClient,
}

impl<'a> Orders<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Creates a test order from a template (`template1`, `template2`, ...)
    /// and returns its order ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails or no order ID comes back.
    pub async fn create_test_order(
        &self,
        merchant_id: u64,
        template_name: &str,
    ) -> Result<String, HttpError> {
        let path = build_path(TEST_ORDERS_PATH, &[("merchantId", merchant_id)]);
        let response: CreateTestOrderResponse = self
            .client
            .post(&path, Some(&CreateTestOrderBody { template_name }))
            .await?;
        response.order_id.ok_or_else(|| HttpError::Decode {
            path,
            message: "response has no orderId".to_string(),
        })
    }

    /// Moves a test order to the shippable state.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn advance_test_order(&self, merchant_id: u64, order_id: &str) -> Result<(), HttpError> {
        let path = build_path(
            ADVANCE_PATH,
            &[
                ("merchantId", merchant_id.to_string()),
                ("orderId", order_id.to_string()),
            ],
        );
        let _: serde_json::Value = self.client.post::<(), _>(&path, None).await?;
        Ok(())
    }

    /// Retrieves an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get(&self, merchant_id: u64, order_id: &str) -> Result<Order, HttpError> {
        let path = build_path(
            RESOURCE_PATH,
            &[
                ("merchantId", merchant_id.to_string()),
                ("orderId", order_id.to_string()),
            ],
        );
        self.client.get(&path).await
    }

    /// Retrieves an order by the merchant's own order ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails or the response holds no order.
    pub async fn get_by_merchant_order_id(
        &self,
        merchant_id: u64,
        merchant_order_id: &str,
    ) -> Result<Order, HttpError> {
        let path = build_path(
            BY_MERCHANT_ORDER_ID_PATH,
            &[
                ("merchantId", merchant_id.to_string()),
                ("merchantOrderId", merchant_order_id.to_string()),
            ],
        );
        let response: GetByMerchantOrderIdResponse = self.client.get(&path).await?;
        response.order.ok_or_else(|| HttpError::Decode {
            path,
            message: "response has no order".to_string(),
        })
    }

    /// Fetches one page of orders. Use
    /// `ListParams::default().filter("acknowledged", "false")` for new orders.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<Order>, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of orders matching `params`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[Order])>(
        &self,
        merchant_id: u64,
        params: ListParams,
        on_page: F,
    ) -> Result<usize, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.paginate(&path, params, on_page).await
    }

    /// Marks an order as acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn acknowledge(
        &self,
        merchant_id: u64,
        order_id: &str,
        operation_id: &str,
    ) -> Result<String, HttpError> {
        let empty = serde_json::Map::new();
        self.execute(merchant_id, order_id, "acknowledge", operation_id, &empty)
            .await
    }

    /// Sets the merchant's own order ID.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn update_merchant_order_id(
        &self,
        merchant_id: u64,
        order_id: &str,
        operation_id: &str,
        merchant_order_id: &str,
    ) -> Result<String, HttpError> {
        self.execute(
            merchant_id,
            order_id,
            "updateMerchantOrderId",
            operation_id,
            &MerchantOrderIdBody { merchant_order_id },
        )
        .await
    }

    /// Cancels some quantity of a line item.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn cancel_line_item(
        &self,
        merchant_id: u64,
        order_id: &str,
        operation_id: &str,
        change: &LineItemChange,
    ) -> Result<String, HttpError> {
        self.execute(merchant_id, order_id, "cancelLineItem", operation_id, change)
            .await
    }

    /// Reports shipped line items.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn ship_line_items(
        &self,
        merchant_id: u64,
        order_id: &str,
        operation_id: &str,
        request: &ShipLineItemsRequest,
    ) -> Result<String, HttpError> {
        self.execute(merchant_id, order_id, "shipLineItems", operation_id, request)
            .await
    }

    /// Updates a shipment's status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn update_shipment(
        &self,
        merchant_id: u64,
        order_id: &str,
        operation_id: &str,
        request: &UpdateShipmentRequest,
    ) -> Result<String, HttpError> {
        self.execute(merchant_id, order_id, "updateShipment", operation_id, request)
            .await
    }

    /// Returns and refunds some quantity of a delivered line item.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn return_refund_line_item(
        &self,
        merchant_id: u64,
        order_id: &str,
        operation_id: &str,
        change: &LineItemChange,
    ) -> Result<String, HttpError> {
        self.execute(
            merchant_id,
            order_id,
            "returnRefundLineItem",
            operation_id,
            change,
        )
        .await
    }

    async fn execute<B: Serialize>(
        &self,
        merchant_id: u64,
        order_id: &str,
        action: &str,
        operation_id: &str,
        body: &B,
    ) -> Result<String, HttpError> {
        let path = build_path(
            ACTION_PATH,
            &[
                ("merchantId", merchant_id.to_string()),
                ("orderId", order_id.to_string()),
                ("action", action.to_string()),
            ],
        );
        let response: ExecutionResponse = self
            .client
            .post(&path, Some(&WithOperationId { operation_id, body }))
            .await?;
        Ok(response.execution_status)
    }
}
