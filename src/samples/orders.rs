//! The order lifecycle demo.
//!
//! Runs against the sandbox endpoint: creates a test order, acknowledges it,
//! cancels part of a line item, ships and delivers the rest, then returns one
//! unit. The order is printed after every step.

use crate::content::{
    LineItemChange, ListParams, Order, OrderLineItem, Orders, ShipLineItemsRequest, ShipmentInfo,
    ShipmentLineItem, UpdateShipmentRequest,
};
use crate::error::SamplesError;
use crate::ids::OperationIds;
use crate::retry::{retry, RetryPolicy};
use crate::samples::output::OrderSummary;
use crate::session::ContentSession;

const TEST_ORDER_TEMPLATE: &str = "template1";

struct Shipment {
    id: String,
    carrier: String,
    tracking_id: String,
}

struct OrderWorkflow<'a> {
    orders: Orders<'a>,
    merchant_id: u64,
    order_id: String,
    operation_ids: OperationIds,
}

impl OrderWorkflow<'_> {
    async fn refresh(&self) -> Result<Order, SamplesError> {
        print!("Retrieving order {}... ", self.order_id);
        let order = self.orders.get(self.merchant_id, &self.order_id).await?;
        println!("done.");
        println!();
        print!("{}", OrderSummary(&order));
        println!();
        Ok(order)
    }

    fn next_operation_id(&self) -> String {
        self.operation_ids.next_id()
    }

    async fn ship(&self, item: &OrderLineItem) -> Result<Shipment, SamplesError> {
        let line_item_id = line_item_id(item)?;
        let shipment = Shipment {
            id: rand::random::<u64>().to_string(),
            carrier: item
                .shipping_details
                .as_ref()
                .and_then(|details| details.method.as_ref())
                .and_then(|method| method.carrier.clone())
                .unwrap_or_default(),
            tracking_id: rand::random::<u64>().to_string(),
        };
        let request = ShipLineItemsRequest {
            line_items: vec![ShipmentLineItem {
                line_item_id: line_item_id.clone(),
                quantity: item.quantity_pending,
            }],
            shipment_infos: vec![ShipmentInfo {
                carrier: shipment.carrier.clone(),
                shipment_id: shipment.id.clone(),
                tracking_id: shipment.tracking_id.clone(),
            }],
        };

        print!("Shipping {} of item {line_item_id}... ", item.quantity_pending);
        let status = self
            .orders
            .ship_line_items(
                self.merchant_id,
                &self.order_id,
                &self.next_operation_id(),
                &request,
            )
            .await?;
        println!("done with status \"{status}\".");
        Ok(shipment)
    }

    async fn deliver(&self, shipment: &Shipment) -> Result<(), SamplesError> {
        let request = UpdateShipmentRequest {
            carrier: shipment.carrier.clone(),
            shipment_id: shipment.id.clone(),
            tracking_id: shipment.tracking_id.clone(),
            status: "delivered".to_string(),
        };
        print!("Setting shipment {} to delivered... ", shipment.id);
        let status = self
            .orders
            .update_shipment(
                self.merchant_id,
                &self.order_id,
                &self.next_operation_id(),
                &request,
            )
            .await?;
        println!("done with status \"{status}\".");
        Ok(())
    }
}

fn line_item_id(item: &OrderLineItem) -> Result<String, SamplesError> {
    item.id
        .clone()
        .ok_or_else(|| SamplesError::UnexpectedResponse("order line item has no ID".to_string()))
}

fn first_two_items(order: &Order) -> Result<(&OrderLineItem, &OrderLineItem), SamplesError> {
    match order.line_items.as_slice() {
        [first, second, ..] => Ok((first, second)),
        items => Err(SamplesError::UnexpectedResponse(format!(
            "test order has {} line items, expected at least 2",
            items.len()
        ))),
    }
}

/// Walks a sandbox test order through acknowledgement, cancellation,
/// shipment, delivery and return.
pub(super) async fn orders(session: &ContentSession) -> Result<(), SamplesError> {
    session.context().require_non_mca()?;
    let merchant_id = session.merchant_id();
    let orders = session.sandbox().orders();

    print!("Creating new test order... ");
    let order_id = orders
        .create_test_order(merchant_id, TEST_ORDER_TEMPLATE)
        .await?;
    println!("done.");
    println!("Order \"{order_id}\" created.");
    println!();

    let workflow = OrderWorkflow {
        orders,
        merchant_id,
        order_id,
        operation_ids: OperationIds::new(),
    };
    let order_id = workflow.order_id.as_str();

    workflow.refresh().await?;

    println!("Listing unacknowledged orders:");
    let count = orders
        .list_all(
            merchant_id,
            ListParams::default().filter("acknowledged", "false"),
            |page| {
                for order in page {
                    print!("{}", OrderSummary(order));
                }
            },
        )
        .await?;
    println!("Found {count} unacknowledged orders.");
    println!();

    print!("Acknowledging order {order_id}... ");
    let status = orders
        .acknowledge(merchant_id, order_id, &workflow.next_operation_id())
        .await?;
    println!("done with status \"{status}\".");
    println!();
    workflow.refresh().await?;

    let merchant_order_id = format!("test order {}", rand::random::<u64>());
    print!("Updating merchant order ID to \"{merchant_order_id}\"... ");
    let status = orders
        .update_merchant_order_id(
            merchant_id,
            order_id,
            &workflow.next_operation_id(),
            &merchant_order_id,
        )
        .await?;
    println!("done with status \"{status}\".");
    println!();

    print!("Retrieving order by merchant order ID \"{merchant_order_id}\"... ");
    let order = retry(&RetryPolicy::default(), || {
        orders.get_by_merchant_order_id(merchant_id, &merchant_order_id)
    })
    .await?;
    println!("done.");
    println!();
    print!("{}", OrderSummary(&order));
    println!();

    let (first, _) = first_two_items(&order)?;
    let cancel = LineItemChange {
        line_item_id: line_item_id(first)?,
        quantity: 1,
        reason: "noInventory".to_string(),
        reason_text: "Ran out of inventory while fulfilling request.".to_string(),
    };
    print!("Canceling 1 unit of item {}... ", cancel.line_item_id);
    let status = orders
        .cancel_line_item(merchant_id, order_id, &workflow.next_operation_id(), &cancel)
        .await?;
    println!("done with status \"{status}\".");
    println!();
    workflow.refresh().await?;

    print!("Advancing test order {order_id}... ");
    orders.advance_test_order(merchant_id, order_id).await?;
    println!("done.");
    println!();
    let order = workflow.refresh().await?;

    let (first, _) = first_two_items(&order)?;
    let first_shipment = workflow.ship(first).await?;
    println!();
    let order = workflow.refresh().await?;

    let (_, second) = first_two_items(&order)?;
    let second_shipment = workflow.ship(second).await?;
    println!();
    workflow.refresh().await?;

    workflow.deliver(&first_shipment).await?;
    println!();
    workflow.refresh().await?;

    workflow.deliver(&second_shipment).await?;
    println!();
    let order = workflow.refresh().await?;

    let (first, _) = first_two_items(&order)?;
    let refund = LineItemChange {
        line_item_id: line_item_id(first)?,
        quantity: 1,
        reason: "productArrivedDamaged".to_string(),
        reason_text: "Item malfunctioning upon receipt.".to_string(),
    };
    print!("Returning 1 unit of item {}... ", refund.line_item_id);
    let status = orders
        .return_refund_line_item(merchant_id, order_id, &workflow.next_operation_id(), &refund)
        .await?;
    println!("done with status \"{status}\".");
    println!();
    workflow.refresh().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> OrderLineItem {
        OrderLineItem {
            id: Some(id.to_string()),
            ..OrderLineItem::default()
        }
    }

    #[test]
    fn test_first_two_items_requires_two() {
        let mut order = Order {
            line_items: vec![item("a")],
            ..Order::default()
        };
        assert!(matches!(
            first_two_items(&order),
            Err(SamplesError::UnexpectedResponse(_))
        ));

        order.line_items.push(item("b"));
        order.line_items.push(item("c"));
        let (first, second) = first_two_items(&order).unwrap();
        assert_eq!(first.id.as_deref(), Some("a"));
        assert_eq!(second.id.as_deref(), Some("b"));
    }

    #[test]
    fn test_line_item_id_missing() {
        assert!(line_item_id(&OrderLineItem::default()).is_err());
        assert_eq!(line_item_id(&item("x")).unwrap(), "x");
    }
}
