//! Console formatting for API resources.
//!
//! Each wrapper implements [`Display`] and renders the resource the way the
//! demos print it, so `print!("{}", AccountSummary(&account))` is all a
//! demo needs. Absent optional fields render as empty strings.

use std::fmt::{self, Display, Formatter};

use crate::clients::HttpError;
use crate::content::{
    Account, AccountStatus, AccountTax, BatchError, CarriersCarrier, Datafeed, Headers, Order,
    OrderLineItem, OrderReturn, OrderShipment, Product, ProductStatus, RateGroup,
    ShippingSettings, Table, Value,
};
use crate::error::SamplesError;

fn text(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

fn id(value: Option<u64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

/// `Errors received:` or `Warnings received:` followed by one line per
/// message. Renders nothing for an empty list.
pub struct ContentErrors<'a> {
    /// The errors or warnings.
    pub errors: &'a [BatchError],
    /// Whether these are errors rather than warnings.
    pub is_error: bool,
}

impl Display for ContentErrors<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return Ok(());
        }
        let heading = if self.is_error { "Errors" } else { "Warnings" };
        writeln!(f, "{heading} received:")?;
        for error in self.errors {
            writeln!(f, " - {}", error.message)?;
        }
        writeln!(f)
    }
}

/// One product in a listing.
pub struct ProductLine<'a>(pub &'a Product);

impl Display for ProductLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            " - Offer {}: {}",
            text(self.0.offer_id.as_ref()),
            text(self.0.title.as_ref())
        )
    }
}

/// A product's destinations and item-level issues.
pub struct ProductStatusSummary<'a>(pub &'a ProductStatus);

impl Display for ProductStatusSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let status = self.0;
        writeln!(
            f,
            "- \"{}\" ({})",
            text(status.title.as_ref()),
            text(status.product_id.as_ref())
        )?;
        if let Some(destinations) = &status.destination_statuses {
            writeln!(f, "  Destination information:")?;
            for destination in destinations {
                writeln!(
                    f,
                    "  - Destination {} is {}",
                    text(destination.destination.as_ref()),
                    text(destination.status.as_ref())
                )?;
            }
        }
        if let Some(issues) = &status.item_level_issues {
            writeln!(f, "  There are {} issue(s):", issues.len())?;
            for issue in issues {
                writeln!(f, "  - Code: {}", text(issue.code.as_ref()))?;
                writeln!(f, "    Description: {}", text(issue.description.as_ref()))?;
                writeln!(f, "    Detailed description: {}", text(issue.detail.as_ref()))?;
                writeln!(f, "    Documentation URL: {}", text(issue.documentation.as_ref()))?;
                writeln!(f, "    Resolution: {}", text(issue.resolution.as_ref()))?;
                writeln!(f, "    Servability effect: {}", text(issue.servability.as_ref()))?;
            }
        }
        Ok(())
    }
}

/// One datafeed in a listing.
pub struct DatafeedLine<'a>(pub &'a Datafeed);

impl Display for DatafeedLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, " - Id {}, Name {}", id(self.0.id), text(self.0.name.as_ref()))
    }
}

/// An account's name, users and Ads links.
pub struct AccountSummary<'a>(pub &'a Account);

impl Display for AccountSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let account = self.0;
        writeln!(f, "Information for account {}:", id(account.id))?;
        writeln!(f, "- Display name: {}", text(account.name.as_ref()))?;
        if account.users.is_empty() {
            writeln!(f, "- No registered users.")?;
        } else {
            writeln!(f, "- Registered users:")?;
            for user in &account.users {
                let admin = if user.admin == Some(true) { "(ADMIN) " } else { "" };
                writeln!(f, "  - {admin}{}", text(user.email_address.as_ref()))?;
            }
        }
        if account.ads_links.is_empty() {
            writeln!(f, "- No linked Google Ads accounts.")
        } else {
            writeln!(f, "- Linked Google Ads accounts:")?;
            for link in &account.ads_links {
                writeln!(f, "  - {}: {}", id(link.ads_id), text(link.status.as_ref()))?;
            }
            Ok(())
        }
    }
}

/// An account's account-level issues.
pub struct AccountStatusSummary<'a>(pub &'a AccountStatus);

impl Display for AccountStatusSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let status = self.0;
        writeln!(f, "- Account ID {}", text(status.account_id.as_ref()))?;
        if let Some(issues) = &status.account_level_issues {
            writeln!(f, "  There are {} account level issue(s)", issues.len())?;
            for issue in issues {
                writeln!(
                    f,
                    "  - Issue ({}) [{}] {}",
                    text(issue.severity.as_ref()),
                    text(issue.id.as_ref()),
                    text(issue.title.as_ref())
                )?;
                let details = [
                    ("country", &issue.country),
                    ("destination", &issue.destination),
                    ("details", &issue.detail),
                    ("documentation", &issue.documentation),
                ];
                for (label, value) in details {
                    if let Some(value) = value {
                        writeln!(f, "    {label}: {value}")?;
                    }
                }
            }
        }
        writeln!(f)
    }
}

/// An account's tax rules.
pub struct AccountTaxSummary<'a>(pub &'a AccountTax);

impl Display for AccountTaxSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tax = self.0;
        writeln!(f, "Tax information for account {}:", id(tax.account_id))?;
        if tax.rules.is_empty() {
            return writeln!(f, "- No tax information, so no tax is charged.");
        }
        for rule in &tax.rules {
            let location = id(rule.location_id);
            if let Some(rate) = rule.rate_percent.as_deref().filter(|r| !r.is_empty()) {
                writeln!(
                    f,
                    "- For location {location} in country {}, rate is {rate}%.",
                    rule.country
                )?;
            }
            if rule.use_global_rate == Some(true) {
                writeln!(
                    f,
                    "- For location {location} in country {}, using global tax table rate.",
                    rule.country
                )?;
            }
            if rule.shipping_taxed == Some(true) {
                writeln!(f, " Note: Shipping charges are also taxed.")?;
            }
        }
        Ok(())
    }
}

/// An account's postal code groups and services, rate tables included.
pub struct ShippingSettingsSummary<'a>(pub &'a ShippingSettings);

impl Display for ShippingSettingsSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let settings = self.0;
        writeln!(f, "Shipping settings for account {}:", id(settings.account_id))?;
        writeln!(f, "- Postal code groups:")?;
        for group in &settings.postal_code_groups {
            writeln!(f, "  Postal group \"{}\":", group.name)?;
            writeln!(f, "  - Country: {}", group.country)?;
            for range in &group.postal_code_ranges {
                match range.postal_code_range_end.as_deref().filter(|e| !e.is_empty()) {
                    Some(end) => writeln!(
                        f,
                        "  - Postal code(s): {}-{end}",
                        range.postal_code_range_begin
                    )?,
                    None => writeln!(f, "  - Postal code(s): {}", range.postal_code_range_begin)?,
                }
            }
        }
        writeln!(f, "- Services:")?;
        for service in &settings.services {
            writeln!(f, "  Service \"{}\":", service.name)?;
            writeln!(f, "  - Active: {}", service.active)?;
            writeln!(f, "  - Currency: {}", service.currency)?;
            writeln!(f, "  - Country: {}", service.delivery_country)?;
            if let Some(time) = &service.delivery_time {
                writeln!(
                    f,
                    "  - Delivery time: {}-{} days",
                    time.min_transit_time_in_days, time.max_transit_time_in_days
                )?;
            }
            writeln!(f, "  - Rate groups:")?;
            for (n, group) in service.rate_groups.iter().enumerate() {
                writeln!(f, "    Rate group {n}")?;
                write_rate_group(f, group, "    ")?;
            }
        }
        Ok(())
    }
}

fn write_rate_group(f: &mut Formatter<'_>, group: &RateGroup, indent: &str) -> fmt::Result {
    writeln!(
        f,
        "{indent}- {} applicable shipping labels:",
        group.applicable_shipping_labels.len()
    )?;
    for label in &group.applicable_shipping_labels {
        writeln!(f, "{indent}  - \"{label}\"")?;
    }
    writeln!(f, "{indent}- {} carrier rate(s) listed:", group.carrier_rates.len())?;
    for rate in &group.carrier_rates {
        writeln!(f, "{indent}  Carrier rate \"{}\"", rate.name)?;
        writeln!(f, "{indent}  - Carrier name: {}", rate.carrier_name)?;
        writeln!(f, "{indent}  - Carrier service: {}", rate.carrier_service)?;
        writeln!(f, "{indent}  - Origin postal code: {}", rate.origin_postal_code)?;
        if let Some(price) = &rate.flat_adjustment {
            writeln!(f, "{indent}  - Flat adjustment of {price}")?;
        }
        if let Some(percentage) = rate.percentage_adjustment.as_deref().filter(|p| !p.is_empty()) {
            writeln!(f, "{indent}  - Percentage adjustment of {percentage}%")?;
        }
    }
    if let Some(value) = &group.single_value {
        write!(f, "{indent}- Single rate value: ")?;
        write_value(f, value)
    } else if let Some(table) = &group.main_table {
        let nested = format!("{indent}  ");
        writeln!(f, "{indent}- Main table:")?;
        write_table(f, table, &nested)?;
        writeln!(f, "{indent}- {} defined subtable(s):", group.subtables.len())?;
        for subtable in &group.subtables {
            writeln!(f, "{indent}  Table \"{}\"", text(subtable.name.as_ref()))?;
            write_table(f, subtable, &nested)?;
        }
        Ok(())
    } else {
        Ok(())
    }
}

fn write_table(f: &mut Formatter<'_>, table: &Table, indent: &str) -> fmt::Result {
    let nested = format!("{indent}  ");
    writeln!(f, "{indent}- Row header(s):")?;
    write_headers(f, &table.row_headers, &nested)?;
    if let Some(columns) = &table.column_headers {
        writeln!(f, "{indent}- Column header(s):")?;
        write_headers(f, columns, &nested)?;
    }
    writeln!(f, "{indent}- Rows:")?;
    for (n, row) in table.rows.iter().enumerate() {
        writeln!(f, "{indent}  Row {n}:")?;
        for cell in &row.cells {
            write!(f, "{indent}  - ")?;
            write_value(f, cell)?;
        }
    }
    Ok(())
}

fn write_headers(f: &mut Formatter<'_>, headers: &Headers, indent: &str) -> fmt::Result {
    if let Some(locations) = &headers.locations {
        for (n, set) in locations.iter().enumerate() {
            writeln!(f, "{indent}- Location set {n}:")?;
            for location in &set.location_ids {
                writeln!(f, "{indent}  - \"{location}\"")?;
            }
        }
    } else if let Some(counts) = &headers.number_of_items {
        for count in counts {
            writeln!(f, "{indent}- Number of items: \"{count}\"")?;
        }
    } else if let Some(names) = &headers.postal_code_group_names {
        for name in names {
            writeln!(f, "{indent}- Postal code group \"{name}\"")?;
        }
    } else if let Some(prices) = &headers.prices {
        for price in prices {
            writeln!(f, "{indent}- Price <= {price}")?;
        }
    } else if let Some(weights) = &headers.weights {
        for weight in weights {
            writeln!(f, "{indent}- Weight <= {} {}", weight.value, weight.unit)?;
        }
    }
    Ok(())
}

fn write_value(f: &mut Formatter<'_>, value: &Value) -> fmt::Result {
    if let Some(price) = &value.flat_rate {
        writeln!(f, "{price}")
    } else if let Some(percentage) = value.price_percentage.as_deref().filter(|p| !p.is_empty()) {
        writeln!(f, "{percentage}%")
    } else if value.no_shipping == Some(true) {
        writeln!(f, "cannot ship")
    } else if let Some(name) = &value.subtable_name {
        writeln!(f, "see subtable \"{name}\"")
    } else if let Some(name) = &value.carrier_rate_name {
        writeln!(f, "see carrier rate \"{name}\"")
    } else {
        writeln!(f)
    }
}

/// The carriers usable in carrier rates.
pub struct CarriersSummary<'a>(pub &'a [CarriersCarrier]);

impl Display for CarriersSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Supported carriers:")?;
        for carrier in self.0 {
            writeln!(f, "Carrier \"{}\":", carrier.name)?;
            writeln!(f, "- Country: {}", carrier.country)?;
            writeln!(f, "- Has {} supported services:", carrier.services.len())?;
            for service in &carrier.services {
                writeln!(f, "  Service: \"{service}\"")?;
            }
        }
        Ok(())
    }
}

/// An order with its line items and shipments.
pub struct OrderSummary<'a>(pub &'a Order);

impl Display for OrderSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let order = self.0;
        writeln!(f, "Order \"{}\":", text(order.id.as_ref()))?;
        writeln!(f, "- Status: {}", text(order.status.as_ref()))?;
        writeln!(f, "- Merchant: {}", id(order.merchant_id))?;
        writeln!(f, "- Merchant order ID: {}", text(order.merchant_order_id.as_ref()))?;
        if let Some(customer) = &order.customer {
            writeln!(f, "- Customer information:")?;
            writeln!(f, "  - Full name: {}", text(customer.full_name.as_ref()))?;
            let email = customer
                .marketing_rights_info
                .as_ref()
                .and_then(|info| info.marketing_email_address.as_ref());
            writeln!(f, "  - Email: {}", text(email))?;
        }
        writeln!(f, "- Placed on date: {}", text(order.placed_date.as_ref()))?;
        if let Some(amount) = &order.net_price_amount {
            writeln!(f, "- Net amount: {amount}")?;
        }
        writeln!(f, "- Payment status: {}", text(order.payment_status.as_ref()))?;
        let acknowledged = if order.acknowledged == Some(true) { "yes" } else { "no" };
        writeln!(f, "- Acknowledged: {acknowledged}")?;
        if !order.line_items.is_empty() {
            writeln!(f, "- {} line items:", order.line_items.len())?;
            for item in &order.line_items {
                write_line_item(f, item, "  ")?;
            }
        }
        if let Some(cost) = &order.shipping_cost {
            writeln!(f, "- Shipping cost: {cost}")?;
        }
        if let Some(tax) = &order.shipping_cost_tax {
            writeln!(f, "- Shipping cost tax: {tax}")?;
        }
        if !order.shipments.is_empty() {
            writeln!(f, "- {} shipments:", order.shipments.len())?;
            for shipment in &order.shipments {
                write_shipment(f, shipment, "  ")?;
            }
        }
        Ok(())
    }
}

fn write_line_item(f: &mut Formatter<'_>, item: &OrderLineItem, indent: &str) -> fmt::Result {
    writeln!(f, "{indent}Line item \"{}\":", text(item.id.as_ref()))?;
    if let Some(product) = &item.product {
        writeln!(
            f,
            "{indent}- Product: {} ({})",
            text(product.id.as_ref()),
            text(product.title.as_ref())
        )?;
    }
    if let Some(price) = &item.price {
        writeln!(f, "{indent}- Price: {price}")?;
    }
    if let Some(tax) = &item.tax {
        writeln!(f, "{indent}- Tax: {tax}")?;
    }
    let quantities = [
        ("Quantity ordered", item.quantity_ordered),
        ("Quantity pending", item.quantity_pending),
        ("Quantity shipped", item.quantity_shipped),
        ("Quantity delivered", item.quantity_delivered),
        ("Quantity returned", item.quantity_returned),
        ("Quantity canceled", item.quantity_canceled),
    ];
    for (label, count) in quantities {
        if count > 0 {
            writeln!(f, "{indent}- {label}: {count}")?;
        }
    }
    if let Some(details) = &item.shipping_details {
        writeln!(f, "{indent}- Ship by date: {}", text(details.ship_by_date.as_ref()))?;
        writeln!(f, "{indent}- Deliver by date: {}", text(details.deliver_by_date.as_ref()))?;
        if let Some(method) = &details.method {
            writeln!(
                f,
                "{indent}- Deliver via: {} {} ({} - {} days)",
                text(method.carrier.as_ref()),
                text(method.method_name.as_ref()),
                id(method.min_days_in_transit.map(u64::from)),
                id(method.max_days_in_transit.map(u64::from))
            )?;
        }
    }
    match &item.return_info {
        Some(info) if info.is_returnable == Some(true) => {
            writeln!(f, "{indent}- Item is returnable.")?;
            writeln!(
                f,
                "{indent}  - Days to return: {}",
                id(info.days_to_return.map(u64::from))
            )?;
            writeln!(
                f,
                "{indent}  - Return policy is at {}.",
                text(info.policy_url.as_ref())
            )?;
        }
        _ => writeln!(f, "{indent}- Item is not returnable.")?,
    }
    let nested = format!("{indent}  ");
    for ret in &item.returns {
        write_return(f, ret, &nested)?;
    }
    Ok(())
}

fn write_return(f: &mut Formatter<'_>, ret: &OrderReturn, indent: &str) -> fmt::Result {
    writeln!(f, "{indent}Return:")?;
    if let Some(actor) = &ret.actor {
        writeln!(f, "{indent}- Actor: {actor}")?;
    }
    writeln!(f, "{indent}- Creation date: {}", text(ret.creation_date.as_ref()))?;
    writeln!(f, "{indent}- Quantity: {}", ret.quantity)?;
    writeln!(f, "{indent}- Reason: {}", text(ret.reason.as_ref()))?;
    writeln!(f, "{indent}- Reason text: {}", text(ret.reason_text.as_ref()))
}

fn write_shipment(f: &mut Formatter<'_>, shipment: &OrderShipment, indent: &str) -> fmt::Result {
    writeln!(f, "{indent}Shipment \"{}\":", text(shipment.id.as_ref()))?;
    writeln!(f, "{indent}- Creation date: {}", text(shipment.creation_date.as_ref()))?;
    writeln!(f, "{indent}- Carrier: {}", text(shipment.carrier.as_ref()))?;
    writeln!(f, "{indent}- Tracking ID: {}", text(shipment.tracking_id.as_ref()))?;
    if !shipment.line_items.is_empty() {
        writeln!(f, "{indent}- {} line items:", shipment.line_items.len())?;
        for item in &shipment.line_items {
            writeln!(f, "{indent}  {} of item \"{}\"", item.quantity, item.line_item_id)?;
        }
    }
    if let Some(date) = shipment.delivery_date.as_deref().filter(|d| !d.is_empty()) {
        writeln!(f, "{indent}- Delivery date: {date}")?;
    }
    Ok(())
}

/// A failed demo: the error and, for API errors, every reason and message
/// pair from the response body.
pub struct ErrorReport<'a>(pub &'a SamplesError);

impl Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let http = match self.0 {
            SamplesError::Http(e) | SamplesError::AccountUnreadable { source: e, .. } => Some(e),
            _ => None,
        };
        match http {
            Some(HttpError::Response(api)) => {
                writeln!(f, "Received error {}: {}", api.code, api.message)?;
                for detail in &api.errors {
                    writeln!(f, " - [{}] {}", detail.reason, detail.message)?;
                }
                Ok(())
            }
            _ => writeln!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ApiError, ErrorDetail};
    use crate::content::{
        AccountAdsLink, AccountTaxRule, AccountUser, DeliveryTime, PostalCodeGroup,
        PostalCodeRange, Price, Row, ShippingService, Weight,
    };

    #[test]
    fn test_content_errors_empty_renders_nothing() {
        let rendered = ContentErrors {
            errors: &[],
            is_error: true,
        }
        .to_string();
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_content_warnings() {
        let warnings = [BatchError {
            domain: None,
            reason: "validation/missing_recommended".to_string(),
            message: "Missing recommended attribute".to_string(),
        }];
        let rendered = ContentErrors {
            errors: &warnings,
            is_error: false,
        }
        .to_string();
        assert_eq!(
            rendered,
            "Warnings received:\n - Missing recommended attribute\n\n"
        );
    }

    #[test]
    fn test_account_summary() {
        let account = Account {
            id: Some(42),
            name: Some("Shop".to_string()),
            users: vec![
                AccountUser {
                    email_address: Some("admin@example.com".to_string()),
                    admin: Some(true),
                },
                AccountUser {
                    email_address: Some("user@example.com".to_string()),
                    admin: None,
                },
            ],
            ads_links: vec![AccountAdsLink {
                ads_id: Some(99),
                status: Some("active".to_string()),
            }],
            ..Account::default()
        };
        let expected = "Information for account 42:\n\
                        - Display name: Shop\n\
                        - Registered users:\n  \
                        - (ADMIN) admin@example.com\n  \
                        - user@example.com\n\
                        - Linked Google Ads accounts:\n  \
                        - 99: active\n";
        assert_eq!(AccountSummary(&account).to_string(), expected);
    }

    #[test]
    fn test_account_tax_summary() {
        let tax = AccountTax {
            account_id: Some(5),
            rules: vec![AccountTaxRule {
                country: "US".to_string(),
                location_id: Some(21143),
                rate_percent: Some("6".to_string()),
                shipping_taxed: Some(true),
                ..AccountTaxRule::default()
            }],
        };
        assert_eq!(
            AccountTaxSummary(&tax).to_string(),
            "Tax information for account 5:\n\
             - For location 21143 in country US, rate is 6%.\n \
             Note: Shipping charges are also taxed.\n"
        );

        let empty = AccountTax::default();
        assert!(AccountTaxSummary(&empty)
            .to_string()
            .ends_with("- No tax information, so no tax is charged.\n"));
    }

    #[test]
    fn test_shipping_summary_renders_ranges_and_tables() {
        let settings = ShippingSettings {
            account_id: Some(1),
            postal_code_groups: vec![PostalCodeGroup {
                name: "West".to_string(),
                country: "US".to_string(),
                postal_code_ranges: vec![PostalCodeRange {
                    postal_code_range_begin: "90000".to_string(),
                    postal_code_range_end: Some("96199".to_string()),
                }],
            }],
            services: vec![ShippingService {
                name: "Ground".to_string(),
                active: true,
                currency: "USD".to_string(),
                delivery_country: "US".to_string(),
                delivery_time: Some(DeliveryTime {
                    min_transit_time_in_days: 2,
                    max_transit_time_in_days: 5,
                }),
                rate_groups: vec![RateGroup {
                    main_table: Some(Table {
                        row_headers: Headers {
                            weights: Some(vec![Weight {
                                value: "10".to_string(),
                                unit: "kg".to_string(),
                            }]),
                            ..Headers::default()
                        },
                        rows: vec![Row {
                            cells: vec![Value {
                                flat_rate: Some(Price::new("4.99", "USD")),
                                ..Value::default()
                            }],
                        }],
                        ..Table::default()
                    }),
                    ..RateGroup::default()
                }],
            }],
        };

        let rendered = ShippingSettingsSummary(&settings).to_string();
        assert!(rendered.contains("  - Postal code(s): 90000-96199\n"));
        assert!(rendered.contains("  - Delivery time: 2-5 days\n"));
        assert!(rendered.contains("        - Weight <= 10 kg\n"));
        assert!(rendered.contains("        Row 0:\n        - 4.99 USD\n"));
        assert!(rendered.contains("    - 0 defined subtable(s):\n"));
    }

    #[test]
    fn test_error_report_lists_reasons() {
        let error = SamplesError::Http(HttpError::Response(ApiError {
            code: 400,
            message: "Invalid value".to_string(),
            errors: vec![ErrorDetail {
                reason: "invalid".to_string(),
                message: "[price] invalid".to_string(),
            }],
        }));
        assert_eq!(
            ErrorReport(&error).to_string(),
            "Received error 400: Invalid value\n - [invalid] [price] invalid\n"
        );
        assert_eq!(
            ErrorReport(&SamplesError::NoAccountAccess).to_string(),
            "The authenticated user cannot access any Merchant Center accounts.\n"
        );
    }
}
