//! Example payloads inserted and removed by the demos.
//!
//! Every builder is pure: the same arguments give the same resource, and the
//! result carries every field the matching insert or update call requires.

use crate::content::{
    Account, AccountTax, AccountTaxRule, Datafeed, DatafeedFetchSchedule, DatafeedFormat,
    DatafeedTarget, DeliveryTime, PostalCodeGroup, PostalCodeRange, Price, Product,
    ProductShipping, ProductShippingWeight, RateGroup, ShippingService, ShippingSettings, Value,
};

/// Website used for product links when the account has none.
pub const FALLBACK_WEBSITE_URL: &str = "http://my-book-shop.com";

/// Host serving the example datafeed files.
const FEED_HOST: &str = "https://feeds.myshop.com";

/// Builds the example book.
///
/// Links point below `website_url`, or below [`FALLBACK_WEBSITE_URL`] when
/// it is `None` or empty.
///
/// # Example
///
/// ```rust
/// use shopping_samples::samples::create_example_product;
///
/// let product = create_example_product(Some("https://shop.example"), "book123");
/// assert_eq!(product.title.as_deref(), Some("A Tale of Two Cities"));
/// assert_eq!(
///     product.link.as_deref(),
///     Some("https://shop.example/tale-of-two-cities.html")
/// );
/// ```
#[must_use]
pub fn create_example_product(website_url: Option<&str>, offer_id: &str) -> Product {
    let website = website_url
        .map(|url| url.trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .unwrap_or(FALLBACK_WEBSITE_URL);

    Product {
        offer_id: Some(offer_id.to_string()),
        title: Some("A Tale of Two Cities".to_string()),
        description: Some("A classic novel about the French Revolution".to_string()),
        link: Some(format!("{website}/tale-of-two-cities.html")),
        image_link: Some(format!("{website}/tale-of-two-cities.jpg")),
        content_language: Some("en".to_string()),
        target_country: Some("US".to_string()),
        channel: Some("online".to_string()),
        availability: Some("in stock".to_string()),
        condition: Some("new".to_string()),
        google_product_category: Some("Media > Books".to_string()),
        gtin: Some("9780007350896".to_string()),
        price: Some(Price::new("2.50", "USD")),
        shipping: vec![ProductShipping {
            country: Some("US".to_string()),
            service: Some("Standard shipping".to_string()),
            price: Some(Price::new("0.99", "USD")),
        }],
        shipping_weight: Some(ProductShippingWeight {
            value: 200.0,
            unit: "grams".to_string(),
        }),
        ..Product::default()
    }
}

/// Builds a sub-account with the given display name.
#[must_use]
pub fn create_example_account(name: &str) -> Account {
    Account {
        name: Some(name.to_string()),
        ..Account::default()
    }
}

/// Builds a weekly datafeed named `name`, fetched from a per-name URL.
#[must_use]
pub fn create_example_datafeed(name: &str) -> Datafeed {
    Datafeed {
        name: Some(name.to_string()),
        content_type: Some("products".to_string()),
        attribute_language: Some("en".to_string()),
        file_name: Some(name.to_string()),
        targets: vec![DatafeedTarget {
            language: Some("en".to_string()),
            country: Some("US".to_string()),
            included_destinations: vec!["Shopping".to_string()],
        }],
        fetch_schedule: Some(DatafeedFetchSchedule {
            weekday: Some("monday".to_string()),
            hour: Some(6),
            time_zone: Some("America/Los_Angeles".to_string()),
            fetch_url: Some(format!("{FEED_HOST}/{name}")),
        }),
        format: Some(DatafeedFormat {
            file_encoding: Some("utf-8".to_string()),
            column_delimiter: Some("tab".to_string()),
            quoting_mode: Some("value quoting".to_string()),
        }),
        ..Datafeed::default()
    }
}

/// Builds shipping settings with a single USPS service: 3 to 7 days to the
/// US at a flat 5.00 USD.
#[must_use]
pub fn create_example_shipping_settings() -> ShippingSettings {
    ShippingSettings {
        account_id: None,
        postal_code_groups: Vec::new(),
        services: vec![ShippingService {
            name: "USPS".to_string(),
            active: true,
            currency: "USD".to_string(),
            delivery_country: "US".to_string(),
            delivery_time: Some(DeliveryTime {
                min_transit_time_in_days: 3,
                max_transit_time_in_days: 7,
            }),
            rate_groups: vec![RateGroup {
                single_value: Some(Value {
                    flat_rate: Some(Price::new("5.00", "USD")),
                    ..Value::default()
                }),
                ..RateGroup::default()
            }],
        }],
    }
}

/// Builds a partial update adding the "Northeastern US" postal code group
/// (every code starting with 0 or 1). Apply it with [`apply_settings_patch`].
#[must_use]
pub fn create_example_shipping_settings_patch() -> ShippingSettings {
    ShippingSettings {
        account_id: None,
        postal_code_groups: vec![PostalCodeGroup {
            name: "Northeastern US".to_string(),
            country: "US".to_string(),
            postal_code_ranges: ["0*", "1*"]
                .into_iter()
                .map(|begin| PostalCodeRange {
                    postal_code_range_begin: begin.to_string(),
                    postal_code_range_end: None,
                })
                .collect(),
        }],
        services: Vec::new(),
    }
}

/// Merges a partial update into `current`: every non-empty list in `patch`
/// replaces the one in `current`.
#[must_use]
pub fn apply_settings_patch(current: &ShippingSettings, patch: &ShippingSettings) -> ShippingSettings {
    let mut merged = current.clone();
    if !patch.postal_code_groups.is_empty() {
        merged.postal_code_groups.clone_from(&patch.postal_code_groups);
    }
    if !patch.services.is_empty() {
        merged.services.clone_from(&patch.services);
    }
    merged
}

/// Builds tax settings using the global rate table for New York State.
#[must_use]
pub fn create_example_tax_settings() -> AccountTax {
    AccountTax {
        account_id: None,
        rules: vec![AccountTaxRule {
            country: "US".to_string(),
            location_id: Some(21167),
            use_global_rate: Some(true),
            ..AccountTaxRule::default()
        }],
    }
}

/// Returns `current` with an extra 6% rule for Florida.
#[must_use]
pub fn create_example_tax_patch(current: &AccountTax) -> AccountTax {
    let mut patched = current.clone();
    patched.rules.push(AccountTaxRule {
        country: "US".to_string(),
        location_id: Some(21143),
        rate_percent: Some("6".to_string()),
        ..AccountTaxRule::default()
    });
    patched
}
