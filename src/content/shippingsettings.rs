//! Shipping settings resource.
//!
//! An account's shipping settings are one document: postal code groups that
//! rate tables can refer to, and the shipping services with their rate
//! groups. `update` replaces the whole document.

use serde::{Deserialize, Serialize};

use crate::clients::HttpError;
use crate::content::common::Price;
use crate::content::{build_path, int64, ContentClient, ListParams, ListResponse};

const COLLECTION_PATH: &str = "{merchantId}/shippingsettings";
const RESOURCE_PATH: &str = "{merchantId}/shippingsettings/{accountId}";
const CARRIERS_PATH: &str = "{merchantId}/supportedCarriers";

/// A postal code or the start and end of a range.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostalCodeRange {
    /// A postal code, a prefix such as `94*`, or the start of a range.
    #[serde(default)]
    pub postal_code_range_begin: String,

    /// End of the range; `None` for a single code or prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code_range_end: Option<String>,
}

/// A named set of postal code ranges in one country.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostalCodeGroup {
    /// Group name, referenced from table headers.
    #[serde(default)]
    pub name: String,

    /// CLDR territory code.
    #[serde(default)]
    pub country: String,

    /// The ranges.
    #[serde(default)]
    pub postal_code_ranges: Vec<PostalCodeRange>,
}

/// Transit time bounds of a service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTime {
    /// Fastest transit time in business days.
    #[serde(default)]
    pub min_transit_time_in_days: u32,

    /// Slowest transit time in business days.
    #[serde(default)]
    pub max_transit_time_in_days: u32,
}

/// A shipping rate: a flat amount, a percentage of the price, a reference to
/// a subtable or "no shipping".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    /// Flat rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_rate: Option<Price>,

    /// Percentage of the price, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_percentage: Option<String>,

    /// Whether items cannot be shipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_shipping: Option<bool>,

    /// Name of a subtable holding the rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtable_name: Option<String>,

    /// Name of a carrier rate holding the rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_rate_name: Option<String>,
}

/// A carrier-calculated rate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarrierRate {
    /// Name, referenced from values.
    #[serde(default)]
    pub name: String,

    /// Carrier, such as `UPS`.
    #[serde(default)]
    pub carrier_name: String,

    /// Carrier service, such as `ground`.
    #[serde(default)]
    pub carrier_service: String,

    /// Origin of the shipment.
    #[serde(default)]
    pub origin_postal_code: String,

    /// Fixed amount added to the carrier rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_adjustment: Option<Price>,

    /// Percentage added to the carrier rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_adjustment: Option<String>,
}

/// A set of location IDs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationIdSet {
    /// Location criteria IDs.
    #[serde(default)]
    pub location_ids: Vec<String>,
}

/// A weight bound in a table header.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Weight {
    /// The weight, as a decimal string.
    #[serde(default)]
    pub value: String,

    /// `kg` or `lb`.
    #[serde(default)]
    pub unit: String,
}

/// Row or column headers of a rate table. Exactly one list is set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Headers {
    /// Location sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<LocationIdSet>>,

    /// Item count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_items: Option<Vec<String>>,

    /// Postal code group names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code_group_names: Option<Vec<String>>,

    /// Price bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<Price>>,

    /// Weight bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<Weight>>,
}

/// One row of a rate table.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Row {
    /// One value per column.
    #[serde(default)]
    pub cells: Vec<Value>,
}

/// A rate table.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Name, for subtables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Row headers.
    #[serde(default)]
    pub row_headers: Headers,

    /// Column headers; `None` for single-column tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_headers: Option<Headers>,

    /// The rows.
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Rates of a service for a set of shipping labels.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RateGroup {
    /// Shipping labels the group applies to; empty for all products.
    #[serde(default)]
    pub applicable_shipping_labels: Vec<String>,

    /// Carrier rates the values can refer to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub carrier_rates: Vec<CarrierRate>,

    /// One rate for everything. Exclusive with `main_table`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_value: Option<Value>,

    /// Rate table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_table: Option<Table>,

    /// Subtables referenced from the main table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtables: Vec<Table>,
}

/// A shipping service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingService {
    /// Service name.
    #[serde(default)]
    pub name: String,

    /// Whether the service is offered.
    #[serde(default)]
    pub active: bool,

    /// Currency of the rates.
    #[serde(default)]
    pub currency: String,

    /// CLDR territory code the service delivers to.
    #[serde(default)]
    pub delivery_country: String,

    /// Transit time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<DeliveryTime>,

    /// Rate groups.
    #[serde(default)]
    pub rate_groups: Vec<RateGroup>,
}

/// The shipping settings of an account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingSettings {
    /// The account the settings belong to.
    #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    /// Postal code groups.
    #[serde(default)]
    pub postal_code_groups: Vec<PostalCodeGroup>,

    /// Services.
    #[serde(default)]
    pub services: Vec<ShippingService>,
}

/// A carrier and the services usable in carrier rates.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarriersCarrier {
    /// Carrier name.
    #[serde(default)]
    pub name: String,

    /// Country the carrier operates in.
    #[serde(default)]
    pub country: String,

    /// Supported service names.
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Deserialize)]
struct SupportedCarriersResponse {
    #[serde(default)]
    carriers: Vec<CarriersCarrier>,
}

/// The `shippingsettings` service.
#[derive(Debug, Clone, Copy)]
pub struct ShippingSettingsService<'a> {
    client: &'a ContentClient,
}

impl<'a> ShippingSettingsService<'a> {
    pub(crate) const fn new(client: &'a ContentClient) -> Self {
        Self { client }
    }

    /// Retrieves an account's shipping settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get(&self, merchant_id: u64, account_id: u64) -> Result<ShippingSettings, HttpError> {
        self.client
            .get(&resource_path(merchant_id, account_id))
            .await
    }

    /// Replaces an account's shipping settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn update(
        &self,
        merchant_id: u64,
        account_id: u64,
        settings: &ShippingSettings,
    ) -> Result<ShippingSettings, HttpError> {
        self.client
            .put(&resource_path(merchant_id, account_id), settings)
            .await
    }

    /// Lists the carriers and services usable in carrier rates.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn get_supported_carriers(
        &self,
        merchant_id: u64,
    ) -> Result<Vec<CarriersCarrier>, HttpError> {
        let path = build_path(CARRIERS_PATH, &[("merchantId", merchant_id)]);
        let response: SupportedCarriersResponse = self.client.get(&path).await?;
        Ok(response.carriers)
    }

    /// Fetches one page of sub-account shipping settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the call fails.
    pub async fn list(
        &self,
        merchant_id: u64,
        params: &ListParams,
    ) -> Result<ListResponse<ShippingSettings>, HttpError> {
        let path = build_path(COLLECTION_PATH, &[("merchantId", merchant_id)]);
        self.client.list_page(&path, params).await
    }

    /// Walks every page of sub-account shipping settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if any page fails.
    pub async fn list_all<F: FnMut(&[ShippingSettings])>(
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
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parses_table_rate_group() {
        let group: RateGroup = serde_json::from_value(json!({
            "applicableShippingLabels": [],
            "mainTable": {
                "rowHeaders": {"weights": [{"value": "10", "unit": "kg"}, {"value": "infinity", "unit": "kg"}]},
                "rows": [
                    {"cells": [{"flatRate": {"value": "4.99", "currency": "USD"}}]},
                    {"cells": [{"noShipping": true}]}
                ]
            }
        }))
        .unwrap();

        let table = group.main_table.unwrap();
        assert_eq!(table.row_headers.weights.unwrap()[1].value, "infinity");
        assert!(table.row_headers.prices.is_none());
        assert!(table.column_headers.is_none());
        assert_eq!(table.rows[1].cells[0].no_shipping, Some(true));
    }

    #[test]
    fn test_settings_serialize_empty_groups() {
        let settings = ShippingSettings::default();
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({"postalCodeGroups": [], "services": []})
        );
    }

    #[tokio::test]
    async fn test_supported_carriers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/3/supportedCarriers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "carriers": [{"name": "UPS", "country": "US", "services": ["Ground", "2nd Day Air"]}]
            })))
            .mount(&server)
            .await;

        let carriers = client_for(&server)
            .shippingsettings()
            .get_supported_carriers(3)
            .await
            .unwrap();
        assert_eq!(carriers[0].services.len(), 2);
    }
}
