//! Types shared by several Content API resources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A currency-tagged amount. Both parts are strings on the wire.
///
/// # Example
///
/// ```rust
/// use shopping_samples::content::Price;
///
/// let price = Price::new("2.50", "USD");
/// assert_eq!(price.to_string(), "2.50 USD");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Price {
    /// The amount, such as `"2.50"`.
    #[serde(default)]
    pub value: String,

    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: String,
}

impl Price {
    /// Creates a price.
    #[must_use]
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// One error inside a batch entry or a resource's warning list.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BatchError {
    /// Error domain, such as `global` or `content.ContentErrorDomain`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Machine-readable reason.
    #[serde(default)]
    pub reason: String,

    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

/// The error list attached to a failed batch entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BatchErrors {
    /// HTTP status the entry would have returned on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,

    /// Summary message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Individual errors.
    #[serde(default)]
    pub errors: Vec<BatchError>,
}

/// Request method of a `custombatch` entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BatchMethod {
    /// Create or replace the resource.
    Insert,
    /// Read the resource.
    Get,
    /// Remove the resource.
    Delete,
}

/// Body of a `custombatch` call.
#[derive(Serialize)]
pub(crate) struct BatchRequest<'a, E> {
    pub entries: &'a [E],
}

/// Response of a `custombatch` call.
#[derive(Deserialize)]
pub(crate) struct BatchResponse<R> {
    #[serde(default = "Vec::new")]
    pub entries: Vec<R>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_wire_format() {
        let price = Price::new("0.99", "USD");
        assert_eq!(
            serde_json::to_value(&price).unwrap(),
            json!({"value": "0.99", "currency": "USD"})
        );
    }

    #[test]
    fn test_batch_errors_parse_with_missing_fields() {
        let errors: BatchErrors = serde_json::from_value(json!({
            "code": 400,
            "errors": [{"reason": "invalid", "message": "[price] value is invalid"}]
        }))
        .unwrap();
        assert_eq!(errors.code, Some(400));
        assert!(errors.message.is_none());
        assert_eq!(errors.errors[0].reason, "invalid");
        assert!(errors.errors[0].domain.is_none());
    }

    #[test]
    fn test_batch_method_is_lowercase() {
        assert_eq!(serde_json::to_value(BatchMethod::Insert).unwrap(), json!("insert"));
        assert_eq!(serde_json::to_value(BatchMethod::Delete).unwrap(), json!("delete"));
    }
}
