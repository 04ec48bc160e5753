//! Validated newtype wrappers for configuration values.
//!
//! Merchant Center configuration files written by hand (or by other sample
//! sets) store numeric IDs either as JSON numbers or as decimal strings.
//! These types accept both and validate on construction.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Merchant Center account ID.
///
/// # Example
///
/// ```rust
/// use shopping_samples::MerchantId;
///
/// let id = MerchantId::parse("12345").unwrap();
/// assert_eq!(id.get(), 12345);
/// assert_eq!(id.to_string(), "12345");
///
/// let from_json: MerchantId = serde_json::from_str("\"12345\"").unwrap();
/// assert_eq!(from_json, id);
/// let from_number: MerchantId = serde_json::from_str("12345").unwrap();
/// assert_eq!(from_number, id);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MerchantId(u64);

impl MerchantId {
    /// Creates a merchant ID from a number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMerchantId`] for zero.
    pub fn new(id: u64) -> Result<Self, ConfigError> {
        if id == 0 {
            return Err(ConfigError::InvalidMerchantId {
                value: id.to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Parses a merchant ID from its decimal representation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMerchantId`] if the string is not a
    /// positive decimal integer.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        trimmed
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .map(Self)
            .ok_or_else(|| ConfigError::InvalidMerchantId {
                value: value.to_string(),
            })
    }

    /// Returns the numeric ID.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for MerchantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for MerchantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = deserializer.deserialize_any(NumericIdVisitor)?;
        Self::new(id).map_err(de::Error::custom)
    }
}

/// Accepts a non-negative integer given as a JSON number or a decimal string.
struct NumericIdVisitor;

impl<'de> de::Visitor<'de> for NumericIdVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative ID {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid numeric ID '{v}'")))
    }
}

/// Deserializes an optional numeric ID given as a number or string.
///
/// `null`, an empty string and zero all mean "not configured".
pub(crate) fn optional_numeric_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(0)) => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map(|n| (n != 0).then_some(n))
            .map_err(|_| de::Error::custom(format!("invalid numeric ID '{s}'"))),
    }
}

/// An OAuth client secret.
///
/// The `Debug` implementation masks the value so secrets never reach logs.
///
/// # Example
///
/// ```rust
/// use shopping_samples::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret");
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// assert_eq!(secret.as_ref(), "my-secret");
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchant_id_parse_accepts_decimal() {
        assert_eq!(MerchantId::parse(" 42 ").unwrap().get(), 42);
    }

    #[test]
    fn test_merchant_id_parse_rejects_invalid() {
        for value in ["", "abc", "0", "-5", "12.5"] {
            assert!(
                matches!(
                    MerchantId::parse(value),
                    Err(ConfigError::InvalidMerchantId { .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_merchant_id_new_rejects_zero() {
        assert!(MerchantId::new(0).is_err());
        assert_eq!(MerchantId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn test_merchant_id_deserializes_number_and_string() {
        let a: MerchantId = serde_json::from_str("12345").unwrap();
        let b: MerchantId = serde_json::from_str("\"12345\"").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<MerchantId>("\"nope\"").is_err());
        assert!(serde_json::from_str::<MerchantId>("0").is_err());
        assert!(serde_json::from_str::<MerchantId>("-1").is_err());
    }

    #[test]
    fn test_merchant_id_serializes_as_number() {
        let id = MerchantId::new(12345).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "12345");
    }

    #[test]
    fn test_optional_numeric_id_treats_blank_and_zero_as_unset() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "optional_numeric_id")]
            id: Option<u64>,
        }

        let parse = |s: &str| serde_json::from_str::<Holder>(s).unwrap().id;
        assert_eq!(parse(r#"{"id": 123}"#), Some(123));
        assert_eq!(parse(r#"{"id": "123"}"#), Some(123));
        assert_eq!(parse(r#"{"id": 0}"#), None);
        assert_eq!(parse(r#"{"id": ""}"#), None);
        assert_eq!(parse(r#"{"id": null}"#), None);
        assert_eq!(parse("{}"), None);
        assert!(serde_json::from_str::<Holder>(r#"{"id": "x"}"#).is_err());
    }

    #[test]
    fn test_client_secret_debug_is_masked() {
        let secret = ClientSecret::new("super-secret");
        let debug = format!("{secret:?}");
        assert!(!debug.contains("super-secret"));
    }
}
