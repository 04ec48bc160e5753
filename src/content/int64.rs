//! Serde helpers for 64-bit IDs.
//!
//! The Content API encodes `int64` fields as JSON strings (`"merchantId":
//! "123"`) but some responses and hand-written payloads use plain numbers.
//! IDs are written as strings and read from either form.
//!
//! ```rust,ignore
//! #[serde(default, with = "int64::option", skip_serializing_if = "Option::is_none")]
//! pub merchant_id: Option<u64>,
//! ```

use serde::{de, Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(u64),
    Text(String),
}

impl Raw {
    fn into_u64<E: de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid int64 value '{s}'"))),
        }
    }
}

/// `Option<u64>` written as an optional decimal string.
pub mod option {
    use super::{Deserialize, Deserializer, Raw, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_str(&n.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Option::<Raw>::deserialize(deserializer)?
            .map(Raw::into_u64)
            .transpose()
    }
}
