//! HTTP response type for Content API calls.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::HttpError;

/// A response received from the Content API.
///
/// The body is kept as a [`serde_json::Value`]; use [`HttpResponse::json`] to
/// decode it into a resource type.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased, with every value for repeated headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed body; `{}` for empty bodies.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        serde_json::from_value(self.body.clone()).map_err(|e| HttpError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_is_ok_for_2xx_only() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), vec!["application/json".to_string()]);
        let response = HttpResponse::new(200, headers, json!({}));

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_json_decodes_typed_body() {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Item {
            offer_id: String,
        }

        let response = HttpResponse::new(200, HashMap::new(), json!({"offerId": "book123"}));
        let item: Item = response.json("12345/products").unwrap();
        assert_eq!(item.offer_id, "book123");

        let bad: Result<Item, _> =
            HttpResponse::new(200, HashMap::new(), json!({"id": 1})).json("12345/products");
        assert!(matches!(bad, Err(HttpError::Decode { .. })));
    }
}
