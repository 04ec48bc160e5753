//! Request path templates.
//!
//! Every Content API method addresses its resource with a path relative to
//! the service base path, such as `{merchantId}/products/{productId}`. The
//! services keep those templates as constants and fill them with
//! [`build_path`].
//!
//! Values are percent-encoded as single path segments: product IDs look like
//! `online:en:US:book#1` and the `#` must not start a URL fragment.
//!
//! # Example
//!
//! ```rust
//! use shopping_samples::content::build_path;
//!
//! let path = build_path(
//!     "{merchantId}/products/{productId}",
//!     &[("merchantId", "12345"), ("productId", "online:en:US:book#1")],
//! );
//! assert_eq!(path, "12345/products/online%3Aen%3AUS%3Abook%231");
//! ```

use std::fmt::Display;

/// Fills `{name}` placeholders in `template` with percent-encoded values.
///
/// Placeholders without a matching value are left untouched.
#[must_use]
pub fn build_path<V: Display>(template: &str, values: &[(&str, V)]) -> String {
    let mut result = template.to_string();

    for (key, value) in values {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_with_numeric_ids() {
        let path = build_path(
            "{merchantId}/accounts/{accountId}",
            &[("merchantId", 1u64), ("accountId", 2u64)],
        );
        assert_eq!(path, "1/accounts/2");
    }

    #[test]
    fn test_build_path_encodes_reserved_characters() {
        let path = build_path("{merchantId}/products/{productId}", &[
            ("merchantId", "12345"),
            ("productId", "online:en:US:a/b c#1"),
        ]);
        assert_eq!(path, "12345/products/online%3Aen%3AUS%3Aa%2Fb%20c%231");
    }

    #[test]
    fn test_build_path_leaves_unknown_placeholders() {
        let path = build_path("{merchantId}/orders/{orderId}", &[("merchantId", "7")]);
        assert_eq!(path, "7/orders/{orderId}");
    }

    #[test]
    fn test_build_path_without_placeholders() {
        let path = build_path::<&str>("accounts/authinfo", &[]);
        assert_eq!(path, "accounts/authinfo");
    }
}
