//! The OAuth `state` parameter.
//!
//! A random nonce is sent with the authorization request and must come back
//! unchanged on the callback. Comparison is constant-time.
//!
//! # Example
//!
//! ```rust
//! use shopping_samples::auth::oauth::StateParam;
//!
//! let state = StateParam::new();
//! assert_eq!(state.as_ref().len(), 15);
//! assert!(state.matches(state.as_ref()));
//! assert!(!state.matches("something-else"));
//! ```

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use subtle::ConstantTimeEq;

/// A random nonce tying an authorization callback to its request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    const NONCE_LENGTH: usize = 15;

    /// Creates a state with a fresh 15-character alphanumeric nonce.
    #[must_use]
    pub fn new() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();
        Self { value }
    }

    /// Wraps a known value, for tests and replayed callbacks.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// Returns `true` if `received` equals this state, compared in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.value.as_bytes().ct_eq(received.as_bytes()).into()
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_15_char_alphanumeric_nonce() {
        let state = StateParam::new();
        assert_eq!(state.as_ref().len(), 15);
        assert!(state.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_new_generates_unique_nonces() {
        assert_ne!(StateParam::new(), StateParam::new());
    }

    #[test]
    fn test_matches_requires_exact_value() {
        let state = StateParam::from_raw("abc123");
        assert!(state.matches("abc123"));
        assert!(!state.matches("abc12"));
        assert!(!state.matches("abc1234"));
        assert!(!state.matches(""));
    }

    #[test]
    fn test_display_returns_value() {
        let state = StateParam::from_raw("display-test");
        assert_eq!(state.to_string(), "display-test");
    }
}
