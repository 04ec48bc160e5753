//! Proof Key for Code Exchange (RFC 7636), `S256` method only.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// A PKCE verifier and its derived challenge.
#[derive(Clone)]
pub struct PkcePair {
    verifier: String,
    challenge: String,
}

impl std::fmt::Debug for PkcePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkcePair")
            .field("verifier", &"*****")
            .field("challenge", &self.challenge)
            .finish()
    }
}

impl PkcePair {
    /// The only challenge method this crate sends.
    pub const METHOD: &'static str = "S256";

    /// Generates a verifier from 32 random bytes (43 URL-safe characters).
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_verifier(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Derives the challenge for an existing verifier.
    #[must_use]
    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }

    /// The secret sent with the code exchange.
    #[must_use]
    pub fn verifier(&self) -> &str {
        &self.verifier
    }

    /// The hash sent with the authorization request.
    #[must_use]
    pub fn challenge(&self) -> &str {
        &self.challenge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc7636_appendix_b_vector() {
        let pair = PkcePair::from_verifier("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
        assert_eq!(pair.challenge(), "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn test_generated_verifier_shape() {
        let pair = PkcePair::generate();
        assert_eq!(pair.verifier().len(), 43);
        assert!(pair
            .verifier()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(pair.verifier(), PkcePair::generate().verifier());
    }

    #[test]
    fn test_debug_masks_verifier() {
        let pair = PkcePair::from_verifier("secret-verifier");
        assert!(!format!("{pair:?}").contains("secret-verifier"));
    }
}
