//! The Merchant Center account a run acts on.
//!
//! [`AccountContext::load`] asks `accounts/authinfo` which accounts the
//! credential can reach, settles on a merchant ID, decides whether it is a
//! multi-client account and reads the account's website URL. It runs once
//! per process; the result is immutable.
//!
//! # Example
//!
//! ```rust
//! use shopping_samples::content::AccountIdentifier;
//! use shopping_samples::context::is_multi_client;
//!
//! let ids = vec![AccountIdentifier {
//!     merchant_id: Some(10),
//!     aggregator_id: Some(20),
//! }];
//! assert!(is_multi_client(&ids, 20));
//! assert!(!is_multi_client(&ids, 10));
//! ```

use crate::config::MerchantId;
use crate::content::{AccountIdentifier, ContentClient};
use crate::error::SamplesError;

const REQUIRES_MCA: &str = "This demo requires a multi-client account.";
const REQUIRES_NON_MCA: &str = "This demo cannot be run on a multi-client account.";

/// Returns `true` if `merchant_id` is the aggregator of any identifier.
///
/// Appearing as a plain `merchant_id` does not make an account multi-client.
#[must_use]
pub fn is_multi_client(identifiers: &[AccountIdentifier], merchant_id: u64) -> bool {
    identifiers
        .iter()
        .any(|id| id.aggregator_id == Some(merchant_id))
}

/// Picks the merchant ID when none is configured: the first identifier's
/// merchant ID, or its aggregator ID.
fn default_merchant_id(identifiers: &[AccountIdentifier]) -> Option<u64> {
    identifiers
        .first()
        .and_then(|id| id.merchant_id.or(id.aggregator_id))
}

/// The resolved account and what is known about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    /// The account every demo acts on.
    pub merchant_id: MerchantId,
    /// Whether the account is a multi-client account.
    pub is_mca: bool,
    /// The account's website URL. `None` when none is configured, which is
    /// distinct from `Some("")`.
    pub website_url: Option<String>,
}

impl AccountContext {
    /// Discovers the account context.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::NoAccountAccess`] if the credential reaches no
    /// account, [`SamplesError::AccountUnreadable`] if the account record
    /// cannot be read, and [`SamplesError::Http`] if `authinfo` fails.
    pub async fn load(
        client: &ContentClient,
        configured: Option<MerchantId>,
    ) -> Result<Self, SamplesError> {
        let identifiers = client.accounts().authinfo().await?.account_identifiers;
        if identifiers.is_empty() {
            return Err(SamplesError::NoAccountAccess);
        }

        let merchant_id = match configured {
            Some(id) => id,
            None => {
                let id = default_merchant_id(&identifiers).ok_or_else(|| {
                    SamplesError::UnexpectedResponse(
                        "account identifier without merchant or aggregator ID".to_string(),
                    )
                })?;
                let id = MerchantId::new(id)?;
                println!("Using Merchant Center {id} for running samples.");
                id
            }
        };

        let is_mca = is_multi_client(&identifiers, merchant_id.get());
        if is_mca {
            tracing::info!("Merchant Center {merchant_id} is a multi-client account");
        }

        let account = client
            .accounts()
            .get(merchant_id.get(), merchant_id.get())
            .await
            .map_err(|source| SamplesError::AccountUnreadable {
                merchant_id: merchant_id.get(),
                source,
            })?;

        match account.website_url.as_deref() {
            None => tracing::info!("No website listed for Merchant Center {merchant_id}"),
            Some(url) => tracing::debug!("Website for Merchant Center {merchant_id}: {url}"),
        }

        Ok(Self {
            merchant_id,
            is_mca,
            website_url: account.website_url,
        })
    }

    /// The merchant ID as a plain integer.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.merchant_id.get()
    }

    /// Fails unless the account is a multi-client account.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::WrongAccountType`] for standalone accounts.
    pub const fn require_mca(&self) -> Result<(), SamplesError> {
        if self.is_mca {
            Ok(())
        } else {
            Err(SamplesError::WrongAccountType(REQUIRES_MCA))
        }
    }

    /// Fails if the account is a multi-client account.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::WrongAccountType`] for multi-client accounts.
    pub const fn require_non_mca(&self) -> Result<(), SamplesError> {
        if self.is_mca {
            Err(SamplesError::WrongAccountType(REQUIRES_NON_MCA))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn identifier(merchant: Option<u64>, aggregator: Option<u64>) -> AccountIdentifier {
        AccountIdentifier {
            merchant_id: merchant,
            aggregator_id: aggregator,
        }
    }

    #[test]
    fn test_multi_client_only_matches_aggregator_ids() {
        let ids = vec![identifier(Some(1), None), identifier(Some(2), Some(3))];
        assert!(is_multi_client(&ids, 3));
        assert!(!is_multi_client(&ids, 1));
        assert!(!is_multi_client(&ids, 2));
        assert!(!is_multi_client(&[], 3));
    }

    #[test]
    fn test_default_merchant_falls_back_to_aggregator() {
        assert_eq!(default_merchant_id(&[identifier(None, Some(8))]), Some(8));
        assert_eq!(
            default_merchant_id(&[identifier(Some(4), Some(8)), identifier(Some(9), None)]),
            Some(4)
        );
        assert_eq!(default_merchant_id(&[]), None);
    }

    #[test]
    fn test_gates() {
        let mut context = AccountContext {
            merchant_id: MerchantId::new(1).unwrap(),
            is_mca: false,
            website_url: None,
        };
        assert!(context.require_non_mca().is_ok());
        assert!(matches!(
            context.require_mca(),
            Err(SamplesError::WrongAccountType(REQUIRES_MCA))
        ));
        context.is_mca = true;
        assert!(context.require_mca().is_ok());
        assert!(context.require_non_mca().is_err());
    }

    #[tokio::test]
    async fn test_load_resolves_unconfigured_aggregator() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/accounts/authinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accountIdentifiers": [{"aggregatorId": "500"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/500/accounts/500"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "500",
                "websiteUrl": ""
            })))
            .mount(&server)
            .await;

        let context = AccountContext::load(&client_for(&server), None).await.unwrap();
        assert_eq!(context.id(), 500);
        assert!(context.is_mca);
        assert_eq!(context.website_url.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_load_without_accounts_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/accounts/authinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = AccountContext::load(&client_for(&server), None).await;
        assert!(matches!(result, Err(SamplesError::NoAccountAccess)));
    }

    #[tokio::test]
    async fn test_load_reports_unreadable_account() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/accounts/authinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accountIdentifiers": [{"merchantId": "12"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/content/v2.1/77/accounts/77"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "forbidden", "errors": []}
            })))
            .mount(&server)
            .await;

        let configured = MerchantId::new(77).ok();
        let result = AccountContext::load(&client_for(&server), configured).await;
        match result {
            Err(SamplesError::AccountUnreadable { merchant_id, source }) => {
                assert_eq!(merchant_id, 77);
                assert_eq!(source.status(), Some(403));
            }
            other => panic!("expected AccountUnreadable, got {other:?}"),
        }
    }
}
