//! Interactive OAuth 2.0 authorization for installed applications.
//!
//! Used when the configuration directory holds an OAuth client but no usable
//! stored token. The flow:
//!
//! 1. **Authorization URL** ([`begin_auth`]): a fresh `state` nonce and PKCE
//!    (`S256`) pair are generated and the consent URL is printed.
//! 2. **Code capture** ([`wait_for_callback`] or [`read_pasted_code`]): the
//!    browser redirects to a one-shot loopback listener, or the user pastes
//!    the code shown by Google.
//! 3. **Code exchange** ([`exchange_code`]): the code and PKCE verifier are
//!    redeemed at the client's token endpoint.
//!
//! # Security
//!
//! - **CSRF protection**: the callback `state` must match, compared in
//!   constant time
//! - **PKCE**: the code is useless without the verifier held in memory
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_samples::auth::oauth::{authorize, AuthFlowMode};
//!
//! let tokens = authorize(&http, &secrets, &AuthFlowMode::default()).await?;
//! ```

mod begin_auth;
mod pkce;
mod state;
mod token_exchange;
mod validate_callback;

use tokio::io::BufReader;
use tokio::net::TcpListener;

use crate::auth::token::TokenResponse;
use crate::auth::user::ClientSecrets;
use crate::auth::{AuthError, CONTENT_SCOPE};

pub use begin_auth::{begin_auth, BeginAuthResult};
pub use pkce::PkcePair;
pub use state::StateParam;
pub use token_exchange::exchange_code;
pub use validate_callback::{
    parse_callback, read_pasted_code, wait_for_callback, CallbackOutcome, CALLBACK_PATH,
};

/// Port the loopback listener binds by default.
pub const DEFAULT_LOOPBACK_PORT: u16 = 8080;

/// Redirect URI asking Google to display the code for manual copy.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// How the authorization code gets back to this process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFlowMode {
    /// A one-shot HTTP listener on `127.0.0.1:{port}`. Port 0 picks a free port.
    Loopback {
        /// The port to bind.
        port: u16,
    },
    /// The user pastes the code on standard input.
    Manual,
}

impl Default for AuthFlowMode {
    fn default() -> Self {
        Self::Loopback {
            port: DEFAULT_LOOPBACK_PORT,
        }
    }
}

/// Runs the interactive flow and returns the token endpoint's response.
///
/// # Errors
///
/// Returns [`AuthError`] if the listener cannot bind, the callback is
/// invalid, no code is entered, or the exchange fails.
pub async fn authorize(
    client: &reqwest::Client,
    secrets: &ClientSecrets,
    mode: &AuthFlowMode,
) -> Result<TokenResponse, AuthError> {
    let (request, code) = match *mode {
        AuthFlowMode::Loopback { port } => {
            let listener = TcpListener::bind(("127.0.0.1", port)).await?;
            let bound = listener.local_addr()?.port();
            let redirect_uri = format!("http://127.0.0.1:{bound}{CALLBACK_PATH}");
            let request = begin_auth(secrets, &redirect_uri, &[CONTENT_SCOPE]);

            println!("Go to the following link in your browser:\n\n{}\n", request.auth_url);
            println!("Waiting for authorization on {redirect_uri} ...");

            let code = wait_for_callback(listener, &request.state).await?;
            (request, code)
        }
        AuthFlowMode::Manual => {
            let request = begin_auth(secrets, OOB_REDIRECT_URI, &[CONTENT_SCOPE]);

            println!("Go to the following link in your browser:\n\n{}\n", request.auth_url);
            println!("Enter verification code:");

            let mut stdin = BufReader::new(tokio::io::stdin());
            let code = read_pasted_code(&mut stdin).await?;
            (request, code)
        }
    };

    tracing::info!("Exchanging authorization code");
    exchange_code(client, secrets, &request, &code).await
}
