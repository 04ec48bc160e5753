//! Capturing the authorization code.
//!
//! The loopback listener is a small axum server. [`CALLBACK_PATH`] ends the
//! flow; anything else (such as a browser's favicon request) gets a
//! 404 and the server keeps waiting. Connections are served concurrently, so
//! an idle preconnect does not hold up the real callback. The manual mode
//! reads a pasted code from a line-oriented reader.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::auth::oauth::state::StateParam;
use crate::auth::AuthError;

/// Path the loopback redirect URI points at.
pub const CALLBACK_PATH: &str = "/oauth2callback";

const SUCCESS_PAGE: &str = "Authorization completed, you may close this window now.";
const FAILURE_PAGE: &str = "Authorization failed. Return to the terminal for details.";
const NOT_FOUND_PAGE: &str = "Not found.";

/// How long open connections get to finish once the callback has arrived.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// What a single HTTP request to the loopback listener amounted to.
#[derive(Debug)]
pub enum CallbackOutcome {
    /// The request was not for the callback path.
    NotCallback,
    /// A valid callback with its authorization code.
    Code(String),
    /// A callback that ends the flow with an error.
    Rejected(AuthError),
}

/// Interprets the request target of an HTTP request line.
#[must_use]
pub fn parse_callback(target: &str, expected_state: &StateParam) -> CallbackOutcome {
    let Ok(url) = url::Url::parse(&format!("http://127.0.0.1{target}")) else {
        return CallbackOutcome::NotCallback;
    };
    if url.path() != CALLBACK_PATH {
        return CallbackOutcome::NotCallback;
    }

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(reason) = error {
        return CallbackOutcome::Rejected(AuthError::MissingAuthorizationCode { reason });
    }
    if !state.is_some_and(|s| expected_state.matches(&s)) {
        return CallbackOutcome::Rejected(AuthError::StateMismatch);
    }
    match code {
        Some(code) if !code.is_empty() => CallbackOutcome::Code(code),
        _ => CallbackOutcome::Rejected(AuthError::MissingAuthorizationCode {
            reason: "callback carried no code".to_string(),
        }),
    }
}

type CallbackResult = Result<String, AuthError>;

struct CallbackState {
    expected: StateParam,
    result: Mutex<Option<oneshot::Sender<CallbackResult>>>,
}

impl CallbackState {
    /// Hands the first result to the waiting flow; later callbacks are
    /// answered but otherwise ignored.
    fn finish(&self, result: CallbackResult) {
        let sender = self.result.lock().ok().and_then(|mut slot| slot.take());
        if let Some(sender) = sender {
            let _ = sender.send(result);
        }
    }
}

async fn handle_callback(
    State(callback): State<Arc<CallbackState>>,
    RawQuery(query): RawQuery,
) -> (StatusCode, &'static str) {
    let target = format!("{CALLBACK_PATH}?{}", query.unwrap_or_default());
    tracing::debug!(request = %target, "Loopback callback");

    match parse_callback(&target, &callback.expected) {
        CallbackOutcome::NotCallback => (StatusCode::NOT_FOUND, NOT_FOUND_PAGE),
        CallbackOutcome::Code(code) => {
            callback.finish(Ok(code));
            (StatusCode::OK, SUCCESS_PAGE)
        }
        CallbackOutcome::Rejected(error) => {
            callback.finish(Err(error));
            (StatusCode::BAD_REQUEST, FAILURE_PAGE)
        }
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_PAGE)
}

/// Serves the loopback listener until the authorization callback arrives.
///
/// # Errors
///
/// Returns [`AuthError::StateMismatch`] or
/// [`AuthError::MissingAuthorizationCode`] for a bad callback, and
/// [`AuthError::Io`] if the server stops before a callback arrives.
pub async fn wait_for_callback(
    listener: TcpListener,
    expected_state: &StateParam,
) -> Result<String, AuthError> {
    let (result_tx, result_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let callback = Arc::new(CallbackState {
        expected: expected_state.clone(),
        result: Mutex::new(Some(result_tx)),
    });

    let app = Router::new()
        .route(CALLBACK_PATH, get(handle_callback))
        .fallback(not_found)
        .with_state(callback);
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });
    let abort = server.abort_handle();

    let result = result_rx.await;
    let _ = shutdown_tx.send(());
    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(Ok(Err(e))) => tracing::warn!("Loopback listener failed: {e}"),
        Ok(_) => {}
        Err(_) => abort.abort(),
    }

    result.unwrap_or_else(|_| {
        Err(AuthError::Io(std::io::Error::other(
            "loopback listener stopped before the authorization callback arrived",
        )))
    })
}

/// Reads a pasted authorization code from `reader`, skipping blank lines.
///
/// # Errors
///
/// Returns [`AuthError::MissingAuthorizationCode`] at end of input.
pub async fn read_pasted_code<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<String, AuthError> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(AuthError::MissingAuthorizationCode {
                reason: "no code entered".to_string(),
            });
        }
        let code = line.trim();
        if !code.is_empty() {
            return Ok(code.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn send(addr: std::net::SocketAddr, target: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(
                format!("GET {target} HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n")
                    .as_bytes(),
            )
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn test_parse_callback_accepts_matching_state() {
        let state = StateParam::from_raw("s1");
        let outcome = parse_callback("/oauth2callback?code=4%2Fabc&state=s1", &state);
        assert!(matches!(outcome, CallbackOutcome::Code(ref c) if c == "4/abc"));
    }

    #[test]
    fn test_parse_callback_rejects_wrong_or_missing_state() {
        let state = StateParam::from_raw("s1");
        assert!(matches!(
            parse_callback("/oauth2callback?code=c&state=s2", &state),
            CallbackOutcome::Rejected(AuthError::StateMismatch)
        ));
        assert!(matches!(
            parse_callback("/oauth2callback?code=c", &state),
            CallbackOutcome::Rejected(AuthError::StateMismatch)
        ));
    }

    #[test]
    fn test_parse_callback_reports_denied_consent() {
        let state = StateParam::from_raw("s1");
        assert!(matches!(
            parse_callback("/oauth2callback?error=access_denied&state=s1", &state),
            CallbackOutcome::Rejected(AuthError::MissingAuthorizationCode { ref reason }) if reason == "access_denied"
        ));
    }

    #[test]
    fn test_parse_callback_ignores_other_paths() {
        let state = StateParam::from_raw("s1");
        assert!(matches!(
            parse_callback("/favicon.ico", &state),
            CallbackOutcome::NotCallback
        ));
    }

    #[tokio::test]
    async fn test_listener_serves_404_then_accepts_callback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = StateParam::from_raw("nonce");

        let client = tokio::spawn(async move {
            let favicon = send(addr, "/favicon.ico").await;
            let callback = send(addr, "/oauth2callback?code=the-code&state=nonce").await;
            (favicon, callback)
        });

        let code = wait_for_callback(listener, &state).await.unwrap();
        let (favicon, callback) = client.await.unwrap();

        assert_eq!(code, "the-code");
        assert!(favicon.starts_with("HTTP/1.1 404"));
        assert!(callback.starts_with("HTTP/1.1 200"));
        assert!(callback.contains(SUCCESS_PAGE));
    }

    #[tokio::test]
    async fn test_idle_connection_does_not_block_callback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = StateParam::from_raw("nonce");

        // A preconnect that never sends a request stays open for the whole test.
        let idle = TcpStream::connect(addr).await.unwrap();
        let client = tokio::spawn(async move {
            send(addr, "/oauth2callback?code=c&state=nonce").await
        });

        let code = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_callback(listener, &state),
        )
        .await
        .expect("callback was not accepted while another connection was idle")
        .unwrap();

        assert_eq!(code, "c");
        assert!(client.await.unwrap().starts_with("HTTP/1.1 200"));
        drop(idle);
    }

    #[tokio::test]
    async fn test_state_mismatch_ends_the_flow() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = StateParam::from_raw("nonce");

        let client = tokio::spawn(async move {
            send(addr, "/oauth2callback?code=c&state=forged").await
        });

        let result = wait_for_callback(listener, &state).await;

        assert!(matches!(result, Err(AuthError::StateMismatch)));
        let response = client.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 400"));
        assert!(response.contains(FAILURE_PAGE));
    }

    #[tokio::test]
    async fn test_read_pasted_code_skips_blank_lines() {
        let mut input: &[u8] = b"\n  \n 4/pasted-code \n";
        assert_eq!(read_pasted_code(&mut input).await.unwrap(), "4/pasted-code");

        let mut empty: &[u8] = b"";
        assert!(matches!(
            read_pasted_code(&mut empty).await,
            Err(AuthError::MissingAuthorizationCode { .. })
        ));
    }
}
