//! JSON log of every API request and response.
//!
//! Enabled with `--log_file`. Each exchange writes two pretty-printed JSON
//! objects: the request (`method`, `url`, body) followed by the response
//! (`statusCode`, body). Bodies that are valid JSON are logged under
//! `parsedBody`; anything else is logged verbatim under `rawBody`.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoggedRequest<'a> {
    method: &'a str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed_body: Option<&'a serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoggedResponse<'a> {
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed_body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_body: Option<&'a str>,
}

/// A shared sink for request and response records.
pub struct RequestLog {
    out: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for RequestLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLog").finish_non_exhaustive()
    }
}

impl RequestLog {
    /// Creates (or truncates) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::from_writer(File::create(path)?))
    }

    /// Wraps an arbitrary writer.
    #[must_use]
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    /// Records an outgoing request.
    pub fn request(&self, method: &str, url: &str, body: Option<&serde_json::Value>) {
        self.write(&LoggedRequest {
            method,
            url,
            parsed_body: body,
        });
    }

    /// Records a received response from its raw body text.
    pub fn response(&self, status_code: u16, body_text: &str) {
        let record = if body_text.is_empty() {
            LoggedResponse {
                status_code,
                parsed_body: None,
                raw_body: None,
            }
        } else {
            match serde_json::from_str(body_text) {
                Ok(parsed) => LoggedResponse {
                    status_code,
                    parsed_body: Some(parsed),
                    raw_body: None,
                },
                Err(_) => LoggedResponse {
                    status_code,
                    parsed_body: None,
                    raw_body: Some(body_text),
                },
            }
        };
        self.write(&record);
    }

    fn write<T: Serialize>(&self, record: &T) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        let result = serde_json::to_writer_pretty(&mut *out, record)
            .map_err(io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to write request log entry: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_records(path: &Path) -> Vec<serde_json::Value> {
        let contents = std::fs::read_to_string(path).unwrap();
        serde_json::Deserializer::from_str(&contents)
            .into_iter::<serde_json::Value>()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn test_request_and_response_records_are_written_in_order() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let log = RequestLog::create(file.path()).unwrap();

        log.request(
            "POST",
            "https://example.test/content/v2.1/1/products",
            Some(&json!({"offerId": "book123"})),
        );
        log.response(200, r#"{"id": "online:en:US:book123"}"#);

        let records = read_records(file.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["method"], "POST");
        assert_eq!(records[0]["parsedBody"]["offerId"], "book123");
        assert_eq!(records[1]["statusCode"], 200);
        assert_eq!(records[1]["parsedBody"]["id"], "online:en:US:book123");
    }

    #[test]
    fn test_non_json_response_is_logged_raw() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let log = RequestLog::create(file.path()).unwrap();

        log.request("GET", "https://example.test/", None);
        log.response(502, "Bad Gateway");

        let records = read_records(file.path());
        assert!(records[0].get("parsedBody").is_none());
        assert_eq!(records[1]["rawBody"], "Bad Gateway");
        assert!(records[1].get("parsedBody").is_none());
    }
}
