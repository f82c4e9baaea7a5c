//! HTTP client for the YouTube Music InnerTube API.
//!
//! Every call is a JSON `POST` to `https://music.youtube.com/youtubei/v1/{endpoint}`
//! whose body carries a `context` object identifying the web client:
//!
//! ```json
//! {
//!   "context": { "client": { "clientName": "WEB_REMIX", "clientVersion": "1.20240101.01.00",
//!                            "hl": "en", "gl": "US" }, "user": {} },
//!   ...endpoint-specific fields...
//! }
//! ```
//!
//! Failures come back either as a non-2xx status or as a 200 with an
//! `error: { code, message }` object; both are mapped to [`YtMusicError`].

use crate::auth::Credentials;
use crate::crypto::sapisid_hash;
use crate::error::{Result, YtMusicError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};
use std::time::Duration;

const BASE_URL: &str = "https://music.youtube.com/youtubei/v1";
const ORIGIN: &str = "https://music.youtube.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) \
    Gecko/20100101 Firefox/128.0";

// Headers from a browser capture that must not be replayed verbatim.
const SKIPPED_BROWSER_HEADERS: &[&str] = &[
    "host",
    "content-length",
    "accept-encoding",
    "connection",
    "authorization",
];

/// Tunables for [`YtMusicClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// InnerTube base URL without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Interface language (`hl`).
    pub language: String,
    /// Content region (`gl`).
    pub location: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
            language: "en".to_owned(),
            location: "US".to_owned(),
        }
    }
}

/// Blocking client for YouTube Music.
///
/// Holds a [`reqwest::blocking::Client`] and the [`Credentials`] used to sign
/// each request. Endpoint methods live in `search`, `library` and `playlist`
/// as `impl YtMusicClient` blocks.
pub struct YtMusicClient {
    http: Client,
    config: ClientConfig,
    credentials: Credentials,
}

impl YtMusicClient {
    /// Create a client against the public endpoint.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with explicit settings (base URL override for tests).
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// Fail with [`YtMusicError::NotAuthenticated`] for anonymous clients.
    pub(crate) fn require_auth(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(YtMusicError::NotAuthenticated)
        }
    }

    /// Send an InnerTube request.
    ///
    /// `endpoint` is the path after `/youtubei/v1/`, e.g. `browse`.
    /// `body` must be a JSON object; the `context` field is filled in here.
    pub fn request(&self, endpoint: &str, mut body: Value) -> Result<Value> {
        if let Some(obj) = body.as_object_mut() {
            obj.insert("context".into(), self.context());
        }
        let url = format!(
            "{}/{endpoint}?alt=json&prettyPrint=false",
            self.config.base_url
        );
        tracing::debug!(%endpoint, "sending InnerTube request");

        let resp = self
            .http
            .post(&url)
            .headers(self.auth_headers())
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(YtMusicError::Status {
                endpoint: endpoint.to_owned(),
                status: status.as_u16(),
            });
        }

        let json: Value = resp.json()?;
        if let Some(err) = json.get("error").filter(|e| e.is_object()) {
            return Err(YtMusicError::Api {
                code: err["code"].as_i64().unwrap_or(0),
                message: err["message"]
                    .as_str()
                    .unwrap_or("unknown error")
                    .to_owned(),
            });
        }
        Ok(json)
    }

    fn context(&self) -> Value {
        let version = format!("1.{}.01.00", chrono::Utc::now().format("%Y%m%d"));
        json!({
            "client": {
                "clientName": "WEB_REMIX",
                "clientVersion": version,
                "hl": self.config.language,
                "gl": self.config.location,
            },
            "user": {},
        })
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("origin", HeaderValue::from_static(ORIGIN));
        headers.insert("x-origin", HeaderValue::from_static(ORIGIN));
        headers.insert("x-goog-authuser", HeaderValue::from_static("0"));

        match &self.credentials {
            Credentials::OAuth(token) => {
                insert_header(&mut headers, "authorization", &token.authorization());
            }
            Credentials::Browser(browser) => {
                for (name, value) in browser.iter() {
                    if !SKIPPED_BROWSER_HEADERS.contains(&name) {
                        insert_header(&mut headers, name, value);
                    }
                }
                if let Some(sapisid) = browser.sapisid() {
                    let now = chrono::Utc::now().timestamp();
                    insert_header(&mut headers, "authorization", &sapisid_hash(sapisid, ORIGIN, now));
                }
            }
            Credentials::Cookie(secure_3psid) => {
                insert_header(&mut headers, "cookie", &format!("__Secure-3PSID={secure_3psid}"));
            }
            Credentials::Anonymous => {
                // consent cookie, skips the EU consent interstitial
                headers.insert("cookie", HeaderValue::from_static("SOCS=CAI"));
            }
        }
        headers
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::debug!(header = name, "skipping header with invalid name or value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BrowserHeaders;
    use httpmock::prelude::*;

    fn client(server: &MockServer, credentials: Credentials) -> YtMusicClient {
        let config = ClientConfig {
            base_url: server.base_url(),
            ..ClientConfig::default()
        };
        YtMusicClient::with_config(credentials, config).unwrap()
    }

    #[test]
    fn request_injects_context() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/browse")
                .query_param("alt", "json")
                .body_contains("\"clientName\":\"WEB_REMIX\"")
                .body_contains("\"browseId\":\"FEmusic_home\"");
            then.status(200).json_body(json!({ "contents": {} }));
        });

        let resp = client(&server, Credentials::Anonymous)
            .request("browse", json!({ "browseId": "FEmusic_home" }))
            .unwrap();
        mock.assert();
        assert!(resp["contents"].is_object());
    }

    #[test]
    fn anonymous_sends_consent_cookie() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/search").header("cookie", "SOCS=CAI");
            then.status(200).json_body(json!({}));
        });
        client(&server, Credentials::Anonymous)
            .request("search", json!({ "query": "x" }))
            .unwrap();
        mock.assert();
    }

    #[test]
    fn browser_credentials_are_signed() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/browse")
                .header("cookie", "SAPISID=abc")
                .header_exists("authorization")
                .header("x-goog-visitor-id", "visitor");
            then.status(200).json_body(json!({}));
        });
        let headers = BrowserHeaders::parse_raw(
            "cookie: SAPISID=abc\nx-goog-visitor-id: visitor\ncontent-length: 99\n",
        );
        client(&server, Credentials::Browser(headers))
            .request("browse", json!({}))
            .unwrap();
        mock.assert();
    }

    #[test]
    fn http_status_maps_to_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/browse");
            then.status(403);
        });
        let err = client(&server, Credentials::Anonymous)
            .request("browse", json!({}))
            .unwrap_err();
        assert!(matches!(err, YtMusicError::Status { status: 403, .. }));
    }

    #[test]
    fn api_error_object_maps_to_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/browse");
            then.status(200)
                .json_body(json!({ "error": { "code": 401, "message": "expired" } }));
        });
        let err = client(&server, Credentials::Anonymous)
            .request("browse", json!({}))
            .unwrap_err();
        match err {
            YtMusicError::Api { code, message } => {
                assert_eq!(code, 401);
                assert_eq!(message, "expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
