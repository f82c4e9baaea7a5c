//! Loading of stored credentials.
//!
//! Credential files live in `~/.ytmusic/` by default:
//!
//! - `oauth.json`: token written by an OAuth device flow:
//!
//!   ```json
//!   { "access_token": "ya29...", "refresh_token": "1//...", "token_type": "Bearer",
//!     "expires_at": 1700003600, "scope": "https://www.googleapis.com/auth/youtube" }
//!   ```
//!
//! - `headers_auth.json`: request headers copied from a signed-in browser
//!   session on `music.youtube.com`, either as a JSON object or as the raw
//!   `name: value` lines the browser dev tools produce. Only `cookie` is
//!   mandatory; the `SAPISID` cookie inside it is used to sign requests.
//!
//! Loading never touches the network; a credential that loads may still be
//! rejected by the server.

use crate::crypto::cookie_value;
use crate::error::{Result, YtMusicError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding credential files (`~/.ytmusic`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| YtMusicError::Other("cannot determine home directory".into()))?;
    Ok(home.join(".ytmusic"))
}

/// Default OAuth token file: `~/.ytmusic/oauth.json`.
pub fn default_oauth_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("oauth.json"))
}

/// Default browser headers file: `~/.ytmusic/headers_auth.json`.
pub fn default_headers_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("headers_auth.json"))
}

/// Credentials a [`YtMusicClient`](crate::YtMusicClient) signs requests with.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// OAuth bearer token.
    OAuth(OAuthToken),
    /// Full browser header set (cookie plus optional extras).
    Browser(BrowserHeaders),
    /// Only the `__Secure-3PSID` cookie value.
    Cookie(String),
    /// No account; search works, library endpoints do not.
    #[default]
    Anonymous,
}

impl Credentials {
    /// Whether requests made with these credentials act on behalf of a user.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}

/// OAuth token as stored in `oauth.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthToken {
    /// Bearer token sent in `Authorization`.
    pub access_token: String,
    /// Long-lived refresh token. Not used by this client.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token type, normally `Bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Expiry as Unix seconds. Absent means "unknown", treated as valid.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}

impl OAuthToken {
    /// Load and validate an OAuth token file.
    ///
    /// # Errors
    ///
    /// - [`YtMusicError::Io`]: file missing or unreadable
    /// - [`YtMusicError::Json`]: not valid JSON / wrong shape
    /// - [`YtMusicError::Credentials`]: empty `access_token`
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let token: Self = serde_json::from_str(&data)?;
        if token.access_token.trim().is_empty() {
            return Err(YtMusicError::Credentials {
                path: path.to_owned(),
                reason: "empty access_token".into(),
            });
        }
        Ok(token)
    }

    /// Whether the token is past its expiry at Unix time `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Browser request headers, keyed by lowercase header name.
#[derive(Debug, Clone, Default)]
pub struct BrowserHeaders {
    headers: BTreeMap<String, String>,
}

impl BrowserHeaders {
    /// Load a headers file in either JSON or raw `name: value` form.
    ///
    /// # Errors
    ///
    /// - [`YtMusicError::Io`]: file missing or unreadable
    /// - [`YtMusicError::Json`]: looks like JSON but does not parse
    /// - [`YtMusicError::Credentials`]: no `cookie` header
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let headers = if data.trim_start().starts_with('{') {
            Self::from_json(&data)?
        } else {
            Self::parse_raw(&data)
        };
        if headers.cookie().is_none() {
            return Err(YtMusicError::Credentials {
                path: path.to_owned(),
                reason: "no cookie header".into(),
            });
        }
        Ok(headers)
    }

    /// Parse a JSON object of header name → value. Non-string values are
    /// stringified; `null` entries are dropped.
    pub fn from_json(data: &str) -> Result<Self> {
        let map: BTreeMap<String, Value> = serde_json::from_str(data)?;
        let headers = map
            .into_iter()
            .filter_map(|(k, v)| {
                let v = match v {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((k.to_ascii_lowercase(), v))
            })
            .collect();
        Ok(Self { headers })
    }

    /// Parse raw `name: value` lines as copied from browser dev tools.
    ///
    /// HTTP/2 pseudo-headers (`:authority`, `:path`, ...) and lines without a
    /// colon are skipped.
    pub fn parse_raw(data: &str) -> Self {
        let headers = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(':'))
            .filter_map(|line| {
                let (name, value) = line.split_once(':')?;
                Some((name.trim().to_ascii_lowercase(), value.trim().to_owned()))
            })
            .collect();
        Self { headers }
    }

    /// Look up a header by (case-insensitive) name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The `cookie` header, if present and non-empty.
    pub fn cookie(&self) -> Option<&str> {
        self.get("cookie")
    }

    /// The cookie used for `SAPISIDHASH` signing.
    pub fn sapisid(&self) -> Option<&str> {
        let cookie = self.cookie()?;
        cookie_value(cookie, "__Secure-3PAPISID").or_else(|| cookie_value(cookie, "SAPISID"))
    }

    /// Iterate over all `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn oauth_load_and_expiry() {
        let f = write_temp(r#"{"access_token":"ya29.tok","expires_at":1000,"refresh_token":"r"}"#);
        let token = OAuthToken::load(f.path()).unwrap();
        assert_eq!(token.authorization(), "Bearer ya29.tok");
        assert!(token.is_expired_at(1000));
        assert!(!token.is_expired_at(999));
    }

    #[test]
    fn oauth_without_expiry_never_expires() {
        let f = write_temp(r#"{"access_token":"t","token_type":"bearer"}"#);
        let token = OAuthToken::load(f.path()).unwrap();
        assert!(!token.is_expired_at(i64::MAX));
        assert_eq!(token.authorization(), "bearer t");
    }

    #[test]
    fn oauth_rejects_empty_token() {
        let f = write_temp(r#"{"access_token":"  "}"#);
        let err = OAuthToken::load(f.path()).unwrap_err();
        assert!(matches!(err, YtMusicError::Credentials { .. }));
    }

    #[test]
    fn oauth_rejects_garbage() {
        let f = write_temp("not json");
        assert!(matches!(OAuthToken::load(f.path()), Err(YtMusicError::Json(_))));
    }

    #[test]
    fn headers_from_json() {
        let f = write_temp(
            r#"{"Cookie":"SAPISID=abc; HSID=x","X-Goog-AuthUser":0,"Authorization":null}"#,
        );
        let headers = BrowserHeaders::load(f.path()).unwrap();
        assert_eq!(headers.cookie(), Some("SAPISID=abc; HSID=x"));
        assert_eq!(headers.get("x-goog-authuser"), Some("0"));
        assert_eq!(headers.get("authorization"), None);
        assert_eq!(headers.sapisid(), Some("abc"));
    }

    #[test]
    fn headers_from_raw_text() {
        let raw = ":authority: music.youtube.com\n\
                   accept: */*\n\
                   cookie: __Secure-3PAPISID=sec; SAPISID=plain\n\
                   x-goog-authuser: 1\n";
        let f = write_temp(raw);
        let headers = BrowserHeaders::load(f.path()).unwrap();
        assert_eq!(headers.get("authority"), None);
        assert_eq!(headers.get("X-Goog-AuthUser"), Some("1"));
        assert_eq!(headers.sapisid(), Some("sec"));
    }

    #[test]
    fn headers_require_cookie() {
        let f = write_temp(r#"{"accept":"*/*"}"#);
        let err = BrowserHeaders::load(f.path()).unwrap_err();
        assert!(matches!(err, YtMusicError::Credentials { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BrowserHeaders::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, YtMusicError::Io(_)));
    }
}
