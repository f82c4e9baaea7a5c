//! Credential resolution.
//!
//! Tiers are tried in order and the first usable one wins:
//!
//! 1. OAuth token file
//! 2. Browser headers file
//! 3. Explicit `__Secure-3PSID` cookie
//! 4. Anonymous
//!
//! A missing file is skipped quietly; a file that exists but cannot be used
//! is logged as a warning before falling through.

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use ytmusic_api::auth::{self as creds, BrowserHeaders, Credentials, OAuthToken};

/// Where to look for credentials.
#[derive(Debug, Clone)]
pub struct AuthSources {
    pub oauth_file: PathBuf,
    pub headers_file: PathBuf,
    pub cookie: Option<String>,
}

impl AuthSources {
    /// Fill unset paths with the defaults under `~/.ytmusic`.
    pub fn new(
        oauth_file: Option<PathBuf>,
        headers_file: Option<PathBuf>,
        cookie: Option<String>,
    ) -> Result<Self> {
        let oauth_file = match oauth_file {
            Some(p) => p,
            None => creds::default_oauth_path().context("no default OAuth file location")?,
        };
        let headers_file = match headers_file {
            Some(p) => p,
            None => creds::default_headers_path().context("no default headers file location")?,
        };
        Ok(Self {
            oauth_file,
            headers_file,
            cookie,
        })
    }
}

/// Which tier produced the credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    OAuth,
    Browser,
    Cookie,
    Unauthenticated,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OAuth => "oauth",
            Self::Browser => "browser",
            Self::Cookie => "cookie",
            Self::Unauthenticated => "unauthenticated",
        })
    }
}

#[derive(Debug)]
pub struct Resolved {
    pub credentials: Credentials,
    pub mode: AuthMode,
}

/// Pick credentials from `sources`. `now` is Unix seconds, used for OAuth
/// expiry. Never fails: the last tier is anonymous access.
pub fn resolve(sources: &AuthSources, now: i64) -> Resolved {
    match oauth_tier(&sources.oauth_file, now) {
        Ok(Some(token)) => {
            tracing::info!(path = %sources.oauth_file.display(), "authenticated with OAuth token");
            return Resolved {
                credentials: Credentials::OAuth(token),
                mode: AuthMode::OAuth,
            };
        }
        Ok(None) => tracing::debug!(path = %sources.oauth_file.display(), "no OAuth file"),
        Err(e) => tracing::warn!("OAuth credentials unusable: {e:#}"),
    }

    match headers_tier(&sources.headers_file) {
        Ok(Some(headers)) => {
            tracing::info!(path = %sources.headers_file.display(), "authenticated with browser headers");
            return Resolved {
                credentials: Credentials::Browser(headers),
                mode: AuthMode::Browser,
            };
        }
        Ok(None) => tracing::debug!(path = %sources.headers_file.display(), "no headers file"),
        Err(e) => tracing::warn!("browser headers unusable: {e:#}"),
    }

    if let Some(cookie) = sources.cookie.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        tracing::info!("authenticated with cookie");
        return Resolved {
            credentials: Credentials::Cookie(cookie.to_owned()),
            mode: AuthMode::Cookie,
        };
    }

    tracing::warn!("running without authentication, library commands will fail");
    Resolved {
        credentials: Credentials::Anonymous,
        mode: AuthMode::Unauthenticated,
    }
}

fn oauth_tier(path: &Path, now: i64) -> Result<Option<OAuthToken>> {
    if !path.exists() {
        return Ok(None);
    }
    let token = OAuthToken::load(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    if token.is_expired_at(now) {
        anyhow::bail!("token in {} expired", path.display());
    }
    Ok(Some(token))
}

fn headers_tier(path: &Path) -> Result<Option<BrowserHeaders>> {
    if !path.exists() {
        return Ok(None);
    }
    let headers = BrowserHeaders::load(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    if headers.sapisid().is_none() {
        tracing::warn!(path = %path.display(), "cookie has no SAPISID, requests will be unsigned");
    }
    Ok(Some(headers))
}
