//! Error types for the YouTube Music API client.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to YouTube Music.
#[derive(Debug, Error)]
pub enum YtMusicError {
    /// HTTP transport error (connection refused, timeout, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx HTTP status.
    #[error("HTTP {status} from {endpoint}")]
    Status {
        /// InnerTube endpoint path, e.g. `browse`.
        endpoint: String,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The response body carried an InnerTube `error` object.
    ///
    /// Common codes:
    /// - `401`: credentials rejected or expired
    /// - `400`: malformed request (usually a stale `clientVersion`)
    #[error("API error (code {code}): {message}")]
    Api {
        /// InnerTube error code.
        code: i64,
        /// Human-readable error message from the API.
        message: String,
    },

    /// The call needs a signed-in account but the client is anonymous.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A credential file exists but cannot be used.
    #[error("invalid credentials in {}: {reason}", path.display())]
    Credentials {
        /// File the credential was read from.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// File I/O error (credential read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON (response body or credential file).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors (e.g. missing home directory).
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for `Result<T, YtMusicError>`.
pub type Result<T> = std::result::Result<T, YtMusicError>;
