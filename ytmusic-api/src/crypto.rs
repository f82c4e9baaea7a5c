//! `SAPISIDHASH` authorization for browser-cookie sessions.
//!
//! Flow: `"{timestamp} {SAPISID} {origin}"` → SHA-1 → hex = digest
//! Header: `Authorization: SAPISIDHASH {timestamp}_{digest}`

use sha1::{Digest, Sha1};

/// Build the `Authorization` header value for a cookie session.
///
/// `timestamp` is Unix seconds; the server rejects hashes that drift too far
/// from its own clock.
pub fn sapisid_hash(sapisid: &str, origin: &str, timestamp: i64) -> String {
    let digest = Sha1::digest(format!("{timestamp} {sapisid} {origin}").as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("SAPISIDHASH {timestamp}_{hex}")
}

/// Extract the value of cookie `name` from a `Cookie` header string.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}
