//! The JSON object printed on stdout.
//!
//! Success: `{"success": true, "tracks": [...]}` or `{"success": true, "playlists": [...]}`
//! Failure: `{"success": false, "error": "...", "traceback": "..."}`

use crate::dispatch::Payload;
use crate::normalize::{BridgePlaylist, BridgeTrack};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Underlying causes, outermost first, one per line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<BridgeTrack>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlists: Option<Vec<BridgePlaylist>>,
}

impl Envelope {
    pub fn ok(payload: Payload) -> Self {
        let (tracks, playlists) = match payload {
            Payload::Tracks(t) => (Some(t), None),
            Payload::Playlists(p) => (None, Some(p)),
        };
        Self {
            success: true,
            error: None,
            traceback: None,
            tracks,
            playlists,
        }
    }

    pub fn err(error: &anyhow::Error) -> Self {
        let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
        Self {
            success: false,
            error: Some(error.to_string()),
            traceback: (!causes.is_empty()).then(|| causes.join("\n")),
            tracks: None,
            playlists: None,
        }
    }

    pub fn from_result(result: anyhow::Result<Payload>) -> Self {
        match result {
            Ok(payload) => Self::ok(payload),
            Err(e) => Self::err(&e),
        }
    }
}
