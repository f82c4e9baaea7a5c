//! Playlist API.
//!
//! Endpoint: `POST /youtubei/v1/browse` with `browseId = "VL" + playlist id`
//!
//! Response (abridged):
//! ```json
//! { "contents": { "twoColumnBrowseResultsRenderer": {
//!     "tabs": [{ ... "musicResponsiveHeaderRenderer": { "title": { "runs": [{ "text": "Mix" }] } } }],
//!     "secondaryContents": { "sectionListRenderer": { "contents": [
//!       { "musicPlaylistShelfRenderer": { "contents": [ { "musicResponsiveListItemRenderer": { ... } } ] } }
//!     ] } } } } }
//! ```
//!
//! Only the first page (about 100 rows) is read; continuations are not followed.

use crate::client::YtMusicClient;
use crate::error::Result;
use crate::parsing::{find_first, text, track_items};
use crate::types::LIKED_SONGS_ID;
use serde_json::{Value, json};

const HEADER_RENDERERS: &[&str] = &[
    "musicResponsiveHeaderRenderer",
    "musicEditablePlaylistDetailHeaderRenderer",
    "musicDetailHeaderRenderer",
];

impl YtMusicClient {
    /// Playlist metadata and tracks.
    ///
    /// Returns `{ id, title, trackCount, tracks: [...] }` with track records
    /// shaped as in [`search`](Self::search). Public playlists do not need
    /// authentication.
    pub fn playlist(&self, playlist_id: &str, limit: usize) -> Result<Value> {
        let browse_id = if playlist_id.starts_with("VL") {
            playlist_id.to_owned()
        } else {
            format!("VL{playlist_id}")
        };
        let resp = self.request("browse", json!({ "browseId": browse_id }))?;

        let mut tracks = find_first(&resp, "musicPlaylistShelfRenderer")
            .map_or_else(|| track_items(&resp), track_items);
        tracks.truncate(limit);

        let title = HEADER_RENDERERS
            .iter()
            .find_map(|key| find_first(&resp, key))
            .and_then(|header| text(&header["title"]));

        tracing::debug!(%playlist_id, count = tracks.len(), "playlist fetched");
        Ok(json!({
            "id": playlist_id,
            "title": title,
            "trackCount": tracks.len(),
            "tracks": tracks,
        }))
    }

    /// The user's liked songs, shaped like [`playlist`](Self::playlist).
    pub fn liked_songs(&self, limit: usize) -> Result<Value> {
        self.require_auth()?;
        self.playlist(LIKED_SONGS_ID, limit)
    }
}
