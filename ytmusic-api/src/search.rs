//! Search API.
//!
//! Endpoint: `POST /youtubei/v1/search`
//!
//! Request: `{ "query": "...", "params": "<filter blob>" }`
//!
//! Response (abridged):
//! ```json
//! { "contents": { "tabbedSearchResultsRenderer": { "tabs": [{ "tabRenderer": { "content":
//!   { "sectionListRenderer": { "contents": [
//!     { "musicShelfRenderer": { "contents": [ { "musicResponsiveListItemRenderer": { ... } } ] } }
//!   ] } } } }] } } }
//! ```
//!
//! Filtered searches return a single shelf; older client versions skip the
//! tab wrapper, which is why shelves are located by key.

use crate::client::YtMusicClient;
use crate::error::Result;
use crate::parsing::{find_all, playlist_list_items, track_items};
use crate::types::SearchFilter;
use serde_json::{Value, json};

impl YtMusicClient {
    /// Search the catalogue. Works without authentication.
    ///
    /// Track records: `{ resultType, videoId, title, artists, album?, duration?, thumbnails }`.
    /// Playlist records: `{ resultType, browseId, title, author, itemCount?, thumbnails }`.
    ///
    /// At most `limit` records are returned; only the first result page is read.
    pub fn search(&self, query: &str, filter: SearchFilter, limit: usize) -> Result<Vec<Value>> {
        let data = json!({ "query": query, "params": filter.params() });
        let resp = self.request("search", data)?;

        let result_type = match filter {
            SearchFilter::Songs => "song",
            SearchFilter::Videos => "video",
            SearchFilter::Playlists => "playlist",
        };

        let mut items: Vec<Value> = find_all(&resp, "musicShelfRenderer")
            .into_iter()
            .flat_map(|shelf| {
                if filter.yields_tracks() {
                    track_items(shelf)
                } else {
                    playlist_list_items(shelf)
                }
            })
            .collect();
        items.truncate(limit);
        for item in &mut items {
            item["resultType"] = result_type.into();
        }

        tracing::debug!(%query, %filter, count = items.len(), "search finished");
        Ok(items)
    }
}
