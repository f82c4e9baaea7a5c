//! Library and history APIs. Both require a signed-in account.
//!
//! ## `library_playlists`: `POST /youtubei/v1/browse` with `browseId = FEmusic_liked_playlists`
//!
//! Playlists arrive as a grid of `musicTwoRowItemRenderer` tiles. The first
//! tile is the "New playlist" button and has no browse target.
//!
//! ## `history`: `POST /youtubei/v1/browse` with `browseId = FEmusic_history`
//!
//! One `musicShelfRenderer` per period ("Today", "Yesterday", ...), each holding
//! `musicResponsiveListItemRenderer` rows.

use crate::client::YtMusicClient;
use crate::error::Result;
use crate::parsing::{playlist_tiles, track_items};
use serde_json::{Value, json};

impl YtMusicClient {
    /// Playlists saved in the user's library.
    ///
    /// Records: `{ playlistId, title, description, author: [{name, id}], count?, thumbnails }`,
    /// where `count` is display text such as `"25 songs"`.
    pub fn library_playlists(&self, limit: usize) -> Result<Vec<Value>> {
        self.require_auth()?;
        let resp = self.request("browse", json!({ "browseId": "FEmusic_liked_playlists" }))?;
        let mut playlists = playlist_tiles(&resp);
        playlists.truncate(limit);
        tracing::debug!(count = playlists.len(), "library playlists fetched");
        Ok(playlists)
    }

    /// Recently played tracks, newest first.
    pub fn history(&self) -> Result<Vec<Value>> {
        self.require_auth()?;
        let resp = self.request("browse", json!({ "browseId": "FEmusic_history" }))?;
        let tracks = track_items(&resp);
        tracing::debug!(count = tracks.len(), "history fetched");
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::{BrowserHeaders, Credentials};
    use crate::client::{ClientConfig, YtMusicClient};
    use crate::error::YtMusicError;
    use crate::parsing::fixtures::{playlist_tile, song_row};
    use httpmock::prelude::*;
    use serde_json::json;

    fn signed_in(server: &MockServer) -> YtMusicClient {
        let config = ClientConfig {
            base_url: server.base_url(),
            ..ClientConfig::default()
        };
        let headers = BrowserHeaders::parse_raw("cookie: SAPISID=abc");
        YtMusicClient::with_config(Credentials::Browser(headers), config).unwrap()
    }

    #[test]
    fn anonymous_library_is_rejected_before_request() {
        let client = YtMusicClient::new(Credentials::Anonymous).unwrap();
        assert!(matches!(
            client.library_playlists(10),
            Err(YtMusicError::NotAuthenticated)
        ));
        assert!(matches!(client.history(), Err(YtMusicError::NotAuthenticated)));
    }

    #[test]
    fn library_playlists_parses_grid() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/browse")
                .body_contains("FEmusic_liked_playlists");
            then.status(200).json_body(json!({ "contents": { "gridRenderer": { "items": [
                { "musicTwoRowItemRenderer": { "title": { "runs": [{ "text": "New playlist" }] } } },
                playlist_tile("VLPL1", "Road trip", "12 songs"),
                playlist_tile("LM", "Liked music", "Auto playlist"),
            ]}}}));
        });

        let playlists = signed_in(&server).library_playlists(25).unwrap();
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0]["playlistId"], "PL1");
        assert_eq!(playlists[1]["playlistId"], "LM");
        assert!(playlists[1].get("count").is_none());
    }

    #[test]
    fn history_collects_all_shelves() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/browse").body_contains("FEmusic_history");
            then.status(200).json_body(json!({ "contents": [
                { "musicShelfRenderer": { "title": { "runs": [{ "text": "Today" }] },
                  "contents": [song_row("a", "A", "X", "1:00")] } },
                { "musicShelfRenderer": { "title": { "runs": [{ "text": "Yesterday" }] },
                  "contents": [song_row("b", "B", "Y", "2:00")] } }
            ]}));
        });

        let history = signed_in(&server).history().unwrap();
        let ids: Vec<_> = history.iter().map(|t| t["videoId"].as_str().unwrap()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
