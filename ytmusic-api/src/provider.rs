//! The capability set the bridge consumes.
//!
//! [`YtMusicClient`] is the production implementation; the trait exists so
//! callers can be exercised against canned records.

use crate::client::YtMusicClient;
use crate::error::Result;
use crate::types::SearchFilter;
use serde_json::Value;

/// Read-only music catalogue and library access.
///
/// Record shapes are loose on purpose: implementations may return fields
/// under different names and types (see the endpoint docs on
/// [`YtMusicClient`]).
pub trait MusicProvider {
    /// Whether calls act on behalf of a signed-in user.
    fn is_authenticated(&self) -> bool;

    fn search(&self, query: &str, filter: SearchFilter, limit: usize) -> Result<Vec<Value>>;

    fn library_playlists(&self, limit: usize) -> Result<Vec<Value>>;

    /// Either an object with a `tracks` array or a bare array of tracks.
    fn playlist(&self, playlist_id: &str, limit: usize) -> Result<Value>;

    /// Same shape as [`playlist`](Self::playlist).
    fn liked_songs(&self, limit: usize) -> Result<Value>;

    fn history(&self) -> Result<Vec<Value>>;
}

impl MusicProvider for YtMusicClient {
    fn is_authenticated(&self) -> bool {
        YtMusicClient::is_authenticated(self)
    }

    fn search(&self, query: &str, filter: SearchFilter, limit: usize) -> Result<Vec<Value>> {
        YtMusicClient::search(self, query, filter, limit)
    }

    fn library_playlists(&self, limit: usize) -> Result<Vec<Value>> {
        YtMusicClient::library_playlists(self, limit)
    }

    fn playlist(&self, playlist_id: &str, limit: usize) -> Result<Value> {
        YtMusicClient::playlist(self, playlist_id, limit)
    }

    fn liked_songs(&self, limit: usize) -> Result<Value> {
        YtMusicClient::liked_songs(self, limit)
    }

    fn history(&self) -> Result<Vec<Value>> {
        YtMusicClient::history(self)
    }
}
