//! Command execution against a [`MusicProvider`].

use crate::normalize::{BridgePlaylist, BridgeTrack, normalize_playlists, normalize_tracks};
use anyhow::{Context, Result};
use serde_json::Value;
use ytmusic_api::types::{HISTORY_ID, LIKED_SONGS_ID};
use ytmusic_api::{MusicProvider, SearchFilter, YtMusicError};

const FALLBACK_QUERY: &str = "top hits";
const FALLBACK_LIMIT: usize = 5;

/// One bridge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search {
        query: String,
        filter: SearchFilter,
        limit: usize,
    },
    Playlists {
        limit: usize,
    },
    PlaylistTracks {
        playlist_id: String,
        limit: usize,
    },
    LikedSongs {
        limit: usize,
    },
}

/// Normalized result of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Tracks(Vec<BridgeTrack>),
    Playlists(Vec<BridgePlaylist>),
}

pub fn dispatch<P: MusicProvider + ?Sized>(provider: &P, request: &Request) -> Result<Payload> {
    match request {
        Request::Search {
            query,
            filter,
            limit,
        } => search(provider, query, *filter, *limit),
        Request::Playlists { limit } => playlists(provider, *limit).map(Payload::Playlists),
        Request::PlaylistTracks { playlist_id, limit } => {
            playlist_tracks(provider, playlist_id, *limit).map(Payload::Tracks)
        }
        Request::LikedSongs { limit } => liked_songs(provider, *limit).map(Payload::Tracks),
    }
}

fn require_auth<P: MusicProvider + ?Sized>(provider: &P) -> Result<()> {
    if provider.is_authenticated() {
        Ok(())
    } else {
        Err(YtMusicError::NotAuthenticated.into())
    }
}

fn search<P: MusicProvider + ?Sized>(
    provider: &P,
    query: &str,
    filter: SearchFilter,
    limit: usize,
) -> Result<Payload> {
    if query.trim().is_empty() {
        anyhow::bail!("search query is empty");
    }
    tracing::info!(%query, %filter, "searching");
    let records = provider
        .search(query, filter, limit)
        .with_context(|| format!("search for {query:?} failed"))?;
    if records.is_empty() {
        tracing::warn!(%query, "no results");
    }

    Ok(if filter.yields_tracks() {
        Payload::Tracks(truncated(normalize_tracks(&records), limit))
    } else {
        Payload::Playlists(truncated(normalize_playlists(&records), limit))
    })
}

/// Library playlists, falling back to a history pseudo-playlist and then to
/// public playlists when the library is empty.
fn playlists<P: MusicProvider + ?Sized>(provider: &P, limit: usize) -> Result<Vec<BridgePlaylist>> {
    require_auth(provider)?;

    let library = provider
        .library_playlists(limit)
        .context("failed to fetch library playlists")?;
    if !library.is_empty() {
        tracing::info!(count = library.len(), "found library playlists");
        return Ok(truncated(normalize_playlists(&library), limit));
    }

    tracing::info!("library is empty, trying history");
    match provider.history() {
        Ok(history) if !history.is_empty() => {
            return Ok(truncated(vec![history_playlist(history.len())], limit));
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("could not fetch history: {e}"),
    }

    tracing::info!(query = FALLBACK_QUERY, "trying public playlists");
    match provider.search(FALLBACK_QUERY, SearchFilter::Playlists, FALLBACK_LIMIT) {
        Ok(found) if !found.is_empty() => {
            return Ok(truncated(normalize_playlists(&found), limit));
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("could not search playlists: {e}"),
    }

    tracing::warn!("no playlists found");
    Ok(Vec::new())
}

fn history_playlist(track_count: usize) -> BridgePlaylist {
    BridgePlaylist {
        id: HISTORY_ID.to_owned(),
        title: "Recently Played".to_owned(),
        description: "Your recently played tracks".to_owned(),
        track_count: track_count as u64,
        author: String::new(),
        thumbnail: String::new(),
    }
}

fn playlist_tracks<P: MusicProvider + ?Sized>(
    provider: &P,
    playlist_id: &str,
    limit: usize,
) -> Result<Vec<BridgeTrack>> {
    require_auth(provider)?;
    tracing::info!(%playlist_id, "fetching playlist tracks");

    let records = match playlist_id {
        HISTORY_ID => provider.history().context("failed to fetch history")?,
        LIKED_SONGS_ID => {
            track_list(provider.liked_songs(limit).context("failed to fetch liked songs")?)
        }
        id => track_list(
            provider
                .playlist(id, limit)
                .with_context(|| format!("failed to fetch playlist {id}"))?,
        ),
    };
    if records.is_empty() {
        tracing::warn!(%playlist_id, "no tracks found");
    }

    let tracks = truncated(normalize_tracks(&records), limit);
    tracing::info!(count = tracks.len(), "fetched tracks");
    Ok(tracks)
}

fn liked_songs<P: MusicProvider + ?Sized>(provider: &P, limit: usize) -> Result<Vec<BridgeTrack>> {
    require_auth(provider)?;
    let result = provider
        .liked_songs(limit)
        .context("failed to fetch liked songs")?;
    Ok(truncated(normalize_tracks(&track_list(result)), limit))
}

/// Unwrap `{"tracks": [...]}`; a bare array is already the list.
fn track_list(result: Value) -> Vec<Value> {
    match result {
        Value::Array(tracks) => tracks,
        Value::Object(mut obj) => match obj.remove("tracks") {
            Some(Value::Array(tracks)) => tracks,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn truncated<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.truncate(limit);
    items
}
