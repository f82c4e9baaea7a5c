//! Request-side types for the YouTube Music API.
//!
//! Responses are deliberately *not* typed here: endpoints return
//! [`serde_json::Value`] records whose shapes vary by endpoint (see the
//! method docs on [`YtMusicClient`](crate::YtMusicClient)).

use std::fmt;

/// Search category, mapped to the InnerTube `params` blob.
///
/// | Variant     | Results                        |
/// |-------------|--------------------------------|
/// | `Songs`     | Official audio tracks          |
/// | `Videos`    | Music videos and uploads       |
/// | `Playlists` | Community / featured playlists |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    #[default]
    Songs,
    Videos,
    Playlists,
}

impl SearchFilter {
    /// Value of the `params` field in the search request body.
    pub fn params(self) -> &'static str {
        match self {
            Self::Songs => "EgWKAQIIAWoMEA4QChADEAQQCRAF",
            Self::Videos => "EgWKAQIQAWoMEA4QChADEAQQCRAF",
            Self::Playlists => "EgeKAQQoAEABagwQDhAKEAMQBBAJEAU%3D",
        }
    }

    /// Whether results are tracks (as opposed to playlists).
    pub fn yields_tracks(self) -> bool {
        !matches!(self, Self::Playlists)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Songs => "songs",
            Self::Videos => "videos",
            Self::Playlists => "playlists",
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pseudo playlist ID for the signed-in user's liked songs.
pub const LIKED_SONGS_ID: &str = "LM";

/// Pseudo playlist ID the bridge uses for listening history.
pub const HISTORY_ID: &str = "HISTORY";
